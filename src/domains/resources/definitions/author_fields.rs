//! Author fields reference.

use super::ResourceDefinition;

/// Fields accepted by the `fields` argument of `get_authors`.
pub struct AuthorFieldsResource;

impl ResourceDefinition for AuthorFieldsResource {
    const URI: &'static str = "semantic-scholar://fields/author";
    const NAME: &'static str = "Author Fields Reference";
    const DESCRIPTION: &'static str = "Complete list of available fields for author-related tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> String {
        AUTHOR_FIELDS.to_string()
    }
}

const AUTHOR_FIELDS: &str = r#"# Author Fields Reference

## Available Fields
- `authorId` - Unique author identifier
- `name` - Author's name
- `affiliations` - Institutional affiliations (array)
- `citationCount` - Total citation count across all papers
- `hIndex` - h-index metric
- `paperCount` - Number of papers published
- `url` - Author's Semantic Scholar profile URL
"#;
