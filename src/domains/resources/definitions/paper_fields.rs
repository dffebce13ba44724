//! Paper fields reference.

use super::ResourceDefinition;

/// Fields accepted by the `fields` argument of the paper tools.
pub struct PaperFieldsResource;

impl ResourceDefinition for PaperFieldsResource {
    const URI: &'static str = "semantic-scholar://fields/paper";
    const NAME: &'static str = "Paper Fields Reference";
    const DESCRIPTION: &'static str = "Complete list of available fields for paper-related tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> String {
        PAPER_FIELDS.to_string()
    }
}

const PAPER_FIELDS: &str = r#"# Paper Fields Reference

## Basic Fields
- `paperId` - Unique paper identifier
- `title` - Paper title
- `abstract` - Paper abstract
- `year` - Publication year
- `publicationDate` - Full publication date (YYYY-MM-DD)

## Author Information
- `authors` - List of authors (returns authorId and name by default)
- `authors.authorId` - Author's unique identifier
- `authors.name` - Author's name
- `authors.affiliations` - Author's institutional affiliations
- `authors.citationCount` - Author's total citation count
- `authors.hIndex` - Author's h-index

## Citation and Reference Data
- `citationCount` - Number of times this paper has been cited
- `referenceCount` - Number of references in this paper
- `citations` - List of papers that cite this paper
- `references` - List of papers referenced by this paper

## Publication Details
- `journal` - Journal information (name, volume, pages, etc.)
- `venue` - Publication venue
- `publicationTypes` - Types of publication (e.g., JournalArticle, Conference)
- `fieldsOfStudy` - Academic fields (e.g., Computer Science, Medicine)
- `s2FieldsOfStudy` - Semantic Scholar's field classifications

## Additional Metadata
- `doi` - Digital Object Identifier
- `arxivId` - ArXiv identifier
- `url` - Paper URL
- `openAccessPdf` - Open access PDF information
- `embedding` - Paper embedding vectors (for similarity analysis)
"#;
