//! Paper details tool.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{PAPER_ID_DESCRIPTION, ToolExample, execute_with, expect_paper, render};
use crate::domains::scholar::{ScholarClient, ScholarResult, UpstreamRequest};

/// Fields returned when the caller does not ask for specific ones.
pub const DEFAULT_PAPER_FIELDS: &str = "paperId,title,abstract,authors,year,citationCount,referenceCount,fieldsOfStudy,publicationTypes,publicationDate,journal,openAccessPdf";

fn default_fields() -> String {
    DEFAULT_PAPER_FIELDS.to_string()
}

/// Parameters for the paper details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPaperParams {
    #[schemars(description = PAPER_ID_DESCRIPTION)]
    pub paper_id: String,

    /// A comma-separated list of the fields to be returned. The paperId field is
    /// always returned. See the resource 'semantic-scholar://fields/paper' for
    /// available fields. Examples: `title,url`, `title,embedding.specter_v2`,
    /// `title,authors,citations.title,citations.abstract`.
    #[serde(default = "default_fields")]
    pub fields: String,
}

impl GetPaperParams {
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self {
            paper_id: paper_id.into(),
            fields: default_fields(),
        }
    }
}

/// Paper details tool.
pub struct GetPaperTool;

impl GetPaperTool {
    pub const NAME: &'static str = "get_paper";

    pub const DESCRIPTION: &'static str = "Get detailed information about a specific paper. Use 'fields' parameter to customize returned data.";

    pub const ERROR_LABEL: &'static str = "Error getting paper details";

    pub const EXAMPLES: &'static [ToolExample] = &[
        ToolExample {
            description: "Get paper by Semantic Scholar ID",
            input: r#"{"paper_id": "649def34f8be52c8b66281af98ae884c09aef38b"}"#,
            usage: "Retrieve full details for a known paper",
        },
        ToolExample {
            description: "Get paper by DOI with selected fields",
            input: r#"{"paper_id": "DOI:10.18653/v1/N18-3011", "fields": "title,year,authors"}"#,
            usage: "Look up a paper from its DOI",
        },
    ];

    pub fn build_request(client: &ScholarClient, params: &GetPaperParams) -> UpstreamRequest {
        client
            .request(format!("/paper/{}", params.paper_id))
            .with_query("fields", &params.fields)
    }

    #[instrument(skip_all, fields(paper_id = %params.paper_id))]
    pub fn run(client: &ScholarClient, params: &GetPaperParams) -> ScholarResult<String> {
        info!("Fetching paper {}", params.paper_id);
        let response = client.get(&Self::build_request(client, params))?;
        let body = expect_paper(&response, &params.paper_id)?;
        Ok(render(&body))
    }

    /// Execute the tool on raw arguments. Blocks on the upstream request.
    pub fn execute(client: &ScholarClient, args: JsonObject) -> CallToolResult {
        execute_with(Self::ERROR_LABEL, args, |params: GetPaperParams| {
            Self::run(client, &params)
        })
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetPaperParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
