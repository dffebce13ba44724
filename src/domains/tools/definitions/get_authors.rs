//! Paper authors tool.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Number;
use tracing::{info, instrument};

use super::common::{
    PAPER_ID_DESCRIPTION, ToolExample, clamp_limit, execute_with, expect_paper, render,
};
use crate::domains::scholar::{ScholarClient, ScholarResult, UpstreamRequest};

pub const DEFAULT_AUTHOR_FIELDS: &str = "authorId,name,affiliations,citationCount,hIndex";

/// Upper bound the upstream accepts for `limit` on this endpoint.
pub const MAX_AUTHORS_LIMIT: u64 = 1000;

fn default_fields() -> String {
    DEFAULT_AUTHOR_FIELDS.to_string()
}

fn default_offset() -> Number {
    Number::from(0u64)
}

fn default_limit() -> Number {
    Number::from(100u64)
}

/// Parameters for the paper authors tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAuthorsParams {
    #[schemars(description = PAPER_ID_DESCRIPTION)]
    pub paper_id: String,

    /// A comma-separated list of the fields to be returned. The authorId field is
    /// always returned. See the resource 'semantic-scholar://fields/author' for
    /// available fields. Examples: `name,affiliations,papers`,
    /// `url,papers.year,papers.authors`.
    #[serde(default = "default_fields")]
    pub fields: String,

    /// Used for pagination. When returning a list of results, start with the
    /// element at this position in the list.
    #[serde(default = "default_offset")]
    #[schemars(with = "i64")]
    pub offset: Number,

    /// The maximum number of results to return. Maximum is 1000.
    #[serde(default = "default_limit")]
    #[schemars(with = "i64")]
    pub limit: Number,
}

impl GetAuthorsParams {
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self {
            paper_id: paper_id.into(),
            fields: default_fields(),
            offset: default_offset(),
            limit: default_limit(),
        }
    }
}

/// Paper authors tool.
pub struct GetAuthorsTool;

impl GetAuthorsTool {
    pub const NAME: &'static str = "get_authors";

    pub const DESCRIPTION: &'static str = "Get authors information for a specific paper. Use 'fields' parameter to customize author data returned.";

    pub const ERROR_LABEL: &'static str = "Error getting authors";

    pub const EXAMPLES: &'static [ToolExample] = &[ToolExample {
        description: "List the authors of a paper",
        input: r#"{"paper_id": "649def34f8be52c8b66281af98ae884c09aef38b", "limit": 10}"#,
        usage: "Show who wrote a paper along with their h-index",
    }];

    pub fn build_request(client: &ScholarClient, params: &GetAuthorsParams) -> UpstreamRequest {
        client
            .request(format!("/paper/{}/authors", params.paper_id))
            .with_query("fields", &params.fields)
            .with_query("offset", params.offset.to_string())
            .with_query(
                "limit",
                clamp_limit(&params.limit, MAX_AUTHORS_LIMIT).to_string(),
            )
    }

    #[instrument(skip_all, fields(paper_id = %params.paper_id))]
    pub fn run(client: &ScholarClient, params: &GetAuthorsParams) -> ScholarResult<String> {
        info!("Fetching authors of paper {}", params.paper_id);
        let response = client.get(&Self::build_request(client, params))?;
        let body = expect_paper(&response, &params.paper_id)?;
        Ok(render(&body))
    }

    /// Execute the tool on raw arguments. Blocks on the upstream request.
    pub fn execute(client: &ScholarClient, args: JsonObject) -> CallToolResult {
        execute_with(Self::ERROR_LABEL, args, |params: GetAuthorsParams| {
            Self::run(client, &params)
        })
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetAuthorsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scholar::stub::StubFetcher;
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let request =
            GetAuthorsTool::build_request(&ScholarClient::default(), &GetAuthorsParams::new("abc"));
        assert_eq!(request.path, "/paper/abc/authors");
        assert_eq!(request.query_param("fields"), Some(DEFAULT_AUTHOR_FIELDS));
        assert_eq!(request.query_param("offset"), Some("0"));
        assert_eq!(request.query_param("limit"), Some("100"));
    }

    #[test]
    fn test_limit_is_clamped() {
        let mut params = GetAuthorsParams::new("abc");
        params.limit = Number::from(2000u64);
        let request = GetAuthorsTool::build_request(&ScholarClient::default(), &params);
        assert_eq!(request.query_param("limit"), Some("1000"));
    }

    #[test]
    fn test_out_of_range_values_forwarded_verbatim() {
        let stub = StubFetcher::ok("{}");
        let client = ScholarClient::default().with_fetcher(stub.clone());
        let result = GetAuthorsTool::execute(
            &client,
            args(json!({"paper_id": "abc", "limit": -5, "offset": 2.0})),
        );
        assert_eq!(result_text(&result), Some("{}"));

        let request = stub.last_request().unwrap();
        assert_eq!(request.query_param("limit"), Some("-5"));
        assert_eq!(request.query_param("offset"), Some("2.0"));
    }

    #[test]
    fn test_success_returns_json_text() {
        let body = r#"{"offset":0,"data":[{"authorId":"1","name":"Ashish Vaswani","hIndex":30}]}"#;
        let client = ScholarClient::default().with_fetcher(StubFetcher::ok(body));
        let result = GetAuthorsTool::execute(&client, args(json!({"paper_id": "abc"})));
        assert_eq!(result_text(&result), Some(body));
    }

    #[test]
    fn test_not_found() {
        let client = ScholarClient::default().with_fetcher(StubFetcher::respond(404, "Not Found"));
        let result = GetAuthorsTool::execute(&client, args(json!({"paper_id": "missing"})));
        assert_eq!(result_text(&result), Some("Paper not found: missing"));
    }

    #[test]
    fn test_transport_failure_is_labeled() {
        let client = ScholarClient::default().with_fetcher(StubFetcher::failing("connection refused"));
        let result = GetAuthorsTool::execute(&client, args(json!({"paper_id": "abc"})));
        assert_eq!(result_text(&result), Some("Error getting authors: connection refused"));
    }
}
