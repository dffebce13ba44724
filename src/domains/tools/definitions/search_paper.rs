//! Paper search tool.
//!
//! Relevance search over the Graph API (`GET /paper/search`). Filters are
//! forwarded as-is; the upstream payload is returned as JSON text.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::{info, instrument};

use super::common::{ToolExample, clamp_limit, execute_with, expect_ok, is_truthy, render};
use crate::domains::scholar::{ScholarClient, ScholarResult, UpstreamRequest, query_value};

/// Fields returned when the caller does not ask for specific ones.
pub const DEFAULT_SEARCH_FIELDS: &str = "paperId,title,abstract,authors,year,citationCount";

/// Upper bound the upstream accepts for `limit`.
pub const MAX_SEARCH_LIMIT: u64 = 100;

fn default_fields() -> String {
    DEFAULT_SEARCH_FIELDS.to_string()
}

fn default_offset() -> Number {
    Number::from(0u64)
}

fn default_limit() -> Number {
    Number::from(10u64)
}

// Defaults advertised in the schema only; an absent flag is simply not sent.
fn advertised_open_access_pdf() -> bool {
    false
}

fn advertised_min_citation_count() -> u64 {
    0
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the paper search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPaperParams {
    /// A plain-text search query string. No special query syntax is supported;
    /// hyphenated terms yield no matches (replace hyphens with spaces).
    pub query: String,

    /// A comma-separated list of the fields to be returned. The paperId field is
    /// always returned. See the resource 'semantic-scholar://fields/paper' for
    /// available fields. Examples: `title,url`, `title,authors,citations.title`.
    #[serde(default = "default_fields")]
    pub fields: String,

    /// A comma-separated list of publication types to include, e.g.
    /// `Review,JournalArticle`. Available types: Review, JournalArticle,
    /// CaseReport, ClinicalTrial, Conference, Dataset, Editorial,
    /// LettersAndComments, MetaAnalysis, News, Study, Book, BookSection.
    #[schemars(with = "Option<String>")]
    pub publication_types: Option<Value>,

    /// Restricts results to only include papers with a public PDF.
    #[serde(default)]
    #[schemars(with = "bool", default = "advertised_open_access_pdf")]
    pub open_access_pdf: Option<Value>,

    /// Restricts results to only include papers with the minimum number of citations.
    #[serde(default)]
    #[schemars(with = "u64", default = "advertised_min_citation_count")]
    pub min_citation_count: Option<Value>,

    /// Restricts results to a range of publication dates or years (inclusive),
    /// formatted `<startDate>:<endDate>` with `YYYY-MM-DD` dates. Either end is
    /// optional and prefixes are allowed. Examples: `2019-03-05`, `2019-03`,
    /// `2016-03-05:2020-06-06`, `1981-08-25:`, `:2015-01`, `2015:2020`.
    #[schemars(with = "Option<String>")]
    pub publication_date_or_year: Option<Value>,

    /// Restricts results to a publication year or range (inclusive).
    /// Examples: `2019`, `2016-2020`, `2010-`, `-2015`.
    #[schemars(with = "Option<String>")]
    pub year: Option<Value>,

    /// Comma-separated list of venues (ISO4 abbreviations accepted), e.g.
    /// `Nature,Radiology`.
    #[schemars(with = "Option<String>")]
    pub venue: Option<Value>,

    /// Comma-separated list of fields of study, e.g. `Physics,Mathematics`.
    #[schemars(with = "Option<String>")]
    pub fields_of_study: Option<Value>,

    /// Starting position in the list of results.
    #[serde(default = "default_offset")]
    #[schemars(with = "i64")]
    pub offset: Number,

    /// Maximum number of results to return (max: 100).
    #[serde(default = "default_limit")]
    #[schemars(with = "i64")]
    pub limit: Number,
}

impl SearchPaperParams {
    /// Filters forwarded verbatim when present, in upstream parameter names.
    fn filters(&self) -> [(&'static str, &Option<Value>); 6] {
        [
            ("publicationTypes", &self.publication_types),
            ("minCitationCount", &self.min_citation_count),
            ("publicationDateOrYear", &self.publication_date_or_year),
            ("year", &self.year),
            ("venue", &self.venue),
            ("fieldsOfStudy", &self.fields_of_study),
        ]
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Paper search tool.
pub struct SearchPaperTool;

impl SearchPaperTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_paper";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search for papers using Semantic Scholar. Use 'fields' parameter to customize returned data";

    /// Prefix of error texts produced by this tool.
    pub const ERROR_LABEL: &'static str = "Error searching papers";

    pub const EXAMPLES: &'static [ToolExample] = &[
        ToolExample {
            description: "Search for machine learning papers",
            input: r#"{"query": "machine learning"}"#,
            usage: "Find papers about machine learning",
        },
        ToolExample {
            description: "Search with filters",
            input: r#"{"query": "neural networks", "year": "2020-2023", "fieldsOfStudy": "Computer Science", "limit": 5}"#,
            usage: "Find recent neural network papers in Computer Science",
        },
    ];

    /// Build the upstream request for a search.
    pub fn build_request(client: &ScholarClient, params: &SearchPaperParams) -> UpstreamRequest {
        let mut request = client
            .request("/paper/search")
            .with_query("query", &params.query)
            .with_query("fields", &params.fields)
            .with_query("offset", params.offset.to_string())
            .with_query(
                "limit",
                clamp_limit(&params.limit, MAX_SEARCH_LIMIT).to_string(),
            );

        for (name, value) in params.filters() {
            if let Some(value) = value.as_ref().and_then(query_value) {
                request = request.with_query(name, value);
            }
        }

        // The upstream treats the bare presence of this parameter as "true".
        if params.open_access_pdf.as_ref().is_some_and(is_truthy) {
            request = request.with_query("openAccessPdf", "");
        }

        request
    }

    /// Run the search and return the upstream payload as text.
    #[instrument(skip_all, fields(query = %params.query))]
    pub fn run(client: &ScholarClient, params: &SearchPaperParams) -> ScholarResult<String> {
        info!("Searching papers matching: {}", params.query);
        let response = client.get(&Self::build_request(client, params))?;
        let body = expect_ok(&response)?;
        Ok(render(&body))
    }

    /// Execute the tool on raw arguments. Blocks on the upstream request.
    pub fn execute(client: &ScholarClient, args: JsonObject) -> CallToolResult {
        execute_with(Self::ERROR_LABEL, args, |params: SearchPaperParams| {
            Self::run(client, &params)
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchPaperParams>(),
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

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn request_for(value: Value) -> UpstreamRequest {
        let params: SearchPaperParams = serde_json::from_value(value).unwrap();
        SearchPaperTool::build_request(&ScholarClient::default(), &params)
    }

    #[test]
    fn test_defaults() {
        let request = request_for(json!({"query": "machine learning"}));
        assert_eq!(request.path, "/paper/search");
        assert_eq!(request.query_param("query"), Some("machine learning"));
        assert_eq!(request.query_param("fields"), Some(DEFAULT_SEARCH_FIELDS));
        assert_eq!(request.query_param("offset"), Some("0"));
        assert_eq!(request.query_param("limit"), Some("10"));
        assert_eq!(request.query_param("openAccessPdf"), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        let request = request_for(json!({"query": "q", "limit": 200}));
        assert_eq!(request.query_param("limit"), Some("100"));

        let request = request_for(json!({"query": "q", "limit": 50}));
        assert_eq!(request.query_param("limit"), Some("50"));
    }

    #[test]
    fn test_limit_and_offset_forwarded_verbatim() {
        let request = request_for(json!({"query": "q", "limit": -5, "offset": -1}));
        assert_eq!(request.query_param("limit"), Some("-5"));
        assert_eq!(request.query_param("offset"), Some("-1"));

        let request = request_for(json!({"query": "q", "limit": 5.0}));
        assert_eq!(request.query_param("limit"), Some("5.0"));

        let request = request_for(json!({"query": "q", "limit": 250.5}));
        assert_eq!(request.query_param("limit"), Some("100"));
    }

    #[test]
    fn test_negative_limit_reaches_upstream() {
        let stub = StubFetcher::ok("{}");
        let client = ScholarClient::default().with_fetcher(stub.clone());
        let result = SearchPaperTool::execute(&client, args(json!({"query": "q", "limit": -5})));
        assert_eq!(result_text(&result), Some("{}"));
        assert_eq!(stub.last_request().unwrap().query_param("limit"), Some("-5"));
    }

    #[test]
    fn test_open_access_pdf_sent_as_empty_value() {
        let request = request_for(json!({"query": "q", "openAccessPdf": true}));
        assert_eq!(request.query_param("openAccessPdf"), Some(""));

        let request = request_for(json!({"query": "q", "openAccessPdf": false}));
        assert_eq!(request.query_param("openAccessPdf"), None);
    }

    #[test]
    fn test_filters_forwarded_verbatim() {
        let request = request_for(json!({
            "query": "neural networks",
            "publicationTypes": "Review,JournalArticle",
            "minCitationCount": 5,
            "publicationDateOrYear": "2019-03",
            "year": "2020-2023",
            "venue": "Nature",
            "fieldsOfStudy": "Computer Science",
            "offset": 10
        }));
        assert_eq!(request.query_param("publicationTypes"), Some("Review,JournalArticle"));
        assert_eq!(request.query_param("minCitationCount"), Some("5"));
        assert_eq!(request.query_param("publicationDateOrYear"), Some("2019-03"));
        assert_eq!(request.query_param("year"), Some("2020-2023"));
        assert_eq!(request.query_param("venue"), Some("Nature"));
        assert_eq!(request.query_param("fieldsOfStudy"), Some("Computer Science"));
        assert_eq!(request.query_param("offset"), Some("10"));
    }

    #[test]
    fn test_absent_filters_are_not_sent() {
        let request = request_for(json!({"query": "q", "year": null}));
        assert_eq!(request.query_param("year"), None);
        assert_eq!(request.query_param("venue"), None);
    }

    #[test]
    fn test_success_returns_payload_text() {
        let body = r#"{"total":1,"data":[{"paperId":"abc","title":"T"}]}"#;
        let client = ScholarClient::default().with_fetcher(StubFetcher::ok(body));
        let result = SearchPaperTool::execute(&client, args(json!({"query": "machine learning"})));
        assert_eq!(result.content.len(), 1);
        assert_eq!(result_text(&result), Some(body));
    }

    #[test]
    fn test_api_error_status() {
        let client = ScholarClient::default()
            .with_fetcher(StubFetcher::respond(500, "Internal Server Error"));
        let result = SearchPaperTool::execute(&client, args(json!({"query": "q"})));
        assert_eq!(
            result_text(&result),
            Some("Error: API returned status 500: Internal Server Error")
        );
    }

    #[test]
    fn test_transport_failure_is_labeled() {
        let client = ScholarClient::default().with_fetcher(StubFetcher::failing("Network error"));
        let result = SearchPaperTool::execute(&client, args(json!({"query": "q"})));
        assert_eq!(result_text(&result), Some("Error searching papers: Network error"));
    }

    #[test]
    fn test_malformed_json_is_labeled() {
        let client = ScholarClient::default().with_fetcher(StubFetcher::ok("<html>oops</html>"));
        let result = SearchPaperTool::execute(&client, args(json!({"query": "q"})));
        assert!(result_text(&result).unwrap().starts_with("Error searching papers: "));
    }

    #[test]
    fn test_missing_query_is_labeled() {
        let stub = StubFetcher::ok("{}");
        let client = ScholarClient::default().with_fetcher(stub.clone());
        let result = SearchPaperTool::execute(&client, JsonObject::new());
        assert!(result_text(&result).unwrap().starts_with("Error searching papers: "));
        assert_eq!(stub.request_count(), 0);
    }

    #[test]
    fn test_tool_schema() {
        let tool = SearchPaperTool::to_tool();
        assert_eq!(tool.name, "search_paper");
        let properties = tool.input_schema.get("properties").unwrap();
        for name in ["query", "fields", "openAccessPdf", "fieldsOfStudy", "offset", "limit"] {
            assert!(properties.get(name).is_some(), "missing property {name}");
        }
        assert_eq!(tool.input_schema.get("required"), Some(&json!(["query"])));
    }

    #[test]
    fn test_schema_defaults() {
        let tool = SearchPaperTool::to_tool();
        let properties = tool.input_schema.get("properties").unwrap();
        let default_of = |name: &str| properties[name].get("default").cloned();

        assert_eq!(default_of("openAccessPdf"), Some(json!(false)));
        assert_eq!(properties["openAccessPdf"]["type"], "boolean");
        assert_eq!(default_of("minCitationCount"), Some(json!(0)));
        assert_eq!(properties["minCitationCount"]["type"], "integer");
        assert_eq!(default_of("limit"), Some(json!(10)));
        assert_eq!(default_of("offset"), Some(json!(0)));
        assert_eq!(default_of("fields"), Some(json!(DEFAULT_SEARCH_FIELDS)));
        for name in [
            "publicationTypes",
            "publicationDateOrYear",
            "year",
            "venue",
            "fieldsOfStudy",
        ] {
            assert_eq!(default_of(name), None, "{name} should have no default");
        }
    }
}
