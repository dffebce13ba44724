//! Common utilities shared across the Semantic Scholar tools.
//!
//! Argument parsing, status handling, text rendering and the worker-thread
//! offload all live here so each tool file only describes its own request.

use rmcp::model::{CallToolResult, Content, JsonObject, RawContent};
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use tracing::warn;

use crate::domains::scholar::{ScholarError, ScholarResult, UpstreamResponse};

/// Description of the `paper_id` argument shared by the paper-scoped tools.
pub const PAPER_ID_DESCRIPTION: &str = "The following types of IDs are supported:
- `<sha>` - a Semantic Scholar ID, e.g. `649def34f8be52c8b66281af98ae884c09aef38b`
- `CorpusId:<id>` - a Semantic Scholar numerical ID, e.g. `CorpusId:215416146`
- `DOI:<doi>` - a Digital Object Identifier, e.g. `DOI:10.18653/v1/N18-3011`
- `ARXIV:<id>` - arXiv.org, e.g. `ARXIV:2106.15928`
- `MAG:<id>` - Microsoft Academic Graph, e.g. `MAG:112218234`
- `ACL:<id>` - Association for Computational Linguistics, e.g. `ACL:W12-3903`
- `PMID:<id>` - PubMed/Medline, e.g. `PMID:19872477`
- `PMCID:<id>` - PubMed Central, e.g. `PMCID:2323736`
- `URL:<url>` - URL from one of the sites listed below, e.g. `URL:https://arxiv.org/abs/2106.15928v1`

URLs are recognized from the following sites:
- semanticscholar.org
- arxiv.org
- aclweb.org
- acm.org
- biorxiv.org";

/// A usage example shown by `tools list --verbose`.
#[derive(Debug, Clone, Copy)]
pub struct ToolExample {
    pub description: &'static str,
    /// Tool arguments as a JSON object literal.
    pub input: &'static str,
    pub usage: &'static str,
}

impl ToolExample {
    /// The example arguments as JSON.
    pub fn input_json(&self) -> Value {
        serde_json::from_str(self.input).unwrap_or_else(|_| Value::String(self.input.to_string()))
    }
}

/// Deserialize tool arguments into a params struct.
pub fn parse_params<T: DeserializeOwned>(args: JsonObject) -> ScholarResult<T> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ScholarError::invalid_arguments(e.to_string()))
}

/// Require HTTP 200 and parse the body.
pub fn expect_ok(response: &UpstreamResponse) -> ScholarResult<Value> {
    if response.status != 200 {
        return Err(ScholarError::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }
    response.json()
}

/// Like [`expect_ok`], but a 404 means the paper does not exist.
pub fn expect_paper(response: &UpstreamResponse, paper_id: &str) -> ScholarResult<Value> {
    if response.status == 404 {
        return Err(ScholarError::PaperNotFound(paper_id.to_string()));
    }
    expect_ok(response)
}

/// Textual rendering of an upstream payload, passed through unchanged.
pub fn render(value: &Value) -> String {
    value.to_string()
}

/// Cap a caller-supplied limit. Anything at or below `max` is kept as given,
/// including negative and fractional values.
pub fn clamp_limit(limit: &Number, max: u64) -> Number {
    match limit.as_f64() {
        Some(value) if value > max as f64 => Number::from(max),
        _ => limit.clone(),
    }
}

/// Truthiness of a loosely typed flag: `false`, `null`, `0`, `""` and empty
/// containers are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Run a tool body and fold any error into labeled text.
pub fn execute_with<P, F>(label: &str, args: JsonObject, run: F) -> CallToolResult
where
    P: DeserializeOwned,
    F: FnOnce(P) -> ScholarResult<String>,
{
    let text = parse_params::<P>(args).and_then(run).unwrap_or_else(|e| {
        warn!("{}: {}", label, e);
        e.to_text(label)
    });
    text_result(text)
}

/// Wrap text as the single content item of a tool result.
pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Text of the first content item, if it is text.
pub fn result_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|content| match &content.raw {
        RawContent::Text(text) => Some(text.text.as_str()),
        _ => None,
    })
}

/// Run a blocking tool body on the blocking pool.
///
/// The async caller is never blocked by the upstream request. A panicking
/// body still produces a labeled text result.
pub async fn offload<F>(label: &'static str, body: F) -> CallToolResult
where
    F: FnOnce() -> CallToolResult + Send + 'static,
{
    match tokio::task::spawn_blocking(body).await {
        Ok(result) => result,
        Err(e) => {
            let err = ScholarError::Worker(e.to_string());
            warn!("{}: {}", label, err);
            text_result(err.to_text(label))
        }
    }
}
