//! Outbound request and inbound response values.
//!
//! Both are plain data so that tools can be tested by inspecting the request
//! they produce and feeding canned responses back in.

use serde_json::Value;
use std::time::Duration;

use super::error::ScholarResult;

/// A single GET against the upstream API, fully resolved except for the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Path below the base URL, e.g. `/paper/search`.
    pub path: String,

    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,

    /// Request headers.
    pub headers: Vec<(String, String)>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl UpstreamRequest {
    /// Create a request for `path` with no query, headers or timeout yet.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            timeout: Duration::ZERO,
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Full URL including the encoded query string.
    pub fn url(&self, base_url: &str) -> String {
        let base = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        match serde_urlencoded::to_string(&self.query) {
            Ok(qs) if !qs.is_empty() => format!("{base}?{qs}"),
            _ => base,
        }
    }
}

/// Status and raw body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> ScholarResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Render a caller-supplied scalar as a query value.
///
/// Strings pass through untouched, numbers and booleans use their JSON
/// spelling. `null` yields `None` so the parameter is left out entirely.
pub fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
