//! Canned upstream for tests.

use std::sync::{Arc, Mutex};

use super::client::Fetch;
use super::error::{ScholarError, ScholarResult};
use super::request::{UpstreamRequest, UpstreamResponse};

enum Reply {
    Response(UpstreamResponse),
    Fail(String),
}

/// Answers every fetch with the same reply and records what was asked.
pub struct StubFetcher {
    reply: Reply,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl StubFetcher {
    pub fn respond(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Response(UpstreamResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: impl Into<String>) -> Arc<Self> {
        Self::respond(200, body)
    }

    pub fn failing(msg: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(msg.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn last_request(&self) -> Option<UpstreamRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetch for StubFetcher {
    fn fetch(&self, _base_url: &str, request: &UpstreamRequest) -> ScholarResult<UpstreamResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Fail(msg) => Err(ScholarError::transport(msg.clone())),
        }
    }
}
