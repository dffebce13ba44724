//! Semantic Scholar Graph API client.
//!
//! The client owns the base URL, the optional API key and the request
//! timeout. It is immutable once built and is shared across concurrent tool
//! calls behind an `Arc`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::error::ScholarResult;
use super::request::{UpstreamRequest, UpstreamResponse};
use crate::core::config::Config;

/// Production endpoint of the Graph API.
pub const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Timeout applied to every upstream request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Performs one blocking GET and returns the raw reply.
///
/// Implementations must not retry: a failed fetch surfaces as a single error.
pub trait Fetch: Send + Sync {
    fn fetch(&self, base_url: &str, request: &UpstreamRequest) -> ScholarResult<UpstreamResponse>;
}

/// `reqwest::blocking` implementation of [`Fetch`].
///
/// A client is built per call, inside the worker thread running the request,
/// so the blocking runtime is never created or dropped on an async thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(&self, base_url: &str, request: &UpstreamRequest) -> ScholarResult<UpstreamResponse> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request.timeout)
            .build()?;

        let url = format!("{}{}", base_url.trim_end_matches('/'), request.path);
        let mut builder = client.get(&url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(UpstreamResponse::new(status, body))
    }
}

/// Client for the Graph API endpoints used by the tools.
#[derive(Clone)]
pub struct ScholarClient {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    fetcher: Arc<dyn Fetch>,
}

impl ScholarClient {
    /// Create a client for the production API.
    ///
    /// An empty key is treated the same as no key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            fetcher: Arc::new(HttpFetcher),
        }
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.semantic_scholar_api_key.clone())
            .with_base_url(config.upstream.base_url.clone())
            .with_timeout(Duration::from_secs(config.upstream.timeout_secs))
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Swap the transport used to reach the upstream.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("x-api-key".to_string(), key.clone()));
        }
        headers
    }

    /// Build a request for `path` carrying this client's headers and timeout.
    pub fn request(&self, path: impl Into<String>) -> UpstreamRequest {
        let mut request = UpstreamRequest::new(path);
        request.headers = self.headers();
        request.timeout = self.timeout;
        request
    }

    /// Issue the request. Blocks the calling thread.
    #[instrument(skip_all, fields(path = %request.path))]
    pub fn get(&self, request: &UpstreamRequest) -> ScholarResult<UpstreamResponse> {
        debug!("GET {}", request.url(&self.base_url));
        let response = self.fetcher.fetch(&self.base_url, request)?;
        debug!("Upstream answered {}", response.status);
        Ok(response)
    }
}

impl Default for ScholarClient {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Redacts the API key.
impl fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScholarClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scholar::stub::StubFetcher;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc::{self, Receiver};
    use std::thread;

    #[test]
    fn test_new_uses_production_endpoint() {
        let client = ScholarClient::new(None);
        assert_eq!(client.base_url(), "https://api.semanticscholar.org/graph/v1");
        assert!(!client.has_api_key());
    }

    #[test]
    fn test_headers_without_api_key() {
        for key in [None, Some(String::new())] {
            let headers = ScholarClient::new(key).headers();
            assert_eq!(
                headers,
                vec![("Accept".to_string(), "application/json".to_string())]
            );
        }
    }

    #[test]
    fn test_headers_with_api_key() {
        let request = ScholarClient::new(Some("sk-test-key".to_string())).request("/paper/x");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("x-api-key"), Some("sk-test-key"));
    }

    #[test]
    fn test_request_carries_timeout() {
        let request = ScholarClient::default().request("/paper/x");
        assert_eq!(request.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.credentials.semantic_scholar_api_key = Some("abc".to_string());
        config.upstream.base_url = "http://localhost:9999".to_string();
        let client = ScholarClient::from_config(&config);
        assert!(client.has_api_key());
        assert_eq!(client.base_url(), "http://localhost:9999");
    }

    #[test]
    fn test_get_goes_through_fetcher() {
        let stub = StubFetcher::ok(r#"{"paperId":"abc"}"#);
        let client = ScholarClient::default().with_fetcher(stub.clone());
        let response = client.get(&client.request("/paper/abc")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(stub.last_request().unwrap().path, "/paper/abc");
    }

    /// Serve one canned reply on a loopback port and hand back the raw request head.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }

            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            tx.send(head).unwrap();
        });

        (base_url, rx)
    }

    #[test]
    fn test_http_fetcher_wire_format() {
        let (base_url, rx) = serve_once("HTTP/1.1 200 OK", r#"{"total":0}"#);
        let client = ScholarClient::new(Some("k1".to_string()))
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        let request = client
            .request("/paper/search")
            .with_query("query", "a b")
            .with_query("openAccessPdf", "");

        let response = HttpFetcher.fetch(client.base_url(), &request).unwrap();
        assert_eq!(response, UpstreamResponse::new(200, r#"{"total":0}"#));

        let head = rx.recv().unwrap().to_lowercase();
        assert!(head.starts_with("get /paper/search?query=a+b&openaccesspdf= http/1.1\r\n"));
        assert!(head.contains("\r\naccept: application/json\r\n"));
        assert!(head.contains("\r\nx-api-key: k1\r\n"));
    }

    #[test]
    fn test_http_fetcher_omits_missing_key() {
        let (base_url, rx) = serve_once("HTTP/1.1 404 Not Found", "Not Found");
        let client = ScholarClient::default()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));

        let response = HttpFetcher
            .fetch(client.base_url(), &client.request("/paper/missing"))
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, "Not Found");

        let head = rx.recv().unwrap().to_lowercase();
        assert!(head.starts_with("get /paper/missing http/1.1\r\n"));
        assert!(!head.contains("x-api-key"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = ScholarClient::new(Some("super_secret_key".to_string()));
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
