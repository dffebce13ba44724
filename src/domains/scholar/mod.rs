//! Scholar domain module.
//!
//! Everything needed to talk to the Semantic Scholar Graph API: the client
//! that owns base URL, API key and timeout, the request/response values it
//! exchanges, and the error taxonomy the tools render into text.
//!
//! ## Architecture
//!
//! - `client.rs` - `ScholarClient` and the `Fetch` transport seam
//! - `request.rs` - `UpstreamRequest` / `UpstreamResponse`
//! - `error.rs` - `ScholarError`

mod client;
mod error;
mod request;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{DEFAULT_BASE_URL, Fetch, HttpFetcher, REQUEST_TIMEOUT_SECS, ScholarClient};
pub use error::{ScholarError, ScholarResult};
pub use request::{UpstreamRequest, UpstreamResponse, query_value};
