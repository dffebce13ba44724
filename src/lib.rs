//! Semantic Scholar MCP Server Library
//!
//! A Model Context Protocol server exposing Semantic Scholar paper search,
//! paper details, author lists and citations as MCP tools, plus a CLI that
//! runs the same tools directly.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **scholar**: the Graph API client
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: field reference documents that can be read by clients
//! - **cli**: the `serve` and `tools` commands
//!
//! # Example
//!
//! ```rust,no_run
//! use semantic_scholar_mcp::{core::McpServer, core::Config, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::scholar::ScholarClient;
