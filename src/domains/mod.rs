//! Domains module containing business logic organized by bounded contexts.
//!
//! - `scholar` - the upstream Graph API client
//! - `tools` - the MCP tools built on top of it
//! - `resources` - static reference documents

pub mod resources;
pub mod scholar;
pub mod tools;
