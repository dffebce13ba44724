//! Tools domain module.
//!
//! Tools are the four Semantic Scholar operations exposed to MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - The closed set of tools and name-based dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry for STDIO
//! - `error.rs` - Tool-specific error types
//!
//! Adding a tool means a new file in `definitions/` and a new [`ToolKind`]
//! variant; the compiler then points at every match that needs an arm.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::{ToolKind, ToolRegistry};
pub use router::build_tool_router;
