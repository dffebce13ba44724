//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - [`ToolKind`], the closed set of tools the server exposes
//! - [`ToolRegistry`], name-based dispatch used by the HTTP transport and the CLI
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use super::ToolError;
use super::definitions::{
    GetAuthorsTool, GetCitationTool, GetPaperTool, SearchPaperTool, ToolExample, common::offload,
};
use crate::domains::scholar::ScholarClient;

// ============================================================================
// Tool Kind
// ============================================================================

/// One of the tools the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchPaper,
    GetPaper,
    GetAuthors,
    GetCitation,
}

impl ToolKind {
    /// Every tool, in listing order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::SearchPaper,
        ToolKind::GetPaper,
        ToolKind::GetAuthors,
        ToolKind::GetCitation,
    ];

    /// Resolve a tool by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SearchPaper => SearchPaperTool::NAME,
            Self::GetPaper => GetPaperTool::NAME,
            Self::GetAuthors => GetAuthorsTool::NAME,
            Self::GetCitation => GetCitationTool::NAME,
        }
    }

    pub fn to_tool(self) -> Tool {
        match self {
            Self::SearchPaper => SearchPaperTool::to_tool(),
            Self::GetPaper => GetPaperTool::to_tool(),
            Self::GetAuthors => GetAuthorsTool::to_tool(),
            Self::GetCitation => GetCitationTool::to_tool(),
        }
    }

    pub fn examples(self) -> &'static [ToolExample] {
        match self {
            Self::SearchPaper => SearchPaperTool::EXAMPLES,
            Self::GetPaper => GetPaperTool::EXAMPLES,
            Self::GetAuthors => GetAuthorsTool::EXAMPLES,
            Self::GetCitation => GetCitationTool::EXAMPLES,
        }
    }

    /// Prefix used for this tool's error texts.
    pub fn error_label(self) -> &'static str {
        match self {
            Self::SearchPaper => SearchPaperTool::ERROR_LABEL,
            Self::GetPaper => GetPaperTool::ERROR_LABEL,
            Self::GetAuthors => GetAuthorsTool::ERROR_LABEL,
            Self::GetCitation => GetCitationTool::ERROR_LABEL,
        }
    }

    /// Run the tool on the current thread. Blocks on the upstream request.
    pub fn execute(self, client: &ScholarClient, args: JsonObject) -> CallToolResult {
        match self {
            Self::SearchPaper => SearchPaperTool::execute(client, args),
            Self::GetPaper => GetPaperTool::execute(client, args),
            Self::GetAuthors => GetAuthorsTool::execute(client, args),
            Self::GetCitation => GetCitationTool::execute(client, args),
        }
    }

    /// Run the tool on the blocking pool.
    pub async fn call(self, client: Arc<ScholarClient>, args: JsonObject) -> CallToolResult {
        info!("Calling tool: {}", self.name());
        offload(self.error_label(), move || self.execute(&client, args)).await
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching tool calls by name
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: Arc<ScholarClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<ScholarClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        ToolKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.iter().map(|kind| kind.to_tool()).collect()
    }

    /// Dispatch a tool call by name.
    ///
    /// Only an unknown name is an error. Arguments that are not a JSON object
    /// are treated as empty.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let Some(kind) = ToolKind::from_name(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let args = match arguments {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        };

        Ok(kind.call(self.client.clone(), args).await)
    }
}
