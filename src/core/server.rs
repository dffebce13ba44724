//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and routed through `domains/tools/router.rs`. Adding a tool does not
//! require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    scholar::ScholarClient,
    tools::{ToolError, ToolRegistry, build_tool_router},
};

const INSTRUCTIONS: &str = "Semantic Scholar academic search. Use search_paper to find papers, \
     get_paper for details, get_authors for author lists and get_citation for formatted \
     citations. Field references are available as resources under semantic-scholar://fields/.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Name-based tool dispatch shared with the HTTP transport.
    tool_registry: ToolRegistry,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let client = Arc::new(ScholarClient::from_config(&config));
        Self::with_client(config, client)
    }

    /// Create a server around an existing upstream client.
    pub fn with_client(config: Config, client: Arc<ScholarClient>) -> Self {
        Self {
            config: Arc::new(config),
            tool_registry: ToolRegistry::new(client.clone()),
            resource_service: Arc::new(ResourceService::new()),
            tool_router: build_tool_router::<Self>(client),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        self.tool_registry.call_tool(name, arguments).await
    }

    /// List all available resources.
    pub fn list_resources(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resources()
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI.
    pub fn read_resource(&self, uri: &str) -> Result<serde_json::Value, ResourceError> {
        let result = self.resource_service.read_resource(uri)?;
        Ok(serde_json::json!({
            "contents": result.contents
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resource_service.list_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scholar::stub::StubFetcher;
    use crate::domains::tools::definitions::common::result_text;
    use serde_json::json;

    fn server_with(stub: Arc<StubFetcher>) -> McpServer {
        let client = Arc::new(ScholarClient::default().with_fetcher(stub));
        McpServer::with_client(Config::default(), client)
    }

    #[test]
    fn test_server_info() {
        let server = McpServer::new(Config::default());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "semantic-scholar-mcp");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_list_tools_is_idempotent() {
        let server = McpServer::new(Config::default());
        let first = server.list_tools();
        assert_eq!(first.len(), 4);
        assert_eq!(first, server.list_tools());
    }

    #[test]
    fn test_list_resources() {
        let server = McpServer::new(Config::default());
        let resources = server.list_resources();
        assert_eq!(resources[0]["uri"], "semantic-scholar://fields/paper");
        assert_eq!(resources[1]["uri"], "semantic-scholar://fields/author");
        assert_eq!(resources, server.list_resources());
    }

    #[test]
    fn test_read_unknown_resource() {
        let server = McpServer::new(Config::default());
        assert!(server.read_resource("semantic-scholar://nope").is_err());
    }

    #[tokio::test]
    async fn test_call_tool() {
        let server = server_with(StubFetcher::ok(r#"{"total":0,"data":[]}"#));
        let result = server
            .call_tool("search_paper", json!({"query": "transformers"}))
            .await
            .unwrap();
        assert_eq!(result.content.len(), 1);
        assert_eq!(result_text(&result), Some(r#"{"total":0,"data":[]}"#));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let server = server_with(StubFetcher::ok("{}"));
        assert!(server.call_tool("unknown_tool", json!({})).await.is_err());
    }
}
