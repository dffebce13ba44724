//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every [`ToolKind`] becomes one dynamic route sharing the same client.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::ToolKind;
use crate::domains::scholar::ScholarClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<ScholarClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolKind::ALL
        .into_iter()
        .fold(ToolRouter::new(), |router, kind| {
            router.with_route(create_route(kind, client.clone()))
        })
}

fn create_route<S>(kind: ToolKind, client: Arc<ScholarClient>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(kind.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let client = client.clone();
        async move { Ok::<_, McpError>(kind.call(client, args).await) }.boxed()
    })
}
