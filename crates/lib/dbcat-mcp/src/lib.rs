//! MCP server implementation for dbcat-mcp.
//!
//! This crate wires the catalog control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for schema exploration.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use dbcat_core::CatalogControlPlane;
use dbcat_core::provider::ConnectionProvider;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"dbcat-mcp provides MCP tools for exploring the structure of a relational database schema.

Workflow:
1. Call `list_object_kinds` to see the object kinds the catalog tracks
   (TABLE, VIEW, COLUMN, CONSTRAINT, INDEX, TRIGGER, SYNONYM, PROCEDURE, FUNCTION).
2. List objects of a kind with `list_objects`, optionally passing `names` to filter.
   Kinds are fetched from the catalog at most once and served from an on-disk
   snapshot afterwards.
3. Fetch one object's full definition text with `get_definition`.
4. Discover what depends on an object with `get_dependents`. Pass `expand: true`
   to also receive full definitions for a bounded number of dependent
   procedures, functions, and triggers.
5. When the schema has changed, call `refresh_cache` for one kind (or omit
   `kind` to refresh everything).

Notes:
- Name filtering is case-insensitive; triggers and views match by substring,
  every other kind matches exactly.
- Dependency edges are always resolved live, never from the cache.
- `health` returns `ok`.";

/// MCP server wrapper around the catalog control plane and tool routers.
pub struct DbcatMcp<P: ConnectionProvider> {
    tool_router: ToolRouter<Self>,
    control: Arc<CatalogControlPlane<P>>,
}

impl<P: ConnectionProvider> Clone for DbcatMcp<P> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<P: ConnectionProvider + Send + Sync + 'static> DbcatMcp<P> {
    /// Creates a new server using a control plane by value.
    #[must_use]
    pub fn new(control: CatalogControlPlane<P>) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<CatalogControlPlane<P>>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_metadata()
            + Self::tool_router_deps()
            + Self::tool_router_cache();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) fn control(&self) -> &CatalogControlPlane<P> {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<P: ConnectionProvider + Send + Sync + 'static> DbcatMcp<P> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<P: ConnectionProvider + Send + Sync + 'static> ServerHandler for DbcatMcp<P> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
