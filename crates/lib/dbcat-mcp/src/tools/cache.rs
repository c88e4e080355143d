use dbcat_core::provider::ConnectionProvider;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::DbcatMcp;
use crate::helpers;

/// Parameters for refreshing the metadata cache.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RefreshCacheParams {
    /// Object kind to refresh. Omit to refresh every kind.
    pub kind: Option<String>,
}

#[tool_router(router = tool_router_cache, vis = "pub")]
impl<P: ConnectionProvider + Send + Sync + 'static> DbcatMcp<P> {
    #[tool(
        description = "Invalidate and repopulate the metadata cache for one object kind, or for all kinds when no kind is given. A full refresh stops at the first failing kind; kinds already refreshed stay refreshed."
    )]
    async fn refresh_cache(
        &self,
        Parameters(params): Parameters<RefreshCacheParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let refreshed = match params.kind.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => {
                let kind = helpers::parse_kind(kind)?;
                vec![self.control().refresh_kind(kind).map_err(helpers::map_err)?]
            }
            _ => self.control().refresh_all().map_err(helpers::map_err)?,
        };
        Ok(CallToolResult::success(vec![Content::json(refreshed)?]))
    }
}
