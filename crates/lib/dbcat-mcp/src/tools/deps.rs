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

/// Parameters for resolving an object's dependents.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetDependentsParams {
    /// Target object name, e.g. "EMPLOYEES".
    pub name: String,
    /// Target object type, e.g. "TABLE".
    pub object_type: String,
    /// When true, dependent procedures, functions, and triggers are also
    /// expanded into full definitions, bounded per type by the fan-out cap.
    pub expand: Option<bool>,
}

#[tool_router(router = tool_router_deps, vis = "pub")]
impl<P: ConnectionProvider + Send + Sync + 'static> DbcatMcp<P> {
    #[tool(
        description = "Resolve which objects depend on a target object. Always queried live. Optionally expands a bounded number of dependent procedures, functions, and triggers into full definitions."
    )]
    async fn get_dependents(
        &self,
        Parameters(params): Parameters<GetDependentsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .dependents_report(
                &params.name,
                &params.object_type,
                params.expand.unwrap_or(false),
            )
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
