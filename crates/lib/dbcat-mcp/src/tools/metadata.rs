use dbcat_core::provider::ConnectionProvider;
use dbcat_store::models::ObjectKind;
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

/// Parameters for listing objects of one kind.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListObjectsParams {
    /// Object kind, e.g. "tables", "VIEW", "procedures".
    pub kind: String,
    /// Optional name filter. Case-insensitive; triggers and views match
    /// by substring, other kinds exactly.
    pub names: Option<Vec<String>>,
}

/// Parameters for fetching one object's definition text.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetDefinitionParams {
    pub kind: String,
    /// Object name. Columns are addressed as TABLE.COLUMN.
    pub name: String,
}

#[tool_router(router = tool_router_metadata, vis = "pub")]
impl<P: ConnectionProvider + Send + Sync + 'static> DbcatMcp<P> {
    #[tool(description = "List the object kinds tracked by the catalog cache.")]
    async fn list_object_kinds(&self) -> Result<CallToolResult, ErrorData> {
        let kinds: Vec<&str> = ObjectKind::ALL.iter().map(|kind| kind.as_str()).collect();
        Ok(CallToolResult::success(vec![Content::json(kinds)?]))
    }

    #[tool(
        description = "List schema objects of a kind, optionally filtered by name. Served from the metadata cache; the catalog is queried at most once per kind."
    )]
    async fn list_objects(
        &self,
        Parameters(params): Parameters<ListObjectsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let kind = helpers::parse_kind(&params.kind)?;
        let objects = self
            .control()
            .list_objects(kind, params.names.as_deref())
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(objects)?]))
    }

    #[tool(description = "Fetch one object's full definition text, live from the catalog.")]
    async fn get_definition(
        &self,
        Parameters(params): Parameters<GetDefinitionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let kind = helpers::parse_kind(&params.kind)?;
        let definition = self
            .control()
            .object_definition(kind, &params.name)
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::text(definition)]))
    }
}
