use std::borrow::Cow;

use dbcat_core::CatalogError;
use dbcat_store::models::ObjectKind;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps the core error taxonomy onto MCP error codes: bad input keeps
/// its identity as `INVALID_PARAMS`, catalog failures become
/// `INTERNAL_ERROR` with the driver message preserved.
pub(crate) fn map_err(err: CatalogError) -> ErrorData {
    let code = match err {
        CatalogError::InvalidArgument(_) => ErrorCode::INVALID_PARAMS,
        CatalogError::Fetch(_) | CatalogError::Dependency(_) => ErrorCode::INTERNAL_ERROR,
    };
    mcp_err(code, err.to_string())
}

pub(crate) fn parse_kind(value: &str) -> Result<ObjectKind, ErrorData> {
    ObjectKind::parse(value).ok_or_else(|| {
        mcp_err(
            ErrorCode::INVALID_PARAMS,
            format!("unknown object kind: {value}"),
        )
    })
}
