//! Daemon entry point for the dbcat MCP server.
//!
//! Loads configuration from the environment, builds the catalog control
//! plane over the mirror provider, and serves the MCP protocol over
//! stdio or streamable HTTP.

mod config;
mod provider;

use std::sync::Arc;

use dbcat_core::{CatalogControlPlane, FanOutPolicy};
use dbcat_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::DbcatConfig;
use crate::provider::MirrorProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DbcatConfig::from_args()?;
    let provider = Arc::new(MirrorProvider::new(config.catalog_db.clone()));
    let control = Arc::new(CatalogControlPlane::new(
        provider,
        config.schema_owner.clone(),
        config.cache_dir.clone(),
        FanOutPolicy::new(config.fan_out_cap),
    ));

    tracing::info!(
        catalog_db = %config.catalog_db.display(),
        cache_dir = %config.cache_dir.display(),
        owner = config.schema_owner.as_deref().unwrap_or("<unscoped>"),
        "dbcat-mcpd starting"
    );

    if config.enable_stdio {
        serve_stdio(control).await
    } else {
        serve_streamable_http(control, McpHttpServerConfig::new(config.mcp_http_addr)).await
    }
}
