//! Storage models and snapshot schema helpers for dbcat-mcp.
//!
//! This crate defines the canonical data model shared by the catalog
//! fetcher, the cache store, and the MCP tool surface.

pub mod models;
pub mod schema;

pub use models::*;
