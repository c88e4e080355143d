//! MCP tool modules.
//!
//! Tools are grouped by domain: metadata listing and definition lookup,
//! dependency exploration, and cache refresh.

pub mod cache;
pub mod deps;
pub mod metadata;
