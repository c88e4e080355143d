//! Core subsystem for dbcat-mcp: catalog fetcher, on-disk metadata cache,
//! name filter, dependency resolver, and fan-out aggregator, composed
//! behind [`CatalogControlPlane`].
//!
//! Every operation here is synchronous request/response. Each catalog
//! operation acquires its own connection from a [`provider::ConnectionProvider`]
//! and drops it afterward; pooling and retries belong to the provider.

pub mod cache;
pub mod catalog;
pub mod control;
pub mod deps;
pub mod filter;
pub mod provider;

pub use cache::SnapshotCache;
pub use catalog::{CatalogError, CatalogFetcher, CatalogResult};
pub use control::CatalogControlPlane;
pub use deps::{DependencyResolver, FanOutPolicy};
pub use filter::{MatchMode, filter_by_names};
