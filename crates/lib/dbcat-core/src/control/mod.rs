//! Control plane facade composing the fetcher, cache, resolver, and
//! fan-out policy. Operation groups live in per-domain submodules.

use std::path::PathBuf;
use std::sync::Arc;

pub mod deps;
pub mod metadata;
pub mod refresh;

pub use deps::DependentsReport;
pub use refresh::RefreshedKind;

use crate::cache::SnapshotCache;
use crate::catalog::CatalogFetcher;
use crate::deps::{DependencyResolver, FanOutPolicy};
use crate::provider::ConnectionProvider;

/// Facade over the metadata cache-aside subsystem and the dependency
/// resolver. Constructed once with its provider, schema owner, cache
/// directory, and fan-out policy, then shared by reference.
pub struct CatalogControlPlane<P> {
    fetcher: CatalogFetcher<P>,
    resolver: DependencyResolver<P>,
    cache: SnapshotCache,
    fan_out: FanOutPolicy,
}

impl<P> Clone for CatalogControlPlane<P> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            resolver: self.resolver.clone(),
            cache: self.cache.clone(),
            fan_out: self.fan_out,
        }
    }
}

impl<P: ConnectionProvider> CatalogControlPlane<P> {
    #[must_use]
    pub fn new(
        provider: Arc<P>,
        owner: Option<String>,
        cache_dir: impl Into<PathBuf>,
        fan_out: FanOutPolicy,
    ) -> Self {
        Self {
            fetcher: CatalogFetcher::new(provider.clone(), owner.clone()),
            resolver: DependencyResolver::new(provider, owner),
            cache: SnapshotCache::new(cache_dir),
            fan_out,
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    #[must_use]
    pub const fn fan_out(&self) -> FanOutPolicy {
        self.fan_out
    }

    pub(crate) const fn fetcher(&self) -> &CatalogFetcher<P> {
        &self.fetcher
    }

    pub(crate) const fn resolver(&self) -> &DependencyResolver<P> {
        &self.resolver
    }
}
