use dbcat_store::models::{ObjectKind, SchemaObject};

use crate::catalog::CatalogResult;
use crate::filter::{MatchMode, filter_by_names};
use crate::provider::ConnectionProvider;

use super::CatalogControlPlane;

impl<P: ConnectionProvider> CatalogControlPlane<P> {
    /// Cache-aside read of one kind's complete universe.
    ///
    /// Consults the on-disk snapshot first; on a miss (including a
    /// corrupt or stale snapshot) fetches from the catalog, persists the
    /// result, and returns it. A persistence failure does not fail the
    /// call.
    ///
    /// # Errors
    /// Returns `CatalogError::Fetch` if the live catalog fetch fails.
    pub fn objects(&self, kind: ObjectKind) -> CatalogResult<Vec<SchemaObject>> {
        if let Some(objects) = self.cache().load(kind) {
            return Ok(objects);
        }
        let objects = self.fetcher().fetch_all(kind)?;
        self.cache().store(kind, &objects);
        Ok(objects)
    }

    /// Lists one kind's objects, optionally filtered by name using the
    /// kind's match mode (exact for most kinds, contains for triggers
    /// and views).
    ///
    /// # Errors
    /// Returns `CatalogError::Fetch` if the universe has to be fetched
    /// live and that fetch fails.
    pub fn list_objects(
        &self,
        kind: ObjectKind,
        names: Option<&[String]>,
    ) -> CatalogResult<Vec<SchemaObject>> {
        let universe = self.objects(kind)?;
        let Some(names) = names else {
            return Ok(universe);
        };
        Ok(filter_by_names(&universe, names, MatchMode::for_kind(kind)))
    }

    /// Fetches one object's full definition text, live.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidArgument` for a blank name and
    /// `CatalogError::Fetch` on query failure.
    pub fn object_definition(&self, kind: ObjectKind, name: &str) -> CatalogResult<String> {
        self.fetcher().fetch_definition(kind, name)
    }
}
