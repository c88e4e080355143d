use dbcat_store::models::ObjectKind;
use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogResult;
use crate::provider::ConnectionProvider;

use super::CatalogControlPlane;

/// One kind refreshed by a full-cache refresh, with its universe size.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RefreshedKind {
    pub kind: ObjectKind,
    pub objects: usize,
}

impl<P: ConnectionProvider> CatalogControlPlane<P> {
    /// Invalidates one kind's snapshot and repopulates it from the
    /// catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::Fetch` if the repopulating fetch fails; in
    /// that case the snapshot stays invalidated.
    pub fn refresh_kind(&self, kind: ObjectKind) -> CatalogResult<RefreshedKind> {
        self.cache().invalidate(kind);
        let objects = self.objects(kind)?;
        info!(kind = %kind, objects = objects.len(), "refreshed snapshot");
        Ok(RefreshedKind {
            kind,
            objects: objects.len(),
        })
    }

    /// Refreshes every known kind sequentially, in declaration order.
    ///
    /// Stops on the first failure and returns it; kinds already
    /// refreshed remain refreshed, kinds not yet reached are left
    /// untouched.
    ///
    /// # Errors
    /// Returns the first `CatalogError::Fetch` encountered.
    pub fn refresh_all(&self) -> CatalogResult<Vec<RefreshedKind>> {
        let mut refreshed = Vec::with_capacity(ObjectKind::ALL.len());
        for kind in ObjectKind::ALL {
            refreshed.push(self.refresh_kind(kind)?);
        }
        Ok(refreshed)
    }
}
