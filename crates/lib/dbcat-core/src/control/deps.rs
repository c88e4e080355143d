use dbcat_store::models::{DependencyEdge, ObjectKind, SchemaObject};
use serde::Serialize;

use crate::catalog::CatalogResult;
use crate::deps::ExpansionPlan;
use crate::filter::{MatchMode, filter_by_names};
use crate::provider::ConnectionProvider;

use super::CatalogControlPlane;

/// A target object's dependents: every discovered edge, plus (when
/// requested) the capped set of expanded definitions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DependentsReport {
    pub edges: Vec<DependencyEdge>,
    pub expanded: Vec<SchemaObject>,
}

impl<P: ConnectionProvider> CatalogControlPlane<P> {
    /// Live reverse-dependency lookup for `(name, object_type)`.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidArgument` for blank arguments and
    /// `CatalogError::Dependency` on query failure.
    pub fn dependents_of(
        &self,
        name: &str,
        object_type: &str,
    ) -> CatalogResult<Vec<DependencyEdge>> {
        self.resolver().dependents_of(name, object_type)
    }

    /// Expands a bounded subset of `edges` into full definitions.
    ///
    /// Procedure, function, and trigger dependents are bucketed by type;
    /// each bucket is capped by the fan-out policy and resolved through
    /// the cache store's name-filtered lookup. Output order: expanded
    /// procedures and functions first (in fetch order), triggers last.
    /// This ordering is a reproducibility contract.
    ///
    /// # Errors
    /// Returns `CatalogError::Fetch` if a required universe has to be
    /// fetched live and that fetch fails.
    pub fn expand_dependents(&self, edges: &[DependencyEdge]) -> CatalogResult<Vec<SchemaObject>> {
        let plan = ExpansionPlan::partition(edges, self.fan_out());
        let mut expanded = Vec::new();
        self.expand_bucket(ObjectKind::Procedure, &plan.procedures, &mut expanded)?;
        self.expand_bucket(ObjectKind::Function, &plan.functions, &mut expanded)?;
        self.expand_bucket(ObjectKind::Trigger, &plan.triggers, &mut expanded)?;
        Ok(expanded)
    }

    /// Resolves dependents and, when `expand` is set, their definitions.
    ///
    /// # Errors
    /// Propagates resolver and fetch failures unchanged.
    pub fn dependents_report(
        &self,
        name: &str,
        object_type: &str,
        expand: bool,
    ) -> CatalogResult<DependentsReport> {
        let edges = self.dependents_of(name, object_type)?;
        let expanded = if expand {
            self.expand_dependents(&edges)?
        } else {
            Vec::new()
        };
        Ok(DependentsReport { edges, expanded })
    }

    fn expand_bucket(
        &self,
        kind: ObjectKind,
        names: &[String],
        expanded: &mut Vec<SchemaObject>,
    ) -> CatalogResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        let universe = self.objects(kind)?;
        // Dependent names are exact catalog names; the kind's contains
        // mode is only for user-facing list filters.
        for name in names {
            expanded.extend(filter_by_names(
                &universe,
                std::slice::from_ref(name),
                MatchMode::Exact,
            ));
        }
        Ok(())
    }
}
