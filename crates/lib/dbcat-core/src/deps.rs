//! Live reverse-dependency resolution and fan-out policy.

use std::sync::Arc;

use dbcat_store::models::DependencyEdge;
use dbcat_store::schema::{
    DEP_TYPE_FUNCTION,
    DEP_TYPE_PROCEDURE,
    DEP_TYPE_TRIGGER,
    RECYCLE_BIN_PREFIX,
    SYSTEM_OWNERS,
};

use crate::catalog::{CatalogError, CatalogResult, ensure_non_empty, text};
use crate::provider::{CatalogConnection, ConnectionProvider};

/// Resolves the reverse-dependency edges for one target object.
///
/// Always a live catalog query; results are never cached. Ordering is
/// deterministic (dependent name, then dependent type) so identical
/// inputs reproduce identical output order.
pub struct DependencyResolver<P> {
    provider: Arc<P>,
    owner: Option<String>,
}

impl<P> Clone for DependencyResolver<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<P: ConnectionProvider> DependencyResolver<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, owner: Option<String>) -> Self {
        let owner = owner
            .map(|value| value.trim().to_uppercase())
            .filter(|value| !value.is_empty());
        Self { provider, owner }
    }

    /// Returns every object depending on `(name, object_type)`, excluding
    /// recycle-bin-named and system-owned dependents.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidArgument` when either argument is
    /// blank (no catalog call is attempted) and
    /// `CatalogError::Dependency` on any query failure, unchanged.
    pub fn dependents_of(
        &self,
        name: &str,
        object_type: &str,
    ) -> CatalogResult<Vec<DependencyEdge>> {
        ensure_non_empty(name, "name")?;
        ensure_non_empty(object_type, "object_type")?;
        let name = name.trim().to_uppercase();
        let object_type = object_type.trim().to_uppercase();

        let mut sql = format!(
            "SELECT name, type, referenced_name, referenced_type FROM all_dependencies \
             WHERE referenced_name = ? AND referenced_type = ? \
             AND name NOT LIKE '{RECYCLE_BIN_PREFIX}%' AND owner NOT IN ({})",
            SYSTEM_OWNERS
                .iter()
                .map(|owner| format!("'{owner}'"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        if self.owner.is_some() {
            sql.push_str(" AND owner = ?");
        }
        sql.push_str(" ORDER BY name, type");

        let mut binds: Vec<&str> = vec![name.as_str(), object_type.as_str()];
        if let Some(owner) = self.owner.as_deref() {
            binds.push(owner);
        }
        let conn = self.provider.connect().map_err(CatalogError::Dependency)?;
        let rows = conn.query(&sql, &binds).map_err(CatalogError::Dependency)?;
        Ok(rows
            .iter()
            .map(|row| DependencyEdge {
                dependent_name: text(row, 0).to_string(),
                dependent_type: text(row, 1).to_string(),
                referenced_name: text(row, 2).to_string(),
                referenced_type: text(row, 3).to_string(),
            })
            .collect())
    }
}

/// Bounds how many dependents per type get expanded into full
/// definitions. The cap keeps response size within a downstream
/// consumer's limits; entries beyond it are dropped.
#[derive(Debug, Clone, Copy)]
pub struct FanOutPolicy {
    per_type_cap: usize,
}

impl FanOutPolicy {
    pub const DEFAULT_PER_TYPE_CAP: usize = 5;

    #[must_use]
    pub const fn new(per_type_cap: usize) -> Self {
        Self { per_type_cap }
    }

    #[must_use]
    pub const fn per_type_cap(self) -> usize {
        self.per_type_cap
    }
}

impl Default for FanOutPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PER_TYPE_CAP)
    }
}

/// Expandable dependents partitioned by type, each bucket capped, in the
/// resolver's deterministic order. Edges of any other type are left to
/// the caller as bare relationship records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionPlan {
    pub procedures: Vec<String>,
    pub functions: Vec<String>,
    pub triggers: Vec<String>,
}

impl ExpansionPlan {
    #[must_use]
    pub fn partition(edges: &[DependencyEdge], policy: FanOutPolicy) -> Self {
        let mut plan = Self::default();
        for edge in edges {
            let bucket = match edge.dependent_type.as_str() {
                DEP_TYPE_PROCEDURE => &mut plan.procedures,
                DEP_TYPE_FUNCTION => &mut plan.functions,
                DEP_TYPE_TRIGGER => &mut plan.triggers,
                _ => continue,
            };
            if bucket.len() < policy.per_type_cap() {
                bucket.push(edge.dependent_name.clone());
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(name: &str, dep_type: &str) -> DependencyEdge {
        DependencyEdge {
            dependent_name: name.to_string(),
            dependent_type: dep_type.to_string(),
            referenced_name: "EMPLOYEES".to_string(),
            referenced_type: "TABLE".to_string(),
        }
    }

    #[test]
    fn partition_caps_each_bucket() {
        let edges: Vec<DependencyEdge> = (1..=7)
            .map(|i| edge(&format!("PRC{i}"), DEP_TYPE_PROCEDURE))
            .chain((1..=7).map(|i| edge(&format!("FUN{i}"), DEP_TYPE_FUNCTION)))
            .chain((1..=7).map(|i| edge(&format!("TRG{i}"), DEP_TYPE_TRIGGER)))
            .collect();
        let plan = ExpansionPlan::partition(&edges, FanOutPolicy::default());
        assert_eq!(plan.procedures, ["PRC1", "PRC2", "PRC3", "PRC4", "PRC5"]);
        assert_eq!(plan.functions.len(), 5);
        assert_eq!(plan.triggers.len(), 5);
    }

    #[test]
    fn partition_skips_unexpandable_types() {
        let edges = vec![edge("EMP_SALARY_VIEW", "VIEW"), edge("CALC_BONUS", DEP_TYPE_PROCEDURE)];
        let plan = ExpansionPlan::partition(&edges, FanOutPolicy::default());
        assert_eq!(plan.procedures, ["CALC_BONUS"]);
        assert!(plan.functions.is_empty());
        assert!(plan.triggers.is_empty());
    }

    #[test]
    fn custom_cap_is_honored() {
        let edges: Vec<DependencyEdge> =
            (1..=4).map(|i| edge(&format!("PRC{i}"), DEP_TYPE_PROCEDURE)).collect();
        let plan = ExpansionPlan::partition(&edges, FanOutPolicy::new(2));
        assert_eq!(plan.procedures, ["PRC1", "PRC2"]);
    }
}
