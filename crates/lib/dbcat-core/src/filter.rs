//! In-memory name filtering over a materialized universe.

use dbcat_store::models::{ObjectKind, SchemaObject};

/// How requested names are matched against object names.
///
/// Most kinds match exactly (case-insensitive). Triggers and views match
/// by substring, since their consumers filter by naming-convention
/// fragments rather than full names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Contains,
}

impl MatchMode {
    #[must_use]
    pub const fn for_kind(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Trigger | ObjectKind::View => Self::Contains,
            _ => Self::Exact,
        }
    }
}

/// Selects the subset of `universe` matching `requested`, preserving the
/// original order of `universe`. Blank requested names are ignored; an
/// empty request or no match yields an empty list, never an error.
#[must_use]
pub fn filter_by_names(
    universe: &[SchemaObject],
    requested: &[String],
    mode: MatchMode,
) -> Vec<SchemaObject> {
    let wanted: Vec<String> = requested
        .iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }
    universe
        .iter()
        .filter(|object| {
            let name = object.name.to_lowercase();
            match mode {
                MatchMode::Exact => wanted.iter().any(|wanted| *wanted == name),
                MatchMode::Contains => wanted.iter().any(|wanted| name.contains(wanted)),
            }
        })
        .cloned()
        .collect()
}
