//! Cache-aside behavior: round trips, invalidation, self-healing, and
//! full-refresh progress semantics.

mod common;

use std::path::Path;
use std::sync::Arc;

use dbcat_core::{CatalogControlPlane, CatalogError, FanOutPolicy};
use dbcat_store::models::{ObjectKind, Snapshot};

use common::{ScriptedProvider, row};

fn plane(provider: &ScriptedProvider, dir: &Path) -> CatalogControlPlane<ScriptedProvider> {
    CatalogControlPlane::new(Arc::new(provider.clone()), None, dir, FanOutPolicy::default())
}

fn tables_provider() -> ScriptedProvider {
    ScriptedProvider::script()
        .rows(
            "FROM all_tables",
            vec![row(&["DEPARTMENTS"]), row(&["EMPLOYEES"])],
        )
        .build()
}

#[test]
fn second_read_is_served_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = tables_provider();
    let control = plane(&provider, dir.path());

    let first = control.objects(ObjectKind::Table).expect("first read");
    let second = control.objects(ObjectKind::Table).expect("second read");

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(provider.connects(), 1, "catalog fetched at most once");
    assert!(control.cache().snapshot_path(ObjectKind::Table).exists());
}

#[test]
fn invalidate_forces_a_refetch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = tables_provider();
    let control = plane(&provider, dir.path());

    control.objects(ObjectKind::Table).expect("populate");
    control.cache().invalidate(ObjectKind::Table);
    control.objects(ObjectKind::Table).expect("repopulate");

    assert_eq!(provider.connects(), 2, "exactly one fetch per miss");
}

#[test]
fn corrupt_snapshot_self_heals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = tables_provider();
    let control = plane(&provider, dir.path());

    let path = control.cache().snapshot_path(ObjectKind::Table);
    std::fs::write(&path, "!! definitely not json !!").expect("write corrupt snapshot");

    let objects = control.objects(ObjectKind::Table).expect("self-heal");
    assert_eq!(objects.len(), 2);
    assert_eq!(provider.connects(), 1);

    let raw = std::fs::read_to_string(&path).expect("snapshot rewritten");
    let snapshot: Snapshot = serde_json::from_str(&raw).expect("snapshot is valid again");
    assert!(snapshot.is_current());
    assert_eq!(snapshot.objects, objects);
}

#[test]
fn persistence_failure_still_returns_the_fetched_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocked = dir.path().join("cache");
    std::fs::write(&blocked, "a file where the cache dir should be").expect("write");

    let provider = tables_provider();
    let control = plane(&provider, &blocked);

    let objects = control.objects(ObjectKind::Table).expect("fetch survives write failure");
    assert_eq!(objects.len(), 2);

    // Nothing was persisted, so the next read fetches again.
    control.objects(ObjectKind::Table).expect("second fetch");
    assert_eq!(provider.connects(), 2);
}

#[test]
fn refresh_all_stops_on_first_failure_and_keeps_progress() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = ScriptedProvider::script()
        .rows("FROM all_tables", vec![row(&["EMPLOYEES"])])
        .failure("FROM all_views", "ORA-12541: no listener")
        .rows("FROM all_tab_columns", vec![])
        .build();
    let control = plane(&provider, dir.path());

    let err = control.refresh_all().expect_err("views fetch fails");
    assert!(matches!(err, CatalogError::Fetch(_)));

    assert!(
        control.cache().snapshot_path(ObjectKind::Table).exists(),
        "kinds refreshed before the failure stay refreshed"
    );
    assert!(
        !control.cache().snapshot_path(ObjectKind::Column).exists(),
        "kinds after the failure are never attempted"
    );
    assert!(!control.cache().snapshot_path(ObjectKind::Trigger).exists());
}

#[test]
fn refresh_kind_reports_the_universe_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = tables_provider();
    let control = plane(&provider, dir.path());

    control.objects(ObjectKind::Table).expect("populate");
    let report = control.refresh_kind(ObjectKind::Table).expect("refresh");

    assert_eq!(report.kind, ObjectKind::Table);
    assert_eq!(report.objects, 2);
    assert_eq!(provider.connects(), 2, "refresh bypasses the old snapshot");
}
