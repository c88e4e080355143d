//! Dependency resolution and bounded fan-out expansion.

mod common;

use std::path::Path;
use std::sync::Arc;

use dbcat_core::{CatalogControlPlane, CatalogError, FanOutPolicy};
use dbcat_core::provider::Row;

use common::{ScriptedProvider, row};

fn plane(
    provider: &ScriptedProvider,
    dir: &Path,
    fan_out: FanOutPolicy,
) -> CatalogControlPlane<ScriptedProvider> {
    CatalogControlPlane::new(Arc::new(provider.clone()), None, dir, fan_out)
}

fn source_rows(prefix: &str, count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| {
            let name = format!("{prefix}{i}");
            let body = format!("BEGIN {name}; END;");
            vec![Some(name), Some(body)]
        })
        .collect()
}

#[test]
fn blank_arguments_fail_before_any_catalog_call() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = ScriptedProvider::script().build();
    let control = plane(&provider, dir.path(), FanOutPolicy::default());

    let err = control.dependents_of("", "TABLE").expect_err("blank name");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    let err = control.dependents_of("X", "   ").expect_err("blank type");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    assert_eq!(provider.connects(), 0, "no connection was opened");
}

#[test]
fn dependency_failure_is_surfaced_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = ScriptedProvider::script()
        .failure("FROM all_dependencies", "ORA-00942: table or view does not exist")
        .build();
    let control = plane(&provider, dir.path(), FanOutPolicy::default());

    let err = control.dependents_of("EMPLOYEES", "TABLE").expect_err("query fails");
    assert!(matches!(err, CatalogError::Dependency(_)));
    assert!(err.to_string().contains("ORA-00942"));
}

#[test]
fn employees_scenario_expands_the_procedure_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = ScriptedProvider::script()
        .rows(
            "FROM all_dependencies",
            vec![
                row(&["CALC_BONUS", "PROCEDURE", "EMPLOYEES", "TABLE"]),
                row(&["EMP_SALARY_VIEW", "VIEW", "EMPLOYEES", "TABLE"]),
            ],
        )
        .rows(
            "type = 'PROCEDURE'",
            vec![
                row(&["CALC_BONUS", "PROCEDURE calc_bonus IS BEGIN NULL; END;"]),
                row(&["PAY_RAISE", "PROCEDURE pay_raise IS BEGIN NULL; END;"]),
            ],
        )
        .build();
    let control = plane(&provider, dir.path(), FanOutPolicy::default());

    let report = control
        .dependents_report("EMPLOYEES", "TABLE", true)
        .expect("report");

    assert_eq!(report.edges.len(), 2);
    assert_eq!(report.edges[0].dependent_name, "CALC_BONUS");
    assert_eq!(report.edges[1].dependent_name, "EMP_SALARY_VIEW");

    assert_eq!(report.expanded.len(), 1, "the view edge is left unexpanded");
    assert_eq!(report.expanded[0].name, "CALC_BONUS");
    assert!(!report.expanded[0].definition.is_empty());
}

#[test]
fn fan_out_cap_keeps_five_per_type_in_contract_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut dependency_rows = Vec::new();
    for prefix in ["PRC", "FUN", "TRG"] {
        let dep_type = match prefix {
            "PRC" => "PROCEDURE",
            "FUN" => "FUNCTION",
            _ => "TRIGGER",
        };
        for i in 1..=7 {
            let name = format!("{prefix}{i}");
            dependency_rows.push(row(&[name.as_str(), dep_type, "EMPLOYEES", "TABLE"]));
        }
    }
    // The universe also holds triggers whose names extend the dependent
    // names (TRG1 vs TRG10); expansion must resolve exact names only.
    let trigger_rows: Vec<Row> = (1..=7)
        .chain(10..=15)
        .map(|i| {
            let name = format!("TRG{i}");
            row(&[name.as_str(), "before insert", "BEGIN NULL; END;"])
        })
        .collect();
    let provider = ScriptedProvider::script()
        .rows("FROM all_dependencies", dependency_rows)
        .rows("type = 'PROCEDURE'", source_rows("PRC", 7))
        .rows("type = 'FUNCTION'", source_rows("FUN", 7))
        .rows("FROM all_triggers", trigger_rows)
        .build();
    let control = plane(&provider, dir.path(), FanOutPolicy::default());

    let report = control
        .dependents_report("EMPLOYEES", "TABLE", true)
        .expect("report");

    assert_eq!(report.edges.len(), 21);
    assert_eq!(report.expanded.len(), 15, "5 of each type, never more");

    let names: Vec<&str> = report.expanded.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "PRC1", "PRC2", "PRC3", "PRC4", "PRC5", "FUN1", "FUN2", "FUN3", "FUN4", "FUN5",
            "TRG1", "TRG2", "TRG3", "TRG4", "TRG5",
        ],
        "procedures and functions first, triggers last, one object per name"
    );
}

#[test]
fn fan_out_cap_is_configurable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dependency_rows: Vec<Row> = (1..=4)
        .map(|i| {
            let name = format!("PRC{i}");
            row(&[name.as_str(), "PROCEDURE", "EMPLOYEES", "TABLE"])
        })
        .collect();
    let provider = ScriptedProvider::script()
        .rows("FROM all_dependencies", dependency_rows)
        .rows("type = 'PROCEDURE'", source_rows("PRC", 4))
        .build();
    let control = plane(&provider, dir.path(), FanOutPolicy::new(2));

    let report = control
        .dependents_report("EMPLOYEES", "TABLE", true)
        .expect("report");
    assert_eq!(report.expanded.len(), 2);
}

#[test]
fn expansion_reads_through_the_snapshot_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dependency_rows = vec![row(&["PRC1", "PROCEDURE", "EMPLOYEES", "TABLE"])];
    let provider = ScriptedProvider::script()
        .rows("FROM all_dependencies", dependency_rows)
        .rows("type = 'PROCEDURE'", source_rows("PRC", 1))
        .build();
    let control = plane(&provider, dir.path(), FanOutPolicy::default());

    control.dependents_report("EMPLOYEES", "TABLE", true).expect("first");
    let connects_after_first = provider.connects();
    control.dependents_report("EMPLOYEES", "TABLE", true).expect("second");

    // The dependency query is always live; the procedure universe is not.
    assert_eq!(provider.connects(), connects_after_first + 1);
}
