#![forbid(unsafe_code)]

use orgaudit_contracts::employee::{EmployeeId, EmployeeRecord};
use orgaudit_contracts::roster::RosterView;
use orgaudit_storage::csv_load::roster_from_csv_str;
use orgaudit_storage::roster::{RosterStore, StorageError};

const ORG_ROSTER_CSV: &str = "\
Id,firstName,lastName,salary,managerId
123,Joe,Doe,200000,
124,Martin,Chekov,50000,123
304,Alice,Hasacat,150000,123
303,Bob,Ronstad,130000,304
305,Brett,Betancourt,100000,303
302,Carla,Mendes,90000,305
301,Dan,Okafor,55000,302
201,Erin,Walsh,50000,301
202,Jack,Taylor,40000,201
";

fn store() -> RosterStore {
    roster_from_csv_str(ORG_ROSTER_CSV).unwrap()
}

#[test]
fn at_roster_db_01_load_builds_both_indexes() {
    let s = store();
    assert_eq!(s.len(), 9);
    assert!(s.contains(EmployeeId(305)));
    assert_eq!(s.direct_reports_of(EmployeeId(201)).len(), 1);

    let under_root: Vec<i64> = s
        .direct_reports_of(EmployeeId(123))
        .iter()
        .map(|r| r.id.0)
        .collect();
    assert_eq!(under_root, vec![124, 304]);
}

#[test]
fn at_roster_db_02_absent_ids_are_plain_none() {
    let s = store();
    assert!(s.get(EmployeeId(999)).is_none());
    assert!(s.direct_reports_of(EmployeeId(999)).is_empty());
    assert!(s.direct_reports_of(EmployeeId(202)).is_empty());
}

#[test]
fn at_roster_db_03_view_matches_store() {
    let s = store();
    let view: &dyn RosterView = &s;
    let ids: Vec<i64> = view.employees().iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![123, 124, 304, 303, 305, 302, 301, 201, 202]);
    assert_eq!(
        view.manager_ids_with_reports(),
        vec![
            EmployeeId(123),
            EmployeeId(201),
            EmployeeId(301),
            EmployeeId(302),
            EmployeeId(303),
            EmployeeId(304),
            EmployeeId(305),
        ]
    );
    assert_eq!(view.employee(EmployeeId(202)).unwrap().full_name(), "Jack Taylor");
}

#[test]
fn at_roster_db_04_dangling_manager_is_indexed_not_rejected() {
    let s = RosterStore::from_records(vec![EmployeeRecord::v1(
        EmployeeId(10),
        "Ghost".to_string(),
        "Manager".to_string(),
        50_000.0,
        Some(EmployeeId(999)),
    )
    .unwrap()])
    .unwrap();
    assert_eq!(s.direct_reports_of(EmployeeId(999)).len(), 1);
    assert!(!s.contains(EmployeeId(999)));
}

#[test]
fn at_roster_db_05_contract_violation_surfaces_as_storage_error() {
    let mut bad = EmployeeRecord::v1(
        EmployeeId(1),
        "A".to_string(),
        "B".to_string(),
        1.0,
        None,
    )
    .unwrap();
    bad.salary = f64::INFINITY;
    let out = RosterStore::from_records(vec![bad]);
    assert!(matches!(out, Err(StorageError::ContractViolation(_))));
}
