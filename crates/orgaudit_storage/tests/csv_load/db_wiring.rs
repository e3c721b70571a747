#![forbid(unsafe_code)]

use std::fs;

use orgaudit_contracts::employee::EmployeeId;
use orgaudit_storage::csv_load::{load_roster_csv, LoadError};
use tempfile::tempdir;

#[test]
fn at_csv_db_01_loads_roster_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(
        &path,
        "Id,firstName,lastName,salary,managerId\n1,A,Reynolds,70000,\n2,B,Chan,30000,1\n3,C,Loop,32000,1\n",
    )
    .unwrap();

    let s = load_roster_csv(&path).unwrap();
    assert_eq!(s.len(), 3);
    assert_eq!(s.direct_reports_of(EmployeeId(1)).len(), 2);
    assert_eq!(s.get(EmployeeId(3)).unwrap().salary, 32_000.0);
}

#[test]
fn at_csv_db_02_header_only_file_loads_no_employees() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Id,firstName,lastName,salary,managerId\n").unwrap();

    let s = load_roster_csv(&path).unwrap();
    assert!(s.is_empty());
}

#[test]
fn at_csv_db_03_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let out = load_roster_csv(&dir.path().join("nope.csv"));
    assert!(matches!(out, Err(LoadError::Io { .. })));
}

#[test]
fn at_csv_db_04_malformed_row_names_line_and_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Id,firstName,lastName,salary,managerId\n1,A,B,100,\nx,C,D,200,1\n").unwrap();

    let err = load_roster_csv(&path).unwrap_err();
    assert_eq!(err.to_string(), "line 3: id: not an integer: \"x\"");
}
