#![forbid(unsafe_code)]

//! Loader for the flat roster CSV: `id,firstName,lastName,salary,managerId`.
//!
//! The first line is a header and is always skipped. `managerId` may be missing or blank.
//! No quoting: fields are split on `,` and trimmed.

use std::fs;
use std::path::{Path, PathBuf};

use orgaudit_contracts::employee::{EmployeeId, EmployeeRecord};
use thiserror::Error;
use tracing::debug;

use crate::roster::{RosterStore, StorageError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {field}: {reason}")]
    Malformed {
        line: usize,
        field: &'static str,
        reason: String,
    },
    #[error("roster rejected: {0}")]
    Storage(#[from] StorageError),
}

pub fn load_roster_csv(path: &Path) -> Result<RosterStore, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loading roster csv");
    roster_from_csv_str(&text)
}

pub fn roster_from_csv_str(text: &str) -> Result<RosterStore, LoadError> {
    let records = parse_roster_csv(text)?;
    Ok(RosterStore::from_records(records)?)
}

pub fn parse_roster_csv(text: &str) -> Result<Vec<EmployeeRecord>, LoadError> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate().skip(1) {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        records.push(parse_row(line, raw)?);
    }
    Ok(records)
}

fn parse_row(line: usize, raw: &str) -> Result<EmployeeRecord, LoadError> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    let id = parse_i64(line, "id", required(line, "id", &fields, 0)?)?;
    let first_name = required(line, "firstName", &fields, 1)?.to_string();
    let last_name = required(line, "lastName", &fields, 2)?.to_string();
    let salary_raw = required(line, "salary", &fields, 3)?;
    let salary = salary_raw.parse::<f64>().map_err(|_| LoadError::Malformed {
        line,
        field: "salary",
        reason: format!("not a number: {salary_raw:?}"),
    })?;
    let manager_id = match fields.get(4) {
        Some(v) if !v.is_empty() => Some(EmployeeId(parse_i64(line, "managerId", v)?)),
        _ => None,
    };

    EmployeeRecord::v1(EmployeeId(id), first_name, last_name, salary, manager_id).map_err(|v| {
        LoadError::Malformed {
            line,
            field: "salary",
            reason: v.to_string(),
        }
    })
}

fn required<'a>(
    line: usize,
    field: &'static str,
    fields: &[&'a str],
    idx: usize,
) -> Result<&'a str, LoadError> {
    match fields.get(idx) {
        Some(v) if !v.is_empty() => Ok(*v),
        _ => Err(LoadError::Malformed {
            line,
            field,
            reason: "missing".to_string(),
        }),
    }
}

fn parse_i64(line: usize, field: &'static str, raw: &str) -> Result<i64, LoadError> {
    raw.parse::<i64>().map_err(|_| LoadError::Malformed {
        line,
        field,
        reason: format!("not an integer: {raw:?}"),
    })
}
