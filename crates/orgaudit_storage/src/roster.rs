#![forbid(unsafe_code)]

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use orgaudit_contracts::employee::{EmployeeId, EmployeeRecord};
use orgaudit_contracts::{ContractViolation, Validate};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    CapacityExceeded { table: &'static str, max: usize },
    ContractViolation(ContractViolation),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { table, max } => {
                write!(f, "{table} exceeds capacity of {max} rows")
            }
            Self::ContractViolation(v) => write!(f, "contract violation: {v}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<ContractViolation> for StorageError {
    fn from(v: ContractViolation) -> Self {
        StorageError::ContractViolation(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterConfig {
    pub max_records: usize,
}

impl RosterConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_records: 1_000_000,
        }
    }
}

/// The loaded roster: employees by id plus the manager -> direct reports index.
///
/// Built once from a record set and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RosterStore {
    employees: BTreeMap<EmployeeId, EmployeeRecord>,
    load_order: Vec<EmployeeId>,
    direct_reports: BTreeMap<EmployeeId, Vec<EmployeeId>>,
    replaced_duplicate_count: usize,
}

impl RosterStore {
    pub fn from_records(records: Vec<EmployeeRecord>) -> Result<Self, StorageError> {
        Self::from_records_with_config(RosterConfig::mvp_v1(), records)
    }

    pub fn from_records_with_config(
        config: RosterConfig,
        records: Vec<EmployeeRecord>,
    ) -> Result<Self, StorageError> {
        let mut employees = BTreeMap::new();
        let mut load_order = Vec::new();
        let mut replaced_duplicate_count = 0usize;

        for record in records {
            record.validate()?;
            match employees.entry(record.id) {
                Entry::Occupied(mut slot) => {
                    // Last write wins; the id keeps its first load position.
                    warn!(
                        employee_id = record.id.0,
                        "duplicate employee id in roster, later record replaces earlier one"
                    );
                    slot.insert(record);
                    replaced_duplicate_count += 1;
                }
                Entry::Vacant(slot) => {
                    if load_order.len() >= config.max_records {
                        return Err(StorageError::CapacityExceeded {
                            table: "roster.employees",
                            max: config.max_records,
                        });
                    }
                    load_order.push(record.id);
                    slot.insert(record);
                }
            }
        }

        let mut direct_reports: BTreeMap<EmployeeId, Vec<EmployeeId>> = BTreeMap::new();
        for id in &load_order {
            if let Some(manager_id) = employees.get(id).and_then(|r| r.manager_id) {
                direct_reports.entry(manager_id).or_default().push(*id);
            }
        }

        debug!(
            employees = load_order.len(),
            managers = direct_reports.len(),
            replaced_duplicates = replaced_duplicate_count,
            "roster store built"
        );

        Ok(Self {
            employees,
            load_order,
            direct_reports,
            replaced_duplicate_count,
        })
    }

    pub fn get(&self, id: EmployeeId) -> Option<&EmployeeRecord> {
        self.employees.get(&id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.employees.contains_key(&id)
    }

    pub fn direct_reports_of(&self, manager_id: EmployeeId) -> Vec<&EmployeeRecord> {
        self.direct_reports
            .get(&manager_id)
            .map(|ids| ids.iter().filter_map(|id| self.employees.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn all_employees(&self) -> impl Iterator<Item = &EmployeeRecord> + '_ {
        self.load_order
            .iter()
            .filter_map(|id| self.employees.get(id))
    }

    /// Every id referenced as a manager, ascending, with its direct reports in load order.
    pub fn managers_with_reports(
        &self,
    ) -> impl Iterator<Item = (EmployeeId, Vec<&EmployeeRecord>)> + '_ {
        self.direct_reports.iter().map(|(manager_id, ids)| {
            (
                *manager_id,
                ids.iter().filter_map(|id| self.employees.get(id)).collect(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.load_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load_order.is_empty()
    }

    pub fn replaced_duplicate_count(&self) -> usize {
        self.replaced_duplicate_count
    }

    /// SHA-256 over the surviving records in load order, lowercase hex.
    pub fn fingerprint_hex(&self) -> String {
        let mut hasher = Sha256::new();
        for record in self.all_employees() {
            hasher.update(record.id.0.to_le_bytes());
            hasher.update([0x1f_u8]);
            hasher.update(record.first_name.as_bytes());
            hasher.update([0x1f_u8]);
            hasher.update(record.last_name.as_bytes());
            hasher.update([0x1f_u8]);
            hasher.update(record.salary.to_bits().to_le_bytes());
            hasher.update([0x1f_u8]);
            match record.manager_id {
                Some(manager_id) => {
                    hasher.update([1_u8]);
                    hasher.update(manager_id.0.to_le_bytes());
                }
                None => hasher.update([0_u8]),
            }
            hasher.update([0x1e_u8]);
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
