#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ContractViolation, SchemaVersion, Validate};

pub const EMPLOYEE_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the org roster as handed over by a loader.
///
/// `manager_id` is a plain reference: it may point at an id that is not in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub schema_version: SchemaVersion,
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub salary: f64,
    pub manager_id: Option<EmployeeId>,
}

impl EmployeeRecord {
    pub fn v1(
        id: EmployeeId,
        first_name: String,
        last_name: String,
        salary: f64,
        manager_id: Option<EmployeeId>,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: EMPLOYEE_CONTRACT_VERSION,
            id,
            first_name,
            last_name,
            salary,
            manager_id,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_self_managed(&self) -> bool {
        self.manager_id == Some(self.id)
    }
}

impl Validate for EmployeeRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != EMPLOYEE_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "employee_record.schema_version",
                reason: "must match EMPLOYEE_CONTRACT_VERSION",
            });
        }
        if !self.salary.is_finite() {
            return Err(ContractViolation::NotFinite {
                field: "employee_record.salary",
            });
        }
        if self.salary < 0.0 {
            return Err(ContractViolation::InvalidRange {
                field: "employee_record.salary",
                min: 0.0,
                max: f64::MAX,
                got: self.salary,
            });
        }
        Ok(())
    }
}
