#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::chain::ChainAnomalyKind;
use crate::employee::EmployeeId;
use crate::{ContractViolation, ReasonCodeId, SchemaVersion, Validate};

pub const AUDIT_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Where a manager's salary falls relative to the allowed band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CompensationBand {
    Underpaid { shortfall: f64 },
    Overpaid { excess: f64 },
    WithinBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationFinding {
    pub manager_id: EmployeeId,
    pub manager_name: String,
    pub salary: f64,
    pub avg_report_salary: f64,
    pub min_required: f64,
    pub max_allowed: f64,
    pub direct_report_count: u32,
    pub band: CompensationBand,
    pub reason_code: ReasonCodeId,
}

impl CompensationFinding {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        manager_id: EmployeeId,
        manager_name: String,
        salary: f64,
        avg_report_salary: f64,
        min_required: f64,
        max_allowed: f64,
        direct_report_count: u32,
        band: CompensationBand,
        reason_code: ReasonCodeId,
    ) -> Result<Self, ContractViolation> {
        let f = Self {
            manager_id,
            manager_name,
            salary,
            avg_report_salary,
            min_required,
            max_allowed,
            direct_report_count,
            band,
            reason_code,
        };
        f.validate()?;
        Ok(f)
    }

    /// Shortfall for an underpaid manager, excess for an overpaid one, zero otherwise.
    pub fn amount(&self) -> f64 {
        match self.band {
            CompensationBand::Underpaid { shortfall } => shortfall,
            CompensationBand::Overpaid { excess } => excess,
            CompensationBand::WithinBand => 0.0,
        }
    }
}

impl Validate for CompensationFinding {
    fn validate(&self) -> Result<(), ContractViolation> {
        for (field, v) in [
            ("compensation_finding.salary", self.salary),
            ("compensation_finding.avg_report_salary", self.avg_report_salary),
            ("compensation_finding.min_required", self.min_required),
            ("compensation_finding.max_allowed", self.max_allowed),
        ] {
            if !v.is_finite() {
                return Err(ContractViolation::NotFinite { field });
            }
        }
        if self.min_required > self.max_allowed {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_finding.min_required",
                reason: "must be <= max_allowed",
            });
        }
        if self.direct_report_count == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_finding.direct_report_count",
                reason: "must be > 0",
            });
        }
        match self.band {
            CompensationBand::Underpaid { shortfall } => {
                if self.salary >= self.min_required || shortfall <= 0.0 {
                    return Err(ContractViolation::InvalidValue {
                        field: "compensation_finding.band",
                        reason: "underpaid requires salary < min_required and shortfall > 0",
                    });
                }
            }
            CompensationBand::Overpaid { excess } => {
                if self.salary <= self.max_allowed || excess <= 0.0 {
                    return Err(ContractViolation::InvalidValue {
                        field: "compensation_finding.band",
                        reason: "overpaid requires salary > max_allowed and excess > 0",
                    });
                }
            }
            CompensationBand::WithinBand => {
                if self.salary < self.min_required || self.salary > self.max_allowed {
                    return Err(ContractViolation::InvalidValue {
                        field: "compensation_finding.band",
                        reason: "within_band requires min_required <= salary <= max_allowed",
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationReport {
    pub schema_version: SchemaVersion,
    pub managers_checked: u32,
    pub underpaid: Vec<CompensationFinding>,
    pub overpaid: Vec<CompensationFinding>,
    /// Manager ids that have reports but no record of their own, so no salary to compare.
    pub unresolved_manager_ids: Vec<EmployeeId>,
    /// Managers whose pay band is not representable for their team's salaries.
    pub unbounded_manager_ids: Vec<EmployeeId>,
}

impl CompensationReport {
    pub fn v1(
        managers_checked: u32,
        underpaid: Vec<CompensationFinding>,
        overpaid: Vec<CompensationFinding>,
        unresolved_manager_ids: Vec<EmployeeId>,
        unbounded_manager_ids: Vec<EmployeeId>,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: AUDIT_CONTRACT_VERSION,
            managers_checked,
            underpaid,
            overpaid,
            unresolved_manager_ids,
            unbounded_manager_ids,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn underpaid_manager_names(&self) -> Vec<String> {
        self.underpaid.iter().map(|f| f.manager_name.clone()).collect()
    }

    pub fn overpaid_manager_names(&self) -> Vec<String> {
        self.overpaid.iter().map(|f| f.manager_name.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.underpaid.is_empty() && self.overpaid.is_empty()
    }
}

impl Validate for CompensationReport {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != AUDIT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_report.schema_version",
                reason: "must match AUDIT_CONTRACT_VERSION",
            });
        }
        if self
            .underpaid
            .iter()
            .any(|f| !matches!(f.band, CompensationBand::Underpaid { .. }))
        {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_report.underpaid",
                reason: "must hold only underpaid findings",
            });
        }
        if self
            .overpaid
            .iter()
            .any(|f| !matches!(f.band, CompensationBand::Overpaid { .. }))
        {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_report.overpaid",
                reason: "must hold only overpaid findings",
            });
        }
        let findings = self.underpaid.len() + self.overpaid.len();
        if findings > self.managers_checked as usize {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_report.managers_checked",
                reason: "must cover every finding",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthViolation {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub depth: u32,
    pub excess: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAnomaly {
    pub employee_id: EmployeeId,
    pub kind: ChainAnomalyKind,
    pub reason_code: ReasonCodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingManagerRef {
    pub employee_id: EmployeeId,
    pub missing_manager_id: EmployeeId,
    pub reason_code: ReasonCodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthReport {
    pub schema_version: SchemaVersion,
    pub employees_checked: u32,
    pub max_reporting_depth: u32,
    pub violations: Vec<DepthViolation>,
    pub anomalies: Vec<ChainAnomaly>,
    pub dangling_references: Vec<DanglingManagerRef>,
}

impl DepthReport {
    pub fn v1(
        employees_checked: u32,
        max_reporting_depth: u32,
        violations: Vec<DepthViolation>,
        anomalies: Vec<ChainAnomaly>,
        dangling_references: Vec<DanglingManagerRef>,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: AUDIT_CONTRACT_VERSION,
            employees_checked,
            max_reporting_depth,
            violations,
            anomalies,
            dangling_references,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.anomalies.is_empty()
    }
}

impl Validate for DepthReport {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != AUDIT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "depth_report.schema_version",
                reason: "must match AUDIT_CONTRACT_VERSION",
            });
        }
        for v in &self.violations {
            if v.depth <= self.max_reporting_depth
                || v.excess != v.depth - self.max_reporting_depth
            {
                return Err(ContractViolation::InvalidValue {
                    field: "depth_report.violations",
                    reason: "excess must equal depth - max_reporting_depth and be > 0",
                });
            }
        }
        let findings = self.violations.len() + self.anomalies.len();
        if findings > self.employees_checked as usize {
            return Err(ContractViolation::InvalidValue {
                field: "depth_report.employees_checked",
                reason: "must cover every violation and anomaly",
            });
        }
        Ok(())
    }
}
