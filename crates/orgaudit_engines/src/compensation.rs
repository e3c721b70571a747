#![forbid(unsafe_code)]

use orgaudit_contracts::audit::{CompensationBand, CompensationFinding, CompensationReport};
use orgaudit_contracts::roster::RosterView;
use orgaudit_contracts::{ContractViolation, ReasonCodeId, Validate};

pub mod reason_codes {
    use orgaudit_contracts::ReasonCodeId;

    // Compensation audit reason-code namespace.
    pub const COMP_OK_WITHIN_BAND: ReasonCodeId = ReasonCodeId(0x4350_0001);
    pub const COMP_MANAGER_UNDERPAID: ReasonCodeId = ReasonCodeId(0x4350_0010);
    pub const COMP_MANAGER_OVERPAID: ReasonCodeId = ReasonCodeId(0x4350_0011);
    pub const COMP_MANAGER_UNRESOLVED: ReasonCodeId = ReasonCodeId(0x4350_0012);
    pub const COMP_BAND_UNREPRESENTABLE: ReasonCodeId = ReasonCodeId(0x4350_0013);
}

/// Allowed manager pay, as multiples of the direct reports' average salary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensationPolicy {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl CompensationPolicy {
    pub fn mvp_v1() -> Self {
        Self {
            min_ratio: 1.2,
            max_ratio: 1.5,
        }
    }
}

impl Validate for CompensationPolicy {
    fn validate(&self) -> Result<(), ContractViolation> {
        if !self.min_ratio.is_finite() {
            return Err(ContractViolation::NotFinite {
                field: "compensation_policy.min_ratio",
            });
        }
        if !self.max_ratio.is_finite() {
            return Err(ContractViolation::NotFinite {
                field: "compensation_policy.max_ratio",
            });
        }
        if self.min_ratio <= 0.0 {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_policy.min_ratio",
                reason: "must be > 0",
            });
        }
        if self.max_ratio < self.min_ratio {
            return Err(ContractViolation::InvalidValue {
                field: "compensation_policy.max_ratio",
                reason: "must be >= min_ratio",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CompensationAuditor {
    policy: CompensationPolicy,
}

impl CompensationAuditor {
    pub fn new(policy: CompensationPolicy) -> Result<Self, ContractViolation> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// `(min_required, max_allowed)` for a team with the given average salary.
    pub fn bounds(&self, avg_report_salary: f64) -> (f64, f64) {
        (
            avg_report_salary * self.policy.min_ratio,
            avg_report_salary * self.policy.max_ratio,
        )
    }

    pub fn classify(&self, salary: f64, avg_report_salary: f64) -> CompensationBand {
        let (min_required, max_allowed) = self.bounds(avg_report_salary);
        if salary < min_required {
            CompensationBand::Underpaid {
                shortfall: min_required - salary,
            }
        } else if salary > max_allowed {
            CompensationBand::Overpaid {
                excess: salary - max_allowed,
            }
        } else {
            CompensationBand::WithinBand
        }
    }

    /// Compares every manager with reports against the band around their team's average.
    ///
    /// Managers are visited in ascending id. A manager id with reports but no record is
    /// listed in `unresolved_manager_ids`; one whose band overflows `f64` is listed in
    /// `unbounded_manager_ids`. Neither is classified and neither stops the audit.
    pub fn audit<R>(&self, roster: &R) -> Result<CompensationReport, ContractViolation>
    where
        R: RosterView + ?Sized,
    {
        let mut managers_checked = 0u32;
        let mut underpaid = Vec::new();
        let mut overpaid = Vec::new();
        let mut unresolved_manager_ids = Vec::new();
        let mut unbounded_manager_ids = Vec::new();

        for manager_id in roster.manager_ids_with_reports() {
            let reports = roster.direct_reports(manager_id);
            let Some(manager) = roster.employee(manager_id) else {
                unresolved_manager_ids.push(manager_id);
                continue;
            };

            let salaries: Vec<f64> = reports.iter().map(|r| r.salary).collect();
            let avg = average_salary(&salaries);
            let (min_required, max_allowed) = self.bounds(avg);
            if !min_required.is_finite() || !max_allowed.is_finite() {
                unbounded_manager_ids.push(manager_id);
                continue;
            }
            managers_checked = managers_checked.saturating_add(1);

            let band = self.classify(manager.salary, avg);
            if band == CompensationBand::WithinBand {
                continue;
            }

            let finding = CompensationFinding::v1(
                manager.id,
                manager.full_name(),
                manager.salary,
                avg,
                min_required,
                max_allowed,
                u32::try_from(reports.len()).unwrap_or(u32::MAX),
                band,
                reason_code_for(band),
            )?;
            match band {
                CompensationBand::Underpaid { .. } => underpaid.push(finding),
                CompensationBand::Overpaid { .. } => overpaid.push(finding),
                CompensationBand::WithinBand => {}
            }
        }

        CompensationReport::v1(
            managers_checked,
            underpaid,
            overpaid,
            unresolved_manager_ids,
            unbounded_manager_ids,
        )
    }
}

pub fn reason_code_for(band: CompensationBand) -> ReasonCodeId {
    match band {
        CompensationBand::Underpaid { .. } => reason_codes::COMP_MANAGER_UNDERPAID,
        CompensationBand::Overpaid { .. } => reason_codes::COMP_MANAGER_OVERPAID,
        CompensationBand::WithinBand => reason_codes::COMP_OK_WITHIN_BAND,
    }
}

/// Mean of `salaries`, or 0 for an empty team.
///
/// Falls back to summing pre-divided values when the plain sum overflows, so any set of
/// finite salaries has a finite mean.
fn average_salary(salaries: &[f64]) -> f64 {
    if salaries.is_empty() {
        return 0.0;
    }
    let n = salaries.len() as f64;
    let sum: f64 = salaries.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        salaries.iter().map(|s| s / n).sum()
    }
}
