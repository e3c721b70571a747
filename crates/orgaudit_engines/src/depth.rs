#![forbid(unsafe_code)]

use orgaudit_contracts::audit::{ChainAnomaly, DanglingManagerRef, DepthReport, DepthViolation};
use orgaudit_contracts::chain::ChainWalkResult;
use orgaudit_contracts::roster::RosterView;
use orgaudit_contracts::ContractViolation;

use crate::chain_walk::{reason_code_for, reason_codes, ChainWalkConfig, ChainWalker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthPolicy {
    pub max_reporting_depth: u32,
}

impl DepthPolicy {
    pub fn mvp_v1() -> Self {
        Self {
            max_reporting_depth: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DepthAuditor {
    policy: DepthPolicy,
    walker: ChainWalker,
}

impl DepthAuditor {
    pub fn new(
        policy: DepthPolicy,
        walk_config: ChainWalkConfig,
    ) -> Result<Self, ContractViolation> {
        Ok(Self {
            policy,
            walker: ChainWalker::new(walk_config)?,
        })
    }

    /// Flags chains deeper than the policy allows.
    ///
    /// Anomalous chains are never violations; they are listed under `anomalies` so one broken
    /// chain does not hide the rest of the roster.
    pub fn audit<R>(&self, roster: &R) -> Result<DepthReport, ContractViolation>
    where
        R: RosterView + ?Sized,
    {
        let max = self.policy.max_reporting_depth;
        let mut employees_checked = 0u32;
        let mut violations = Vec::new();
        let mut anomalies = Vec::new();
        let mut dangling_references = Vec::new();

        for employee in roster.employees() {
            employees_checked = employees_checked.saturating_add(1);
            let walk = self.walker.walk(roster, employee);
            if let Some(missing_manager_id) = walk.dangling_manager_id {
                dangling_references.push(DanglingManagerRef {
                    employee_id: employee.id,
                    missing_manager_id,
                    reason_code: reason_codes::CHAIN_OK_DANGLING_MANAGER,
                });
            }
            match walk.result {
                ChainWalkResult::Anomaly(kind) => anomalies.push(ChainAnomaly {
                    employee_id: employee.id,
                    kind,
                    reason_code: reason_code_for(&walk),
                }),
                ChainWalkResult::Depth(depth) if depth > max => {
                    violations.push(DepthViolation {
                        employee_id: employee.id,
                        employee_name: employee.full_name(),
                        depth,
                        excess: depth - max,
                    })
                }
                ChainWalkResult::Depth(_) => {}
            }
        }

        DepthReport::v1(
            employees_checked,
            max,
            violations,
            anomalies,
            dangling_references,
        )
    }
}
