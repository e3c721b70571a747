#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::employee::EmployeeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainAnomalyKind {
    /// The employee names itself as manager.
    SelfManaged,
    /// A manager id came back around before the walk reached a root.
    CycleDetected,
    /// The walk ran past the configured hop budget.
    Truncated,
}

impl ChainAnomalyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfManaged => "self_managed",
            Self::CycleDetected => "cycle_detected",
            Self::Truncated => "truncated",
        }
    }
}

/// Outcome of walking one manager chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainWalkResult {
    Depth(u32),
    Anomaly(ChainAnomalyKind),
}

/// Walk result plus what the walker saw on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainWalk {
    pub employee_id: EmployeeId,
    pub result: ChainWalkResult,
    /// Distinct manager ids visited before the walk stopped.
    pub hops: u32,
    /// Set when the walk stopped on a manager id that is not in the roster.
    pub dangling_manager_id: Option<EmployeeId>,
}
