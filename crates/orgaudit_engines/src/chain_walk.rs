#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use orgaudit_contracts::chain::{ChainAnomalyKind, ChainWalk, ChainWalkResult};
use orgaudit_contracts::employee::{EmployeeId, EmployeeRecord};
use orgaudit_contracts::roster::RosterView;
use orgaudit_contracts::{ContractViolation, ReasonCodeId};

pub mod reason_codes {
    use orgaudit_contracts::ReasonCodeId;

    // Chain walk reason-code namespace.
    pub const CHAIN_OK_DEPTH: ReasonCodeId = ReasonCodeId(0x4357_0001);
    pub const CHAIN_OK_DANGLING_MANAGER: ReasonCodeId = ReasonCodeId(0x4357_0002);

    pub const CHAIN_SELF_MANAGED: ReasonCodeId = ReasonCodeId(0x4357_0010);
    pub const CHAIN_CYCLE_DETECTED: ReasonCodeId = ReasonCodeId(0x4357_0011);
    pub const CHAIN_TRUNCATED: ReasonCodeId = ReasonCodeId(0x4357_0012);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainWalkConfig {
    /// Distinct manager ids a single walk may follow before it gives up as `Truncated`.
    ///
    /// The visited set already bounds a walk by the roster size, so the default never
    /// truncates a chain the store accepted.
    pub max_chain_hops: u32,
}

impl ChainWalkConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_chain_hops: u32::MAX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChainWalker {
    config: ChainWalkConfig,
}

impl ChainWalker {
    pub fn new(config: ChainWalkConfig) -> Result<Self, ContractViolation> {
        if config.max_chain_hops == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "chain_walk_config.max_chain_hops",
                reason: "must be > 0",
            });
        }
        Ok(Self { config })
    }

    /// Depth of `employee_id`'s manager chain.
    ///
    /// Fails only when `employee_id` itself is not in the roster; broken chains come back
    /// as `ChainWalkResult::Anomaly`.
    pub fn compute_depth<R>(
        &self,
        roster: &R,
        employee_id: EmployeeId,
    ) -> Result<ChainWalkResult, ContractViolation>
    where
        R: RosterView + ?Sized,
    {
        let start = roster
            .employee(employee_id)
            .ok_or(ContractViolation::InvalidValue {
                field: "chain_walk.employee_id",
                reason: "must resolve in roster",
            })?;
        Ok(self.walk(roster, start).result)
    }

    /// Follows `manager_id` links upward from `start`.
    ///
    /// Depth is the number of managers passed that themselves have a manager, so the hop
    /// into the root is not counted: `a -> b -> root` is depth 1. A manager id that does not
    /// resolve ends the walk with the depth reached so far. Self-management is checked
    /// before the visited set so `42 -> 42` reports `SelfManaged`, not a cycle.
    pub fn walk<'a, R>(&self, roster: &'a R, start: &'a EmployeeRecord) -> ChainWalk
    where
        R: RosterView + ?Sized,
    {
        let mut depth = 0u32;
        let mut visited: BTreeSet<EmployeeId> = BTreeSet::new();
        let mut dangling_manager_id = None;
        let mut current = start;

        let result = loop {
            let Some(manager_id) = current.manager_id else {
                break ChainWalkResult::Depth(depth);
            };
            if current.is_self_managed() {
                break ChainWalkResult::Anomaly(ChainAnomalyKind::SelfManaged);
            }
            if visited.contains(&manager_id) {
                break ChainWalkResult::Anomaly(ChainAnomalyKind::CycleDetected);
            }
            if visited.len() >= self.config.max_chain_hops as usize {
                break ChainWalkResult::Anomaly(ChainAnomalyKind::Truncated);
            }
            visited.insert(manager_id);

            let Some(manager) = roster.employee(manager_id) else {
                dangling_manager_id = Some(manager_id);
                break ChainWalkResult::Depth(depth);
            };
            current = manager;
            if current.manager_id.is_none() {
                break ChainWalkResult::Depth(depth);
            }
            depth = depth.saturating_add(1);
        };

        ChainWalk {
            employee_id: start.id,
            result,
            hops: u32::try_from(visited.len()).unwrap_or(u32::MAX),
            dangling_manager_id,
        }
    }
}

pub fn reason_code_for(walk: &ChainWalk) -> ReasonCodeId {
    match walk.result {
        ChainWalkResult::Anomaly(ChainAnomalyKind::SelfManaged) => {
            reason_codes::CHAIN_SELF_MANAGED
        }
        ChainWalkResult::Anomaly(ChainAnomalyKind::CycleDetected) => {
            reason_codes::CHAIN_CYCLE_DETECTED
        }
        ChainWalkResult::Anomaly(ChainAnomalyKind::Truncated) => reason_codes::CHAIN_TRUNCATED,
        ChainWalkResult::Depth(_) if walk.dangling_manager_id.is_some() => {
            reason_codes::CHAIN_OK_DANGLING_MANAGER
        }
        ChainWalkResult::Depth(_) => reason_codes::CHAIN_OK_DEPTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgaudit_storage::roster::RosterStore;
    use proptest::prelude::*;

    fn emp(id: i64, manager: Option<i64>) -> EmployeeRecord {
        EmployeeRecord::v1(
            EmployeeId(id),
            format!("First{id}"),
            format!("Last{id}"),
            50_000.0,
            manager.map(EmployeeId),
        )
        .unwrap()
    }

    fn roster(rows: &[(i64, Option<i64>)]) -> RosterStore {
        RosterStore::from_records(rows.iter().map(|(id, m)| emp(*id, *m)).collect()).unwrap()
    }

    fn walker() -> ChainWalker {
        ChainWalker::new(ChainWalkConfig::mvp_v1()).unwrap()
    }

    #[test]
    fn at_chain_01_root_has_depth_zero() {
        let s = roster(&[(1, None)]);
        assert_eq!(
            walker().compute_depth(&s, EmployeeId(1)).unwrap(),
            ChainWalkResult::Depth(0)
        );
    }

    #[test]
    fn at_chain_02_hop_into_root_is_not_counted() {
        let s = roster(&[(1, None), (2, Some(1)), (3, Some(2)), (4, Some(3))]);
        let w = walker();
        assert_eq!(w.compute_depth(&s, EmployeeId(2)).unwrap(), ChainWalkResult::Depth(0));
        assert_eq!(w.compute_depth(&s, EmployeeId(3)).unwrap(), ChainWalkResult::Depth(1));
        assert_eq!(w.compute_depth(&s, EmployeeId(4)).unwrap(), ChainWalkResult::Depth(2));
    }

    #[test]
    fn at_chain_03_self_managed_is_anomaly() {
        let s = roster(&[(42, Some(42))]);
        assert_eq!(
            walker().compute_depth(&s, EmployeeId(42)).unwrap(),
            ChainWalkResult::Anomaly(ChainAnomalyKind::SelfManaged)
        );
    }

    #[test]
    fn at_chain_04_self_managed_upstream_wins_over_cycle() {
        let s = roster(&[(1, Some(2)), (2, Some(2))]);
        assert_eq!(
            walker().compute_depth(&s, EmployeeId(1)).unwrap(),
            ChainWalkResult::Anomaly(ChainAnomalyKind::SelfManaged)
        );
    }

    #[test]
    fn at_chain_05_three_way_cycle_is_detected() {
        let s = roster(&[(1, Some(3)), (2, Some(1)), (3, Some(2))]);
        let w = walker();
        for id in [1, 2, 3] {
            let walk = w.walk(&s, s.get(EmployeeId(id)).unwrap());
            assert_eq!(
                walk.result,
                ChainWalkResult::Anomaly(ChainAnomalyKind::CycleDetected)
            );
            assert_eq!(walk.hops, 3);
            assert_eq!(reason_code_for(&walk), reason_codes::CHAIN_CYCLE_DETECTED);
        }
    }

    #[test]
    fn at_chain_06_cycle_above_a_clean_prefix_is_detected() {
        let s = roster(&[(10, Some(11)), (11, Some(12)), (12, Some(13)), (13, Some(11))]);
        assert_eq!(
            walker().compute_depth(&s, EmployeeId(10)).unwrap(),
            ChainWalkResult::Anomaly(ChainAnomalyKind::CycleDetected)
        );
    }

    #[test]
    fn at_chain_07_dangling_first_hop_is_depth_zero() {
        let s = roster(&[(10, Some(999))]);
        let walk = walker().walk(&s, s.get(EmployeeId(10)).unwrap());
        assert_eq!(walk.result, ChainWalkResult::Depth(0));
        assert_eq!(walk.dangling_manager_id, Some(EmployeeId(999)));
        assert_eq!(reason_code_for(&walk), reason_codes::CHAIN_OK_DANGLING_MANAGER);
    }

    #[test]
    fn at_chain_08_dangling_after_resolved_hops_keeps_depth() {
        let s = roster(&[(1, Some(2)), (2, Some(3)), (3, Some(999))]);
        let walk = walker().walk(&s, s.get(EmployeeId(1)).unwrap());
        assert_eq!(walk.result, ChainWalkResult::Depth(2));
        assert_eq!(walk.dangling_manager_id, Some(EmployeeId(999)));
        assert_eq!(walk.hops, 3);
    }

    #[test]
    fn at_chain_09_seven_link_chain() {
        // 8 -> 7 -> ... -> 1 (root): seven links, six managers below the root.
        let mut rows = vec![(1, None)];
        rows.extend((2..=8).map(|id| (id, Some(id - 1))));
        let s = roster(&rows);
        assert_eq!(
            walker().compute_depth(&s, EmployeeId(8)).unwrap(),
            ChainWalkResult::Depth(6)
        );
    }

    #[test]
    fn at_chain_10_unknown_start_is_contract_error() {
        let s = roster(&[(1, None)]);
        assert!(matches!(
            walker().compute_depth(&s, EmployeeId(77)),
            Err(ContractViolation::InvalidValue {
                field: "chain_walk.employee_id",
                ..
            })
        ));
    }

    #[test]
    fn at_chain_11_hop_budget_truncates() {
        let mut rows = vec![(1, None)];
        rows.extend((2..=10).map(|id| (id, Some(id - 1))));
        let s = roster(&rows);
        let w = ChainWalker::new(ChainWalkConfig { max_chain_hops: 3 }).unwrap();
        assert_eq!(
            w.compute_depth(&s, EmployeeId(10)).unwrap(),
            ChainWalkResult::Anomaly(ChainAnomalyKind::Truncated)
        );
        let truncated = w.walk(&s, s.get(EmployeeId(10)).unwrap());
        assert_eq!(reason_code_for(&truncated), reason_codes::CHAIN_TRUNCATED);
        assert_eq!(
            w.compute_depth(&s, EmployeeId(4)).unwrap(),
            ChainWalkResult::Depth(2)
        );
        assert!(ChainWalker::new(ChainWalkConfig { max_chain_hops: 0 }).is_err());
    }

    #[test]
    fn at_chain_12_walks_are_idempotent() {
        let s = roster(&[(1, Some(3)), (2, Some(1)), (3, None), (4, Some(2))]);
        let w = walker();
        for r in s.all_employees() {
            assert_eq!(w.walk(&s, r), w.walk(&s, r));
        }
    }

    #[test]
    fn at_chain_13_default_budget_never_truncates_a_long_chain() {
        let len = 100_003i64;
        let mut rows = vec![(1, None)];
        rows.extend((2..=len).map(|id| (id, Some(id - 1))));
        let s = roster(&rows);
        let walk = walker().walk(&s, s.get(EmployeeId(len)).unwrap());
        assert_eq!(walk.result, ChainWalkResult::Depth(100_001));
        assert_eq!(reason_code_for(&walk), reason_codes::CHAIN_OK_DEPTH);
    }

    proptest! {
        #[test]
        fn prop_chain_walk_terminates_within_distinct_ids(
            managers in proptest::collection::vec(proptest::option::of(0i64..16), 1..12)
        ) {
            let rows: Vec<(i64, Option<i64>)> = managers
                .iter()
                .enumerate()
                .map(|(i, m)| (i as i64, *m))
                .collect();
            let s = roster(&rows);
            let w = walker();
            for r in s.all_employees() {
                let walk = w.walk(&s, r);
                // Every hop lands on a new id: at most every roster id plus one dangling id.
                prop_assert!(walk.hops as usize <= s.len() + 1);
                if let ChainWalkResult::Depth(d) = walk.result {
                    prop_assert!((d as usize) < s.len());
                    prop_assert!(d <= walk.hops);
                }
                prop_assert_eq!(walk, w.walk(&s, r));
            }
        }
    }
}
