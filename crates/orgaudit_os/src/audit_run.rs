#![forbid(unsafe_code)]

use std::env;
use std::path::Path;
use std::str::FromStr;

use orgaudit_contracts::audit::{CompensationReport, DepthReport, AUDIT_CONTRACT_VERSION};
use orgaudit_contracts::{ContractViolation, SchemaVersion};
use orgaudit_engines::chain_walk::ChainWalkConfig;
use orgaudit_engines::compensation::{reason_codes, CompensationAuditor, CompensationPolicy};
use orgaudit_engines::depth::{DepthAuditor, DepthPolicy};
use orgaudit_storage::csv_load::{load_roster_csv, LoadError};
use orgaudit_storage::roster::RosterStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ENV_MAX_REPORTING_DEPTH: &str = "ORGAUDIT_MAX_REPORTING_DEPTH";
pub const ENV_MIN_PAY_RATIO: &str = "ORGAUDIT_MIN_PAY_RATIO";
pub const ENV_MAX_PAY_RATIO: &str = "ORGAUDIT_MAX_PAY_RATIO";
pub const ENV_MAX_CHAIN_HOPS: &str = "ORGAUDIT_MAX_CHAIN_HOPS";

#[derive(Debug, Error)]
pub enum OrgAuditError {
    #[error("audit contract violation: {0}")]
    Contract(#[from] ContractViolation),
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrgAuditConfig {
    pub compensation_enabled: bool,
    pub depth_enabled: bool,
    pub compensation: CompensationPolicy,
    pub depth: DepthPolicy,
    pub chain_walk: ChainWalkConfig,
}

impl OrgAuditConfig {
    pub fn mvp_v1() -> Self {
        Self {
            compensation_enabled: true,
            depth_enabled: true,
            compensation: CompensationPolicy::mvp_v1(),
            depth: DepthPolicy::mvp_v1(),
            chain_walk: ChainWalkConfig::mvp_v1(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_values(|key| env::var(key).ok())
    }

    /// `mvp_v1` defaults overridden by whichever variables `lookup` returns.
    ///
    /// Blank or unparseable values keep the default.
    pub fn from_env_values<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::mvp_v1();
        if let Some(v) = parse_env_value(&lookup, ENV_MAX_REPORTING_DEPTH) {
            cfg.depth.max_reporting_depth = v;
        }
        if let Some(v) = parse_env_value(&lookup, ENV_MIN_PAY_RATIO) {
            cfg.compensation.min_ratio = v;
        }
        if let Some(v) = parse_env_value(&lookup, ENV_MAX_PAY_RATIO) {
            cfg.compensation.max_ratio = v;
        }
        if let Some(v) = parse_env_value(&lookup, ENV_MAX_CHAIN_HOPS) {
            cfg.chain_walk.max_chain_hops = v;
        }
        cfg
    }
}

fn parse_env_value<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = trimmed, "ignoring unparseable config value");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgAuditReport {
    pub schema_version: SchemaVersion,
    pub roster_fingerprint: String,
    pub employee_count: usize,
    pub replaced_duplicate_count: usize,
    pub compensation: Option<CompensationReport>,
    pub depth: Option<DepthReport>,
}

impl OrgAuditReport {
    pub fn is_clean(&self) -> bool {
        self.compensation.as_ref().map_or(true, |c| c.is_clean())
            && self.depth.as_ref().map_or(true, |d| d.is_clean())
    }
}

/// Runs the enabled auditors over one roster.
#[derive(Debug, Clone)]
pub struct OrgAuditWiring {
    config: OrgAuditConfig,
    compensation: CompensationAuditor,
    depth: DepthAuditor,
}

impl OrgAuditWiring {
    pub fn new(config: OrgAuditConfig) -> Result<Self, ContractViolation> {
        Ok(Self {
            config,
            compensation: CompensationAuditor::new(config.compensation)?,
            depth: DepthAuditor::new(config.depth, config.chain_walk)?,
        })
    }

    pub fn run(&self, roster: &RosterStore) -> Result<OrgAuditReport, ContractViolation> {
        let roster_fingerprint = roster.fingerprint_hex();
        info!(
            fingerprint = %roster_fingerprint,
            employees = roster.len(),
            "org audit started"
        );

        let compensation = if self.config.compensation_enabled {
            let out = self.compensation.audit(roster)?;
            log_compensation(&out);
            Some(out)
        } else {
            debug!("compensation audit disabled");
            None
        };

        let depth = if self.config.depth_enabled {
            let out = self.depth.audit(roster)?;
            log_depth(&out);
            Some(out)
        } else {
            debug!("depth audit disabled");
            None
        };

        let report = OrgAuditReport {
            schema_version: AUDIT_CONTRACT_VERSION,
            roster_fingerprint,
            employee_count: roster.len(),
            replaced_duplicate_count: roster.replaced_duplicate_count(),
            compensation,
            depth,
        };
        info!(clean = report.is_clean(), "org audit finished");
        Ok(report)
    }

    pub fn run_csv(&self, path: &Path) -> Result<OrgAuditReport, OrgAuditError> {
        let roster = load_roster_csv(path)?;
        Ok(self.run(&roster)?)
    }
}

fn log_compensation(out: &CompensationReport) {
    for id in &out.unresolved_manager_ids {
        warn!(
            manager_id = id.0,
            reason_code = reason_codes::COMP_MANAGER_UNRESOLVED.0,
            "manager has direct reports but no record"
        );
    }
    for id in &out.unbounded_manager_ids {
        warn!(
            manager_id = id.0,
            reason_code = reason_codes::COMP_BAND_UNREPRESENTABLE.0,
            "pay band overflows for this team, manager not classified"
        );
    }
    for f in out.underpaid.iter().chain(out.overpaid.iter()) {
        debug!(
            manager_id = f.manager_id.0,
            reason_code = f.reason_code.0,
            band = ?f.band,
            avg_report_salary = f.avg_report_salary,
            "compensation finding"
        );
    }
    info!(
        managers_checked = out.managers_checked,
        underpaid = out.underpaid.len(),
        overpaid = out.overpaid.len(),
        "compensation audit complete"
    );
}

fn log_depth(out: &DepthReport) {
    for a in &out.anomalies {
        warn!(
            employee_id = a.employee_id.0,
            kind = a.kind.as_str(),
            reason_code = a.reason_code.0,
            "skipping employee with malformed reporting chain"
        );
    }
    for d in &out.dangling_references {
        warn!(
            employee_id = d.employee_id.0,
            missing_manager_id = d.missing_manager_id.0,
            reason_code = d.reason_code.0,
            "manager reference does not resolve"
        );
    }
    info!(
        employees_checked = out.employees_checked,
        violations = out.violations.len(),
        anomalies = out.anomalies.len(),
        "depth audit complete"
    );
}
