#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use orgaudit_contracts::ContractViolation;
use orgaudit_os::audit_run::{OrgAuditConfig, OrgAuditError, OrgAuditWiring};
use orgaudit_os::report::{render_json, render_text_lines};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid audit configuration: {0}")]
    Config(#[from] ContractViolation),
    #[error(transparent)]
    Audit(#[from] OrgAuditError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Audit manager pay and reporting-chain depth for an employee roster.
#[derive(Debug, Clone, Parser)]
#[command(name = "orgaudit", version)]
pub struct AuditArgs {
    /// Roster CSV with columns id,firstName,lastName,salary,managerId
    pub csv: PathBuf,

    /// Deepest allowed reporting chain
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Minimum manager pay as a multiple of the direct reports' average
    #[arg(long)]
    pub min_ratio: Option<f64>,

    /// Maximum manager pay as a multiple of the direct reports' average
    #[arg(long)]
    pub max_ratio: Option<f64>,

    #[arg(long)]
    pub skip_compensation: bool,

    #[arg(long)]
    pub skip_depth: bool,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AuditArgs {
    /// Flags override whatever `base` carries (normally env over `mvp_v1`).
    pub fn to_config(&self, base: OrgAuditConfig) -> OrgAuditConfig {
        let mut cfg = base;
        if let Some(v) = self.max_depth {
            cfg.depth.max_reporting_depth = v;
        }
        if let Some(v) = self.min_ratio {
            cfg.compensation.min_ratio = v;
        }
        if let Some(v) = self.max_ratio {
            cfg.compensation.max_ratio = v;
        }
        if self.skip_compensation {
            cfg.compensation_enabled = false;
        }
        if self.skip_depth {
            cfg.depth_enabled = false;
        }
        cfg
    }
}

pub fn execute_audit(args: &AuditArgs, base: OrgAuditConfig) -> Result<String, CliError> {
    let config = args.to_config(base);
    debug!(?config, csv = %args.csv.display(), "resolved audit config");

    let wiring = OrgAuditWiring::new(config)?;
    let report = wiring.run_csv(&args.csv)?;
    if args.json {
        Ok(render_json(&report)?)
    } else {
        Ok(render_text_lines(&report).join("\n"))
    }
}
