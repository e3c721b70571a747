#![forbid(unsafe_code)]

use orgaudit_contracts::audit::{CompensationBand, CompensationReport, DepthReport};
use orgaudit_contracts::chain::ChainAnomalyKind;

use crate::audit_run::OrgAuditReport;

/// Human-readable lines for an audit run, in a stable order.
pub fn render_text_lines(report: &OrgAuditReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Roster {}: {} employees",
        short_fingerprint(&report.roster_fingerprint),
        report.employee_count
    )];
    if report.replaced_duplicate_count > 0 {
        lines.push(format!(
            "{} duplicate employee id(s) replaced by a later record",
            report.replaced_duplicate_count
        ));
    }
    if let Some(c) = &report.compensation {
        lines.extend(compensation_lines(c));
    }
    if let Some(d) = &report.depth {
        lines.extend(depth_lines(d));
    }
    lines
}

pub fn render_json(report: &OrgAuditReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

pub fn compensation_lines(report: &CompensationReport) -> Vec<String> {
    let mut findings: Vec<_> = report.underpaid.iter().chain(report.overpaid.iter()).collect();
    findings.sort_by_key(|f| f.manager_id);

    let mut lines = vec!["Checking manager salaries".to_string()];
    for f in findings {
        match f.band {
            CompensationBand::Underpaid { .. } => lines.push(format!(
                "Manager {} earns less. Required minimum: {:.2}, Actual: {:.2}, Shortfall: {:.2}",
                f.manager_name,
                f.min_required,
                f.salary,
                f.amount()
            )),
            CompensationBand::Overpaid { .. } => lines.push(format!(
                "Manager {} earns more. Maximum allowed: {:.2}, Actual: {:.2}, Excess: {:.2}",
                f.manager_name,
                f.max_allowed,
                f.salary,
                f.amount()
            )),
            CompensationBand::WithinBand => {}
        }
    }
    for id in &report.unresolved_manager_ids {
        lines.push(format!(
            "Manager ID {id} has direct reports but no employee record"
        ));
    }
    for id in &report.unbounded_manager_ids {
        lines.push(format!(
            "Manager ID {id} not checked: pay band out of range for team salaries"
        ));
    }
    lines.push(format!(
        "Managers checked: {}, underpaid: {}, overpaid: {}",
        report.managers_checked,
        report.underpaid.len(),
        report.overpaid.len()
    ));
    lines
}

pub fn depth_lines(report: &DepthReport) -> Vec<String> {
    let mut lines = vec!["Checking Reporting Chain Length for the employees".to_string()];
    for d in &report.dangling_references {
        lines.push(format!(
            "Manager with ID {} not found for employee ID {}",
            d.missing_manager_id, d.employee_id
        ));
    }
    for a in &report.anomalies {
        let why = match a.kind {
            ChainAnomalyKind::SelfManaged => "employee is self-managed",
            ChainAnomalyKind::CycleDetected => "reporting cycle",
            ChainAnomalyKind::Truncated => "chain exceeds walk budget",
        };
        lines.push(format!(
            "Skipping employee ID {} due to invalid reporting structure ({why})",
            a.employee_id
        ));
    }
    for v in &report.violations {
        lines.push(format!(
            "Employee {} empId {} has reporting depth of {} (exceeds by {})",
            v.employee_name, v.employee_id, v.depth, v.excess
        ));
    }
    lines
}
