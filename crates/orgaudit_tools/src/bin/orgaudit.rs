#![forbid(unsafe_code)]

use clap::Parser;
use orgaudit_os::audit_run::OrgAuditConfig;
use orgaudit_tools::audit_cli::{execute_audit, AuditArgs};
use tracing_subscriber::EnvFilter;

fn main() {
    // Quiet by default; RUST_LOG=info or RUST_LOG=debug for audit tracing on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = AuditArgs::parse();
    match execute_audit(&args, OrgAuditConfig::from_env()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}
