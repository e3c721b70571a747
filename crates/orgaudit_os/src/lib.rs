#![forbid(unsafe_code)]

pub mod audit_run;
pub mod report;
