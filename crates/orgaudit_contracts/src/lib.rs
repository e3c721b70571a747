#![forbid(unsafe_code)]

pub mod audit;
pub mod chain;
pub mod common;
pub mod employee;
pub mod roster;

pub use common::{ContractViolation, ReasonCodeId, SchemaVersion, Validate};
