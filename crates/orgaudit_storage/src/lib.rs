#![forbid(unsafe_code)]

pub mod csv_load;
pub mod repo;
pub mod roster;

pub use roster::{RosterConfig, RosterStore, StorageError};
