#![forbid(unsafe_code)]

pub mod chain_walk;
pub mod compensation;
pub mod depth;
