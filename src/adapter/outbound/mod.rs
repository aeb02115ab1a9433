//! Outbound adapters (driven side).

pub mod process;
pub mod prompt;
