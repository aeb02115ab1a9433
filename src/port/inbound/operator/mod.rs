//! Operator-facing inbound ports consumed by CLI adapters.

pub mod deployment;
pub mod observation;
pub mod port;
