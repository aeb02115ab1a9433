//! Inbound (driving) ports consumed by the CLI adapter.

pub mod operator;
