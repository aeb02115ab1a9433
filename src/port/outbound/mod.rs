//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod command;
pub mod notifier;
pub mod prompt;
