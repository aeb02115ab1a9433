//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   CLI / menu ──▶│  inbound::OperatorPort   │
//!                 │       Orchestrator       │
//!                 └────────────┬─────────────┘
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//!   ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!   │CommandRunner│     │  Confirmer  │     │  Notifier   │
//!   └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! - [`outbound::command`] - the only way the crate touches `kind`,
//!   `kubectl` and `docker`
//! - [`outbound::prompt`] - destructive-action confirmation
//! - [`outbound::notifier`] - progress events for the operator
//! - [`inbound`] - operations exposed to the CLI and interactive menu

pub mod inbound;
pub mod outbound;
