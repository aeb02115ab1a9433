//! Application services: the deployment workflow.
//!
//! Components are thin borrowers of a shared [`Context`] and run strictly in
//! sequence. The [`orchestrator::Orchestrator`] composes them into the
//! operator-facing operations.

pub mod context;
pub mod image;
pub mod lifecycle;
pub mod orchestrator;
pub mod prerequisite;
pub mod readiness;
pub mod reconcile;
pub mod secrets;

pub use context::Context;
pub use orchestrator::Orchestrator;
