//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`runner`] - [`RecordingRunner`](runner::RecordingRunner): records every
//!   invocation and answers from scripted responses.
//! - [`prompt`] - [`ScriptedConfirmer`](prompt::ScriptedConfirmer): queued
//!   yes/no answers.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier):
//!   captures progress events.
//! - [`config`] - Canonical test configurations rooted in a temp directory.

pub mod config;
pub mod notifier;
pub mod prompt;
pub mod runner;
