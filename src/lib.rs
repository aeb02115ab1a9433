//! kindops - local Kubernetes-in-Docker environment manager.
//!
//! Drives a multi-service application through its local lifecycle: create a
//! cluster, build and load service images, deploy infrastructure and services,
//! push configuration changes, and tear it all down again. The work itself is
//! done by external tools (`kind`, `kubectl`, `docker`); this crate decides
//! what to run, in which order, and what a failure means.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Pure types: service roster, build results, secret material,
//!   readiness probes, outcomes with warnings.
//! - [`port`] - Traits at the seams. Inbound: the operator surface the CLI
//!   drives. Outbound: command execution, confirmation prompts, progress.
//! - [`application`] - Prerequisite check, cluster lifecycle, image pipeline,
//!   secret materializer, resource reconciler and the orchestration facade.
//! - [`adapter`] - Process runner, terminal prompts, and the `clap` CLI with
//!   its interactive menu and display loops.
//! - [`infrastructure`] - TOML configuration and logging setup.
//!
//! # Example
//!
//! ```no_run
//! use kindops::adapter::outbound::process::ProcessRunner;
//! use kindops::adapter::outbound::prompt::AssumeYes;
//! use kindops::application::Orchestrator;
//! use kindops::infrastructure::config::settings::Config;
//! use kindops::port::inbound::operator::deployment::DeploymentOperator;
//! use kindops::port::outbound::notifier::LogNotifier;
//!
//! fn main() -> kindops::error::Result<()> {
//!     let ops = Orchestrator::new(
//!         Config::discover(None)?,
//!         Box::new(ProcessRunner),
//!         Box::new(AssumeYes),
//!         Box::new(LogNotifier),
//!     );
//!     ops.check_prerequisites()?;
//!     let outcome = ops.deploy_infrastructure()?;
//!     assert!(!outcome.is_declined());
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
