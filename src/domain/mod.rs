//! Cluster-agnostic domain types.
//!
//! Nothing in here talks to a process or the filesystem: these are the values
//! the application layer passes between the lifecycle, image and reconcile
//! steps.

pub mod build;
pub mod cluster;
pub mod outcome;
pub mod readiness;
pub mod secret;
pub mod service;

pub use build::{BuildOutcome, BuildReport, BuildResult};
pub use cluster::{ClusterHandle, ClusterState};
pub use outcome::{Outcome, OutcomeStatus, Warning};
pub use readiness::{ReadinessOutcome, ReadinessProbe};
pub use secret::{SecretKey, SecretMaterial};
pub use service::{BuildContext, ServiceDescriptor, ServiceRoster};
