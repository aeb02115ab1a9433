//! Deployment use-cases: the orchestration operations.
//!
//! Each operation is a fixed composition of prerequisite, lifecycle, image and
//! reconcile steps, and each is safe to call repeatedly.

use std::path::PathBuf;

use crate::domain::{BuildReport, Outcome, ServiceRoster};
use crate::error::Result;

/// Where the secret manifest was written and what fed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedSecret {
    pub path: PathBuf,
    /// False when the environment source was missing and defaults were used.
    pub env_source_found: bool,
}

/// Orchestration operations exposed to the CLI and the interactive menu.
pub trait DeploymentOperator {
    /// Verify required tools and the container runtime.
    ///
    /// # Errors
    ///
    /// Returns `MissingTool` (listing every missing tool) or
    /// `RuntimeUnavailable`. Both are fatal.
    fn check_prerequisites(&self) -> Result<()>;

    /// Create the cluster, recreating it only after confirmation.
    fn bootstrap_cluster(&self) -> Result<Outcome>;

    /// Build and load every roster image. Build failures do not stop the batch.
    fn build_and_load_all(&self) -> Result<BuildReport>;

    /// Namespace, metrics server, common config, secrets, infrastructure.
    fn deploy_infrastructure(&self) -> Result<Outcome>;

    /// Apply every service manifest and the ingress.
    fn deploy_all_services(&self) -> Result<Outcome>;

    /// Build, load, apply and restart one service given by name or alias.
    fn build_and_deploy_single(&self, service: &str) -> Result<Outcome>;

    /// Re-render secrets, re-apply common config, optionally restart workloads.
    fn apply_config_changes(&self) -> Result<Outcome>;

    /// Delete the cluster after confirmation.
    fn teardown_cluster(&self) -> Result<Outcome>;

    /// Render the secret manifest from the environment source.
    fn materialize_secrets(&self) -> Result<MaterializedSecret>;

    /// The configured service roster.
    fn roster(&self) -> &ServiceRoster;
}
