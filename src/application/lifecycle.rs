//! Cluster lifecycle: existence query, create, baseline install, delete.
//!
//! Existence is never cached. Every decision re-queries the cluster tool.

use tracing::{info, warn};

use crate::domain::{ClusterState, Outcome, ReadinessOutcome, Warning};
use crate::error::Result;
use crate::port::outbound::command::RunOptions;
use crate::port::outbound::notifier::{Action, Event};
use crate::port::outbound::prompt::Confirmer;

use super::{readiness, Context};

pub struct ClusterLifecycle<'a> {
    ctx: Context<'a>,
}

impl<'a> ClusterLifecycle<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Query whether the configured cluster exists.
    ///
    /// Only an exact line match in the cluster listing counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing command fails.
    pub fn state(&self) -> Result<ClusterState> {
        let listing = self
            .ctx
            .run(&self.ctx.cluster_tool().args(["get", "clusters"]), RunOptions::CAPTURED)?;
        Ok(self.ctx.config.cluster_handle().state_from_listing(listing.stdout_str()))
    }

    /// Create the cluster from its config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster tool fails.
    pub fn create(&self) -> Result<()> {
        let handle = self.ctx.config.cluster_handle();
        self.ctx.notify(Event::started(Action::CreateCluster, &handle.name));
        let create = self
            .ctx
            .cluster_tool()
            .args(["create", "cluster", "--config"])
            .arg(&handle.config_file)
            .args(["--name", handle.name.as_str()]);
        self.ctx.run(&create, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::CreateCluster, &handle.name));
        info!(cluster = %handle.name, "cluster created");
        Ok(())
    }

    /// Install the ingress controller and wait for it.
    ///
    /// Failures here leave a usable cluster, so they degrade `outcome`
    /// instead of failing.
    pub fn install_baseline(&self, outcome: &mut Outcome) {
        let manifest = &self.ctx.config.cluster.ingress_manifest;
        self.ctx.notify(Event::started(Action::InstallIngress, manifest));

        let apply = self.ctx.control().args(["apply", "-f", manifest.as_str()]);
        if let Err(e) = self.ctx.run(&apply, RunOptions::CHECKED) {
            warn!(error = %e, "ingress controller install failed");
            let warning = Warning::BootstrapIncomplete {
                reason: e.to_string(),
            };
            self.ctx.notify(Event::Degraded(warning.clone()));
            outcome.warn(warning);
            return;
        }
        self.ctx.notify(Event::finished(Action::InstallIngress, manifest));

        let probe = self.ctx.config.ingress_probe();
        if readiness::wait(self.ctx, &probe) == ReadinessOutcome::TimedOut {
            outcome.warn(readiness::timed_out(&probe));
        }
    }

    /// Delete the cluster. Callers confirm first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster tool fails.
    pub fn delete(&self) -> Result<()> {
        let name = &self.ctx.config.cluster.name;
        self.ctx.notify(Event::started(Action::DeleteCluster, name));
        let delete = self.ctx.cluster_tool().args(["delete", "cluster", "--name", name.as_str()]);
        self.ctx.run(&delete, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::DeleteCluster, name));
        info!(cluster = %name, "cluster deleted");
        Ok(())
    }

    /// Create the cluster, recreating an existing one only if confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence query, deletion or creation fails.
    pub fn bootstrap(&self, confirmer: &dyn Confirmer) -> Result<Outcome> {
        let name = &self.ctx.config.cluster.name;
        if self.state()? == ClusterState::Present {
            let prompt = format!("Cluster '{name}' already exists. Delete it and recreate it?");
            if !confirmer.confirm(&prompt, false)? {
                info!(cluster = %name, "recreate declined");
                return Ok(Outcome::declined());
            }
            self.delete()?;
        }

        self.create()?;
        let mut outcome = Outcome::completed();
        self.install_baseline(&mut outcome);
        Ok(outcome)
    }

    /// Delete the cluster if confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt or the deletion fails.
    pub fn teardown(&self, confirmer: &dyn Confirmer) -> Result<Outcome> {
        let name = &self.ctx.config.cluster.name;
        let prompt = format!("Delete cluster '{name}'?");
        if !confirmer.confirm(&prompt, false)? {
            return Ok(Outcome::declined());
        }
        self.delete()?;
        Ok(Outcome::completed())
    }
}
