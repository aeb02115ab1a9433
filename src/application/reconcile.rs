//! Declarative resource reconciliation.
//!
//! Everything goes through `apply`; the control plane does the diffing.
//! Paths are passed relative to the project root, which is also the working
//! directory of every command.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::{Outcome, ReadinessOutcome, ServiceDescriptor, Warning};
use crate::error::Result;
use crate::port::outbound::command::RunOptions;
use crate::port::outbound::notifier::{Action, Event};
use crate::port::outbound::prompt::Confirmer;

use super::secrets::SecretMaterializer;
use super::{readiness, Context};

/// Workload kinds restarted after a configuration change.
const RESTARTED_KINDS: [&str; 2] = ["deployment", "statefulset"];

pub struct ResourceReconciler<'a> {
    ctx: Context<'a>,
}

impl<'a> ResourceReconciler<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Create the application namespace unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    pub fn ensure_namespace(&self) -> Result<()> {
        let namespace = self.ctx.config.namespace.as_str();
        let query = self.ctx.control().args(["get", "namespace", namespace]);
        if self.ctx.run(&query, RunOptions::PROBE)?.is_success() {
            debug!(namespace, "namespace already exists");
            return Ok(());
        }

        self.ctx.notify(Event::started(Action::CreateNamespace, namespace));
        let create = self.ctx.control().args(["create", "namespace", namespace]);
        self.ctx.run(&create, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::CreateNamespace, namespace));
        Ok(())
    }

    /// Apply a manifest file or directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the control plane rejects it.
    pub fn apply(&self, manifest: &Path) -> Result<()> {
        let target = manifest.display().to_string();
        self.ctx.notify(Event::started(Action::Apply, &target));
        let apply = self.ctx.control().args(["apply", "-f"]).arg(manifest);
        self.ctx.run(&apply, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::Apply, &target));
        Ok(())
    }

    /// Namespace, metrics server, secrets plus common config, infrastructure,
    /// then a bounded wait on the primary data store.
    ///
    /// # Errors
    ///
    /// Returns an error if any apply or the secret write fails. A readiness
    /// timeout only degrades the outcome.
    pub fn apply_infrastructure(&self) -> Result<Outcome> {
        let paths = &self.ctx.config.paths;
        let mut outcome = Outcome::completed();

        self.ensure_namespace()?;
        self.apply(&paths.namespace)?;
        let settle = self.ctx.config.namespace_settle();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        self.apply(&paths.metrics_server)?;
        SecretMaterializer::new(self.ctx).materialize()?;
        self.apply(&paths.common)?;
        self.apply(&paths.infrastructure)?;

        let probe = self.ctx.config.datastore_probe();
        if readiness::wait(self.ctx, &probe) == ReadinessOutcome::TimedOut {
            outcome.warn(readiness::timed_out(&probe));
        }

        info!(namespace = %self.ctx.config.namespace, "infrastructure applied");
        Ok(outcome)
    }

    /// Apply one service and restart it, or every service plus the ingress.
    ///
    /// A single service whose manifest is missing is reported in the outcome
    /// and not restarted.
    ///
    /// # Errors
    ///
    /// Returns an error if an apply or restart fails.
    pub fn apply_services(&self, service: Option<&ServiceDescriptor>) -> Result<Outcome> {
        let paths = &self.ctx.config.paths;
        let mut outcome = Outcome::completed();

        let Some(service) = service else {
            self.apply(&paths.services)?;
            self.apply(&paths.ingress)?;
            return Ok(outcome);
        };

        let manifest = service.manifest_path(&paths.services);
        if !self.ctx.config.resolve(&manifest).is_file() {
            warn!(
                service = %service.name,
                path = %manifest.display(),
                "service manifest not found"
            );
            let warning = Warning::ManifestNotFound { path: manifest };
            self.ctx.notify(Event::Degraded(warning.clone()));
            outcome.warn(warning);
            return Ok(outcome);
        }

        self.apply(&manifest)?;
        self.restart(&format!("deployment/{}", service.name))?;
        Ok(outcome)
    }

    /// Re-render secrets, re-apply common config, then restart every
    /// deployment and stateful set if the operator agrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the write, apply, prompt or a restart fails.
    pub fn apply_config_changes(&self, confirmer: &dyn Confirmer) -> Result<Outcome> {
        SecretMaterializer::new(self.ctx).materialize()?;
        self.apply(&self.ctx.config.paths.common)?;

        if confirmer.confirm("Restart all deployments to pick up the changes?", false)? {
            self.restart_all()?;
        } else {
            debug!("restart declined");
        }
        Ok(Outcome::completed())
    }

    /// Trigger a rollout restart of every deployment and stateful set.
    ///
    /// # Errors
    ///
    /// Returns an error if a restart fails.
    pub fn restart_all(&self) -> Result<()> {
        for kind in RESTARTED_KINDS {
            self.restart(kind)?;
        }
        Ok(())
    }

    fn restart(&self, target: &str) -> Result<()> {
        let namespace = self.ctx.config.namespace.as_str();
        self.ctx.notify(Event::started(Action::Restart, target));
        let restart = self
            .ctx
            .control()
            .args(["rollout", "restart", target, "-n", namespace]);
        self.ctx.run(&restart, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::Restart, target));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::command::CommandOutput;
    use crate::port::outbound::notifier::NullNotifier;
    use crate::testkit::config;
    use crate::testkit::prompt::ScriptedConfirmer;
    use crate::testkit::runner::RecordingRunner;

    #[test]
    fn existing_namespace_is_not_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));

        reconciler.ensure_namespace().unwrap();

        assert_eq!(runner.command_lines(), vec!["kubectl get namespace ns"]);
    }

    #[test]
    fn absent_namespace_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        runner.respond_to(&["kubectl", "get", "namespace"], CommandOutput::with_code(1));
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));

        reconciler.ensure_namespace().unwrap();

        assert_eq!(runner.command_lines()[1], "kubectl create namespace ns");
    }

    #[test]
    fn infrastructure_applies_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));

        let outcome = reconciler.apply_infrastructure().unwrap();

        assert!(outcome.is_clean());
        assert_eq!(
            runner.command_lines(),
            vec![
                "kubectl get namespace ns",
                "kubectl apply -f k8s/namespace.yaml",
                "kubectl apply -f k8s/infrastructure/metrics-server.yaml",
                "kubectl apply -f k8s/common/",
                "kubectl apply -f k8s/infrastructure/",
                "kubectl wait --for=condition=ready pod -l app=postgres -n ns --timeout=120s",
            ]
        );
        assert!(dir.path().join("k8s/common/secret.yaml").is_file());
    }

    #[test]
    fn missing_single_manifest_is_a_warning_without_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));
        let svc = config.roster.get("svc-b").unwrap();

        let outcome = reconciler.apply_services(Some(svc)).unwrap();

        assert!(matches!(outcome.warnings[..], [Warning::ManifestNotFound { .. }]));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn single_service_is_applied_then_restarted() {
        let dir = tempfile::tempdir().unwrap();
        config::touch(dir.path(), "k8s/services/svc-a.yaml");
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));
        let svc = config.roster.get("svc-a").unwrap();

        let outcome = reconciler.apply_services(Some(svc)).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(
            runner.command_lines(),
            vec![
                "kubectl apply -f k8s/services/svc-a.yaml",
                "kubectl rollout restart deployment/svc-a -n ns",
            ]
        );
    }

    #[test]
    fn all_services_include_ingress() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));

        reconciler.apply_services(None).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["kubectl apply -f k8s/services/", "kubectl apply -f k8s/ingress.yaml"]
        );
    }

    #[test]
    fn config_change_restarts_only_when_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::project(dir.path());
        let runner = RecordingRunner::new();
        let reconciler = ResourceReconciler::new(Context::new(&config, &runner, &NullNotifier));

        reconciler
            .apply_config_changes(&ScriptedConfirmer::answering([false]))
            .unwrap();
        assert_eq!(runner.count(&["kubectl", "rollout"]), 0);

        reconciler
            .apply_config_changes(&ScriptedConfirmer::answering([true]))
            .unwrap();
        let lines = runner.command_lines();
        assert!(lines.contains(&"kubectl rollout restart deployment -n ns".to_string()));
        assert!(lines.contains(&"kubectl rollout restart statefulset -n ns".to_string()));
    }
}
