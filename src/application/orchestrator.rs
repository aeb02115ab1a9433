//! Orchestration facade.
//!
//! Composes the prerequisite checker, cluster lifecycle, secret materializer,
//! image pipeline and reconciler into the operator-level operations. Owns the
//! outbound ports; each call borrows them through a [`Context`].

use tracing::{info, instrument};

use crate::domain::{BuildReport, Outcome, ServiceRoster};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::deployment::{DeploymentOperator, MaterializedSecret};
use crate::port::inbound::operator::observation::{MetricsScope, ObservationOperator};
use crate::port::outbound::command::{CommandRunner, RunOptions};
use crate::port::outbound::notifier::Notifier;
use crate::port::outbound::prompt::Confirmer;

use super::image::ImagePipeline;
use super::lifecycle::ClusterLifecycle;
use super::prerequisite::PrerequisiteChecker;
use super::reconcile::ResourceReconciler;
use super::secrets::SecretMaterializer;
use super::Context;

/// Resources shown by the status view.
const STATUS_RESOURCES: &str = "pods,svc,ingress,hpa";

pub struct Orchestrator {
    config: Config,
    runner: Box<dyn CommandRunner>,
    confirmer: Box<dyn Confirmer>,
    notifier: Box<dyn Notifier>,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        runner: Box<dyn CommandRunner>,
        confirmer: Box<dyn Confirmer>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            runner,
            confirmer,
            notifier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn ctx(&self) -> Context<'_> {
        Context::new(&self.config, self.runner.as_ref(), self.notifier.as_ref())
    }

    /// Run a display query and return whatever it printed.
    fn snapshot(&self, args: &[&str]) -> Result<String> {
        let ctx = self.ctx();
        let output = ctx.run(&ctx.control().args(args), RunOptions::PROBE)?;
        let mut text = output.stdout_str().to_string();
        if !output.is_success() {
            if let Some(stderr) = output.stderr.as_deref() {
                text.push_str(stderr);
            }
        }
        Ok(text)
    }
}

impl DeploymentOperator for Orchestrator {
    fn check_prerequisites(&self) -> Result<()> {
        PrerequisiteChecker::new(self.ctx()).check()
    }

    #[instrument(skip(self), fields(cluster = %self.config.cluster.name))]
    fn bootstrap_cluster(&self) -> Result<Outcome> {
        ClusterLifecycle::new(self.ctx()).bootstrap(self.confirmer.as_ref())
    }

    #[instrument(skip(self))]
    fn build_and_load_all(&self) -> Result<BuildReport> {
        let services: Vec<_> = self.config.roster.iter().collect();
        let report = ImagePipeline::new(self.ctx()).build_and_load(&services)?;
        info!(
            built = report.succeeded(),
            total = report.len(),
            "image batch finished"
        );
        Ok(report)
    }

    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    fn deploy_infrastructure(&self) -> Result<Outcome> {
        ResourceReconciler::new(self.ctx()).apply_infrastructure()
    }

    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    fn deploy_all_services(&self) -> Result<Outcome> {
        ResourceReconciler::new(self.ctx()).apply_services(None)
    }

    #[instrument(skip(self))]
    fn build_and_deploy_single(&self, service: &str) -> Result<Outcome> {
        let descriptor = self
            .config
            .roster
            .resolve(service)
            .ok_or_else(|| Error::UnknownService {
                name: service.trim().to_string(),
            })?;

        let mut outcome = Outcome::completed();
        let report = ImagePipeline::new(self.ctx()).build_and_load(&[descriptor])?;
        outcome.record_builds(report);

        let applied = ResourceReconciler::new(self.ctx()).apply_services(Some(descriptor))?;
        outcome.absorb(applied);
        Ok(outcome)
    }

    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    fn apply_config_changes(&self) -> Result<Outcome> {
        ResourceReconciler::new(self.ctx()).apply_config_changes(self.confirmer.as_ref())
    }

    #[instrument(skip(self), fields(cluster = %self.config.cluster.name))]
    fn teardown_cluster(&self) -> Result<Outcome> {
        ClusterLifecycle::new(self.ctx()).teardown(self.confirmer.as_ref())
    }

    fn materialize_secrets(&self) -> Result<MaterializedSecret> {
        SecretMaterializer::new(self.ctx()).materialize()
    }

    fn roster(&self) -> &ServiceRoster {
        &self.config.roster
    }
}

impl ObservationOperator for Orchestrator {
    fn status_snapshot(&self) -> Result<String> {
        self.snapshot(&["get", STATUS_RESOURCES, "-n", self.config.namespace.as_str()])
    }

    fn metrics_snapshot(&self, scope: MetricsScope) -> Result<String> {
        match scope {
            MetricsScope::Nodes => self.snapshot(&["top", "nodes"]),
            MetricsScope::Pods => {
                self.snapshot(&["top", "pods", "-n", self.config.namespace.as_str()])
            }
        }
    }

    fn log_targets(&self) -> Vec<String> {
        self.config
            .roster
            .iter()
            .map(|s| s.name.clone())
            .chain(self.config.log_targets.iter().cloned())
            .collect()
    }

    fn find_pod(&self, target: &str) -> Result<Option<String>> {
        let target = target.trim();
        let app = match self.config.roster.resolve(target) {
            Some(service) => service.name.as_str(),
            None if self.config.log_targets.iter().any(|t| t == target) => target,
            None => {
                return Err(Error::UnknownService {
                    name: target.to_string(),
                })
            }
        };

        let ctx = self.ctx();
        let selector = format!("app={app}");
        let query = ctx.control().args([
            "get",
            "pods",
            "-l",
            selector.as_str(),
            "-n",
            self.config.namespace.as_str(),
            "-o",
            "jsonpath={.items[0].metadata.name}",
        ]);
        let output = ctx.run(&query, RunOptions::PROBE)?;
        let pod = output.stdout_str().trim();
        if !output.is_success() || pod.is_empty() {
            return Ok(None);
        }
        Ok(Some(pod.to_string()))
    }

    fn stream_logs(&self, pod: &str, follow: bool) -> Result<()> {
        let ctx = self.ctx();
        let mut logs = ctx
            .control()
            .args(["logs", pod, "-n", self.config.namespace.as_str()]);
        if follow {
            logs = logs.arg("-f");
        }
        ctx.run(&logs, RunOptions::UNCHECKED)?;
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

    fn orchestrator(config: Config, runner: &RecordingRunner) -> Orchestrator {
        Orchestrator::new(
            config,
            Box::new(runner.clone()),
            Box::new(ScriptedConfirmer::default()),
            Box::new(NullNotifier),
        )
    }

    #[test]
    fn unknown_service_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let ops = orchestrator(config::project(dir.path()), &runner);

        let err = ops.build_and_deploy_single("nope").unwrap_err();

        assert!(matches!(err, Error::UnknownService { name } if name == "nope"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn log_targets_include_datastores() {
        let dir = tempfile::tempdir().unwrap();
        let ops = orchestrator(config::project(dir.path()), &RecordingRunner::new());

        let targets = ops.log_targets();

        assert_eq!(targets[..2], ["svc-a".to_string(), "svc-b".to_string()]);
        assert!(targets.contains(&"postgres".to_string()));
    }

    #[test]
    fn find_pod_resolves_alias() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        runner.respond_to(
            &["kubectl", "get", "pods"],
            CommandOutput::success().with_stdout("svc-a-7d9f-abcde\n"),
        );
        let ops = orchestrator(config::project(dir.path()), &runner);

        let pod = ops.find_pod("a").unwrap();

        assert_eq!(pod.as_deref(), Some("svc-a-7d9f-abcde"));
        assert!(runner.calls()[0].has_arg("app=svc-a"));
    }

    #[test]
    fn find_pod_without_match_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let ops = orchestrator(config::project(dir.path()), &runner);

        assert_eq!(ops.find_pod("postgres").unwrap(), None);
    }

    #[test]
    fn status_queries_the_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        runner.respond_to(
            &["kubectl", "get", "pods,svc,ingress,hpa"],
            CommandOutput::success().with_stdout("NAME READY\n"),
        );
        let ops = orchestrator(config::project(dir.path()), &runner);

        assert_eq!(ops.status_snapshot().unwrap(), "NAME READY\n");
        assert_eq!(runner.command_lines(), vec!["kubectl get pods,svc,ingress,hpa -n ns"]);
    }

    #[test]
    fn follow_flag_is_passed_to_logs() {
        let dir = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        let ops = orchestrator(config::project(dir.path()), &runner);

        ops.stream_logs("svc-a-1", true).unwrap();

        assert_eq!(runner.command_lines(), vec!["kubectl logs svc-a-1 -n ns -f"]);
    }
}
