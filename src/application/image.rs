//! Image pipeline: build each service image, then load it into the cluster.
//!
//! A failed build is recorded and the batch moves on. A failed load stops
//! the batch: the cluster is unreachable and every later load would fail too.

use tracing::{error, info, warn};

use crate::domain::{BuildOutcome, BuildReport, BuildResult, ServiceDescriptor};
use crate::error::{Error, Result};
use crate::port::outbound::command::RunOptions;
use crate::port::outbound::notifier::{Action, Event};

use super::Context;

pub struct ImagePipeline<'a> {
    ctx: Context<'a>,
}

impl<'a> ImagePipeline<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Build and load `services` in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageLoad`] on the first load failure. Its report
    /// holds one entry per requested service: the results so far, a
    /// `LoadFailed` entry for the failing service and `Skipped` for the rest.
    pub fn build_and_load(&self, services: &[&ServiceDescriptor]) -> Result<BuildReport> {
        let prefix = &self.ctx.config.registry_prefix;
        let mut report = BuildReport::default();

        for (index, service) in services.iter().enumerate() {
            let image = service.image_tag(prefix);

            if let Err(e) = self.build(service, &image) {
                let exit_code = exit_code_of(&e);
                warn!(service = %service.name, error = %e, "image build failed, skipping load");
                report.push(BuildResult {
                    service: service.name.clone(),
                    image,
                    outcome: BuildOutcome::BuildFailed { exit_code },
                });
                continue;
            }

            if let Err(e) = self.load(&image) {
                error!(service = %service.name, error = %e, "image load failed, stopping batch");
                report.push(BuildResult {
                    service: service.name.clone(),
                    image,
                    outcome: BuildOutcome::LoadFailed {
                        exit_code: exit_code_of(&e),
                    },
                });
                for rest in &services[index + 1..] {
                    report.push(BuildResult {
                        service: rest.name.clone(),
                        image: rest.image_tag(prefix),
                        outcome: BuildOutcome::Skipped,
                    });
                }
                return Err(Error::ImageLoad {
                    service: service.name.clone(),
                    report,
                    source: Box::new(e),
                });
            }

            info!(service = %service.name, image = %image, "image ready");
            report.push(BuildResult {
                service: service.name.clone(),
                image,
                outcome: BuildOutcome::BuiltAndLoaded,
            });
        }

        Ok(report)
    }

    fn build(&self, service: &ServiceDescriptor, image: &str) -> Result<()> {
        let context = service.build_context();
        let mut build = self
            .ctx
            .build_tool()
            .args(["build", "-t", image, "-f"])
            .arg(&context.dockerfile);
        for (key, value) in &context.build_args {
            build = build.arg("--build-arg").arg(format!("{key}={value}"));
        }
        let build = build.arg(&context.directory);

        self.ctx.notify(Event::started(Action::BuildImage, image));
        self.ctx.run(&build, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::BuildImage, image));
        Ok(())
    }

    fn load(&self, image: &str) -> Result<()> {
        let cluster = self.ctx.config.cluster.name.as_str();
        let load = self
            .ctx
            .cluster_tool()
            .args(["load", "docker-image", image, "--name", cluster]);

        self.ctx.notify(Event::started(Action::LoadImage, image));
        self.ctx.run(&load, RunOptions::CHECKED)?;
        self.ctx.notify(Event::finished(Action::LoadImage, image));
        Ok(())
    }
}

fn exit_code_of(error: &Error) -> Option<i32> {
    match error {
        Error::ExternalCommand { exit_code, .. } => Some(*exit_code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::settings::Config;
    use crate::port::outbound::command::CommandOutput;
    use crate::port::outbound::notifier::NullNotifier;
    use crate::testkit::runner::RecordingRunner;

    #[test]
    fn build_command_carries_module_arg() {
        let config = Config::default();
        let runner = RecordingRunner::new();
        let pipeline = ImagePipeline::new(Context::new(&config, &runner, &NullNotifier));
        let auth = config.roster.get("auth-service").unwrap();

        let report = pipeline.build_and_load(&[auth]).unwrap();

        assert!(report.is_clean());
        assert_eq!(
            runner.command_lines(),
            vec![
                concat!(
                    "docker build -t limitedcart/auth-service:latest -f ./Dockerfile ",
                    "--build-arg MODULE=auth-service ."
                ),
                "kind load docker-image limitedcart/auth-service:latest --name limitedcart",
            ]
        );
    }

    #[test]
    fn frontend_uses_its_own_context_without_build_args() {
        let config = Config::default();
        let runner = RecordingRunner::new();
        let pipeline = ImagePipeline::new(Context::new(&config, &runner, &NullNotifier));
        let frontend = config.roster.get("frontend").unwrap();

        pipeline.build_and_load(&[frontend]).unwrap();

        assert_eq!(
            runner.command_lines()[0],
            concat!(
                "docker build -t limitedcart/frontend:latest ",
                "-f ./frontend-web/Dockerfile ./frontend-web"
            )
        );
    }

    #[test]
    fn build_failure_skips_load_and_continues() {
        let config = Config::default();
        let runner = RecordingRunner::new();
        runner.fail_when_arg("limitedcart/product-service:latest", 2);
        let pipeline = ImagePipeline::new(Context::new(&config, &runner, &NullNotifier));
        let services: Vec<_> = config.roster.iter().collect();

        let report = pipeline.build_and_load(&services).unwrap();

        assert_eq!(report.len(), config.roster.len());
        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].service, "product-service");
        assert_eq!(failed[0].outcome, BuildOutcome::BuildFailed { exit_code: Some(2) });
        assert_eq!(runner.count(&["kind", "load"]), config.roster.len() - 1);
    }

    #[test]
    fn load_failure_stops_the_batch() {
        let config = Config::default();
        let runner = RecordingRunner::new();
        runner.respond_to(&["kind", "load"], CommandOutput::with_code(1));
        let pipeline = ImagePipeline::new(Context::new(&config, &runner, &NullNotifier));
        let services: Vec<_> = config.roster.iter().collect();

        let err = pipeline.build_and_load(&services).unwrap_err();

        match err {
            Error::ImageLoad { service, report, .. } => {
                assert_eq!(service, "auth-service");
                assert_eq!(report.len(), config.roster.len());
                assert_eq!(report.results[0].service, "auth-service");
                assert_eq!(
                    report.results[0].outcome,
                    BuildOutcome::LoadFailed { exit_code: Some(1) }
                );
                assert!(report.results[1..]
                    .iter()
                    .all(|r| r.outcome == BuildOutcome::Skipped));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.count(&["docker", "build"]), 1);
    }
}
