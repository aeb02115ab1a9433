//! Handlers behind each subcommand and menu entry.

use serde_json::json;

use crate::domain::Warning;
use crate::error::{Error, Result};
use crate::port::inbound::operator::observation::MetricsScope;
use crate::port::inbound::operator::port::OperatorPort;

use super::command::{Commands, TopScope};
use super::{diagnostic, output, render, watch};

/// Execute a parsed subcommand.
///
/// # Errors
///
/// Returns the operation's error; the caller reports it.
pub fn execute(ops: &dyn OperatorPort, command: Commands) -> Result<()> {
    match command {
        Commands::Bootstrap => bootstrap(ops),
        Commands::Build => build(ops),
        Commands::DeployInfra => deploy_infrastructure(ops),
        Commands::Deploy => deploy_services(ops),
        Commands::Ship(args) => ship(ops, &args.service),
        Commands::ApplyConfig(_) => apply_config(ops),
        Commands::Status(args) => status(ops, args.watch),
        Commands::Logs(args) => logs(ops, &args.target, args.follow),
        Commands::Top(args) => top(ops, args.scope, args.watch.watch),
        Commands::Teardown => teardown(ops),
        Commands::Services => {
            render::roster(ops.roster());
            Ok(())
        }
        Commands::Secrets => secrets(ops),
        Commands::Check => check(ops),
    }
}

/// Print an error with a hint where one applies.
pub fn report(error: &Error) {
    if error.is_fatal() {
        diagnostic::render(diagnostic::startup(error, None));
        return;
    }

    output::error(&error.to_string());
    if let Error::ExternalCommand {
        stderr: Some(stderr),
        ..
    } = error
    {
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            output::error(line.trim());
        }
    }
    if let Some(help) = diagnostic::help_for(error) {
        output::hint(&help);
    }
}

pub fn check(ops: &dyn OperatorPort) -> Result<()> {
    let pb = output::spinner("Checking prerequisites");
    match ops.check_prerequisites() {
        Ok(()) => {
            output::spinner_success(&pb, "All prerequisites met");
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Prerequisites not met");
            Err(e)
        }
    }
}

pub fn bootstrap(ops: &dyn OperatorPort) -> Result<()> {
    let outcome = match ops.bootstrap_cluster() {
        Ok(outcome) => outcome,
        Err(e) => {
            output::hint("check that the container runtime is running and healthy");
            return Err(e);
        }
    };
    if outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::BootstrapIncomplete { .. }))
    {
        output::hint("check that the container runtime is running and healthy");
    }
    render::outcome("bootstrap", &outcome, "Cluster ready");
    Ok(())
}

pub fn build(ops: &dyn OperatorPort) -> Result<()> {
    match ops.build_and_load_all() {
        Ok(report) => {
            render::build_report("build", &report);
            Ok(())
        }
        Err(e) => {
            if let Error::ImageLoad { report, .. } = &e {
                render::build_report("build", report);
            }
            Err(e)
        }
    }
}

pub fn deploy_infrastructure(ops: &dyn OperatorPort) -> Result<()> {
    let outcome = ops.deploy_infrastructure()?;
    render::outcome("deploy-infra", &outcome, "Infrastructure deployed");
    Ok(())
}

pub fn deploy_services(ops: &dyn OperatorPort) -> Result<()> {
    let outcome = ops.deploy_all_services()?;
    render::outcome("deploy", &outcome, "All services deployed");
    Ok(())
}

pub fn ship(ops: &dyn OperatorPort, service: &str) -> Result<()> {
    let outcome = ops.build_and_deploy_single(service)?;
    render::outcome("ship", &outcome, &format!("{} deployed", service.trim()));
    Ok(())
}

pub fn apply_config(ops: &dyn OperatorPort) -> Result<()> {
    let outcome = ops.apply_config_changes()?;
    render::outcome("apply-config", &outcome, "Configuration applied");
    Ok(())
}

pub fn teardown(ops: &dyn OperatorPort) -> Result<()> {
    let outcome = ops.teardown_cluster()?;
    render::outcome("teardown", &outcome, "Cluster deleted");
    Ok(())
}

pub fn secrets(ops: &dyn OperatorPort) -> Result<()> {
    let written = ops.materialize_secrets()?;
    if output::is_json() {
        output::json_output(json!({
            "command": "secrets",
            "path": written.path.display().to_string(),
            "env_source_found": written.env_source_found,
        }));
        return Ok(());
    }
    output::success(&format!("Secrets written to {}", written.path.display()));
    Ok(())
}

pub fn status(ops: &dyn OperatorPort, follow: bool) -> Result<()> {
    if follow {
        watch::repeat("Cluster status", || ops.status_snapshot())
    } else {
        watch::once("Cluster status", || ops.status_snapshot())
    }
}

pub fn top(ops: &dyn OperatorPort, scope: TopScope, follow: bool) -> Result<()> {
    let (title, scope) = match scope {
        TopScope::Nodes => ("Node metrics", MetricsScope::Nodes),
        TopScope::Pods => ("Pod metrics", MetricsScope::Pods),
    };
    if follow {
        watch::repeat(title, || ops.metrics_snapshot(scope))
    } else {
        watch::once(title, || ops.metrics_snapshot(scope))
    }
}

pub fn logs(ops: &dyn OperatorPort, target: &str, follow: bool) -> Result<()> {
    let pb = output::spinner(&format!("Finding pod for {target}"));
    let pod = match ops.find_pod(target) {
        Ok(Some(pod)) => {
            output::spinner_success(&pb, &pod);
            pod
        }
        Ok(None) => {
            output::spinner_fail(&pb, &format!("No running pod found for {target}"));
            return Ok(());
        }
        Err(e) => {
            output::spinner_fail(&pb, &format!("Cannot look up {target}"));
            return Err(e);
        }
    };

    if follow {
        watch::interruptible(|| ops.stream_logs(&pod, true))
    } else {
        ops.stream_logs(&pod, false)
    }
}
