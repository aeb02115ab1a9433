//! Interactive menu shown when no subcommand is given.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::port::inbound::operator::port::OperatorPort;

use super::command::TopScope;
use super::{handler, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Bootstrap,
    BuildAll,
    DeployInfrastructure,
    DeployServices,
    Ship,
    ApplyConfig,
    WatchStatus,
    Logs,
    NodeMetrics,
    PodMetrics,
    Teardown,
    Exit,
}

impl Entry {
    const ALL: [Entry; 12] = [
        Entry::Bootstrap,
        Entry::BuildAll,
        Entry::DeployInfrastructure,
        Entry::DeployServices,
        Entry::Ship,
        Entry::ApplyConfig,
        Entry::WatchStatus,
        Entry::Logs,
        Entry::NodeMetrics,
        Entry::PodMetrics,
        Entry::Teardown,
        Entry::Exit,
    ];

    const fn label(self) -> (&'static str, &'static str) {
        match self {
            Self::Bootstrap => ("Bootstrap Cluster", "Create cluster and install ingress"),
            Self::BuildAll => ("Build & Load All", "Build all images and load them"),
            Self::DeployInfrastructure => ("Deploy Infrastructure", "Database, broker, cache"),
            Self::DeployServices => ("Deploy All Services", "Every service and the ingress"),
            Self::Ship => ("Build & Deploy Single", "Build, load and deploy one service"),
            Self::ApplyConfig => ("Apply Config Changes", "Update config and secrets, restart"),
            Self::WatchStatus => ("Watch Status", "Live view of pods and services"),
            Self::Logs => ("View Logs", "Logs for a service or data store"),
            Self::NodeMetrics => ("Watch Node Metrics", "Live node CPU and memory"),
            Self::PodMetrics => ("Watch Pod Metrics", "Live pod CPU and memory"),
            Self::Teardown => ("Teardown Cluster", "Delete the cluster"),
            Self::Exit => ("Exit", ""),
        }
    }

    fn item(self) -> String {
        let (name, description) = self.label();
        format!("{name:<24} {}", output::muted(description))
    }
}

/// Loop over the menu until the operator exits.
///
/// Errors from a single entry are reported and the menu continues; only
/// fatal errors and prompt failures end it.
///
/// # Errors
///
/// Returns fatal errors and terminal prompt failures.
pub fn run(ops: &dyn OperatorPort) -> Result<()> {
    let theme = ColorfulTheme::default();
    let items: Vec<String> = Entry::ALL.iter().map(|e| e.item()).collect();
    let default = Entry::ALL
        .iter()
        .position(|e| *e == Entry::WatchStatus)
        .unwrap_or(0);

    output::header(env!("CARGO_PKG_VERSION"));

    loop {
        let Some(index) = Select::with_theme(&theme)
            .with_prompt("Select an option")
            .items(&items)
            .default(default)
            .interact_opt()?
        else {
            break;
        };

        let entry = Entry::ALL[index];
        if entry == Entry::Exit {
            break;
        }

        if let Err(e) = dispatch(ops, entry, &theme) {
            if e.is_fatal() {
                return Err(e);
            }
            handler::report(&e);
        }
    }

    output::note("Goodbye!");
    Ok(())
}

fn dispatch(ops: &dyn OperatorPort, entry: Entry, theme: &ColorfulTheme) -> Result<()> {
    match entry {
        Entry::Bootstrap => handler::bootstrap(ops),
        Entry::BuildAll => handler::build(ops),
        Entry::DeployInfrastructure => handler::deploy_infrastructure(ops),
        Entry::DeployServices => handler::deploy_services(ops),
        Entry::Ship => {
            let choices = ops.roster().choices();
            let index = Select::with_theme(theme)
                .with_prompt("Select service")
                .items(&choices)
                .default(0)
                .interact()?;
            handler::ship(ops, choices[index])
        }
        Entry::ApplyConfig => handler::apply_config(ops),
        Entry::WatchStatus => handler::status(ops, true),
        Entry::Logs => {
            let targets = ops.log_targets();
            let index = Select::with_theme(theme)
                .with_prompt("Select service")
                .items(&targets)
                .default(0)
                .interact()?;
            let follow = Confirm::with_theme(theme)
                .with_prompt("Follow logs?")
                .default(true)
                .interact()?;
            handler::logs(ops, &targets[index], follow)
        }
        Entry::NodeMetrics => handler::top(ops, TopScope::Nodes, true),
        Entry::PodMetrics => handler::top(ops, TopScope::Pods, true),
        Entry::Teardown => handler::teardown(ops),
        Entry::Exit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_operation_once() {
        let names: Vec<_> = Entry::ALL.iter().map(|e| e.label().0).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.last(), Some(&"Exit"));
    }
}
