//! Shared borrowed state for application components.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::command::{CommandOutput, CommandRunner, Invocation, RunOptions};
use crate::port::outbound::notifier::{Event, Notifier};

/// Configuration plus the outbound ports every component needs.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a Config,
    pub runner: &'a dyn CommandRunner,
    pub notifier: &'a dyn Notifier,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            runner,
            notifier,
        }
    }

    /// Cluster-creation tool, run from the project root.
    pub fn cluster_tool(&self) -> Invocation {
        Invocation::new(&self.config.tools.cluster).current_dir(&self.config.root)
    }

    /// Control-plane client, run from the project root.
    pub fn control(&self) -> Invocation {
        Invocation::new(&self.config.tools.control).current_dir(&self.config.root)
    }

    /// Container build tool, run from the project root.
    pub fn build_tool(&self) -> Invocation {
        Invocation::new(&self.config.tools.build).current_dir(&self.config.root)
    }

    pub fn run(&self, invocation: &Invocation, options: RunOptions) -> Result<CommandOutput> {
        tracing::debug!(command = %invocation, check = options.check, "running");
        self.runner.run(invocation, options)
    }

    pub fn notify(&self, event: Event) {
        self.notifier.notify(event);
    }
}
