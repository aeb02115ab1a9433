//! Command-line interface definitions.
//!
//! Defines the CLI structure for kindops using `clap`. Without a subcommand
//! the interactive menu starts; every menu entry also has a direct
//! subcommand for scripting.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Local Kubernetes-in-Docker environment manager
#[derive(Parser, Debug)]
#[command(name = "kindops")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ./kindops.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// True when confirmation prompts should be answered without asking.
    pub fn assume_yes(&self) -> bool {
        self.yes
            || matches!(
                self.command,
                Some(Commands::ApplyConfig(ApplyConfigArgs { restart: true }))
            )
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the kindops CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the cluster and install the ingress controller
    Bootstrap,

    /// Build every service image and load it into the cluster
    Build,

    /// Deploy namespace, common config, secrets and data stores
    DeployInfra,

    /// Deploy every service manifest and the ingress
    Deploy,

    /// Build, load, deploy and restart a single service
    Ship(ShipArgs),

    /// Regenerate secrets, re-apply common config, optionally restart
    ApplyConfig(ApplyConfigArgs),

    /// Show pods, services, ingresses and autoscalers
    Status(WatchArgs),

    /// Show logs for a service or data store
    Logs(LogsArgs),

    /// Show node or pod resource usage
    Top(TopArgs),

    /// Delete the cluster
    Teardown,

    /// List the service roster and aliases
    Services,

    /// Render the secret manifest from the environment file
    Secrets,

    /// Check required tools and the container runtime
    Check,
}

impl Commands {
    /// Whether the command drives external tools and so needs the
    /// prerequisite check first.
    #[must_use]
    pub const fn needs_prerequisites(&self) -> bool {
        !matches!(self, Self::Services | Self::Secrets | Self::Check)
    }
}

/// Arguments for `kindops ship`.
#[derive(Args, Debug)]
pub struct ShipArgs {
    /// Service name or alias
    pub service: String,
}

/// Arguments for `kindops apply-config`.
#[derive(Args, Debug)]
pub struct ApplyConfigArgs {
    /// Restart every deployment and stateful set without asking
    #[arg(long)]
    pub restart: bool,
}

/// Arguments for display commands that can refresh in place.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Refresh every two seconds until Ctrl+C
    #[arg(short, long)]
    pub watch: bool,
}

/// Arguments for `kindops logs`.
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Service name, alias, or data store (postgres, kafka, redis)
    pub target: String,

    /// Keep streaming new log lines
    #[arg(short, long)]
    pub follow: bool,
}

/// Arguments for `kindops top`.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// What to measure
    #[arg(value_enum)]
    pub scope: TopScope,

    #[command(flatten)]
    pub watch: WatchArgs,
}

/// Resource usage scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TopScope {
    Nodes,
    Pods,
}
