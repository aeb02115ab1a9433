use std::path::PathBuf;

use clap::Parser;
use kindops::adapter::inbound::cli::command::Cli;
use kindops::adapter::inbound::cli::output::{self, OutputConfig};
use kindops::adapter::inbound::cli::progress::ConsoleNotifier;
use kindops::adapter::inbound::cli::{diagnostic, run};
use kindops::adapter::outbound::process::ProcessRunner;
use kindops::adapter::outbound::prompt::{AssumeYes, TerminalConfirmer};
use kindops::application::Orchestrator;
use kindops::infrastructure::config::settings::{Config, DEFAULT_CONFIG_FILE};
use kindops::port::outbound::notifier::{LogNotifier, NotifierRegistry};
use kindops::port::outbound::prompt::Confirmer;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(
        OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        &cli.color,
    );

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            diagnostic::render(diagnostic::startup(&e, Some(path.as_path())));
            std::process::exit(1);
        }
    };

    config.logging.clone().with_verbosity(cli.verbose).init();
    tracing::debug!(
        root = %config.root.display(),
        namespace = %config.namespace,
        "configuration loaded"
    );

    let ops = orchestrator(&cli, config);
    std::process::exit(run::execute(cli, &ops));
}

/// Wire the real adapters around `config`.
fn orchestrator(cli: &Cli, config: Config) -> Orchestrator {
    let confirmer: Box<dyn Confirmer> = if cli.assume_yes() {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirmer)
    };

    let mut notifier = NotifierRegistry::new();
    notifier.register(Box::new(ConsoleNotifier));
    notifier.register(Box::new(LogNotifier));

    Orchestrator::new(config, Box::new(ProcessRunner), confirmer, Box::new(notifier))
}
