//! Command dispatch for a parsed command line.

use crate::adapter::inbound::cli::command::{Cli, Commands};
use crate::adapter::inbound::cli::{handler, interrupt, menu};
use crate::port::inbound::operator::port::OperatorPort;

/// Run the parsed command line against `ops` and return the exit code.
///
/// Without a subcommand the interactive menu runs until the operator exits.
pub fn execute(cli: Cli, ops: &dyn OperatorPort) -> i32 {
    interrupt::install();

    let needs_prerequisites = cli
        .command
        .as_ref()
        .map_or(true, Commands::needs_prerequisites);
    if needs_prerequisites {
        if let Err(e) = ops.check_prerequisites() {
            handler::report(&e);
            return 1;
        }
    }

    let result = match cli.command {
        None => menu::run(ops),
        Some(command) => handler::execute(ops, command),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            handler::report(&e);
            1
        }
    }
}
