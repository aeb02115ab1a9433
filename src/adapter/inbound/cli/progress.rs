//! Terminal rendering of orchestration progress events.

use crate::port::outbound::notifier::{Event, Notifier};

use super::output;

/// Prints each step as it starts and finishes.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::Started { action, target } => output::action(action.verb(), &target),
            Event::Finished { action, target } => output::action_done(action.done(), &target),
            Event::Notice(message) => output::note(&message),
            Event::Degraded(warning) => output::warning(&warning.to_string()),
        }
    }
}
