//! Notifier port for orchestration progress.
//!
//! The application layer never prints. It reports each step through this
//! port and the CLI decides how (or whether) to show it.

use crate::domain::Warning;

/// A step the orchestration performs against an external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCluster,
    DeleteCluster,
    InstallIngress,
    WaitReady,
    CreateNamespace,
    Apply,
    Restart,
    BuildImage,
    LoadImage,
    WriteSecrets,
}

impl Action {
    /// Present-progressive verb for an in-progress line.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::CreateCluster | Self::CreateNamespace => "Creating",
            Self::DeleteCluster => "Deleting",
            Self::InstallIngress => "Installing",
            Self::WaitReady => "Waiting for",
            Self::Apply => "Applying",
            Self::Restart => "Restarting",
            Self::BuildImage => "Building",
            Self::LoadImage => "Loading",
            Self::WriteSecrets => "Writing",
        }
    }

    /// Past-tense verb for a completed line.
    pub const fn done(self) -> &'static str {
        match self {
            Self::CreateCluster | Self::CreateNamespace => "Created",
            Self::DeleteCluster => "Deleted",
            Self::InstallIngress => "Installed",
            Self::WaitReady => "Ready",
            Self::Apply => "Applied",
            Self::Restart => "Restarted",
            Self::BuildImage => "Built",
            Self::LoadImage => "Loaded",
            Self::WriteSecrets => "Wrote",
        }
    }
}

/// Events emitted while an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started { action: Action, target: String },
    Finished { action: Action, target: String },
    /// Informational message that needs no action.
    Notice(String),
    /// A step degraded but the operation continues.
    Degraded(Warning),
}

impl Event {
    pub fn started(action: Action, target: impl Into<String>) -> Self {
        Self::Started {
            action,
            target: target.into(),
        }
    }

    pub fn finished(action: Action, target: impl Into<String>) -> Self {
        Self::Finished {
            action,
            target: target.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice(message.into())
    }
}

/// Trait for progress event handlers.
///
/// Implementations must be thread-safe (`Send + Sync`) and return quickly.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

/// A no-op notifier for tests or non-interactive use.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that forwards events to tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{debug, info, warn};
        match event {
            Event::Started { action, target } => {
                debug!(action = action.verb(), target = %target, "step started");
            }
            Event::Finished { action, target } => {
                info!(action = action.done(), target = %target, "step finished");
            }
            Event::Notice(message) => info!("{message}"),
            Event::Degraded(warning) => warn!(warning = %warning, "step degraded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct CountingNotifier(Arc<AtomicUsize>);

    impl Notifier for CountingNotifier {
        fn notify(&self, _event: Event) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn registry_broadcasts_to_every_notifier() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(CountingNotifier(count.clone())));
        registry.register(Box::new(CountingNotifier(count.clone())));

        registry.notify(Event::notice("hello"));

        assert_eq!(registry.len(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_registry_is_empty() {
        assert!(NotifierRegistry::new().is_empty());
    }
}
