use kindops::application::Orchestrator;
use kindops::testkit::config;
use kindops::testkit::notifier::RecordingNotifier;
use kindops::testkit::prompt::ScriptedConfirmer;
use kindops::testkit::runner::RecordingRunner;
use tempfile::TempDir;

/// A throwaway project directory plus handles on every recorded port.
pub struct Harness {
    pub dir: TempDir,
    pub runner: RecordingRunner,
    pub confirmer: ScriptedConfirmer,
    pub notifier: RecordingNotifier,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_confirmer(ScriptedConfirmer::default())
    }

    pub fn with_confirmer(confirmer: ScriptedConfirmer) -> Self {
        Self {
            dir: tempfile::tempdir().expect("create project dir"),
            runner: RecordingRunner::new(),
            confirmer,
            notifier: RecordingNotifier::new(),
        }
    }

    /// Create a placeholder file under the project root.
    pub fn touch(&self, relative: &str) {
        config::touch(self.dir.path(), relative);
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(
            config::project(self.dir.path()),
            Box::new(self.runner.clone()),
            Box::new(self.confirmer.clone()),
            Box::new(self.notifier.clone()),
        )
    }
}
