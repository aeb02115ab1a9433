//! Result-with-warnings for orchestration operations.
//!
//! Readiness timeouts, missing single-service manifests and failed image
//! builds do not stop an operation. They are collected here so callers can
//! tell a clean run from a degraded one without reading logs.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::build::BuildReport;

/// A non-fatal problem encountered while an operation kept going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    ReadinessTimedOut {
        selector: String,
        namespace: String,
        timeout: Duration,
    },
    ManifestNotFound {
        path: PathBuf,
    },
    BuildFailed {
        service: String,
    },
    /// The cluster was created but a follow-up step failed.
    BootstrapIncomplete {
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadinessTimedOut {
                selector,
                namespace,
                timeout,
            } => write!(
                f,
                "{selector} in {namespace} not ready after {}s",
                timeout.as_secs()
            ),
            Self::ManifestNotFound { path } => {
                write!(f, "manifest not found at {}", path.display())
            }
            Self::BuildFailed { service } => write!(f, "image build failed for {service}"),
            Self::BootstrapIncomplete { reason } => {
                write!(f, "cluster created but setup did not finish: {reason}")
            }
        }
    }
}

/// Whether the operation ran or the operator declined a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeStatus {
    #[default]
    Completed,
    Declined,
}

/// What an operation did, plus any degraded steps along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub warnings: Vec<Warning>,
    pub builds: BuildReport,
}

impl Outcome {
    pub fn completed() -> Self {
        Self::default()
    }

    /// The operator declined; nothing was changed.
    pub fn declined() -> Self {
        Self {
            status: OutcomeStatus::Declined,
            ..Self::default()
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Fold another outcome's warnings and build results into this one.
    pub fn absorb(&mut self, other: Outcome) {
        self.warnings.extend(other.warnings);
        self.builds.results.extend(other.builds.results);
        if other.status == OutcomeStatus::Declined {
            self.status = OutcomeStatus::Declined;
        }
    }

    /// Record a batch report, turning each failed build into a warning.
    pub fn record_builds(&mut self, report: BuildReport) {
        for failed in report.failed() {
            self.warnings.push(Warning::BuildFailed {
                service: failed.service.clone(),
            });
        }
        self.builds.results.extend(report.results);
    }

    pub fn is_declined(&self) -> bool {
        self.status == OutcomeStatus::Declined
    }

    /// Completed with no warnings.
    pub fn is_clean(&self) -> bool {
        self.status == OutcomeStatus::Completed && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::{BuildOutcome, BuildResult};

    #[test]
    fn completed_without_warnings_is_clean() {
        assert!(Outcome::completed().is_clean());
    }

    #[test]
    fn warning_makes_outcome_degraded() {
        let mut outcome = Outcome::completed();
        outcome.warn(Warning::ManifestNotFound {
            path: PathBuf::from("k8s/services/x.yaml"),
        });
        assert!(!outcome.is_clean());
        assert!(!outcome.is_declined());
    }

    #[test]
    fn record_builds_turns_failures_into_warnings() {
        let mut report = BuildReport::default();
        report.push(BuildResult {
            service: "svc-a".into(),
            image: "ns/svc-a:latest".into(),
            outcome: BuildOutcome::BuildFailed { exit_code: Some(1) },
        });
        let mut outcome = Outcome::completed();
        outcome.record_builds(report);

        assert_eq!(
            outcome.warnings,
            vec![Warning::BuildFailed {
                service: "svc-a".into()
            }]
        );
        assert_eq!(outcome.builds.len(), 1);
    }

    #[test]
    fn absorbing_a_declined_outcome_marks_declined() {
        let mut outcome = Outcome::completed();
        outcome.absorb(Outcome::declined());
        assert!(outcome.is_declined());
    }
}
