//! Per-service outcomes of an image batch.

use std::fmt;

/// What happened to one service in a build-and-load batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Image built and loaded into the cluster.
    BuiltAndLoaded,
    /// Image build failed; the load step was not attempted.
    BuildFailed { exit_code: Option<i32> },
    /// Image built but the cluster load failed; the batch stopped here.
    LoadFailed { exit_code: Option<i32> },
    /// Not attempted because the batch stopped at an earlier load failure.
    Skipped,
}

/// Outcome for a single service, keyed by canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub service: String,
    pub image: String,
    pub outcome: BuildOutcome,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BuildOutcome::BuiltAndLoaded)
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltAndLoaded => f.write_str("built and loaded"),
            Self::BuildFailed {
                exit_code: Some(code),
            } => write!(f, "build failed (exit {code})"),
            Self::BuildFailed { exit_code: None } => f.write_str("build failed"),
            Self::LoadFailed {
                exit_code: Some(code),
            } => write!(f, "load failed (exit {code})"),
            Self::LoadFailed { exit_code: None } => f.write_str("load failed"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// Results collected across a batch, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub results: Vec<BuildResult>,
}

impl BuildReport {
    pub fn push(&mut self, result: BuildResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &BuildResult> {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    BuildOutcome::BuildFailed { .. } | BuildOutcome::LoadFailed { .. }
                )
            })
    }

    pub fn is_clean(&self) -> bool {
        self.results.iter().all(BuildResult::is_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(service: &str, outcome: BuildOutcome) -> BuildResult {
        BuildResult {
            service: service.into(),
            image: format!("ns/{service}:latest"),
            outcome,
        }
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let mut report = BuildReport::default();
        report.push(result("a", BuildOutcome::BuiltAndLoaded));
        report.push(result("b", BuildOutcome::BuildFailed { exit_code: Some(1) }));
        report.push(result("c", BuildOutcome::LoadFailed { exit_code: None }));
        report.push(result("d", BuildOutcome::Skipped));

        assert_eq!(report.len(), 4);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed().count(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(
            BuildOutcome::BuildFailed { exit_code: Some(2) }.to_string(),
            "build failed (exit 2)"
        );
        assert_eq!(
            BuildOutcome::LoadFailed { exit_code: Some(1) }.to_string(),
            "load failed (exit 1)"
        );
        assert_eq!(BuildOutcome::Skipped.to_string(), "skipped");
    }
}
