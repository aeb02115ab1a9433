//! Bounded readiness waits.

use std::time::Duration;

/// A wait for pods matching `selector` in `namespace` to become ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessProbe {
    pub selector: String,
    pub namespace: String,
    pub timeout: Duration,
}

impl ReadinessProbe {
    pub fn new(
        selector: impl Into<String>,
        namespace: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            selector: selector.into(),
            namespace: namespace.into(),
            timeout,
        }
    }

    /// The `--timeout` flag value understood by the control-plane client.
    pub fn timeout_flag(&self) -> String {
        format!("--timeout={}s", self.timeout.as_secs())
    }
}

/// Result of a readiness wait. A timeout is an outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessOutcome {
    Ready,
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_uses_whole_seconds() {
        let probe = ReadinessProbe::new("app=postgres", "shop", Duration::from_secs(120));
        assert_eq!(probe.timeout_flag(), "--timeout=120s");
    }
}
