//! Read-only views of the running cluster.
//!
//! These back the status, metrics and log display loops. They only query;
//! nothing here changes cluster state.

use crate::error::Result;

/// Which `top` view to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsScope {
    Nodes,
    Pods,
}

/// Observation use-cases for operator-facing adapters.
pub trait ObservationOperator {
    /// Pods, services, ingresses and autoscalers in the namespace.
    fn status_snapshot(&self) -> Result<String>;

    /// CPU and memory usage for nodes or namespace pods.
    fn metrics_snapshot(&self, scope: MetricsScope) -> Result<String>;

    /// Names accepted by [`ObservationOperator::find_pod`].
    fn log_targets(&self) -> Vec<String>;

    /// First pod labelled `app=<target>`, after alias resolution.
    fn find_pod(&self, target: &str) -> Result<Option<String>>;

    /// Stream a pod's logs to the terminal until it ends or is interrupted.
    fn stream_logs(&self, pod: &str, follow: bool) -> Result<()>;
}
