//! Confirmation port for destructive or disruptive steps.

use crate::error::Result;

/// Asks the operator a yes/no question.
///
/// Cluster deletion and bulk restarts only run after a `true` answer.
pub trait Confirmer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the prompt cannot be shown or read.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}
