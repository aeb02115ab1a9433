//! Startup precondition check.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::port::outbound::command::RunOptions;

use super::Context;

/// Verifies the external tools and the container runtime.
pub struct PrerequisiteChecker<'a> {
    ctx: Context<'a>,
}

impl<'a> PrerequisiteChecker<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Check every tool, then the runtime daemon.
    ///
    /// All missing tools are reported together rather than one at a time.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTool`] or [`Error::RuntimeUnavailable`].
    pub fn check(&self) -> Result<()> {
        let missing: Vec<String> = self
            .ctx
            .config
            .tools
            .required()
            .into_iter()
            .filter(|tool| !self.ctx.runner.is_available(tool))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(Error::MissingTool { tools: missing });
        }

        let runtime = &self.ctx.config.tools.build;
        let info = self.ctx.build_tool().arg("info");
        match self.ctx.run(&info, RunOptions::PROBE) {
            Ok(output) if output.is_success() => {
                info!(runtime = %runtime, "prerequisites met");
                Ok(())
            }
            Ok(output) => {
                debug!(exit_code = output.exit_code, "runtime info query failed");
                Err(Error::RuntimeUnavailable {
                    runtime: runtime.clone(),
                })
            }
            Err(e) => {
                debug!(error = %e, "runtime info query could not run");
                Err(Error::RuntimeUnavailable {
                    runtime: runtime.clone(),
                })
            }
        }
    }
}
