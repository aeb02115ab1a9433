//! [`Confirmer`] implementations for interactive and scripted use.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tracing::debug;

use crate::error::Result;
use crate::port::outbound::prompt::Confirmer;

/// Asks on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}

/// Accepts every prompt (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        debug!(prompt, "confirmed by --yes");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_accepts_even_when_default_is_no() {
        assert!(AssumeYes.confirm("Delete cluster 'x'?", false).unwrap());
    }
}
