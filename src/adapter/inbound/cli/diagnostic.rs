//! Miette-based error diagnostics for CLI error presentation.
//!
//! Fatal startup failures (bad configuration, missing tools, a stopped
//! container runtime) are rendered as diagnostics with a help line before
//! the process exits.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration parse error with the offending span highlighted.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kindops::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// Startup failure that ends the process.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kindops::fatal))]
pub struct FatalError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl FatalError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Suggested next step for an error, if there is an obvious one.
#[must_use]
pub fn help_for(error: &Error) -> Option<String> {
    match error {
        Error::MissingTool { .. } => {
            Some("install the missing tools and make sure they are on PATH".to_string())
        }
        Error::RuntimeUnavailable { runtime } => Some(format!(
            "start the {runtime} daemon (or Docker Desktop) and try again"
        )),
        Error::UnknownService { .. } => {
            Some("run `kindops services` to list names and aliases".to_string())
        }
        Error::ImageLoad { .. } => {
            Some("check that the cluster exists and the container runtime is healthy".to_string())
        }
        Error::Config(ConfigError::ReadFile(_)) => {
            Some("pass --config with an existing file, or omit it to use defaults".to_string())
        }
        _ => None,
    }
}

/// Build the diagnostic for a startup error.
///
/// TOML parse errors get the file content and the failing span when the
/// file can be read again.
pub fn startup(error: &Error, config_path: Option<&Path>) -> Box<dyn Diagnostic + Send + Sync> {
    if let (Error::Config(ConfigError::Parse(parse)), Some(path)) = (error, config_path) {
        if let Ok(content) = std::fs::read_to_string(path) {
            let span = parse.span().map(|range| SourceSpan::from(range.start..range.end));
            return Box::new(ConfigDiagnostic {
                message: format!("invalid configuration: {}", parse.message()),
                src: NamedSource::new(path.display().to_string(), content),
                span,
                help: Some("see kindops.toml.example for every supported key".to_string()),
            });
        }
    }

    let mut fatal = FatalError::new(error.to_string());
    if let Some(help) = help_for(error) {
        fatal = fatal.with_help(help);
    }
    Box::new(fatal)
}

/// Render a diagnostic to stderr.
pub fn render(diagnostic: Box<dyn Diagnostic + Send + Sync>) {
    eprintln!("{:?}", miette::Report::new_boxed(diagnostic));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_has_install_help() {
        let error = Error::MissingTool {
            tools: vec!["kind".into()],
        };
        assert!(help_for(&error).unwrap().contains("PATH"));
    }

    #[test]
    fn parse_error_carries_span() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kindops.toml");
        std::fs::write(&path, "namespace = \n").unwrap();
        let parse = toml::from_str::<toml::Value>("namespace = \n").unwrap_err();
        let error = Error::Config(ConfigError::Parse(parse));

        let diagnostic = startup(&error, Some(&path));

        assert!(diagnostic.to_string().starts_with("invalid configuration"));
        assert!(diagnostic.labels().is_some());
    }

    #[test]
    fn other_errors_become_fatal_messages() {
        let error = Error::RuntimeUnavailable {
            runtime: "docker".into(),
        };
        let diagnostic = startup(&error, None);
        assert_eq!(diagnostic.to_string(), "container runtime 'docker' is not running");
        assert!(diagnostic.help().is_some());
    }
}
