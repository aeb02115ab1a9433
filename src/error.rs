use std::path::PathBuf;

use thiserror::Error;

use crate::domain::build::BuildReport;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required tools: {}", tools.join(", "))]
    MissingTool { tools: Vec<String> },

    #[error("container runtime '{runtime}' is not running")]
    RuntimeUnavailable { runtime: String },

    #[error("command `{command}` exited with status {exit_code}")]
    ExternalCommand {
        command: String,
        exit_code: i32,
        stderr: Option<String>,
    },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest not found at {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("unknown service '{name}'")]
    UnknownService { name: String },

    #[error("failed to load image for {service} into the cluster")]
    ImageLoad {
        service: String,
        report: BuildReport,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    /// True for the failures that must terminate the process.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingTool { .. } | Self::RuntimeUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_prerequisite_failures_are_fatal() {
        assert!(Error::MissingTool {
            tools: vec!["kind".into()]
        }
        .is_fatal());
        assert!(Error::RuntimeUnavailable {
            runtime: "docker".into()
        }
        .is_fatal());
        assert!(!Error::ExternalCommand {
            command: "kubectl apply".into(),
            exit_code: 1,
            stderr: None,
        }
        .is_fatal());
        assert!(!Error::UnknownService { name: "x".into() }.is_fatal());
    }

    #[test]
    fn missing_tool_lists_every_tool() {
        let err = Error::MissingTool {
            tools: vec!["kind".into(), "kubectl".into()],
        };
        assert_eq!(err.to_string(), "missing required tools: kind, kubectl");
    }
}
