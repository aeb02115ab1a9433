//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct: an immutable value built once at
//! startup and passed to every component that needs the roster, namespace or
//! manifest layout. Every field has a default, so an empty file (or no file at
//! all) reproduces the stock `limitedcart` layout.
//!
//! # Example
//!
//! ```no_run
//! use kindops::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("kindops.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::domain::{ClusterHandle, ReadinessProbe, ServiceRoster};
use crate::error::{ConfigError, Result};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kindops.toml";

const INGRESS_NGINX_KIND_MANIFEST: &str = concat!(
    "https://raw.githubusercontent.com/kubernetes/ingress-nginx/main/",
    "deploy/static/provider/kind/deploy.yaml"
);

/// Cluster identity and the baseline networking manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    /// Cluster-creation tool config file, relative to the project root.
    pub config_file: PathBuf,
    /// Ingress controller manifest (path or URL) applied after creation.
    pub ingress_manifest: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: "limitedcart".into(),
            config_file: PathBuf::from("kind-config.yaml"),
            ingress_manifest: INGRESS_NGINX_KIND_MANIFEST.into(),
        }
    }
}

/// External tool binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Cluster-creation tool.
    pub cluster: String,
    /// Cluster-control-plane client.
    pub control: String,
    /// Container build tool; also queried for runtime health.
    pub build: String,
}

impl ToolsConfig {
    /// Every tool that must be on the execution path.
    pub fn required(&self) -> [&str; 3] {
        [
            self.cluster.as_str(),
            self.control.as_str(),
            self.build.as_str(),
        ]
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cluster: "kind".into(),
            control: "kubectl".into(),
            build: "docker".into(),
        }
    }
}

/// Manifest and environment-source layout, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub namespace: PathBuf,
    pub metrics_server: PathBuf,
    pub common: PathBuf,
    pub infrastructure: PathBuf,
    pub services: PathBuf,
    pub ingress: PathBuf,
    pub secret: PathBuf,
    pub env_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            namespace: "k8s/namespace.yaml".into(),
            metrics_server: "k8s/infrastructure/metrics-server.yaml".into(),
            common: "k8s/common/".into(),
            infrastructure: "k8s/infrastructure/".into(),
            services: "k8s/services/".into(),
            ingress: "k8s/ingress.yaml".into(),
            secret: "k8s/common/secret.yaml".into(),
            env_file: ".env".into(),
        }
    }
}

/// One readiness wait. `namespace` defaults to the application namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeConfig {
    pub selector: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub timeout_secs: u64,
}

/// Readiness waits and settle delays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub ingress: ProbeConfig,
    pub datastore: ProbeConfig,
    /// Pause after applying the namespace manifest.
    pub namespace_settle_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            ingress: ProbeConfig {
                selector: "app.kubernetes.io/component=controller".into(),
                namespace: Some("ingress-nginx".into()),
                timeout_secs: 180,
            },
            datastore: ProbeConfig {
                selector: "app=postgres".into(),
                namespace: None,
                timeout_secs: 120,
            },
            namespace_settle_ms: 2000,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root. Commands run here and relative paths resolve against it.
    pub root: PathBuf,

    /// Namespace every application resource lives in.
    pub namespace: String,

    /// Image tags are `<registry_prefix>/<service>:latest`.
    pub registry_prefix: String,

    pub cluster: ClusterConfig,

    pub tools: ToolsConfig,

    pub paths: PathsConfig,

    pub readiness: ReadinessConfig,

    /// Ordered service roster.
    #[serde(rename = "services")]
    pub roster: ServiceRoster,

    /// Workloads besides the roster whose logs can be viewed.
    pub log_targets: Vec<String>,

    /// Logging and tracing configuration.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            namespace: "limitedcart".into(),
            registry_prefix: "limitedcart".into(),
            cluster: ClusterConfig::default(),
            tools: ToolsConfig::default(),
            paths: PathsConfig::default(),
            readiness: ReadinessConfig::default(),
            roster: ServiceRoster::default(),
            log_targets: vec!["postgres".into(), "kafka".into(), "redis".into()],
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, the roster is inconsistent,
    /// or a required value is empty.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly named file is missing or invalid.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "namespace" }.into());
        }
        if self.registry_prefix.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "registry_prefix",
            }
            .into());
        }
        if self.cluster.name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "cluster.name",
            }
            .into());
        }
        if self.tools.required().iter().any(|tool| tool.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "tools",
                reason: "tool names must not be empty".to_string(),
            }
            .into());
        }
        for (field, probe) in [
            ("readiness.ingress", &self.readiness.ingress),
            ("readiness.datastore", &self.readiness.datastore),
        ] {
            if probe.timeout_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "timeout_secs must be greater than 0".to_string(),
                }
                .into());
            }
        }
        if self.roster.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "services",
                reason: "at least one service is required".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve a project-relative path against [`Config::root`].
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn cluster_handle(&self) -> ClusterHandle {
        ClusterHandle::new(&self.cluster.name, &self.cluster.config_file)
    }

    pub fn ingress_probe(&self) -> ReadinessProbe {
        self.probe(&self.readiness.ingress)
    }

    pub fn datastore_probe(&self) -> ReadinessProbe {
        self.probe(&self.readiness.datastore)
    }

    pub fn namespace_settle(&self) -> Duration {
        Duration::from_millis(self.readiness.namespace_settle_ms)
    }

    fn probe(&self, probe: &ProbeConfig) -> ReadinessProbe {
        ReadinessProbe::new(
            &probe.selector,
            probe.namespace.as_deref().unwrap_or(&self.namespace),
            Duration::from_secs(probe.timeout_secs),
        )
    }
}
