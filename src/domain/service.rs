//! Service descriptors and the fixed roster.
//!
//! The roster is the ordered set of services known at startup. Every name
//! handed to a build or deploy path goes through [`ServiceRoster::resolve`],
//! which maps an alias or canonical name onto exactly one descriptor.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_CONTEXT: &str = ".";
const DEFAULT_DOCKERFILE: &str = "Dockerfile";
const MODULE_BUILD_ARG: &str = "MODULE";

/// One deployable service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDescriptor {
    /// Canonical name; also the deployment and manifest name.
    pub name: String,

    /// Optional shorthand accepted wherever a service name is.
    #[serde(default)]
    pub alias: Option<String>,

    /// Build context directory, relative to the project root.
    #[serde(default)]
    pub context: Option<PathBuf>,

    /// Dockerfile name inside the build context.
    #[serde(default)]
    pub dockerfile: Option<String>,

    /// Explicit build arguments. `None` means the `MODULE=<name>` convention.
    #[serde(default)]
    pub build_args: Option<BTreeMap<String, String>>,
}

/// Resolved build inputs for a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub directory: PathBuf,
    pub dockerfile: PathBuf,
    pub build_args: Vec<(String, String)>,
}

impl ServiceDescriptor {
    /// Create a descriptor with default build settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            context: None,
            dockerfile: None,
            build_args: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Override the build context directory and Dockerfile name.
    #[must_use]
    pub fn with_context(
        mut self,
        directory: impl Into<PathBuf>,
        dockerfile: impl Into<String>,
    ) -> Self {
        self.context = Some(directory.into());
        self.dockerfile = Some(dockerfile.into());
        self
    }

    /// Replace the conventional build arguments with an explicit set.
    #[must_use]
    pub fn with_build_args<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.build_args = Some(
            args.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Resolve the directory, Dockerfile path and build arguments.
    pub fn build_context(&self) -> BuildContext {
        let directory = self
            .context
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTEXT));
        let dockerfile = directory.join(self.dockerfile.as_deref().unwrap_or(DEFAULT_DOCKERFILE));
        let build_args = match &self.build_args {
            Some(args) => args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            None => vec![(MODULE_BUILD_ARG.to_string(), self.name.clone())],
        };

        BuildContext {
            directory,
            dockerfile,
            build_args,
        }
    }

    /// Image tag in the form `<prefix>/<name>:latest`.
    pub fn image_tag(&self, registry_prefix: &str) -> String {
        format!("{registry_prefix}/{}:latest", self.name)
    }

    /// Manifest path for this service inside the services directory.
    pub fn manifest_path(&self, services_dir: &Path) -> PathBuf {
        services_dir.join(format!("{}.yaml", self.name))
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered, validated set of services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<ServiceDescriptor>")]
pub struct ServiceRoster {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRoster {
    /// Build a roster, rejecting duplicate names and aliases that shadow a
    /// canonical name or each other.
    pub fn new(services: Vec<ServiceDescriptor>) -> Result<Self, ConfigError> {
        let mut names = HashSet::new();
        for service in &services {
            if service.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "services",
                    reason: "service name must not be empty".to_string(),
                });
            }
            if !names.insert(service.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "services",
                    reason: format!("duplicate service name '{}'", service.name),
                });
            }
        }

        let mut aliases = HashSet::new();
        for alias in services.iter().filter_map(|s| s.alias.as_deref()) {
            if alias.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "services",
                    reason: "alias must not be empty".to_string(),
                });
            }
            if names.contains(alias) {
                return Err(ConfigError::InvalidValue {
                    field: "services",
                    reason: format!("alias '{alias}' collides with a service name"),
                });
            }
            if !aliases.insert(alias) {
                return Err(ConfigError::InvalidValue {
                    field: "services",
                    reason: format!("alias '{alias}' is used more than once"),
                });
            }
        }

        Ok(Self { services })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Look up a service by canonical name only.
    pub fn get(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Resolve a canonical name or alias to its descriptor.
    pub fn resolve(&self, name_or_alias: &str) -> Option<&ServiceDescriptor> {
        let key = name_or_alias.trim();
        self.get(key)
            .or_else(|| self.services.iter().find(|s| s.alias.as_deref() == Some(key)))
    }

    /// `(alias, canonical name)` pairs in roster order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services
            .iter()
            .filter_map(|s| s.alias.as_deref().map(|a| (a, s.name.as_str())))
    }

    /// Every accepted identifier: canonical names first, then aliases.
    pub fn choices(&self) -> Vec<&str> {
        self.services
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.aliases().map(|(alias, _)| alias))
            .collect()
    }
}

impl TryFrom<Vec<ServiceDescriptor>> for ServiceRoster {
    type Error = ConfigError;

    fn try_from(services: Vec<ServiceDescriptor>) -> Result<Self, Self::Error> {
        Self::new(services)
    }
}

impl Default for ServiceRoster {
    fn default() -> Self {
        let services = vec![
            ServiceDescriptor::new("auth-service").with_alias("as"),
            ServiceDescriptor::new("product-service").with_alias("ps"),
            ServiceDescriptor::new("inventory-service").with_alias("is"),
            ServiceDescriptor::new("order-service").with_alias("os"),
            ServiceDescriptor::new("payment-service").with_alias("pays"),
            ServiceDescriptor::new("notification-service").with_alias("ns"),
            ServiceDescriptor::new("temporal-worker").with_alias("tw"),
            ServiceDescriptor::new("frontend")
                .with_alias("f")
                .with_context("./frontend-web", DEFAULT_DOCKERFILE)
                .with_build_args(Vec::<(String, String)>::new()),
        ];
        Self { services }
    }
}
