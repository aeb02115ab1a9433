//! Canonical test configurations.
//!
//! Single source of truth for the project layout used across tests.

use std::path::Path;

use crate::domain::{ServiceDescriptor, ServiceRoster};
use crate::infrastructure::config::settings::Config;

/// Two-service roster: `svc-a` (alias `a`) and `svc-b`.
pub fn roster() -> ServiceRoster {
    ServiceRoster::new(vec![
        ServiceDescriptor::new("svc-a").with_alias("a"),
        ServiceDescriptor::new("svc-b"),
    ])
    .expect("test roster is valid")
}

/// Project rooted at `root` with namespace and registry prefix `ns`.
///
/// The namespace settle delay is zero so tests never sleep.
pub fn project(root: &Path) -> Config {
    let mut config = Config {
        root: root.to_path_buf(),
        namespace: "ns".into(),
        registry_prefix: "ns".into(),
        roster: roster(),
        ..Config::default()
    };
    config.cluster.name = "test-cluster".into();
    config.readiness.namespace_settle_ms = 0;
    config
}

/// Create `relative` (and its parents) under `root` with placeholder content.
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(path, "# placeholder\n").expect("write fixture file");
}
