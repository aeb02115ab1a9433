use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kindops::error::{ConfigError, Error};
use kindops::infrastructure::config::settings::Config;
use tempfile::TempDir;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("kindops.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_loads_from_file() {
    let toml = r#"
root = "/srv/shop"
namespace = "shop"
registry_prefix = "registry.local/shop"
log_targets = ["postgres"]

[cluster]
name = "shop-dev"
config_file = "cluster/kind.yaml"

[tools]
build = "podman"

[readiness]
namespace_settle_ms = 0

[readiness.datastore]
selector = "app=db"
timeout_secs = 30

[[services]]
name = "api"
alias = "a"

[[services]]
name = "web"
context = "./web"
build_args = {}

[logging]
level = "debug"
format = "json"
"#;
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(write_temp_config(&dir, toml)).unwrap();

    assert_eq!(config.root, PathBuf::from("/srv/shop"));
    assert_eq!(config.cluster_handle().name, "shop-dev");
    assert_eq!(config.tools.required(), ["kind", "kubectl", "podman"]);
    assert_eq!(config.namespace_settle(), Duration::ZERO);

    let probe = config.datastore_probe();
    assert_eq!(probe.selector, "app=db");
    assert_eq!(probe.namespace, "shop");
    assert_eq!(probe.timeout, Duration::from_secs(30));

    let api = config.roster.resolve("a").unwrap();
    assert_eq!(api.image_tag(&config.registry_prefix), "registry.local/shop/api:latest");
    assert!(config.roster.get("web").unwrap().build_context().build_args.is_empty());
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "namespace = \n");

    let err = Config::load(&path).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn unknown_service_key_is_rejected() {
    let toml = r#"
[[services]]
name = "api"
image = "api:latest"
"#;
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(write_temp_config(&dir, toml)).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn empty_roster_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(write_temp_config(&dir, "services = []\n")).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "services",
            ..
        })
    ));
}

#[test]
fn discover_without_explicit_path_falls_back_to_defaults() {
    // The test binary runs from the crate root, which has no kindops.toml.
    let config = Config::discover(None).unwrap();
    assert_eq!(config.namespace, "limitedcart");
    assert_eq!(config.roster.len(), 8);
}

#[test]
fn discover_missing_explicit_path_is_an_error() {
    let err = Config::discover(Some(Path::new("/nonexistent/kindops.toml"))).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn example_file_matches_builtin_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("kindops.toml.example");
    let config = Config::load(path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn blank_alias_is_rejected() {
    let toml = r#"
[[services]]
name = "api"
alias = ""
"#;
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(write_temp_config(&dir, toml)).unwrap_err();

    match err {
        Error::Config(ConfigError::Parse(e)) => {
            assert!(e.to_string().contains("alias must not be empty"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
