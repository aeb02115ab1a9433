//! Secret manifest materialization.
//!
//! Reads the `KEY=VALUE` environment source, merges it over the built-in
//! defaults and writes the rendered `Secret` document. The output file is
//! replaced atomically, so a reader never sees a partial manifest.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::SecretMaterial;
use crate::error::Result;
use crate::port::inbound::operator::deployment::MaterializedSecret;
use crate::port::outbound::notifier::{Action, Event};

use super::Context;

/// Parse an environment source.
///
/// Blank lines and lines starting with `#` (after leading whitespace) are
/// skipped. Each remaining line is split on its first `=`, and both sides are
/// trimmed. A line without `=` yields an empty value. Later keys win.
pub fn parse_env_source(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key.to_string(), value.trim().to_string());
    }
    values
}

/// Renders the secret manifest for the configured namespace.
pub struct SecretMaterializer<'a> {
    ctx: Context<'a>,
}

impl<'a> SecretMaterializer<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Materialize using the configured source and output paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the source exists but cannot be read, or the
    /// output cannot be written.
    pub fn materialize(&self) -> Result<MaterializedSecret> {
        let config = self.ctx.config;
        let env_path = config.resolve(&config.paths.env_file);
        let output = config.resolve(&config.paths.secret);

        self.ctx
            .notify(Event::started(Action::WriteSecrets, output.display().to_string()));
        let result = materialize_from(&env_path, &config.namespace, &output)?;
        if !result.env_source_found {
            self.ctx.notify(Event::notice(format!(
                "{} not found, using default values",
                config.paths.env_file.display()
            )));
        }
        self.ctx
            .notify(Event::finished(Action::WriteSecrets, output.display().to_string()));
        Ok(result)
    }
}

/// Render the secret for `namespace` from `env_path` into `output`.
///
/// A missing `env_path` is not an error: every key falls back to its default.
///
/// # Errors
///
/// Returns an error on any other read failure or when writing fails.
pub fn materialize_from(
    env_path: &Path,
    namespace: &str,
    output: &Path,
) -> Result<MaterializedSecret> {
    let (overrides, env_source_found) = match std::fs::read_to_string(env_path) {
        Ok(content) => (parse_env_source(&content), true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %env_path.display(), "environment source not found, using defaults");
            (HashMap::new(), false)
        }
        Err(e) => return Err(e.into()),
    };

    let document = SecretMaterial::resolve(&overrides).render(namespace);
    write_atomically(output, document.as_bytes())?;
    debug!(path = %output.display(), bytes = document.len(), "secret manifest written");

    Ok(MaterializedSecret {
        path: output.to_path_buf(),
        env_source_found,
    })
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecretKey;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let values = parse_env_source("# comment\n\n   # indented\nA=1\n");
        assert_eq!(values.len(), 1);
        assert_eq!(values["A"], "1");
    }

    #[test]
    fn parse_splits_on_first_equals_and_trims() {
        let values = parse_env_source("  JWT_SECRET =  a=b=c  \n");
        assert_eq!(values["JWT_SECRET"], "a=b=c");
    }

    #[test]
    fn parse_line_without_equals_has_empty_value() {
        let values = parse_env_source("REDIS_PASSWORD\n");
        assert_eq!(values["REDIS_PASSWORD"], "");
    }

    #[test]
    fn parse_later_keys_win() {
        let values = parse_env_source("A=1\nA=2\n");
        assert_eq!(values["A"], "2");
    }

    #[test]
    fn missing_source_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("k8s/common/secret.yaml");

        let result = materialize_from(&dir.path().join(".env"), "shop", &output).unwrap();

        assert!(!result.env_source_found);
        let written = std::fs::read_to_string(&output).unwrap();
        for key in SecretKey::ALL {
            let line = format!("  {}: \"{}\"\n", key.env_name(), key.default_value());
            assert!(written.contains(&line), "missing {line:?}");
        }
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join(".env");
        std::fs::write(&env, "POSTGRES_PASSWORD=hunter2\n").unwrap();
        let output = dir.path().join("secret.yaml");

        materialize_from(&env, "shop", &output).unwrap();
        let first = std::fs::read(&output).unwrap();
        materialize_from(&env, "shop", &output).unwrap();
        let second = std::fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().contains("POSTGRES_PASSWORD: \"hunter2\""));
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("secret.yaml");
        materialize_from(&dir.path().join(".env"), "shop", &output).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
