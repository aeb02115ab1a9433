//! Credential material rendered into the shared secret manifest.
//!
//! Every key in [`SecretKey::ALL`] is always present: a value from the
//! environment source wins, otherwise the built-in default is used.

use std::collections::HashMap;
use std::fmt::Write as _;

/// Name of the rendered secret resource.
pub const SECRET_NAME: &str = "common-secrets";

/// The credential keys the services expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKey {
    DatabaseUser,
    DatabasePassword,
    CachePassword,
    TokenSecret,
    TokenExpiry,
    AdminEmail,
    AdminPassword,
}

impl SecretKey {
    /// Keys in rendering order.
    pub const ALL: [SecretKey; 7] = [
        SecretKey::DatabaseUser,
        SecretKey::DatabasePassword,
        SecretKey::CachePassword,
        SecretKey::TokenSecret,
        SecretKey::TokenExpiry,
        SecretKey::AdminEmail,
        SecretKey::AdminPassword,
    ];

    /// Environment variable name, also used as the secret data key.
    pub const fn env_name(self) -> &'static str {
        match self {
            Self::DatabaseUser => "POSTGRES_USER",
            Self::DatabasePassword => "POSTGRES_PASSWORD",
            Self::CachePassword => "REDIS_PASSWORD",
            Self::TokenSecret => "JWT_SECRET",
            Self::TokenExpiry => "JWT_EXPIRATION",
            Self::AdminEmail => "ADMIN_BOOTSTRAP_EMAIL",
            Self::AdminPassword => "ADMIN_BOOTSTRAP_PASSWORD",
        }
    }

    pub const fn default_value(self) -> &'static str {
        match self {
            Self::DatabaseUser => "postgres",
            Self::DatabasePassword => "postgres",
            Self::CachePassword => "",
            Self::TokenSecret => "default-secret-key-must-be-changed",
            Self::TokenExpiry => "86400000",
            Self::AdminEmail => "admin@limitedcart.com",
            Self::AdminPassword => "admin",
        }
    }
}

/// Resolved credential values for every [`SecretKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMaterial {
    values: Vec<(SecretKey, String)>,
}

impl SecretMaterial {
    /// Resolve every key against an override set, falling back to defaults.
    pub fn resolve(overrides: &HashMap<String, String>) -> Self {
        let values = SecretKey::ALL
            .iter()
            .map(|&key| {
                let value = overrides
                    .get(key.env_name())
                    .cloned()
                    .unwrap_or_else(|| key.default_value().to_string());
                (key, value)
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: SecretKey) -> &str {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the `Secret` manifest for `namespace`.
    ///
    /// Output depends only on the inputs, so repeated renders are byte-identical.
    pub fn render(&self, namespace: &str) -> String {
        let mut doc = String::new();
        doc.push_str("apiVersion: v1\n");
        doc.push_str("kind: Secret\n");
        doc.push_str("metadata:\n");
        let _ = writeln!(doc, "  name: {SECRET_NAME}");
        let _ = writeln!(doc, "  namespace: {namespace}");
        doc.push_str("type: Opaque\n");
        doc.push_str("stringData:\n");
        for (key, value) in &self.values {
            let _ = writeln!(doc, "  {}: \"{}\"", key.env_name(), quote(value));
        }
        doc
    }
}

/// Escape a value for a double-quoted YAML scalar.
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_yield_all_defaults() {
        let material = SecretMaterial::resolve(&HashMap::new());
        assert_eq!(material.len(), SecretKey::ALL.len());
        for key in SecretKey::ALL {
            assert_eq!(material.get(key), key.default_value());
        }
    }

    #[test]
    fn override_wins_over_default() {
        let overrides = HashMap::from([("JWT_SECRET".to_string(), "s3cret".to_string())]);
        let material = SecretMaterial::resolve(&overrides);
        assert_eq!(material.get(SecretKey::TokenSecret), "s3cret");
        assert_eq!(material.get(SecretKey::DatabaseUser), "postgres");
    }

    #[test]
    fn unrelated_overrides_are_not_rendered() {
        let overrides = HashMap::from([("UNRELATED".to_string(), "x".to_string())]);
        let doc = SecretMaterial::resolve(&overrides).render("shop");
        assert!(!doc.contains("UNRELATED"));
    }

    #[test]
    fn render_matches_expected_document() {
        let doc = SecretMaterial::resolve(&HashMap::new()).render("limitedcart");
        let expected = "apiVersion: v1\n\
kind: Secret\n\
metadata:\n  name: common-secrets\n  namespace: limitedcart\n\
type: Opaque\n\
stringData:\n\
\x20 POSTGRES_USER: \"postgres\"\n\
\x20 POSTGRES_PASSWORD: \"postgres\"\n\
\x20 REDIS_PASSWORD: \"\"\n\
\x20 JWT_SECRET: \"default-secret-key-must-be-changed\"\n\
\x20 JWT_EXPIRATION: \"86400000\"\n\
\x20 ADMIN_BOOTSTRAP_EMAIL: \"admin@limitedcart.com\"\n\
\x20 ADMIN_BOOTSTRAP_PASSWORD: \"admin\"\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let overrides = HashMap::from([(
            "ADMIN_BOOTSTRAP_PASSWORD".to_string(),
            r#"a"b\c"#.to_string(),
        )]);
        let doc = SecretMaterial::resolve(&overrides).render("shop");
        assert!(doc.contains(r#"ADMIN_BOOTSTRAP_PASSWORD: "a\"b\\c""#));
    }
}
