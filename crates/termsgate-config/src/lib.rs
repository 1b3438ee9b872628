//! # termsgate-config
//!
//! Configuration loading for the terms gate.
//!
//! ## Overview
//!
//! The gate needs two values: the latest-policy descriptor URL and the
//! policy page URL template. They can come from a TOML file, from the
//! environment, or from a file with environment overrides. Whatever the
//! source, the result is an immutable
//! [`GateConfig`](termsgate_contracts::config::GateConfig) that is built
//! once at startup and handed to the provider.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let config = termsgate_config::load(Some(Path::new("termsgate.toml")), termsgate_config::env::process_env)?;
//! ```

use std::path::Path;

use termsgate_contracts::{config::GateConfig, error::GateResult};

pub mod env;
pub mod file;

pub use env::{from_env, from_lookup, ENV_DESCRIPTOR_URL, ENV_POLICY_URL_TEMPLATE};
pub use file::{from_file, from_toml_str, ConfigFile};

/// Load the config from an optional file, then apply environment overrides.
///
/// Either source may supply either value; a value missing from both is a
/// `GateError::Config`.
pub fn load<F>(path: Option<&Path>, lookup: F) -> GateResult<GateConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut file = match path {
        Some(path) => ConfigFile::from_file(path)?,
        None => ConfigFile::default(),
    };
    file.apply_env_overrides(lookup);
    file.into_config()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use termsgate_contracts::error::GateError;

    use crate::{from_lookup, from_toml_str, load, ConfigFile, ENV_DESCRIPTOR_URL, ENV_POLICY_URL_TEMPLATE};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    // ── 1. TOML ───────────────────────────────────────────────────────────────

    #[test]
    fn test_complete_toml() {
        let toml = r#"
            descriptor_url = "https://example.com/policy/latest.json"
            policy_url_template = "https://example.com/policy/%1$s/%1$s.%2$s.html"
        "#;

        let config = from_toml_str(toml).unwrap();

        assert_eq!(config.descriptor_url, "https://example.com/policy/latest.json");
        assert_eq!(config.policy_url_template, "https://example.com/policy/%1$s/%1$s.%2$s.html");
    }

    #[test]
    fn test_missing_value_in_toml() {
        let toml = r#"
            descriptor_url = "https://example.com/policy/latest.json"
        "#;

        match from_toml_str(toml) {
            Err(GateError::Config { reason }) => {
                assert!(reason.contains("policy_url_template"), "unexpected reason: {reason}");
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_value_in_toml() {
        let toml = r#"
            descriptor_url = ""
            policy_url_template = "https://example.com/%1$s/%2$s"
        "#;

        assert!(matches!(from_toml_str(toml), Err(GateError::Config { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
            descriptor_url = "https://example.com/latest.json"
            policy_url_template = "https://example.com/%1$s/%2$s"
            policies_base_url = "typo"
        "#;

        assert!(matches!(ConfigFile::from_toml_str(toml), Err(GateError::Config { .. })));
    }

    #[test]
    fn test_toml_parse_error() {
        match from_toml_str("this is not valid toml ][[[") {
            Err(GateError::Config { reason }) => {
                assert!(
                    reason.contains("failed to parse gate config TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let result = load(Some(Path::new("/nonexistent/termsgate.toml")), no_env);
        match result {
            Err(GateError::Config { reason }) => assert!(reason.contains("failed to read")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    // ── 2. Environment ────────────────────────────────────────────────────────

    #[test]
    fn test_from_environment_lookup() {
        let env = lookup(&[
            (ENV_DESCRIPTOR_URL, "https://example.com/latest.json"),
            (ENV_POLICY_URL_TEMPLATE, "https://example.com/%1$s.%2$s.html"),
        ]);

        let config = from_lookup(env).unwrap();

        assert_eq!(config.descriptor_url, "https://example.com/latest.json");
        assert_eq!(config.policy_url_template, "https://example.com/%1$s.%2$s.html");
    }

    #[test]
    fn test_missing_environment_is_fatal() {
        let env = lookup(&[(ENV_DESCRIPTOR_URL, "https://example.com/latest.json")]);

        match from_lookup(env) {
            Err(GateError::Config { reason }) => assert!(reason.contains("policy_url_template")),
            other => panic!("expected Config error, got {:?}", other),
        }
        assert!(matches!(from_lookup(no_env), Err(GateError::Config { .. })));
    }

    // ── 3. File plus overrides ────────────────────────────────────────────────

    #[test]
    fn test_environment_overrides_file_values() {
        let mut file = ConfigFile::from_toml_str(
            r#"
            descriptor_url = "https://file.example.com/latest.json"
            policy_url_template = "https://file.example.com/%1$s/%2$s"
        "#,
        )
        .unwrap();

        file.apply_env_overrides(lookup(&[(ENV_DESCRIPTOR_URL, "https://env.example.com/latest.json")]));
        let config = file.into_config().unwrap();

        assert_eq!(config.descriptor_url, "https://env.example.com/latest.json");
        assert_eq!(config.policy_url_template, "https://file.example.com/%1$s/%2$s");
    }

    #[test]
    fn test_empty_environment_value_does_not_override() {
        let mut file = ConfigFile {
            descriptor_url: Some("https://file.example.com/latest.json".to_string()),
            policy_url_template: Some("%1$s/%2$s".to_string()),
        };

        file.apply_env_overrides(lookup(&[(ENV_DESCRIPTOR_URL, "")]));

        assert_eq!(file.descriptor_url.as_deref(), Some("https://file.example.com/latest.json"));
    }

    #[test]
    fn test_load_without_file_uses_environment() {
        let env = lookup(&[
            (ENV_DESCRIPTOR_URL, "https://example.com/latest.json"),
            (ENV_POLICY_URL_TEMPLATE, "%1$s/%2$s"),
        ]);

        let config = load(None, env).unwrap();
        assert_eq!(config.policy_url_template, "%1$s/%2$s");
    }
}
