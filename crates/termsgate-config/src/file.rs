//! TOML configuration files.
//!
//! ```toml
//! descriptor_url = "https://example.com/policy/latest.json"
//! policy_url_template = "https://example.com/policy/%1$s/%1$s.%2$s.html"
//! ```
//!
//! Both keys may be omitted from the file when the environment supplies
//! them; see `load`. Unknown keys are rejected so typos surface at startup.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use termsgate_contracts::{
    config::GateConfig,
    error::{GateError, GateResult},
};

/// The raw, possibly partial, contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub descriptor_url: Option<String>,
    pub policy_url_template: Option<String>,
}

impl ConfigFile {
    /// Parse `s` as TOML.
    ///
    /// Returns `GateError::Config` if the TOML is malformed or contains keys
    /// other than the two known ones.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        toml::from_str(s).map_err(|e| GateError::Config {
            reason: format!("failed to parse gate config TOML: {}", e),
        })
    }

    /// Read and parse the file at `path`.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        debug!(path = %path.display(), "reading gate config file");
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::Config {
            reason: format!("failed to read gate config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Require both values and build a validated `GateConfig`.
    pub fn into_config(self) -> GateResult<GateConfig> {
        let descriptor_url = self.descriptor_url.ok_or_else(|| GateError::Config {
            reason: "missing required value 'descriptor_url'".to_string(),
        })?;
        let policy_url_template = self.policy_url_template.ok_or_else(|| GateError::Config {
            reason: "missing required value 'policy_url_template'".to_string(),
        })?;
        GateConfig::new(descriptor_url, policy_url_template)
    }
}

/// Parse a complete config from TOML.
pub fn from_toml_str(s: &str) -> GateResult<GateConfig> {
    ConfigFile::from_toml_str(s)?.into_config()
}

/// Read a complete config from a TOML file.
pub fn from_file(path: &Path) -> GateResult<GateConfig> {
    ConfigFile::from_file(path)?.into_config()
}
