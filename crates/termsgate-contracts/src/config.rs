//! Gate configuration.
//!
//! Read once when the provider is initialized and immutable afterwards.
//! Loading from files or the environment lives in termsgate-config; this
//! module only defines the shape and the presence checks.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// The two values the gate needs to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Where the latest-policy descriptor is published,
    /// e.g. `https://example.com/policy/latest.json`.
    pub descriptor_url: String,

    /// Template for human-facing policy pages. `%1$s` is replaced with the
    /// policy type (`tos` / `privacy`) and `%2$s` with its version, e.g.
    /// `https://example.com/policy/%1$s/%1$s.%2$s.html`.
    pub policy_url_template: String,
}

impl GateConfig {
    /// Build a config and check that both values are present.
    pub fn new(
        descriptor_url: impl Into<String>,
        policy_url_template: impl Into<String>,
    ) -> GateResult<Self> {
        let config = Self {
            descriptor_url: descriptor_url.into(),
            policy_url_template: policy_url_template.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Return `GateError::Config` if either value is empty or blank.
    pub fn validate(&self) -> GateResult<()> {
        if self.descriptor_url.trim().is_empty() {
            return Err(GateError::Config {
                reason: "descriptor_url must not be empty".to_string(),
            });
        }
        if self.policy_url_template.trim().is_empty() {
            return Err(GateError::Config {
                reason: "policy_url_template must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
