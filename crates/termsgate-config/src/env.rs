//! Environment-supplied configuration.
//!
//! Values are read through a lookup function so callers (and tests) decide
//! where they come from. `std::env` is only touched by `process_env`, which
//! the host calls once at startup.

use tracing::debug;

use termsgate_contracts::{config::GateConfig, error::GateResult};

use crate::file::ConfigFile;

/// Environment variable naming the latest-policy descriptor URL.
pub const ENV_DESCRIPTOR_URL: &str = "EXTERNALTERMSANDCONDITIONS_LATEST_TERMS_URL";

/// Environment variable holding the policy page URL template.
pub const ENV_POLICY_URL_TEMPLATE: &str = "EXTERNALTERMSANDCONDITIONS_POLICIES_BASE_URL";

/// Lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl ConfigFile {
    /// Overwrite values with non-empty environment values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DESCRIPTOR_URL).filter(|v| !v.is_empty()) {
            debug!(variable = ENV_DESCRIPTOR_URL, "descriptor url taken from environment");
            self.descriptor_url = Some(url);
        }
        if let Some(template) = lookup(ENV_POLICY_URL_TEMPLATE).filter(|v| !v.is_empty()) {
            debug!(variable = ENV_POLICY_URL_TEMPLATE, "policy url template taken from environment");
            self.policy_url_template = Some(template);
        }
    }
}

/// Build a config from environment values alone.
pub fn from_lookup<F>(lookup: F) -> GateResult<GateConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut file = ConfigFile::default();
    file.apply_env_overrides(lookup);
    file.into_config()
}

/// Build a config from the process environment.
pub fn from_env() -> GateResult<GateConfig> {
    from_lookup(process_env)
}
