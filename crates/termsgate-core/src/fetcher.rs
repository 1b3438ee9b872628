//! Latest-policy descriptor retrieval.
//!
//! One GET per call, no retry, no caching. The request asks every cache
//! between us and the origin to stay out of the way and asks for JSON.

use tracing::{debug, warn};

use termsgate_contracts::{
    error::{GateError, GateResult},
    policy::PolicyDescriptor,
};

use crate::traits::HttpFetcher;

/// Headers sent with every descriptor request.
pub const DESCRIPTOR_REQUEST_HEADERS: [(&str, &str); 3] = [
    ("Pragma", "no-cache"),
    ("Cache-Control", "no-cache, no-store"),
    ("Accept", "application/json"),
];

/// Fetches and decodes the latest-policy descriptor.
pub struct PolicyDescriptorFetcher {
    http: Box<dyn HttpFetcher>,
}

impl PolicyDescriptorFetcher {
    pub fn new(http: Box<dyn HttpFetcher>) -> Self {
        Self { http }
    }

    /// GET `url` and decode the body into a `PolicyDescriptor`.
    ///
    /// # Errors
    ///
    /// Always `GateError::Fetch`: transport failures, bodies that are not
    /// a JSON object, and objects missing a string `tos` or `privacy` field.
    pub fn fetch(&self, url: &str) -> GateResult<PolicyDescriptor> {
        debug!(url = %url, "fetching latest policy descriptor");

        let body = self
            .http
            .get(url, &DESCRIPTOR_REQUEST_HEADERS)
            .map_err(|e| match e {
                GateError::Fetch { .. } => e,
                other => GateError::Fetch {
                    reason: other.to_string(),
                },
            })?;

        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| rejected(url, e))?;
        if !value.is_object() {
            warn!(url = %url, "policy descriptor body is not a JSON object");
            return Err(GateError::Fetch {
                reason: format!("policy descriptor from '{}' is not a JSON object", url),
            });
        }
        let descriptor: PolicyDescriptor = serde_json::from_value(value).map_err(|e| rejected(url, e))?;

        debug!(
            url = %url,
            tos = %descriptor.tos_version,
            privacy = %descriptor.privacy_version,
            "policy descriptor fetched"
        );
        Ok(descriptor)
    }
}

fn rejected(url: &str, e: serde_json::Error) -> GateError {
    warn!(url = %url, error = %e, "policy descriptor body rejected");
    GateError::Fetch {
        reason: format!("invalid policy descriptor from '{}': {}", url, e),
    }
}
