//! A static descriptor endpoint for tests and offline demos.

use std::sync::{Arc, Mutex};

use termsgate_contracts::error::{GateError, GateResult};
use termsgate_core::traits::HttpFetcher;

/// A recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Serves whatever body was last published, or fails like an unreachable
/// endpoint. Clones share the same body and request log.
#[derive(Clone)]
pub struct StaticDescriptorSource {
    reply: Arc<Mutex<Result<String, String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StaticDescriptorSource {
    /// Start out serving `{"tos": tos, "privacy": privacy}`.
    pub fn serving(tos: &str, privacy: &str) -> Self {
        let source = Self::offline("nothing published");
        source.publish(tos, privacy);
        source
    }

    /// Start out failing every request with `reason`.
    pub fn offline(reason: &str) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err(reason.to_string()))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn publish(&self, tos: &str, privacy: &str) {
        self.publish_raw(serde_json::json!({ "tos": tos, "privacy": privacy }).to_string());
    }

    /// Serve an arbitrary body, valid or not.
    pub fn publish_raw(&self, body: impl Into<String>) {
        if let Ok(mut reply) = self.reply.lock() {
            *reply = Ok(body.into());
        }
    }

    pub fn go_offline(&self, reason: &str) {
        if let Ok(mut reply) = self.reply.lock() {
            *reply = Err(reason.to_string());
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl HttpFetcher for StaticDescriptorSource {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> GateResult<Vec<u8>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        }

        let reply = self.reply.lock().map_err(|e| GateError::Fetch {
            reason: format!("descriptor source lock poisoned: {}", e),
        })?;
        match &*reply {
            Ok(body) => Ok(body.clone().into_bytes()),
            Err(reason) => Err(GateError::Fetch {
                reason: format!("GET {} failed: {}", url, reason),
            }),
        }
    }
}
