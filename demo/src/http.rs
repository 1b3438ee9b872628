//! Blocking `HttpFetcher` over `ureq`.

use std::io::Read;
use std::time::Duration;

use tracing::debug;

use termsgate_contracts::error::{GateError, GateResult};
use termsgate_core::traits::HttpFetcher;

/// Issues descriptor requests with a fixed overall timeout.
pub struct UreqFetcher {
    agent: ureq::Agent,
}

impl UreqFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl HttpFetcher for UreqFetcher {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> GateResult<Vec<u8>> {
        let request = headers
            .iter()
            .fold(self.agent.get(url), |request, (name, value)| request.set(name, value));

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, _) => GateError::Fetch {
                reason: format!("GET {} returned HTTP {}", url, code),
            },
            ureq::Error::Transport(t) => GateError::Fetch {
                reason: format!("GET {} failed: {}", url, t),
            },
        })?;
        debug!(url = %url, status = response.status(), "descriptor response received");

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| GateError::Fetch {
                reason: format!("failed to read body from '{}': {}", url, e),
            })?;
        Ok(body)
    }
}
