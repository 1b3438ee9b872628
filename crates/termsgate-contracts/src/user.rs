//! User identity and the names the gate uses in the identity store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the required action this gate registers with the host.
pub const PROVIDER_ID: &str = "EXTERNAL_TERMS_AND_CONDITIONS";

/// Human-facing name of the required action.
pub const DISPLAY_TEXT: &str = "External Terms and Conditions";

/// Required action that supersedes this gate when the user cancels.
pub const DELETE_ACCOUNT_ACTION: &str = "delete_account";

/// User attribute holding the accepted terms-of-service version.
pub const ATTR_AGREED_TOS: &str = "agreed_tos";

/// User attribute holding the accepted privacy policy version.
pub const ATTR_AGREED_PRIVACY: &str = "agreed_privacy";

/// Stable identifier of a user in the host's identity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new, random user ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
