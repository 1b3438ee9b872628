//! Policy descriptor and acceptance record types.
//!
//! A `PolicyDescriptor` is what the remote endpoint publishes as "latest".
//! A `UserAcceptanceRecord` is what the identity store remembers the user
//! agreed to. The comparator in termsgate-core decides whether they match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// The two policy documents the gate tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Tos,
    Privacy,
}

impl PolicyKind {
    /// The token substituted into the policy URL template and used as the
    /// descriptor's JSON key.
    pub fn token(self) -> &'static str {
        match self {
            PolicyKind::Tos => "tos",
            PolicyKind::Privacy => "privacy",
        }
    }
}

/// The latest published policy versions.
///
/// Decoded from the descriptor endpoint's JSON body, e.g.
/// `{"tos": "2024-01", "privacy": "2024-01"}`. Both keys are required and
/// must be strings; any other keys are ignored. Version identifiers are
/// opaque tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDescriptor {
    /// Latest terms-of-service version.
    #[serde(rename = "tos")]
    pub tos_version: String,

    /// Latest privacy policy version.
    #[serde(rename = "privacy")]
    pub privacy_version: String,
}

impl PolicyDescriptor {
    pub fn new(tos_version: impl Into<String>, privacy_version: impl Into<String>) -> Self {
        Self {
            tos_version: tos_version.into(),
            privacy_version: privacy_version.into(),
        }
    }

    /// Return the version for one policy kind.
    pub fn version(&self, kind: PolicyKind) -> &str {
        match kind {
            PolicyKind::Tos => &self.tos_version,
            PolicyKind::Privacy => &self.privacy_version,
        }
    }
}

/// The versions a user has previously accepted.
///
/// `None` means "never accepted". The identity store owns this data; the
/// gate only reads it and, on an explicit submission, replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAcceptanceRecord {
    pub accepted_tos_version: Option<String>,
    pub accepted_privacy_version: Option<String>,
}

impl UserAcceptanceRecord {
    /// A record with nothing accepted.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A descriptor fetched for one user during trigger evaluation, carried to
/// the challenge step of the same interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedDescriptor {
    /// The user whose pending action this descriptor was fetched for.
    pub user_id: UserId,
    pub descriptor: PolicyDescriptor,
    /// Wall-clock time (UTC) the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl FetchedDescriptor {
    pub fn new(user_id: UserId, descriptor: PolicyDescriptor) -> Self {
        Self {
            user_id,
            descriptor,
            fetched_at: Utc::now(),
        }
    }
}
