//! Challenge view-model, form submission, and processing outcome types.
//!
//! The challenge round-trip works like this: the builder produces a
//! `ChallengeContext`, which becomes a `ChallengeForm` handed to the host's
//! renderer. The rendered page echoes the two version identifiers back as
//! hidden fields, and the host decodes the user's submission into a
//! `FormSubmission` for the processor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    policy::UserAcceptanceRecord,
    user::{ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS},
};

/// Template identifier the host renders the challenge with.
pub const CHALLENGE_TEMPLATE: &str = "terms.ftl";

/// Form attribute carrying the resolved terms-of-service URL.
pub const FORM_TOS_URL: &str = "tos_url";

/// Form attribute carrying the resolved privacy policy URL.
pub const FORM_PRIVACY_URL: &str = "privacy_url";

/// Form attribute naming the authenticated user.
pub const FORM_USER: &str = "user";

/// Submission field whose presence means the user declined.
pub const FORM_CANCEL: &str = "cancel";

/// Everything needed to present the accept/cancel prompt.
///
/// Exists for one render only and is never persisted. Both links are always
/// present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeContext {
    pub tos_url: String,
    pub privacy_url: String,
    /// Echoed back by the form under `agreed_tos`.
    pub tos_version: String,
    /// Echoed back by the form under `agreed_privacy`.
    pub privacy_version: String,
}

impl ChallengeContext {
    /// Convert into the named-attribute form the host renders.
    pub fn into_form(self, user: impl Into<String>) -> ChallengeForm {
        let mut attributes = BTreeMap::new();
        attributes.insert(FORM_USER.to_string(), user.into());
        attributes.insert(FORM_TOS_URL.to_string(), self.tos_url);
        attributes.insert(FORM_PRIVACY_URL.to_string(), self.privacy_url);
        attributes.insert(ATTR_AGREED_TOS.to_string(), self.tos_version);
        attributes.insert(ATTR_AGREED_PRIVACY.to_string(), self.privacy_version);
        ChallengeForm {
            template: CHALLENGE_TEMPLATE.to_string(),
            attributes,
        }
    }
}

/// A template identifier plus the attributes to render it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeForm {
    pub template: String,
    pub attributes: BTreeMap<String, String>,
}

impl ChallengeForm {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Decoded form fields from the user's submission.
///
/// Fields are multi-valued the way URL-encoded forms are; readers take the
/// first value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from `(name, value)` pairs in submission order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut submission = Self::new();
        for (name, value) in pairs {
            submission.push(name, value);
        }
        submission
    }

    /// Append one value to a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// Builder-style `push`.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// True when the field was submitted at all, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The first submitted value of a field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_cancel(&self) -> bool {
        self.contains(FORM_CANCEL)
    }
}

/// What processing a submission did to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The submitted versions were stored as the user's acceptance record.
    Accepted {
        /// The record as written, verbatim from the submission.
        record: UserAcceptanceRecord,
    },

    /// The user declined. Acceptance stays cleared and account deletion is
    /// queued as the user's next required action.
    CancelledToDeletion,
}
