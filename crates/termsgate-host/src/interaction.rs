//! In-memory `RequiredActionContext`.

use std::collections::HashMap;

use termsgate_contracts::challenge::{ChallengeForm, FormSubmission};
use termsgate_core::traits::{RequiredActionContext, UserHandle};

use crate::store::StoredUser;

/// The last signal the provider gave the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionStatus {
    /// Nothing signalled yet.
    Open,
    /// A form is waiting for the user.
    Challenged(ChallengeForm),
    Succeeded,
    Failed,
}

/// One user's interaction (an authentication session) with the host.
///
/// Notes live exactly as long as the interaction.
pub struct Interaction {
    user: StoredUser,
    form: FormSubmission,
    notes: HashMap<String, String>,
    status: InteractionStatus,
}

impl Interaction {
    pub fn new(user: StoredUser) -> Self {
        Self {
            user,
            form: FormSubmission::new(),
            notes: HashMap::new(),
            status: InteractionStatus::Open,
        }
    }

    pub fn stored_user(&self) -> &StoredUser {
        &self.user
    }

    pub fn status(&self) -> &InteractionStatus {
        &self.status
    }

    /// Replace the current request's form data.
    pub fn submit(&mut self, form: FormSubmission) {
        self.form = form;
    }

    pub fn notes(&self) -> &HashMap<String, String> {
        &self.notes
    }
}

impl RequiredActionContext for Interaction {
    fn user(&self) -> &dyn UserHandle {
        &self.user
    }

    fn form_parameters(&self) -> FormSubmission {
        self.form.clone()
    }

    fn note(&self, key: &str) -> Option<String> {
        self.notes.get(key).cloned()
    }

    fn set_note(&mut self, key: &str, value: String) {
        self.notes.insert(key.to_string(), value);
    }

    fn remove_note(&mut self, key: &str) {
        self.notes.remove(key);
    }

    fn challenge(&mut self, form: ChallengeForm) {
        self.status = InteractionStatus::Challenged(form);
    }

    fn success(&mut self) {
        self.status = InteractionStatus::Succeeded;
    }

    fn failure(&mut self) {
        self.status = InteractionStatus::Failed;
    }
}
