//! A minimal login flow that drives a `RequiredActionProvider`.
//!
//! Mirrors what an identity server does around a required action:
//!
//!   login → evaluate_triggers → (pending?) challenge → submit → process
//!         → clear the satisfied action → next pending action, if any

use tracing::{debug, warn};

use termsgate_contracts::{
    challenge::{ChallengeForm, FormSubmission},
    error::GateResult,
    user::UserId,
};
use termsgate_core::traits::{RequiredActionProvider, UserHandle};

use crate::{
    interaction::{Interaction, InteractionStatus},
    store::InMemoryUserStore,
};

/// Where a login stands after the host handled one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// No required actions remain; the session may proceed.
    Complete,
    /// The user must answer `form`; continue with `ReferenceHost::submit`.
    Challenge { form: ChallengeForm },
    /// This gate is done but a different required action is next.
    Redirected { next_action: String },
    /// The interaction failed. The user may retry with a new login.
    Failed,
}

/// Drives one provider against an in-memory user store.
pub struct ReferenceHost {
    store: InMemoryUserStore,
    provider: Box<dyn RequiredActionProvider>,
}

impl ReferenceHost {
    pub fn new(store: InMemoryUserStore, provider: Box<dyn RequiredActionProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &InMemoryUserStore {
        &self.store
    }

    /// Open a fresh interaction for `user_id`.
    pub fn begin(&self, user_id: &UserId) -> GateResult<Interaction> {
        Ok(Interaction::new(self.store.user(user_id)?))
    }

    /// Evaluate triggers, then present the challenge if the gate is pending.
    pub fn login(&self, interaction: &mut Interaction) -> GateResult<LoginStep> {
        self.provider.evaluate_triggers(interaction)?;
        if *interaction.status() == InteractionStatus::Failed {
            return Ok(LoginStep::Failed);
        }
        self.next_step(interaction)
    }

    /// Process the user's answer and move on.
    pub fn submit(&self, interaction: &mut Interaction, form: FormSubmission) -> GateResult<LoginStep> {
        interaction.submit(form);
        self.provider.process_action(interaction)?;

        if *interaction.status() != InteractionStatus::Succeeded {
            return Ok(LoginStep::Failed);
        }

        let user_id = interaction.stored_user().id().clone();
        self.store.clear_required_action(&user_id, self.provider.id())?;
        debug!(user_id = %user_id, action = self.provider.id(), "required action cleared");

        self.next_step(interaction)
    }

    fn next_step(&self, interaction: &mut Interaction) -> GateResult<LoginStep> {
        let pending = interaction.stored_user().pending_actions()?;

        if pending.contains(self.provider.id()) {
            self.provider.required_action_challenge(interaction)?;
            return Ok(match interaction.status() {
                InteractionStatus::Challenged(form) => LoginStep::Challenge { form: form.clone() },
                InteractionStatus::Failed => LoginStep::Failed,
                other => {
                    warn!(status = ?other, "provider neither challenged nor failed");
                    LoginStep::Failed
                }
            });
        }

        Ok(match pending.into_iter().next() {
            Some(next_action) => LoginStep::Redirected { next_action },
            None => LoginStep::Complete,
        })
    }
}
