//! Host-facing trait definitions for the terms gate.
//!
//! The gate does not own transport, storage, rendering, or sessions. The
//! host supplies them through these traits:
//!
//! - `HttpFetcher`: issues the descriptor GET
//! - `UserHandle`: reads and writes one user's attributes
//! - `RequiredActionContext`: one interaction: current user, form data,
//!   interaction notes, and the challenge/success/failure signals
//! - `RequiredActionProvider`: the lifecycle the host drives
//!
//! `TermsGateProvider` implements the last one on top of the others.

use termsgate_contracts::{
    challenge::{ChallengeForm, FormSubmission},
    error::GateResult,
    policy::UserAcceptanceRecord,
    user::{UserId, ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS},
};

/// Blocking HTTP GET supplied by the host.
///
/// Timeouts and cancellation belong to the implementation. The gate makes
/// exactly one call per fetch and never retries.
pub trait HttpFetcher: Send + Sync {
    /// GET `url` with the given request headers and return the raw body.
    ///
    /// Transport failures should be reported as `GateError::Fetch`.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> GateResult<Vec<u8>>;
}

/// One user's record in the host's identity store.
///
/// Attributes are single-valued strings. Writes take `&self`; the store is
/// expected to handle its own interior locking.
pub trait UserHandle {
    fn id(&self) -> &UserId;

    /// Display name used in the challenge page.
    fn username(&self) -> &str;

    fn first_attribute(&self, name: &str) -> GateResult<Option<String>>;

    fn set_single_attribute(&self, name: &str, value: &str) -> GateResult<()>;

    fn remove_attribute(&self, name: &str) -> GateResult<()>;

    /// Add `action` to the user's pending required actions. Adding an action
    /// that is already pending is a no-op.
    fn add_required_action(&self, action: &str) -> GateResult<()>;

    /// Read the accepted versions.
    fn acceptance_record(&self) -> GateResult<UserAcceptanceRecord> {
        Ok(UserAcceptanceRecord {
            accepted_tos_version: self.first_attribute(ATTR_AGREED_TOS)?,
            accepted_privacy_version: self.first_attribute(ATTR_AGREED_PRIVACY)?,
        })
    }

    /// Clear both accepted versions, then store whichever `record` carries.
    ///
    /// Stores that can apply the pair atomically should override this; the
    /// default issues the removals and writes one by one.
    fn replace_acceptance(&self, record: &UserAcceptanceRecord) -> GateResult<()> {
        self.remove_attribute(ATTR_AGREED_TOS)?;
        self.remove_attribute(ATTR_AGREED_PRIVACY)?;
        if let Some(tos) = &record.accepted_tos_version {
            self.set_single_attribute(ATTR_AGREED_TOS, tos)?;
        }
        if let Some(privacy) = &record.accepted_privacy_version {
            self.set_single_attribute(ATTR_AGREED_PRIVACY, privacy)?;
        }
        Ok(())
    }
}

/// One required-action interaction, as seen by the provider.
///
/// Notes are scoped to the interaction (the host's authentication session)
/// and are how data flows from trigger evaluation to the challenge.
pub trait RequiredActionContext {
    /// The authenticated user of this interaction.
    fn user(&self) -> &dyn UserHandle;

    /// The decoded form fields of the current request.
    fn form_parameters(&self) -> FormSubmission;

    fn note(&self, key: &str) -> Option<String>;

    fn set_note(&mut self, key: &str, value: String);

    fn remove_note(&mut self, key: &str);

    /// Hand a form to the host's renderer and wait for the user.
    fn challenge(&mut self, form: ChallengeForm);

    /// The required action is satisfied for this interaction.
    fn success(&mut self);

    /// The interaction failed. No policy detail is passed to the user.
    fn failure(&mut self);
}

/// The lifecycle the host drives for a required action.
///
/// Construction plays the role of `init`. An `Err` from any hook is a fault
/// the host should treat as unhandled (misdeployment, broken store);
/// recoverable conditions are reported through `RequiredActionContext`.
pub trait RequiredActionProvider: Send + Sync {
    fn id(&self) -> &'static str;

    fn display_text(&self) -> &'static str;

    /// Decide whether the current user must pass the gate.
    fn evaluate_triggers(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()>;

    /// Present the accept/cancel prompt.
    fn required_action_challenge(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()>;

    /// Handle the user's submitted response.
    fn process_action(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()>;

    fn close(&self);
}
