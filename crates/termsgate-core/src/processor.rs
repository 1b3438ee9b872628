//! Submission processing.
//!
//! Interprets the accept/cancel form and rewrites the user's acceptance
//! record. The previous record is always cleared first, whatever the
//! submission says, so a confused earlier state never survives into the new
//! decision.
//!
//! Accepted versions are taken verbatim from the submission (the values the
//! challenge echoed into the form). They are not checked against the latest
//! descriptor: a wrong value only makes the next comparison fail, which
//! re-triggers the gate.

use tracing::{debug, info};

use termsgate_contracts::{
    challenge::{ActionOutcome, FormSubmission},
    error::GateResult,
    policy::UserAcceptanceRecord,
    user::{ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS, DELETE_ACCOUNT_ACTION},
};

use crate::traits::UserHandle;

/// Apply the user's submission.
///
/// - `cancel` present (any value): the record stays cleared, account
///   deletion is queued, and `CancelledToDeletion` is returned.
/// - otherwise: `agreed_tos` / `agreed_privacy` are stored as submitted.
///   Missing fields are stored as absent, never as an error.
///
/// # Errors
///
/// Only identity store failures.
pub fn apply(submission: &FormSubmission, user: &dyn UserHandle) -> GateResult<ActionOutcome> {
    if submission.is_cancel() {
        user.replace_acceptance(&UserAcceptanceRecord::empty())?;
        user.add_required_action(DELETE_ACCOUNT_ACTION)?;

        info!(user_id = %user.id(), "user declined policies, account deletion queued");
        return Ok(ActionOutcome::CancelledToDeletion);
    }

    let record = UserAcceptanceRecord {
        accepted_tos_version: submission.first(ATTR_AGREED_TOS).map(str::to_string),
        accepted_privacy_version: submission.first(ATTR_AGREED_PRIVACY).map(str::to_string),
    };

    debug!(
        user_id = %user.id(),
        accepted_tos = ?record.accepted_tos_version,
        accepted_privacy = ?record.accepted_privacy_version,
        "user accepted policies"
    );

    user.replace_acceptance(&record)?;

    Ok(ActionOutcome::Accepted { record })
}
