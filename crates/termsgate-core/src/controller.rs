//! The required-action controller: fetch → compare → challenge → process.
//!
//! Lifecycle of one gate pass:
//!
//! ```text
//!   IDLE → FETCHING ─┬─ fetch error ──────────────→ FAILED  (Err(Fetch))
//!                    ├─ record matches ───────────→ SATISFIED (Evaluation::Satisfied)
//!                    └─ record stale, flag set ───→ TRIGGERED (Evaluation::Triggered)
//!   TRIGGERED → CHALLENGING → AWAITING_SUBMISSION
//!   AWAITING_SUBMISSION ─┬─ accept → COMPLETED  (ActionOutcome::Accepted)
//!                        └─ cancel → REDIRECTED (ActionOutcome::CancelledToDeletion)
//! ```
//!
//! The controller holds no per-user state. The descriptor fetched while
//! evaluating travels to the challenge step as a `FetchedDescriptor` value;
//! the caller decides where to keep it in between.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use termsgate_contracts::{
    challenge::{ActionOutcome, ChallengeForm, FormSubmission},
    config::GateConfig,
    error::GateResult,
    policy::{FetchedDescriptor, PolicyDescriptor},
    user::PROVIDER_ID,
};

use crate::{
    challenge::build_challenge, comparator::needs_action, fetcher::PolicyDescriptorFetcher,
    processor, traits::UserHandle,
};

/// Result of a successful trigger evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The user has accepted the latest versions. No flag was set.
    Satisfied,

    /// The user's record is stale and the required action was added.
    Triggered {
        /// The descriptor the decision was based on, for the challenge.
        fetched: FetchedDescriptor,
    },
}

/// Orchestrates the gate's components for one user at a time.
///
/// Construct once at startup with the immutable config and share freely;
/// every method works only on its arguments.
pub struct RequiredActionController {
    config: Arc<GateConfig>,
    fetcher: PolicyDescriptorFetcher,
}

impl RequiredActionController {
    pub fn new(config: Arc<GateConfig>, fetcher: PolicyDescriptorFetcher) -> Self {
        Self { config, fetcher }
    }

    /// Fetch the latest descriptor and compare it with the user's record.
    ///
    /// Every call fetches; nothing is cached between evaluations. When the
    /// record is stale the provider's required action is added to the user.
    ///
    /// # Errors
    ///
    /// `GateError::Fetch` when the descriptor cannot be obtained. In that
    /// case no flag is set and nothing is written.
    pub fn evaluate(&self, user: &dyn UserHandle) -> GateResult<Evaluation> {
        let descriptor = match self.fetcher.fetch(&self.config.descriptor_url) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                error!(
                    user_id = %user.id(),
                    error = %e,
                    "failed to fetch latest policies"
                );
                return Err(e);
            }
        };

        let record = user.acceptance_record()?;

        debug!(
            user_id = %user.id(),
            accepted_tos = ?record.accepted_tos_version,
            latest_tos = %descriptor.tos_version,
            accepted_privacy = ?record.accepted_privacy_version,
            latest_privacy = %descriptor.privacy_version,
            "comparing accepted policies with latest"
        );

        if !needs_action(&descriptor, &record) {
            debug!(user_id = %user.id(), "user has already accepted the latest policies");
            return Ok(Evaluation::Satisfied);
        }

        user.add_required_action(PROVIDER_ID)?;
        info!(user_id = %user.id(), "user has not accepted the latest policies, required action set");

        Ok(Evaluation::Triggered {
            fetched: FetchedDescriptor::new(user.id().clone(), descriptor),
        })
    }

    /// Build the accept/cancel form for `user`.
    ///
    /// Uses `fetched` when it was produced for this same user. Otherwise, as
    /// when the challenge runs in a later interaction than the evaluation,
    /// the descriptor is fetched again so a stale or foreign one is never
    /// shown.
    ///
    /// # Errors
    ///
    /// `GateError::Fetch` if a fresh fetch was needed and failed;
    /// `GateError::Formatting` if the URL template is malformed.
    pub fn challenge(
        &self,
        user: &dyn UserHandle,
        fetched: Option<FetchedDescriptor>,
    ) -> GateResult<ChallengeForm> {
        let descriptor = self.descriptor_for(user, fetched)?;
        let context = build_challenge(&self.config.policy_url_template, &descriptor)?;

        debug!(
            user_id = %user.id(),
            tos_url = %context.tos_url,
            privacy_url = %context.privacy_url,
            "policy challenge built"
        );

        Ok(context.into_form(user.username()))
    }

    /// Apply the user's submission.
    pub fn process(
        &self,
        user: &dyn UserHandle,
        submission: &FormSubmission,
    ) -> GateResult<ActionOutcome> {
        processor::apply(submission, user)
    }

    fn descriptor_for(
        &self,
        user: &dyn UserHandle,
        fetched: Option<FetchedDescriptor>,
    ) -> GateResult<PolicyDescriptor> {
        match fetched {
            Some(fetched) if &fetched.user_id == user.id() => {
                debug!(
                    user_id = %user.id(),
                    fetched_at = %fetched.fetched_at,
                    "using descriptor from trigger evaluation"
                );
                Ok(fetched.descriptor)
            }
            Some(fetched) => {
                warn!(
                    user_id = %user.id(),
                    other_user_id = %fetched.user_id,
                    "discarding descriptor fetched for another user"
                );
                self.fetcher.fetch(&self.config.descriptor_url)
            }
            None => {
                debug!(user_id = %user.id(), "no descriptor from this interaction, fetching");
                self.fetcher.fetch(&self.config.descriptor_url)
            }
        }
    }
}
