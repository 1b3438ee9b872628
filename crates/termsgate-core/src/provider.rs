//! `RequiredActionProvider` adapter over `RequiredActionController`.
//!
//! Maps controller results onto the host's interaction signals:
//!
//! | hook                        | result                         | host sees          |
//! |-----------------------------|--------------------------------|--------------------|
//! | `evaluate_triggers`         | `Triggered`                    | note stored        |
//! | `evaluate_triggers`         | `Satisfied`                    | nothing            |
//! | `evaluate_triggers`         | `Err(Fetch)`                   | `failure()`        |
//! | `required_action_challenge` | form                           | `challenge(form)`  |
//! | `required_action_challenge` | `Err(Fetch)`                   | `failure()`        |
//! | `process_action`            | `Accepted` / `CancelledToDeletion` | `success()`    |
//!
//! Any other error is returned to the host as a fault.

use std::sync::Arc;

use tracing::{debug, info, warn};

use termsgate_contracts::{
    challenge::ActionOutcome,
    config::GateConfig,
    error::{GateError, GateResult},
    policy::{FetchedDescriptor, PolicyDescriptor},
    user::{DISPLAY_TEXT, PROVIDER_ID},
};

use crate::{
    challenge::build_challenge,
    controller::{Evaluation, RequiredActionController},
    fetcher::PolicyDescriptorFetcher,
    traits::{HttpFetcher, RequiredActionContext, RequiredActionProvider},
};

/// Interaction note carrying the descriptor from evaluation to challenge.
pub const DESCRIPTOR_NOTE: &str = "termsgate.latest_descriptor";

/// The terms gate as a host-pluggable required action.
pub struct TermsGateProvider {
    controller: RequiredActionController,
}

impl TermsGateProvider {
    /// Validate `config` and build the provider.
    ///
    /// The URL template is dry-run here so a misdeployed template stops the
    /// provider from starting instead of failing users one by one.
    ///
    /// # Errors
    ///
    /// `GateError::Config` if either value is empty or the template cannot
    /// be applied.
    pub fn init(config: GateConfig, http: Box<dyn HttpFetcher>) -> GateResult<Self> {
        debug!("initializing external terms and conditions required action");

        config.validate()?;
        build_challenge(
            &config.policy_url_template,
            &PolicyDescriptor::new("latest", "latest"),
        )
        .map_err(|e| GateError::Config {
            reason: format!("policy_url_template is unusable: {}", e),
        })?;

        info!(
            descriptor_url = %config.descriptor_url,
            policy_url_template = %config.policy_url_template,
            "terms gate initialized"
        );

        Ok(Self {
            controller: RequiredActionController::new(
                Arc::new(config),
                PolicyDescriptorFetcher::new(http),
            ),
        })
    }

    pub fn controller(&self) -> &RequiredActionController {
        &self.controller
    }

    fn carried_descriptor(ctx: &dyn RequiredActionContext) -> Option<FetchedDescriptor> {
        let raw = ctx.note(DESCRIPTOR_NOTE)?;
        match serde_json::from_str(&raw) {
            Ok(fetched) => Some(fetched),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable descriptor note");
                None
            }
        }
    }
}

impl RequiredActionProvider for TermsGateProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn display_text(&self) -> &'static str {
        DISPLAY_TEXT
    }

    fn evaluate_triggers(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()> {
        let evaluation = self.controller.evaluate(ctx.user());
        match evaluation {
            Ok(Evaluation::Triggered { fetched }) => {
                let note = serde_json::to_string(&fetched).map_err(|e| GateError::Store {
                    reason: format!("failed to encode descriptor note: {}", e),
                })?;
                ctx.set_note(DESCRIPTOR_NOTE, note);
                Ok(())
            }
            Ok(Evaluation::Satisfied) => {
                ctx.remove_note(DESCRIPTOR_NOTE);
                Ok(())
            }
            Err(GateError::Fetch { .. }) => {
                ctx.remove_note(DESCRIPTOR_NOTE);
                ctx.failure();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn required_action_challenge(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()> {
        let carried = Self::carried_descriptor(&*ctx);
        let challenge = self.controller.challenge(ctx.user(), carried);
        match challenge {
            Ok(form) => {
                ctx.challenge(form);
                Ok(())
            }
            Err(GateError::Fetch { reason }) => {
                warn!(reason = %reason, "cannot present policy challenge");
                ctx.failure();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn process_action(&self, ctx: &mut dyn RequiredActionContext) -> GateResult<()> {
        let submission = ctx.form_parameters();
        let outcome = self.controller.process(ctx.user(), &submission)?;

        match outcome {
            ActionOutcome::Accepted { .. } => debug!("policy acceptance recorded"),
            ActionOutcome::CancelledToDeletion => debug!("redirecting to account deletion"),
        }

        ctx.remove_note(DESCRIPTOR_NOTE);
        ctx.success();
        Ok(())
    }

    fn close(&self) {}
}
