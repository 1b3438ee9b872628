//! Challenge construction.
//!
//! Resolves the two human-facing policy URLs from the configured template
//! and pairs them with the raw version identifiers the form echoes back.

use termsgate_contracts::{
    challenge::ChallengeContext,
    error::GateResult,
    policy::{PolicyDescriptor, PolicyKind},
};

use crate::template::PolicyUrlTemplate;

/// Resolve the URL of one policy document.
pub fn policy_url(template: &PolicyUrlTemplate, kind: PolicyKind, version: &str) -> GateResult<String> {
    template.render(&[kind.token(), version])
}

/// Build the challenge view-model for `descriptor`.
///
/// Both URLs are resolved before anything is returned, so a challenge never
/// carries one link without the other. A malformed template surfaces as
/// `GateError::Formatting`.
pub fn build_challenge(template: &str, descriptor: &PolicyDescriptor) -> GateResult<ChallengeContext> {
    let template = PolicyUrlTemplate::parse(template)?;

    let url = |kind: PolicyKind| policy_url(&template, kind, descriptor.version(kind));
    let tos_url = url(PolicyKind::Tos)?;
    let privacy_url = url(PolicyKind::Privacy)?;

    Ok(ChallengeContext {
        tos_url,
        privacy_url,
        tos_version: descriptor.tos_version.clone(),
        privacy_version: descriptor.privacy_version.clone(),
    })
}
