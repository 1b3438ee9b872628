//! Live check against a real descriptor endpoint.

use std::path::PathBuf;
use std::time::Duration;

use termsgate_config::env::process_env;
use termsgate_contracts::{
    error::GateResult,
    policy::UserAcceptanceRecord,
};
use termsgate_core::{traits::UserHandle, Evaluation, TermsGateProvider};
use termsgate_host::InMemoryUserStore;

use crate::http::UreqFetcher;

pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub timeout: Duration,
    pub accepted_tos: Option<String>,
    pub accepted_privacy: Option<String>,
}

/// Fetch the published descriptor and say whether a user with the given
/// record would be gated.
pub fn run(args: CheckArgs) -> GateResult<()> {
    let config = termsgate_config::load(args.config.as_deref(), process_env)?;
    println!("descriptor url: {}", config.descriptor_url);

    let provider = TermsGateProvider::init(config, Box::new(UreqFetcher::new(args.timeout)))?;

    let store = InMemoryUserStore::new();
    let id = store.create_user("check")?;
    let user = store.user(&id)?;
    user.replace_acceptance(&UserAcceptanceRecord {
        accepted_tos_version: args.accepted_tos,
        accepted_privacy_version: args.accepted_privacy,
    })?;

    match provider.controller().evaluate(&user)? {
        Evaluation::Satisfied => println!("record is current, no action required"),
        Evaluation::Triggered { fetched } => {
            println!(
                "record is stale: published tos={} privacy={}",
                fetched.descriptor.tos_version, fetched.descriptor.privacy_version
            );
            let form = provider.controller().challenge(&user, Some(fetched))?;
            for (name, value) in &form.attributes {
                println!("  {:<14} {}", name, value);
            }
        }
    }
    Ok(())
}
