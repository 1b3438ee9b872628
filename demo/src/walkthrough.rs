//! Offline walkthrough: one provider, one in-memory host, a descriptor
//! endpoint the script republishes and takes down.

use tracing::info;

use termsgate_contracts::{
    challenge::{FormSubmission, FORM_CANCEL, FORM_PRIVACY_URL, FORM_TOS_URL},
    config::GateConfig,
    error::GateResult,
    user::{UserId, ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS},
};
use termsgate_core::TermsGateProvider;
use termsgate_host::{InMemoryUserStore, LoginStep, ReferenceHost, StaticDescriptorSource};

const DESCRIPTOR_URL: &str = "https://example.com/policy/latest.json";
const TEMPLATE: &str = "https://example.com/policy/%1$s/%1$s.%2$s.html";

pub fn run() -> GateResult<()> {
    let source = StaticDescriptorSource::serving("2024-01", "2024-01");
    let config = GateConfig::new(DESCRIPTOR_URL, TEMPLATE)?;
    let provider = TermsGateProvider::init(config, Box::new(source.clone()))?;
    let host = ReferenceHost::new(InMemoryUserStore::new(), Box::new(provider));

    let alice = host.store().create_user("alice")?;
    let bob = host.store().create_user("bob")?;

    section("1. alice logs in for the first time (published tos=2024-01 privacy=2024-01)");
    accept_latest(&host, &alice)?;
    login(&host, &alice)?;

    section("2. privacy policy moves to 2024-06");
    source.publish("2024-01", "2024-06");
    accept_latest(&host, &alice)?;

    section("3. bob declines");
    let mut interaction = host.begin(&bob)?;
    report(&host.login(&mut interaction)?);
    let step = host.submit(&mut interaction, FormSubmission::new().with_field(FORM_CANCEL, ""))?;
    report(&step);
    print_user(&host, &bob);

    section("4. descriptor endpoint goes down");
    source.go_offline("connection refused");
    login(&host, &alice)?;

    info!(requests = source.requests().len(), "walkthrough finished");
    Ok(())
}

/// Log in and, if challenged, accept whatever the form offers.
fn accept_latest(host: &ReferenceHost, id: &UserId) -> GateResult<()> {
    let mut interaction = host.begin(id)?;
    let step = host.login(&mut interaction)?;
    report(&step);

    if let LoginStep::Challenge { form } = step {
        let answer = FormSubmission::new()
            .with_field(ATTR_AGREED_TOS, form.attribute(ATTR_AGREED_TOS).unwrap_or_default())
            .with_field(
                ATTR_AGREED_PRIVACY,
                form.attribute(ATTR_AGREED_PRIVACY).unwrap_or_default(),
            );
        report(&host.submit(&mut interaction, answer)?);
    }
    print_user(host, id);
    Ok(())
}

fn login(host: &ReferenceHost, id: &UserId) -> GateResult<()> {
    let mut interaction = host.begin(id)?;
    report(&host.login(&mut interaction)?);
    Ok(())
}

fn report(step: &LoginStep) {
    match step {
        LoginStep::Complete => println!("  -> login complete"),
        LoginStep::Challenge { form } => {
            println!("  -> challenge '{}'", form.template);
            for name in [FORM_TOS_URL, FORM_PRIVACY_URL, ATTR_AGREED_TOS, ATTR_AGREED_PRIVACY] {
                println!("       {:<14} {}", name, form.attribute(name).unwrap_or("-"));
            }
        }
        LoginStep::Redirected { next_action } => println!("  -> redirected to '{}'", next_action),
        LoginStep::Failed => println!("  -> login failed"),
    }
}

fn print_user(host: &ReferenceHost, id: &UserId) {
    if let Some(entry) = host.store().snapshot(id) {
        println!(
            "     {}: attributes={:?} pending={:?}",
            entry.username, entry.attributes, entry.required_actions
        );
    }
}

fn section(title: &str) {
    println!();
    println!("{}", title);
}
