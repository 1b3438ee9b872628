//! Terms gate demo CLI
//!
//! Usage:
//!   cargo run -p termsgate-demo -- walkthrough
//!   cargo run -p termsgate-demo -- check --config termsgate.toml
//!   cargo run -p termsgate-demo -- check --tos 2024-01 --privacy 2024-01

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check;
mod http;
mod walkthrough;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Policy-freshness gate demo.
#[derive(Parser)]
#[command(
    name = "termsgate-demo",
    about = "Terms-of-service and privacy policy required action demo",
    long_about = "Drives the external terms and conditions required action against an\n\
                  in-memory identity host, or checks a live descriptor endpoint."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scripted offline scenario: accept, policy update, decline, outage.
    Walkthrough,
    /// Fetch the configured descriptor and evaluate a user record against it.
    Check {
        /// TOML config file. Environment variables override its values.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Request timeout in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
        /// Previously accepted terms-of-service version.
        #[arg(long)]
        tos: Option<String>,
        /// Previously accepted privacy policy version.
        #[arg(long)]
        privacy: Option<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to watch the gate's decisions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::Walkthrough => walkthrough::run(),
        Command::Check {
            config,
            timeout,
            tos,
            privacy,
        } => check::run(check::CheckArgs {
            config,
            timeout: Duration::from_secs(timeout),
            accepted_tos: tos,
            accepted_privacy: privacy,
        }),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("External Terms and Conditions");
    println!("=============================");
    println!();
    println!("On every login:");
    println!("  [1] Fetch the latest {{tos, privacy}} descriptor (no cache)");
    println!("  [2] Compare with the user's agreed_tos / agreed_privacy");
    println!("  [3] Stale? Present terms.ftl with both policy links");
    println!("  [4] Accept stores the versions, cancel queues account deletion");
    println!();
}
