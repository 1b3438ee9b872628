//! # termsgate-core
//!
//! A required action that keeps users' policy acceptance fresh: before a
//! session may proceed, the user must have accepted the currently published
//! terms-of-service and privacy policy versions.
//!
//! This crate provides:
//! - The host-facing traits (`HttpFetcher`, `UserHandle`,
//!   `RequiredActionContext`, `RequiredActionProvider`)
//! - The gate components: descriptor fetcher, acceptance comparator,
//!   challenge builder, submission processor
//! - `RequiredActionController`, which wires them together, and
//!   `TermsGateProvider`, the lifecycle adapter the host plugs in
//!
//! ## Usage
//!
//! ```rust,ignore
//! use termsgate_core::{TermsGateProvider, traits::RequiredActionProvider};
//!
//! let provider = TermsGateProvider::init(config, Box::new(my_http_client))?;
//! provider.evaluate_triggers(&mut interaction)?;
//! ```

pub mod challenge;
pub mod comparator;
pub mod controller;
pub mod fetcher;
pub mod processor;
pub mod provider;
pub mod template;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{Evaluation, RequiredActionController};
pub use provider::TermsGateProvider;
