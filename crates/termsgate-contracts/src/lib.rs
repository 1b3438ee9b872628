//! # termsgate-contracts
//!
//! Shared types, names, and error contracts for the terms gate.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod challenge;
pub mod config;
pub mod error;
pub mod policy;
pub mod user;
