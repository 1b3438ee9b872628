//! # termsgate-host
//!
//! An in-memory reference host for the terms gate.
//!
//! The gate only talks to its host through the traits in
//! `termsgate_core::traits`. This crate supplies a small implementation of
//! each so the gate can be driven end to end without an identity server:
//!
//! - `InMemoryUserStore` / `StoredUser`: users, attributes, required actions
//! - `Interaction`: one authentication session with notes and form data
//! - `StaticDescriptorSource`: a descriptor endpoint that can be republished
//!   or taken offline
//! - `ReferenceHost`: the login loop around a `RequiredActionProvider`

pub mod host;
pub mod interaction;
pub mod source;
pub mod store;

pub use host::{LoginStep, ReferenceHost};
pub use interaction::{Interaction, InteractionStatus};
pub use source::{RecordedRequest, StaticDescriptorSource};
pub use store::{InMemoryUserStore, StoredUser, UserEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
