//! Error types for the terms gate.
//!
//! All fallible operations return `GateResult<T>`. Variants carry a plain
//! reason string; nothing policy-specific is meant to be shown to end users.

use thiserror::Error;

/// The unified error type for the terms gate.
#[derive(Debug, Error)]
pub enum GateError {
    /// A required configuration value is missing, empty, or unusable.
    ///
    /// Raised at provider initialization. A provider that fails here never
    /// becomes usable.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The latest-policy descriptor could not be retrieved or decoded.
    ///
    /// Recoverable per interaction: the interaction fails, nothing is
    /// persisted, and the user may retry later.
    #[error("policy descriptor fetch failed: {reason}")]
    Fetch { reason: String },

    /// The policy URL template could not be applied.
    ///
    /// Indicates a misdeployed template rather than anything a user did.
    #[error("policy url formatting failed: {reason}")]
    Formatting { reason: String },

    /// The identity store rejected a read or write.
    #[error("identity store error: {reason}")]
    Store { reason: String },
}

/// Convenience alias used throughout the terms gate crates.
pub type GateResult<T> = Result<T, GateError>;
