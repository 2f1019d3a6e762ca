//! Error types for orion-bot.
//!
//! The pipeline itself is total (every message produces a well-formed
//! response), so there is no top-level pipeline error. The enums here cover
//! the two fallible collaborators: the lookup service and the notifier.
//! Strategies convert `LookupError` variants into structured user-facing
//! results instead of propagating them.

/// Errors from the external inventory/logistics lookup service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("No record found for {id}")]
    NotFound { id: String },

    #[error("Lookup for {id} timed out")]
    Timeout { id: String },

    #[error("Connection to lookup service failed: {0}")]
    Connection(String),

    #[error("Lookup service returned HTTP {status}")]
    Http { status: u16 },

    #[error("Invalid response from lookup service: {0}")]
    InvalidResponse(String),
}

/// Escalation notification delivery errors. Logged, never propagated past
/// the notifier boundary.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}
