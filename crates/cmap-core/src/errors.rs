//! Cross-cutting error types for coursemap.
//!
//! Domain-specific errors (e.g., `ExtractError`, `LlmError`) are defined in their
//! respective crates. [`ProviderError`] is the single error type returned by the
//! collaborator traits in [`crate::collaborators`], so the similarity engine and the
//! matcher can recover from any provider the same way.

use thiserror::Error;

/// Errors that can be raised by any coursemap crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure reported by an external collaborator (embedding, judge, search, catalog, AI).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The collaborator refused the input before calling out (e.g., empty text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The collaborator is not configured or could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered but the payload could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Upstream rate limit; the caller's orchestration owns any retry.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
