//! LLM client error types.

use cmap_core::errors::ProviderError;
use thiserror::Error;

/// Errors that can occur when talking to the chat-completion or embedding service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response body or the model's answer could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model answered with no content.
    #[error("empty response from model")]
    EmptyResponse,

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Endpoint or API key missing from the `[llm]` config section.
    #[error("LLM client not configured: set llm.endpoint and llm.api_key")]
    NotConfigured,

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<LlmError> for ProviderError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
            LlmError::InvalidInput(message) => Self::InvalidInput(message),
            LlmError::Parse(_) | LlmError::EmptyResponse => Self::MalformedResponse(err.to_string()),
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::NotConfigured => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_survives_conversion() {
        let err: ProviderError = LlmError::RateLimited {
            retry_after_secs: 12,
        }
        .into();
        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after_secs: 12
            }
        ));
    }

    #[test]
    fn api_errors_are_unavailable() {
        let err: ProviderError = LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        }
        .into();
        assert!(err.to_string().contains("503"));
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
