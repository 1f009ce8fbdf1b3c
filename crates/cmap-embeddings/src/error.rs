//! Embedding error types.

use cmap_core::errors::ProviderError;

/// Errors that can occur during embedding generation.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// Model initialization failed (download, ONNX runtime, cache issues).
    #[error("Model initialization failed: {0}")]
    InitFailed(String),

    /// Embedding generation failed (inference error, worker panic).
    #[error("Embedding generation failed: {0}")]
    EmbedFailed(String),

    /// Model returned zero embeddings for a non-empty input.
    #[error("Empty result from embedding model")]
    EmptyResult,

    /// Input was empty or whitespace-only; the model is never called for it.
    #[error("Cannot embed empty text")]
    EmptyInput,
}

impl From<EmbeddingError> for ProviderError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::EmptyInput => Self::InvalidInput(err.to_string()),
            EmbeddingError::InitFailed(_) => Self::Unavailable(err.to_string()),
            EmbeddingError::EmbedFailed(_) | EmbeddingError::EmptyResult => {
                Self::MalformedResponse(err.to_string())
            }
        }
    }
}
