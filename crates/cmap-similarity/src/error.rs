//! Similarity error types.

/// Errors from hybrid ranking. Per-pair collaborator failures are not errors: they
/// score 0 and are logged.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    /// Single-document ranking needs an embedding provider and a vector search.
    #[error("single-document ranking requires a {0}")]
    MissingCollaborator(&'static str),
}
