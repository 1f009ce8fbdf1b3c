//! Matching error types.

use cmap_core::errors::ProviderError;

/// Structural matching failures. Rejected courses are results, not errors.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The curriculum source could not be read.
    #[error("curriculum source failed: {0}")]
    Catalog(#[source] ProviderError),
}
