//! # cmap-embeddings
//!
//! Local embedding generation for coursemap using fastembed (ONNX runtime), plus an
//! in-memory vector index for ranking reference courses against a query vector.
//!
//! Generates 384-dimensional vectors for course descriptions and titles without
//! requiring any external API keys.
//!
//! ## Model
//!
//! Uses [`AllMiniLML6V2`](fastembed::EmbeddingModel::AllMiniLML6V2) (sentence-transformers/all-MiniLM-L6-v2):
//! - 384-dimensional output vectors
//! - Mean pooling (no query/passage prefix needed)
//! - ~80MB model size, cached at `~/.coursemap/cache/fastembed/` unless
//!   `[embeddings] cache_dir` overrides it
//!
//! ## Async usage
//!
//! The fastembed ONNX runtime is synchronous. [`LocalEmbedder`] wraps the engine
//! and runs inference on [`tokio::task::spawn_blocking`], implementing the
//! [`EmbeddingProvider`](cmap_core::collaborators::EmbeddingProvider) contract.

pub mod error;
pub mod index;
pub mod provider;

use std::path::PathBuf;

use cmap_config::EmbeddingsConfig;
pub use error::EmbeddingError;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
pub use index::{VectorIndex, cosine_similarity};
pub use provider::LocalEmbedder;

/// Local embedding engine backed by fastembed (ONNX runtime).
///
/// Wraps the `AllMiniLML6V2` model to produce 384-dimensional float vectors.
///
/// # Thread safety
///
/// [`TextEmbedding::embed`] requires `&mut self`. [`LocalEmbedder`] holds the
/// engine behind a `Mutex` for shared async use.
pub struct EmbeddingEngine {
    model: TextEmbedding,
}

impl EmbeddingEngine {
    /// Create an engine caching model files in the default directory.
    ///
    /// Downloads the model on first run (~80MB) to `~/.coursemap/cache/fastembed/`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX initialization fails.
    pub fn new() -> Result<Self, EmbeddingError> {
        Self::with_cache_dir(default_cache_dir())
    }

    /// Create an engine honouring the `[embeddings]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &EmbeddingsConfig) -> Result<Self, EmbeddingError> {
        let cache_dir = config
            .cache_dir
            .as_ref()
            .map_or_else(default_cache_dir, PathBuf::from);
        Self::with_cache_dir(cache_dir)
    }

    /// Create an engine caching model files under `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX initialization fails.
    pub fn with_cache_dir(cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        tracing::debug!(cache_dir = %cache_dir.display(), "initializing embedding model");
        let model = TextEmbedding::try_new(
            TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self { model })
    }

    /// Embed a batch of texts. Returns one 384-dim vector per input.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if the ONNX inference fails.
    pub fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))
    }

    /// Embed a single text. Returns a 384-dim vector.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails, or
    /// [`EmbeddingError::EmptyResult`] if the model returns no embeddings.
    pub fn embed_single(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut results = self.embed_batch(vec![text.to_string()])?;
        results.pop().ok_or(EmbeddingError::EmptyResult)
    }

    /// Embedding vector dimensionality (always 384 for `AllMiniLML6V2`).
    #[must_use]
    pub const fn dimension() -> usize {
        384
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir().map_or_else(
        || PathBuf::from(".fastembed_cache"),
        |h| h.join(".coursemap").join("cache").join("fastembed"),
    )
}
