//! [`EmbeddingProvider`] backed by the local fastembed engine.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use cmap_core::collaborators::{EmbeddingProvider, is_placeholder_text};
use cmap_core::errors::ProviderError;

use crate::EmbeddingEngine;
use crate::error::EmbeddingError;

/// Decide whether `text` goes to the model.
///
/// # Errors
///
/// [`EmbeddingError::EmptyInput`] for empty or whitespace-only text. Placeholder text
/// returns `Ok(false)`: it embeds to an empty vector without touching the model.
pub fn should_embed(text: &str) -> Result<bool, EmbeddingError> {
    if text.trim().is_empty() {
        return Err(EmbeddingError::EmptyInput);
    }
    Ok(!is_placeholder_text(text))
}

/// Shared, async-friendly handle on an [`EmbeddingEngine`].
#[derive(Clone)]
pub struct LocalEmbedder {
    engine: Arc<Mutex<EmbeddingEngine>>,
}

impl LocalEmbedder {
    #[must_use]
    pub fn new(engine: EmbeddingEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Embed `text` on the blocking pool.
    ///
    /// # Errors
    ///
    /// See [`should_embed`]; inference failures surface as
    /// [`EmbeddingError::EmbedFailed`].
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if !should_embed(text)? {
            tracing::debug!("placeholder text, skipping embedding");
            return Ok(Vec::new());
        }

        let engine = Arc::clone(&self.engine);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            engine
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .embed_single(&text)
        })
        .await
        .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))?
    }
}

impl std::fmt::Debug for LocalEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEmbedder")
            .field("dimension", &EmbeddingEngine::dimension())
            .finish()
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.embed_text(text).await?)
    }
}
