//! Run-scoped memoization for the similarity engine.
//!
//! One [`SimilarityCache`] is created per matching run (or shared explicitly between
//! runs) and passed to the engine. Entries are keyed by content hash and never mutated
//! after insertion; [`SimilarityCache::reset`] drops everything, including the IDF table.
//! Locks are never held across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cmap_core::collaborators::{EmbeddingProvider, SemanticJudge};
use cmap_core::errors::ProviderError;
use cmap_core::text::{content_hash, pair_key};

use crate::tfidf::{IdfTable, TfidfVector};

#[derive(Debug, Default)]
pub struct SimilarityCache {
    embeddings: Mutex<HashMap<u64, Arc<Vec<f32>>>>,
    judgments: Mutex<HashMap<(u64, u64), f64>>,
    tfidf: Mutex<HashMap<u64, Arc<TfidfVector>>>,
    idf: Mutex<Option<Arc<IdfTable>>>,
}

/// Entry counts, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub embeddings: usize,
    pub judgments: usize,
    pub tfidf_vectors: usize,
    pub has_idf: bool,
}

impl SimilarityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The IDF table, built by `build` on first use.
    pub fn idf_or_init(&self, build: impl FnOnce() -> IdfTable) -> Arc<IdfTable> {
        let mut slot = self.idf.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| {
            let table = build();
            tracing::debug!(documents = table.documents(), "built idf table");
            Arc::new(table)
        }))
    }

    /// TF-IDF vector of `text` under `idf`, memoized by content hash.
    pub fn tfidf_vector(&self, text: &str, idf: &IdfTable) -> Arc<TfidfVector> {
        let key = content_hash(text);
        let mut vectors = self.tfidf.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            vectors
                .entry(key)
                .or_insert_with(|| Arc::new(idf.weigh(text))),
        )
    }

    /// Embedding of `text`, asking `provider` only on a miss. Failures are not cached.
    ///
    /// # Errors
    ///
    /// Whatever the provider reports.
    pub async fn embedding(
        &self,
        text: &str,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Arc<Vec<f32>>, ProviderError> {
        let key = content_hash(text);
        if let Some(hit) = self.lock_embeddings().get(&key) {
            return Ok(Arc::clone(hit));
        }
        let vector = Arc::new(provider.embed(text).await?);
        self.lock_embeddings().insert(key, Arc::clone(&vector));
        Ok(vector)
    }

    /// Judged similarity of `(a, b)`, asking `judge` only on a miss. Failures are not cached.
    ///
    /// # Errors
    ///
    /// Whatever the judge reports.
    pub async fn judgment(
        &self,
        a: &str,
        b: &str,
        judge: &dyn SemanticJudge,
    ) -> Result<f64, ProviderError> {
        let key = pair_key(a, b);
        if let Some(hit) = self.lock_judgments().get(&key) {
            return Ok(*hit);
        }
        let score = judge.judge_similarity(a, b).await?;
        self.lock_judgments().insert(key, score);
        Ok(score)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            embeddings: self.lock_embeddings().len(),
            judgments: self.lock_judgments().len(),
            tfidf_vectors: self
                .tfidf
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            has_idf: self
                .idf
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some(),
        }
    }

    /// Drop every entry. The next ranking call rebuilds the IDF table from its corpus.
    pub fn reset(&self) {
        self.lock_embeddings().clear();
        self.lock_judgments().clear();
        self.tfidf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        *self.idf.lock().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("similarity cache reset");
    }

    fn lock_embeddings(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<Vec<f32>>>> {
        self.embeddings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_judgments(&self) -> std::sync::MutexGuard<'_, HashMap<(u64, u64), f64>> {
        self.judgments.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
