//! In-memory brute-force vector index.
//!
//! Vectors are grouped by corpus key (one corpus per curriculum, typically). Search
//! scans every vector of the corpus and ranks by cosine similarity. Curricula hold
//! tens of courses, so a scan is cheaper than any approximate structure.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use cmap_core::collaborators::{EmbeddingProvider, ScoredId, VectorSearch};
use cmap_core::errors::ProviderError;

/// Cosine similarity of two vectors; 0 when either is zero or their lengths differ.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    vector: Vec<f32>,
}

#[derive(Debug, Default)]
pub struct VectorIndex {
    corpora: RwLock<HashMap<String, Vec<Entry>>>,
}

impl VectorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the vector stored under `id` in `corpus_key`.
    pub fn insert(&self, corpus_key: &str, id: impl Into<String>, vector: Vec<f32>) {
        let id = id.into();
        let mut corpora = self.corpora.write().unwrap_or_else(PoisonError::into_inner);
        let corpus = corpora.entry(corpus_key.to_string()).or_default();
        match corpus.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.vector = vector,
            None => corpus.push(Entry { id, vector }),
        }
    }

    /// Number of vectors in a corpus.
    #[must_use]
    pub fn len(&self, corpus_key: &str) -> usize {
        self.corpora
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(corpus_key)
            .map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self, corpus_key: &str) -> bool {
        self.len(corpus_key) == 0
    }

    /// Embed `(id, text)` pairs with `provider` and add them to `corpus_key`.
    ///
    /// Texts the provider answers with an empty vector (placeholders) are skipped.
    /// Returns the number of vectors stored.
    ///
    /// # Errors
    ///
    /// The first provider failure aborts indexing; vectors stored before it remain.
    pub async fn index_texts(
        &self,
        provider: &dyn EmbeddingProvider,
        corpus_key: &str,
        items: &[(String, String)],
    ) -> Result<usize, ProviderError> {
        let mut stored = 0;
        for (id, text) in items {
            let vector = provider.embed(text).await?;
            if vector.is_empty() {
                continue;
            }
            self.insert(corpus_key, id.clone(), vector);
            stored += 1;
        }
        tracing::debug!(corpus_key, stored, "indexed corpus");
        Ok(stored)
    }

    /// Rank every vector in `corpus_key` against `query`, best first.
    #[must_use]
    pub fn rank(&self, query: &[f32], corpus_key: &str, limit: usize) -> Vec<ScoredId> {
        let corpora = self.corpora.read().unwrap_or_else(PoisonError::into_inner);
        let Some(corpus) = corpora.get(corpus_key) else {
            return Vec::new();
        };

        let mut hits: Vec<ScoredId> = corpus
            .iter()
            .map(|e| ScoredId {
                id: e.id.clone(),
                score: cosine_similarity(query, &e.vector),
            })
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);
        hits
    }
}

#[async_trait]
impl VectorSearch for VectorIndex {
    async fn search(
        &self,
        query: &[f32],
        corpus_key: &str,
        limit: usize,
    ) -> Result<Vec<ScoredId>, ProviderError> {
        Ok(self.rank(query, corpus_key, limit))
    }
}
