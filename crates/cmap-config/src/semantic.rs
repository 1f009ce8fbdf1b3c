//! Similarity engine batching and prefilter settings.

use serde::{Deserialize, Serialize};

const fn default_batch_size() -> usize {
    10
}

const fn default_batch_delay_ms() -> u64 {
    100
}

const fn default_top_k() -> usize {
    5
}

const fn default_tfidf_prefilter() -> f64 {
    0.05
}

const fn default_vector_prefilter() -> f64 {
    0.4
}

const fn default_vector_search_limit() -> usize {
    10
}

const fn default_single_document_min_score() -> f64 {
    0.4
}

const fn default_dual_document_min_score() -> f64 {
    0.25
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SemanticConfig {
    /// Semantic judge calls issued concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Candidates per source kept after the cheap prefilter.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default = "default_tfidf_prefilter")]
    pub tfidf_prefilter: f64,

    #[serde(default = "default_vector_prefilter")]
    pub vector_prefilter: f64,

    #[serde(default = "default_vector_search_limit")]
    pub vector_search_limit: usize,

    /// Minimum fused score for single-document matching.
    #[serde(default = "default_single_document_min_score")]
    pub single_document_min_score: f64,

    /// Minimum fused score for dual-document matching.
    #[serde(default = "default_dual_document_min_score")]
    pub dual_document_min_score: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            top_k: default_top_k(),
            tfidf_prefilter: default_tfidf_prefilter(),
            vector_prefilter: default_vector_prefilter(),
            vector_search_limit: default_vector_search_limit(),
            single_document_min_score: default_single_document_min_score(),
            dual_document_min_score: default_dual_document_min_score(),
        }
    }
}
