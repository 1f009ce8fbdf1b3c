//! Batched, cached calls to the semantic judge.

use std::time::Duration;

use cmap_core::collaborators::SemanticJudge;
use futures::future::join_all;

use crate::cache::SimilarityCache;

/// Scores `(a, b)` pairs with a [`SemanticJudge`].
///
/// Pairs are sent in batches of `batch_size`, each batch concurrently, with a fixed
/// pause between batches. A failed call scores 0 and never aborts the batch.
pub struct SemanticScorer<'a> {
    judge: &'a dyn SemanticJudge,
    cache: &'a SimilarityCache,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> SemanticScorer<'a> {
    #[must_use]
    pub fn new(
        judge: &'a dyn SemanticJudge,
        cache: &'a SimilarityCache,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self {
            judge,
            cache,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// One score per pair, in input order.
    pub async fn score_pairs(&self, pairs: &[(&str, &str)]) -> Vec<f64> {
        let mut scores = Vec::with_capacity(pairs.len());
        let batches = pairs.chunks(self.batch_size);
        let total = batches.len();

        for (i, batch) in batches.enumerate() {
            let results =
                join_all(batch.iter().map(|(a, b)| self.cache.judgment(a, b, self.judge))).await;

            scores.extend(results.into_iter().map(|result| {
                result.unwrap_or_else(|error| {
                    tracing::warn!(%error, "semantic judge failed, scoring 0");
                    0.0
                })
            }));

            if i + 1 < total && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        tracing::debug!(pairs = pairs.len(), batches = total, "semantic scoring finished");
        scores
    }
}
