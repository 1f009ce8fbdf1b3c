//! Hybrid ranking of source courses against reference courses.
//!
//! Two call sites, two weight sets:
//!
//! - **Single document** (transcript against an indexed catalog): candidates come from
//!   vector search over the catalog, pre-filtered on vector score, then fused
//!   `0.4·vector + 0.3·tfidf + 0.3·semantic`.
//! - **Dual document** (transcript against an extracted curriculum): every target is
//!   scored with TF-IDF, the top K above the pre-filter survive, TF-IDF stands in for the
//!   vector signal, and the fusion is `0.3·vector + 0.3·tfidf + 0.4·semantic`.
//!
//! Only surviving candidates reach the semantic judge, so external calls are bounded by
//! sources × K. Each source keeps its single best candidate above the minimum score.
//! When nothing matches at all, exact course codes are tried instead.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cmap_config::SemanticConfig;
use cmap_core::collaborators::{EmbeddingProvider, SemanticJudge, VectorSearch};
use cmap_core::entities::{
    CurriculumCourse, ExtractedCourse, MatchingHighlights, SimilarityBreakdown,
};
use cmap_core::text::normalize_code;
use serde::{Deserialize, Serialize};

use crate::cache::SimilarityCache;
use crate::error::SimilarityError;
use crate::fusion::FusionWeights;
use crate::highlights::matching_highlights;
use crate::semantic::SemanticScorer;
use crate::tfidf::{IdfTable, cosine};

/// How a hybrid match was found.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HybridMethod {
    SingleDocument,
    DualDocument,
    /// Exact course-code fallback after an empty hybrid ranking.
    CodeFallback,
}

/// Best reference course for one source course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HybridMatch {
    pub source: ExtractedCourse,
    pub target: CurriculumCourse,
    pub breakdown: SimilarityBreakdown,
    pub highlights: MatchingHighlights,
    pub method: HybridMethod,
}

/// A (source, target) pair that survived pre-filtering.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    source: usize,
    target: usize,
    vector: f64,
    tfidf: f64,
}

/// Similarity engine bound to one cache and optional collaborators.
pub struct SimilarityEngine<'a> {
    cache: &'a SimilarityCache,
    config: SemanticConfig,
    judge: Option<&'a dyn SemanticJudge>,
    embedder: Option<&'a dyn EmbeddingProvider>,
    search: Option<&'a dyn VectorSearch>,
}

impl<'a> SimilarityEngine<'a> {
    /// Engine without collaborators: semantic scores are 0 and only dual-document
    /// ranking is available.
    #[must_use]
    pub const fn new(cache: &'a SimilarityCache, config: SemanticConfig) -> Self {
        Self {
            cache,
            config,
            judge: None,
            embedder: None,
            search: None,
        }
    }

    #[must_use]
    pub const fn with_judge(mut self, judge: &'a dyn SemanticJudge) -> Self {
        self.judge = Some(judge);
        self
    }

    #[must_use]
    pub const fn with_vector_search(
        mut self,
        embedder: &'a dyn EmbeddingProvider,
        search: &'a dyn VectorSearch,
    ) -> Self {
        self.embedder = Some(embedder);
        self.search = Some(search);
        self
    }

    /// IDF over the reference descriptions, built once per cache.
    fn idf(&self, targets: &[CurriculumCourse]) -> Arc<IdfTable> {
        self.cache
            .idf_or_init(|| IdfTable::from_corpus(targets.iter().map(CurriculumCourse::match_text)))
    }

    /// TF-IDF cosine of two descriptions under the reference corpus of `targets`.
    #[must_use]
    pub fn tfidf_similarity(&self, a: &str, b: &str, targets: &[CurriculumCourse]) -> f64 {
        let idf = self.idf(targets);
        cosine(
            &self.cache.tfidf_vector(a, &idf),
            &self.cache.tfidf_vector(b, &idf),
        )
    }

    async fn semantic_scores(
        &self,
        sources: &[ExtractedCourse],
        targets: &[CurriculumCourse],
        candidates: &[Candidate],
    ) -> Vec<f64> {
        let Some(judge) = self.judge else {
            tracing::debug!("no semantic judge configured, semantic scores are 0");
            return vec![0.0; candidates.len()];
        };
        let pairs: Vec<(&str, &str)> = candidates
            .iter()
            .map(|c| (sources[c.source].match_text(), targets[c.target].match_text()))
            .collect();
        SemanticScorer::new(
            judge,
            self.cache,
            self.config.batch_size,
            Duration::from_millis(self.config.batch_delay_ms),
        )
        .score_pairs(&pairs)
        .await
    }

    /// Rank an extracted transcript against an extracted curriculum.
    pub async fn rank_dual_document(
        &self,
        sources: &[ExtractedCourse],
        targets: &[CurriculumCourse],
    ) -> Vec<HybridMatch> {
        if sources.is_empty() || targets.is_empty() {
            return Vec::new();
        }
        let idf = self.idf(targets);

        let mut candidates = Vec::new();
        for (si, source) in sources.iter().enumerate() {
            let source_vec = self.cache.tfidf_vector(source.match_text(), &idf);
            let mut scored: Vec<Candidate> = targets
                .iter()
                .enumerate()
                .map(|(ti, target)| {
                    let tfidf = cosine(
                        &source_vec,
                        &self.cache.tfidf_vector(target.match_text(), &idf),
                    );
                    Candidate {
                        source: si,
                        target: ti,
                        vector: tfidf,
                        tfidf,
                    }
                })
                .filter(|c| c.tfidf > self.config.tfidf_prefilter)
                .collect();
            scored.sort_by(|a, b| {
                b.tfidf
                    .partial_cmp(&a.tfidf)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            scored.truncate(self.config.top_k);
            candidates.extend(scored);
        }
        tracing::info!(
            possible = sources.len() * targets.len(),
            kept = candidates.len(),
            "dual-document candidates after tf-idf prefilter"
        );

        let semantic = self.semantic_scores(sources, targets, &candidates).await;
        let matches = select_best(
            sources,
            targets,
            &candidates,
            &semantic,
            FusionWeights::DUAL_DOCUMENT,
            self.config.dual_document_min_score,
            HybridMethod::DualDocument,
        );
        or_code_fallback(matches, sources, targets)
    }

    /// Rank a transcript against a reference catalog indexed under `corpus_key`.
    ///
    /// Vector-search ids are reference course codes. Sources whose embedding or search
    /// fails, or whose embedding is empty, are skipped.
    ///
    /// # Errors
    ///
    /// [`SimilarityError::MissingCollaborator`] unless the engine was built
    /// [`with_vector_search`](Self::with_vector_search).
    pub async fn rank_single_document(
        &self,
        sources: &[ExtractedCourse],
        targets: &[CurriculumCourse],
        corpus_key: &str,
    ) -> Result<Vec<HybridMatch>, SimilarityError> {
        let embedder = self
            .embedder
            .ok_or(SimilarityError::MissingCollaborator("embedding provider"))?;
        let search = self
            .search
            .ok_or(SimilarityError::MissingCollaborator("vector search"))?;
        if sources.is_empty() || targets.is_empty() {
            return Ok(Vec::new());
        }

        let idf = self.idf(targets);
        let by_code: HashMap<String, usize> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| (normalize_code(&t.code), i))
            .collect();

        let mut candidates = Vec::new();
        for (si, source) in sources.iter().enumerate() {
            let embedding = match self.cache.embedding(source.match_text(), embedder).await {
                Ok(v) if v.is_empty() => {
                    tracing::debug!(title = %source.title, "empty embedding, skipping course");
                    continue;
                }
                Ok(v) => v,
                Err(error) => {
                    tracing::warn!(%error, title = %source.title, "embedding failed, skipping course");
                    continue;
                }
            };
            let hits = match search
                .search(&embedding, corpus_key, self.config.vector_search_limit)
                .await
            {
                Ok(hits) => hits,
                Err(error) => {
                    tracing::warn!(%error, title = %source.title, "vector search failed, skipping course");
                    continue;
                }
            };

            let source_vec = self.cache.tfidf_vector(source.match_text(), &idf);
            for hit in hits.iter().filter(|h| h.score > self.config.vector_prefilter) {
                let Some(&ti) = by_code.get(&normalize_code(&hit.id)) else {
                    continue;
                };
                let tfidf = cosine(
                    &source_vec,
                    &self.cache.tfidf_vector(targets[ti].match_text(), &idf),
                );
                candidates.push(Candidate {
                    source: si,
                    target: ti,
                    vector: hit.score,
                    tfidf,
                });
            }
        }
        tracing::info!(kept = candidates.len(), "single-document candidates after vector prefilter");

        let semantic = self.semantic_scores(sources, targets, &candidates).await;
        let matches = select_best(
            sources,
            targets,
            &candidates,
            &semantic,
            FusionWeights::SINGLE_DOCUMENT,
            self.config.single_document_min_score,
            HybridMethod::SingleDocument,
        );
        Ok(or_code_fallback(matches, sources, targets))
    }
}

/// Best candidate per source whose fused score clears `min_score`, in source order.
fn select_best(
    sources: &[ExtractedCourse],
    targets: &[CurriculumCourse],
    candidates: &[Candidate],
    semantic: &[f64],
    weights: FusionWeights,
    min_score: f64,
    method: HybridMethod,
) -> Vec<HybridMatch> {
    let mut best: Vec<Option<(usize, SimilarityBreakdown)>> = vec![None; sources.len()];
    for (candidate, semantic_score) in candidates.iter().zip(semantic) {
        let breakdown = weights.fuse(candidate.vector, candidate.tfidf, *semantic_score);
        if breakdown.final_score <= min_score {
            continue;
        }
        let slot = &mut best[candidate.source];
        if slot.is_none_or(|(_, current)| breakdown.final_score > current.final_score) {
            *slot = Some((candidate.target, breakdown));
        }
    }

    best.into_iter()
        .enumerate()
        .filter_map(|(si, slot)| {
            let (ti, breakdown) = slot?;
            let source = &sources[si];
            let target = &targets[ti];
            Some(HybridMatch {
                highlights: matching_highlights(
                    source.match_text(),
                    target.match_text(),
                    breakdown.final_score,
                ),
                source: source.clone(),
                target: target.clone(),
                breakdown,
                method,
            })
        })
        .collect()
}

fn or_code_fallback(
    matches: Vec<HybridMatch>,
    sources: &[ExtractedCourse],
    targets: &[CurriculumCourse],
) -> Vec<HybridMatch> {
    if !matches.is_empty() {
        return matches;
    }
    let fallback = code_matches(sources, targets);
    tracing::info!(count = fallback.len(), "no hybrid matches, used course-code fallback");
    fallback
}

/// Exact normalized course-code matches, every signal set to 1.
#[must_use]
pub fn code_matches(sources: &[ExtractedCourse], targets: &[CurriculumCourse]) -> Vec<HybridMatch> {
    sources
        .iter()
        .filter_map(|source| {
            let code = normalize_code(source.code.as_deref()?);
            let target = targets.iter().find(|t| normalize_code(&t.code) == code)?;
            let marker = vec!["exact_code".to_string()];
            Some(HybridMatch {
                source: source.clone(),
                target: target.clone(),
                breakdown: SimilarityBreakdown {
                    vector_score: 1.0,
                    tfidf_score: 1.0,
                    semantic_score: 1.0,
                    final_score: 1.0,
                },
                highlights: MatchingHighlights {
                    source_highlights: marker.clone(),
                    target_highlights: marker,
                },
                method: HybridMethod::CodeFallback,
            })
        })
        .collect()
}
