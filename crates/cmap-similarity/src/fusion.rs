//! Convex combination of the vector, TF-IDF and semantic signals.

use cmap_core::entities::SimilarityBreakdown;

/// Weights of the three signals; they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub vector: f64,
    pub tfidf: f64,
    pub semantic: f64,
}

impl FusionWeights {
    /// One transcript against an indexed reference catalog.
    pub const SINGLE_DOCUMENT: Self = Self {
        vector: 0.4,
        tfidf: 0.3,
        semantic: 0.3,
    };

    /// A transcript against an extracted curriculum document.
    pub const DUAL_DOCUMENT: Self = Self {
        vector: 0.3,
        tfidf: 0.3,
        semantic: 0.4,
    };

    #[must_use]
    pub fn fuse(
        &self,
        vector_score: f64,
        tfidf_score: f64,
        semantic_score: f64,
    ) -> SimilarityBreakdown {
        SimilarityBreakdown {
            vector_score,
            tfidf_score,
            semantic_score,
            final_score: self.vector * vector_score
                + self.tfidf * tfidf_score
                + self.semantic * semantic_score,
        }
    }
}
