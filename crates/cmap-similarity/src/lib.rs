//! # cmap-similarity
//!
//! Similarity scoring for coursemap.
//!
//! - [`lexical`]: token Jaccard with substring and length bonuses, plus keyword overlap.
//!   Pure and synchronous; the matcher's fuzzy and partial steps run on these.
//! - [`tfidf`]: IDF tables over the reference descriptions and cosine over weighted
//!   term vectors.
//! - [`semantic`]: batched calls to a [`SemanticJudge`](cmap_core::collaborators::SemanticJudge).
//! - [`hybrid`]: the [`SimilarityEngine`], which pre-filters candidates cheaply, asks the
//!   judge only about the survivors, fuses the three signals and keeps one best match
//!   per source course.
//!
//! Everything expensive is memoized in a [`SimilarityCache`] owned by the caller.

pub mod cache;
pub mod error;
pub mod fusion;
pub mod highlights;
pub mod hybrid;
pub mod lexical;
pub mod semantic;
pub mod tfidf;
pub mod tokens;

pub use cache::{CacheStats, SimilarityCache};
pub use error::SimilarityError;
pub use fusion::FusionWeights;
pub use highlights::matching_highlights;
pub use hybrid::{HybridMatch, HybridMethod, SimilarityEngine, code_matches};
pub use lexical::{keyword_similarity, lexical_similarity};
