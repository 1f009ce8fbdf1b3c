//! Narrow async contracts for the services the pipeline consumes but does not own.
//!
//! Implementations live in `cmap-embeddings` (local model, in-memory index) and
//! `cmap-llm` (OpenAI-compatible HTTP). Callers treat every `Err` as recoverable:
//! a failed judge call scores 0, a failed extraction yields no candidates.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CurriculumCourse, ExtractedCourse};
use crate::enums::Difficulty;
use crate::errors::ProviderError;
use crate::pii::MaskedText;

/// Placeholder texts that embedding providers answer with an empty vector instead of
/// calling out.
pub const PLACEHOLDER_TEXTS: &[&str] = &[
    "placeholder course",
    "manually add your actual courses",
    "in production, ai would parse your actual transcript",
];

/// True when `text` is one of the instructional placeholders (case-insensitive substring).
#[must_use]
pub fn is_placeholder_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    PLACEHOLDER_TEXTS.iter().any(|p| lower.contains(p))
}

/// Text → dense vector.
///
/// Implementations fail fast with [`ProviderError::InvalidInput`] on empty or
/// whitespace-only input and return `Ok(vec![])` for [placeholder](is_placeholder_text) text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Direct 0–1 similarity judgment of two texts.
#[async_trait]
pub trait SemanticJudge: Send + Sync {
    async fn judge_similarity(&self, a: &str, b: &str) -> Result<f64, ProviderError>;
}

/// One ranked hit from a vector search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredId {
    pub id: String,
    pub score: f64,
}

/// Ranked nearest-neighbour lookup over a named corpus.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn search(
        &self,
        query: &[f32],
        corpus_key: &str,
        limit: usize,
    ) -> Result<Vec<ScoredId>, ProviderError>;
}

/// Filter applied by a [`CurriculumSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurriculumFilter {
    pub required_only: bool,
    /// Keep courses with no semester or `semester <= max_semester`.
    pub max_semester: Option<u32>,
}

impl CurriculumFilter {
    #[must_use]
    pub fn accepts(&self, course: &CurriculumCourse) -> bool {
        if self.required_only && !course.is_required {
            return false;
        }
        match (self.max_semester, course.semester) {
            (Some(max), Some(semester)) => semester <= max,
            _ => true,
        }
    }
}

/// Read-only catalog of reference courses.
#[async_trait]
pub trait CurriculumSource: Send + Sync {
    async fn courses(&self, filter: CurriculumFilter)
    -> Result<Vec<CurriculumCourse>, ProviderError>;
}

/// Structured course candidates from free text. Only ever sees masked text.
#[async_trait]
pub trait AiCourseExtractor: Send + Sync {
    async fn extract_candidates(
        &self,
        text: &MaskedText,
    ) -> Result<Vec<ExtractedCourse>, ProviderError>;
}

/// AI-written course description.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate_description(
        &self,
        title: &str,
        code: Option<&str>,
    ) -> Result<String, ProviderError>;
}

/// Verdict of a [`CourseVerifier`] for one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationVerdict {
    pub is_valid: bool,
    pub confidence: f64,
    pub reasoning: String,
}

/// Second opinion on courses the lexical matcher was unsure about.
///
/// Returns one verdict per input course, in order.
#[async_trait]
pub trait CourseVerifier: Send + Sync {
    async fn verify(
        &self,
        courses: &[ExtractedCourse],
        references: &[CurriculumCourse],
    ) -> Result<Vec<VerificationVerdict>, ProviderError>;
}

/// Difficulty forecast for one upcoming course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DifficultyAssessment {
    pub difficulty: Difficulty,
    pub reason: String,
}

/// Rates how hard an upcoming course will be given the courses already taken.
#[async_trait]
pub trait DifficultyAssessor: Send + Sync {
    async fn assess_difficulty(
        &self,
        background: &[ExtractedCourse],
        course: &CurriculumCourse,
    ) -> Result<DifficultyAssessment, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder_text("Placeholder Course 1"));
        assert!(is_placeholder_text(
            "Please manually add your actual courses here"
        ));
        assert!(!is_placeholder_text("Data Structures"));
    }

    #[test]
    fn filter_semantics() {
        let core = CurriculumCourse::new("CS101", "Programming").with_semester(2);
        let late = CurriculumCourse::new("CS401", "Compilers").with_semester(7);
        let elective = CurriculumCourse::new("HS101", "Ethics").elective();
        let floating = CurriculumCourse::new("CS000", "Seminar");

        let filter = CurriculumFilter {
            required_only: true,
            max_semester: Some(4),
        };
        assert!(filter.accepts(&core));
        assert!(!filter.accepts(&late));
        assert!(!filter.accepts(&elective));
        assert!(filter.accepts(&floating));
        assert!(CurriculumFilter::default().accepts(&elective));
    }
}
