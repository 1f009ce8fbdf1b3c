//! Provenance, match, priority, and rejection enums for coursemap.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for log fields and report rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ExtractionMethod
// ---------------------------------------------------------------------------

/// How an [`ExtractedCourse`](crate::entities::ExtractedCourse) was recovered from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Pass 1 composite pattern cascade.
    Pattern,
    /// Pass 2 trailing-grade fallback.
    Fuzzy,
    /// Pass 3 external semantic extraction.
    Ai,
    /// Entered by a person.
    Manual,
}

impl ExtractionMethod {
    /// Confidence assigned to courses recovered by this method.
    #[must_use]
    pub const fn default_confidence(self) -> f64 {
        match self {
            Self::Pattern => 0.9,
            Self::Fuzzy => 0.7,
            Self::Ai => 0.6,
            Self::Manual => 1.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Fuzzy => "fuzzy",
            Self::Ai => "ai",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchType
// ---------------------------------------------------------------------------

/// Which step of the matching cascade produced a candidate.
///
/// ```text
/// exact_code → exact_title → fuzzy_title → partial_match → no_match
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactCode,
    ExactTitle,
    FuzzyTitle,
    PartialMatch,
    NoMatch,
}

impl MatchType {
    /// Cascade rank; lower ranks always win over higher ones.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ExactCode => 0,
            Self::ExactTitle => 1,
            Self::FuzzyTitle => 2,
            Self::PartialMatch => 3,
            Self::NoMatch => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactCode => "exact_code",
            Self::ExactTitle => "exact_title",
            Self::FuzzyTitle => "fuzzy_title",
            Self::PartialMatch => "partial_match",
            Self::NoMatch => "no_match",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchMode
// ---------------------------------------------------------------------------

/// Whether a run replaces source descriptions (matching) or only checks them (verification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Accepted courses take the reference description; partial factor 0.7.
    #[default]
    Matching,
    /// Accepted courses keep their own description; partial factor 0.8.
    Verification,
}

impl MatchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matching => "matching",
            Self::Verification => "verification",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a gap course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationKind
// ---------------------------------------------------------------------------

/// Category of a templated recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Prerequisite,
    Elective,
    Core,
}

impl RecommendationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::Elective => "elective",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Forecast difficulty of an upcoming course for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    /// Also the answer when no assessment could be made.
    #[default]
    Moderate,
    Challenging,
    VeryChallenging,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Challenging => "challenging",
            Self::VeryChallenging => "very_challenging",
        }
    }

    /// Read a label such as `Very Challenging`, `very_challenging` or `"Easy".`
    ///
    /// Only the leading words count, so `Challenging (no prior physics)` reads as
    /// `Challenging`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        [
            ("verychallenging", Self::VeryChallenging),
            ("challenging", Self::Challenging),
            ("moderate", Self::Moderate),
            ("easy", Self::Easy),
        ]
        .into_iter()
        .find_map(|(prefix, level)| key.starts_with(prefix).then_some(level))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RejectionReason
// ---------------------------------------------------------------------------

/// Why a source course ended up unmatched.
///
/// Variants are listed in the priority order the matcher evaluates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The grade failed Grade Model validation (including the reserved `S`).
    InvalidGrade { grade: String },
    /// Header, page number, totals, or other document metadata.
    NonCourseContent,
    /// Fewer than five characters of title.
    TitleTooShort,
    /// Bare numbers, dots, dashes, or truncated prefixes.
    InvalidFormatting,
    /// A candidate was seen but scored below the threshold.
    LowSimilarity { score: f64, threshold: f64 },
    /// No candidate was seen at all.
    NoMatchingCourse,
    /// An external verifier overruled the lexical decision.
    RejectedByVerifier { reasoning: String },
}

impl RejectionReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidGrade { .. } => "invalid_grade",
            Self::NonCourseContent => "non_course_content",
            Self::TitleTooShort => "title_too_short",
            Self::InvalidFormatting => "invalid_formatting",
            Self::LowSimilarity { .. } => "low_similarity",
            Self::NoMatchingCourse => "no_matching_course",
            Self::RejectedByVerifier { .. } => "rejected_by_verifier",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrade { grade } => {
                write!(f, "Invalid grade \"{grade}\" - this grade type is not accepted")
            }
            Self::NonCourseContent => {
                f.write_str("Appears to be non-course content (header, metadata, etc.)")
            }
            Self::TitleTooShort => f.write_str("Course title too short to be valid"),
            Self::InvalidFormatting => f.write_str("Contains invalid patterns or formatting"),
            Self::LowSimilarity { score, threshold } => {
                write!(f, "Low similarity score ({score:.3} < {threshold})")
            }
            Self::NoMatchingCourse => f.write_str("No matching course found in reference list"),
            Self::RejectedByVerifier { reasoning } => {
                write!(f, "Rejected during verification: {reasoning}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_type_ranks_follow_cascade() {
        let order = [
            MatchType::ExactCode,
            MatchType::ExactTitle,
            MatchType::FuzzyTitle,
            MatchType::PartialMatch,
            MatchType::NoMatch,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{} should outrank {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn difficulty_labels() {
        assert_eq!(
            Difficulty::from_label("Very Challenging"),
            Some(Difficulty::VeryChallenging)
        );
        assert_eq!(Difficulty::from_label(" \"Easy\"."), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_label("very_challenging"), Some(Difficulty::VeryChallenging));
        assert_eq!(
            Difficulty::from_label("Challenging (no prior physics)"),
            Some(Difficulty::Challenging)
        );
        assert_eq!(Difficulty::from_label("impossible"), None);
        assert_eq!(Difficulty::default(), Difficulty::Moderate);
    }

    #[test]
    fn extraction_confidence_defaults() {
        assert!((ExtractionMethod::Pattern.default_confidence() - 0.9).abs() < f64::EPSILON);
        assert!((ExtractionMethod::Fuzzy.default_confidence() - 0.7).abs() < f64::EPSILON);
        assert!((ExtractionMethod::Ai.default_confidence() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn rejection_reason_messages() {
        let low = RejectionReason::LowSimilarity {
            score: 0.1234,
            threshold: 0.3,
        };
        assert_eq!(low.to_string(), "Low similarity score (0.123 < 0.3)");
        assert!(
            RejectionReason::NonCourseContent
                .to_string()
                .contains("non-course content")
        );
        let grade = RejectionReason::InvalidGrade { grade: "S".into() };
        assert!(grade.to_string().contains("\"S\""));
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchType::PartialMatch).unwrap(),
            "\"partial_match\""
        );
        assert_eq!(
            serde_json::to_string(&MatchMode::Verification).unwrap(),
            "\"verification\""
        );
        let json = serde_json::to_value(RejectionReason::TitleTooShort).unwrap();
        assert_eq!(json["kind"], "title_too_short");
    }
}
