use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CurriculumCourse, ExtractedCourse};
use crate::enums::{MatchType, RejectionReason};

/// A transient (source, target) pairing considered by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchCandidate {
    pub source: ExtractedCourse,
    pub target: CurriculumCourse,
    pub score: f64,
    pub match_type: MatchType,
}

/// Lexical signals behind a matcher decision.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub keyword: f64,
}

/// The three fused signals behind a hybrid description match.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SimilarityBreakdown {
    pub vector_score: f64,
    pub tfidf_score: f64,
    pub semantic_score: f64,
    pub final_score: f64,
}

/// Overlapping meaningful terms of two matched descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MatchingHighlights {
    pub source_highlights: Vec<String>,
    pub target_highlights: Vec<String>,
}

/// An accepted source course.
///
/// `course` is the output record: in matching mode its description is the reference
/// description and missing code/credits are filled from the reference. `source` keeps
/// the record as extracted, so the original description survives as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchedCourse {
    pub course: ExtractedCourse,
    pub source: ExtractedCourse,
    pub target: CurriculumCourse,
    pub score: f64,
    pub match_type: MatchType,
    pub breakdown: ScoreBreakdown,
}

/// The closest reference course seen for a rejected source, kept for operator review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BestCandidate {
    pub target: CurriculumCourse,
    pub score: f64,
}

/// A rejected source course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UnmatchedCourse {
    pub source: ExtractedCourse,
    pub reason: RejectionReason,
    pub best_candidate: Option<BestCandidate>,
}

/// Terminal state of one source course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Matched(MatchedCourse),
    Unmatched(UnmatchedCourse),
}

impl MatchResult {
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    #[must_use]
    pub const fn source(&self) -> &ExtractedCourse {
        match self {
            Self::Matched(m) => &m.source,
            Self::Unmatched(u) => &u.source,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchStats {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// `matched / total`, 0 when there were no sources.
    pub match_rate: f64,
}

/// Partition of a matching run's sources into matched and unmatched records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchReport {
    pub matched: Vec<MatchedCourse>,
    pub unmatched: Vec<UnmatchedCourse>,
    pub stats: MatchStats,
}

impl MatchReport {
    /// Partition per-course results, preserving input order within each side.
    #[must_use]
    pub fn from_results(results: impl IntoIterator<Item = MatchResult>) -> Self {
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();
        for result in results {
            match result {
                MatchResult::Matched(m) => matched.push(m),
                MatchResult::Unmatched(u) => unmatched.push(u),
            }
        }
        let total = matched.len() + unmatched.len();
        #[allow(clippy::cast_precision_loss)]
        let match_rate = if total == 0 {
            0.0
        } else {
            matched.len() as f64 / total as f64
        };
        let stats = MatchStats {
            total,
            matched: matched.len(),
            unmatched: unmatched.len(),
            match_rate,
        };
        Self {
            matched,
            unmatched,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unmatched(title: &str) -> MatchResult {
        MatchResult::Unmatched(UnmatchedCourse {
            source: ExtractedCourse::manual(title, "A"),
            reason: RejectionReason::NoMatchingCourse,
            best_candidate: None,
        })
    }

    fn matched(title: &str) -> MatchResult {
        let source = ExtractedCourse::manual(title, "A");
        MatchResult::Matched(MatchedCourse {
            course: source.clone(),
            source,
            target: CurriculumCourse::new("CS101", title),
            score: 0.95,
            match_type: MatchType::ExactTitle,
            breakdown: ScoreBreakdown::default(),
        })
    }

    #[test]
    fn report_partitions_and_counts() {
        let report = MatchReport::from_results(vec![
            matched("Data Structures"),
            unmatched("Page 2"),
            matched("Operating Systems"),
        ]);
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.matched, 2);
        assert_eq!(report.stats.unmatched, 1);
        assert!((report.stats.match_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.matched[1].source.title, "Operating Systems");
    }

    #[test]
    fn empty_report_has_zero_rate() {
        let report = MatchReport::from_results(Vec::new());
        assert_eq!(report.stats.total, 0);
        assert!(report.stats.match_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let json = serde_json::to_value(unmatched("Page 2")).unwrap();
        assert_eq!(json["status"], "unmatched");
        assert_eq!(json["reason"]["kind"], "no_matching_course");
    }
}
