//! The match cascade.
//!
//! Each source course walks a fixed sequence and stops at the first step that decides:
//!
//! ```text
//! grade ─reject─▶ InvalidGrade
//!   │
//! exact code (1.0) ─▶ exact title (0.95) ─▶ non-course screen ─reject─▶ NonCourseContent
//!                                                │
//!                         fuzzy title (lexical ≥ threshold)
//!                                                │
//!                  partial match (keywords ≥ factor × threshold)
//!                                                │
//!        TitleTooShort / InvalidFormatting / LowSimilarity / NoMatchingCourse
//! ```
//!
//! The partial factor is 0.7 in matching mode and 0.8 in verification mode. The
//! partial step is skipped for titles with no subject keywords.

use cmap_config::MatchingConfig;
use cmap_core::entities::{
    BestCandidate, CurriculumCourse, ExtractedCourse, MatchCandidate, MatchReport, MatchResult,
    MatchedCourse, ScoreBreakdown, UnmatchedCourse,
};
use cmap_core::enums::{MatchMode, MatchType, RejectionReason};
use cmap_core::text::{normalize_code, normalize_text};
use cmap_grades::GradeModel;
use cmap_similarity::tokens::{keywords, tokenize};
use cmap_similarity::{keyword_similarity, lexical_similarity};

use crate::screen::{has_invalid_formatting, is_likely_non_course, is_too_short};

pub const EXACT_CODE_SCORE: f64 = 1.0;
pub const EXACT_TITLE_SCORE: f64 = 0.95;

/// Thresholds for one matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    pub threshold: f64,
    pub mode: MatchMode,
    pub matching_partial_factor: f64,
    pub verification_partial_factor: f64,
    /// Minimum grade; without one any valid grade is accepted.
    pub grade_threshold: Option<String>,
}

impl MatchOptions {
    #[must_use]
    pub fn new(threshold: f64, mode: MatchMode) -> Self {
        let defaults = MatchingConfig::default();
        Self {
            threshold,
            mode,
            matching_partial_factor: defaults.matching_partial_factor,
            verification_partial_factor: defaults.verification_partial_factor,
            grade_threshold: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &MatchingConfig, mode: MatchMode) -> Self {
        Self {
            threshold: config.threshold,
            mode,
            matching_partial_factor: config.matching_partial_factor,
            verification_partial_factor: config.verification_partial_factor,
            grade_threshold: None,
        }
    }

    #[must_use]
    pub fn with_grade_threshold(mut self, grade: impl Into<String>) -> Self {
        self.grade_threshold = Some(grade.into());
        self
    }

    /// Minimum keyword similarity for a partial match.
    #[must_use]
    pub fn partial_threshold(&self) -> f64 {
        let factor = match self.mode {
            MatchMode::Matching => self.matching_partial_factor,
            MatchMode::Verification => self.verification_partial_factor,
        };
        factor * self.threshold
    }
}

/// Runs the cascade for a list of source courses against one reference list.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    model: &'a GradeModel,
    options: MatchOptions,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub const fn new(model: &'a GradeModel, options: MatchOptions) -> Self {
        Self { model, options }
    }

    #[must_use]
    pub const fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Match every source course. The report partitions `sources` exactly.
    #[must_use]
    pub fn match_all(
        &self,
        sources: &[ExtractedCourse],
        references: &[CurriculumCourse],
    ) -> MatchReport {
        let report = MatchReport::from_results(
            sources
                .iter()
                .map(|source| self.match_one(source, references)),
        );
        tracing::info!(
            total = report.stats.total,
            matched = report.stats.matched,
            unmatched = report.stats.unmatched,
            mode = %self.options.mode,
            "matching finished"
        );
        report
    }

    /// Decide one source course.
    #[must_use]
    pub fn match_one(
        &self,
        source: &ExtractedCourse,
        references: &[CurriculumCourse],
    ) -> MatchResult {
        if !self.grade_accepted(&source.grade) {
            tracing::debug!(title = %source.title, grade = %source.grade, "rejected on grade");
            return reject(
                source,
                RejectionReason::InvalidGrade {
                    grade: source.grade.clone(),
                },
                None,
            );
        }

        if let Some(candidate) =
            exact_code(source, references).or_else(|| exact_title(source, references))
        {
            return self.accept(candidate, ScoreBreakdown::default());
        }

        if is_likely_non_course(&source.title) {
            tracing::debug!(title = %source.title, "non-course content");
            return reject(source, RejectionReason::NonCourseContent, None);
        }

        let fuzzy = best_by(references, |target| {
            lexical_similarity(&source.title, &target.title)
        });
        if let Some((target, lexical)) = fuzzy {
            if lexical >= self.options.threshold {
                let keyword = keyword_similarity(&source.title, &target.title);
                return self.accept(
                    MatchCandidate {
                        source: source.clone(),
                        target: target.clone(),
                        score: lexical,
                        match_type: MatchType::FuzzyTitle,
                    },
                    ScoreBreakdown { lexical, keyword },
                );
            }
        }

        // A title of filler words alone has nothing to overlap on.
        let partial = if keywords(&source.title).is_empty() {
            None
        } else {
            best_by(references, |target| {
                keyword_similarity(&source.title, &target.title)
            })
        };
        if let Some((target, keyword)) = partial {
            if keyword >= self.options.partial_threshold() {
                let lexical = lexical_similarity(&source.title, &target.title);
                return self.accept(
                    MatchCandidate {
                        source: source.clone(),
                        target: target.clone(),
                        score: keyword,
                        match_type: MatchType::PartialMatch,
                    },
                    ScoreBreakdown { lexical, keyword },
                );
            }
        }

        let best = fuzzy
            .filter(|(target, _)| shares_tokens(&source.title, &target.title))
            .map(|(target, score)| BestCandidate {
                target: target.clone(),
                score,
            });
        let reason = if is_too_short(&source.title) {
            RejectionReason::TitleTooShort
        } else if has_invalid_formatting(&source.title) {
            RejectionReason::InvalidFormatting
        } else if let Some(best) = &best {
            RejectionReason::LowSimilarity {
                score: best.score,
                threshold: self.options.threshold,
            }
        } else {
            RejectionReason::NoMatchingCourse
        };
        tracing::debug!(title = %source.title, reason = reason.as_str(), "unmatched");
        reject(source, reason, best)
    }

    fn grade_accepted(&self, grade: &str) -> bool {
        match &self.options.grade_threshold {
            Some(threshold) => self.model.accepts(grade, threshold),
            None => self.model.normalize(grade).is_valid,
        }
    }

    fn accept(&self, candidate: MatchCandidate, breakdown: ScoreBreakdown) -> MatchResult {
        tracing::debug!(
            source = %candidate.source.title,
            target = %candidate.target.title,
            score = candidate.score,
            match_type = %candidate.match_type,
            "matched"
        );
        let course = match self.options.mode {
            MatchMode::Matching => enrich(&candidate.source, &candidate.target),
            MatchMode::Verification => candidate.source.clone(),
        };
        MatchResult::Matched(MatchedCourse {
            course,
            source: candidate.source,
            target: candidate.target,
            score: candidate.score,
            match_type: candidate.match_type,
            breakdown,
        })
    }
}

/// Convenience entry point: one cascade run with default partial factors.
#[must_use]
pub fn match_to_reference(
    sources: &[ExtractedCourse],
    references: &[CurriculumCourse],
    threshold: f64,
    mode: MatchMode,
    model: &GradeModel,
) -> MatchReport {
    Matcher::new(model, MatchOptions::new(threshold, mode)).match_all(sources, references)
}

/// The source course carrying the reference description, with credits and code
/// filled in from the reference when the source had none.
#[must_use]
pub fn enrich(source: &ExtractedCourse, target: &CurriculumCourse) -> ExtractedCourse {
    ExtractedCourse {
        description: target.description.clone(),
        credits: source.credits.or(target.credits),
        code: source.code.clone().or_else(|| Some(target.code.clone())),
        ..source.clone()
    }
}

fn exact_code(
    source: &ExtractedCourse,
    references: &[CurriculumCourse],
) -> Option<MatchCandidate> {
    let code = normalize_code(source.code.as_deref()?);
    if code.is_empty() {
        return None;
    }
    let target = references.iter().find(|t| normalize_code(&t.code) == code)?;
    Some(MatchCandidate {
        source: source.clone(),
        target: target.clone(),
        score: EXACT_CODE_SCORE,
        match_type: MatchType::ExactCode,
    })
}

fn exact_title(
    source: &ExtractedCourse,
    references: &[CurriculumCourse],
) -> Option<MatchCandidate> {
    let title = normalize_text(&source.title);
    if title.is_empty() {
        return None;
    }
    let target = references.iter().find(|t| normalize_text(&t.title) == title)?;
    Some(MatchCandidate {
        source: source.clone(),
        target: target.clone(),
        score: EXACT_TITLE_SCORE,
        match_type: MatchType::ExactTitle,
    })
}

/// A candidate only counts as seen when the titles have a content word in common.
fn shares_tokens(a: &str, b: &str) -> bool {
    let other = tokenize(b);
    tokenize(a).iter().any(|token| other.contains(token))
}

/// Highest-scoring reference; the first one wins ties.
fn best_by(
    references: &[CurriculumCourse],
    score: impl Fn(&CurriculumCourse) -> f64,
) -> Option<(&CurriculumCourse, f64)> {
    references.iter().fold(None, |best, target| {
        let s = score(target);
        match best {
            Some((_, top)) if top >= s => best,
            _ => Some((target, s)),
        }
    })
}

fn reject(
    source: &ExtractedCourse,
    reason: RejectionReason,
    best: Option<BestCandidate>,
) -> MatchResult {
    MatchResult::Unmatched(UnmatchedCourse {
        source: source.clone(),
        reason,
        best_candidate: best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn references() -> Vec<CurriculumCourse> {
        vec![
            CurriculumCourse::new("CS101", "Introduction to Programming")
                .with_description("Variables, control flow and functions in Python."),
            CurriculumCourse::new("CS102", "Computer Science Fundamentals")
                .with_description("Abstraction, data and algorithms."),
            CurriculumCourse::new("MA201", "Linear Algebra")
                .with_description("Vector spaces and linear maps."),
        ]
    }

    fn matcher(model: &GradeModel, mode: MatchMode) -> Matcher<'_> {
        Matcher::new(model, MatchOptions::new(0.3, mode))
    }

    fn matched(result: MatchResult) -> MatchedCourse {
        match result {
            MatchResult::Matched(m) => m,
            MatchResult::Unmatched(u) => panic!("expected a match, got {}", u.reason),
        }
    }

    fn unmatched(result: MatchResult) -> UnmatchedCourse {
        match result {
            MatchResult::Unmatched(u) => u,
            MatchResult::Matched(m) => panic!("expected a rejection, matched {}", m.target.code),
        }
    }

    #[test]
    fn exact_code_wins_over_a_better_title() {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual("Linear Algebra", "A").with_code("cs 101");
        let m = matched(matcher(&model, MatchMode::Matching).match_one(&source, &references()));
        assert_eq!(m.match_type, MatchType::ExactCode);
        assert_eq!(m.target.code, "CS101");
        assert!((m.score - EXACT_CODE_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_title_ignores_case_and_punctuation() {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual("linear algebra.", "B");
        let m = matched(matcher(&model, MatchMode::Verification).match_one(&source, &references()));
        assert_eq!(m.match_type, MatchType::ExactTitle);
        assert!((m.score - EXACT_TITLE_SCORE).abs() < f64::EPSILON);
        assert_eq!(m.course, source);
    }

    #[test]
    fn fuzzy_title_match() {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual("Computer Sci Fundamentals", "A");
        let m = matched(matcher(&model, MatchMode::Matching).match_one(&source, &references()));
        assert_eq!(m.match_type, MatchType::FuzzyTitle);
        assert_eq!(m.target.code, "CS102");
        assert!(m.score >= 0.3);
        assert!((m.breakdown.lexical - m.score).abs() < f64::EPSILON);
    }

    #[test]
    fn matching_mode_replaces_description_and_keeps_audit_trail() {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual("Intro to Programming", "A")
            .with_description("Transcript text")
            .with_code("CS101");
        let m = matched(matcher(&model, MatchMode::Matching).match_one(&source, &references()));
        assert_eq!(
            m.course.description,
            "Variables, control flow and functions in Python."
        );
        assert_eq!(m.source.description, "Transcript text");
        assert_eq!(m.course.title, "Intro to Programming");
    }

    #[test]
    fn enrich_fills_missing_code_and_credits() {
        let mut target = CurriculumCourse::new("MA201", "Linear Algebra");
        target.credits = Some(4.0);
        let source = ExtractedCourse::manual("Linear Algebra I", "A");
        let enriched = enrich(&source, &target);
        assert_eq!(enriched.code.as_deref(), Some("MA201"));
        assert_eq!(enriched.credits, Some(4.0));

        let own = source.with_code("M201").with_credits(3.0);
        let kept = enrich(&own, &target);
        assert_eq!(kept.code.as_deref(), Some("M201"));
        assert_eq!(kept.credits, Some(3.0));
    }

    #[rstest]
    #[case(MatchMode::Matching, 0.21)]
    #[case(MatchMode::Verification, 0.24)]
    fn partial_threshold_depends_on_mode(#[case] mode: MatchMode, #[case] expected: f64) {
        let options = MatchOptions::new(0.3, mode);
        assert!((options.partial_threshold() - expected).abs() < 1e-9);
    }

    #[test]
    fn partial_match_on_keywords() {
        let model = GradeModel::default();
        let references = vec![CurriculumCourse::new("EE210", "Signals Systems Laboratory")];
        // lexical 1/4, below 0.3; keywords {signals, processing} vs {signals, laboratory}
        let source = ExtractedCourse::manual("Signals Processing", "B");
        let result = matcher(&model, MatchMode::Matching).match_one(&source, &references);
        let m = matched(result);
        assert_eq!(m.match_type, MatchType::PartialMatch);
        assert!((m.score - 1.0 / 3.0).abs() < 1e-9);
        assert!((m.breakdown.lexical - 0.25).abs() < 1e-9);
    }

    #[test]
    fn filler_only_title_is_not_a_partial_match() {
        let model = GradeModel::default();
        let references = vec![
            CurriculumCourse::new("MA201", "Linear Algebra"),
            CurriculumCourse::new("CS300", "Systems Design"),
        ];
        let source = ExtractedCourse::manual("Advanced Analysis", "A");
        let u = unmatched(matcher(&model, MatchMode::Matching).match_one(&source, &references));
        assert_eq!(u.reason, RejectionReason::NoMatchingCourse);
        assert!(u.best_candidate.is_none());
        assert_eq!(u.source.code, None);
    }

    #[test]
    fn grade_threshold_rejects_before_matching() {
        let model = GradeModel::default();
        let options = MatchOptions::new(0.3, MatchMode::Verification).with_grade_threshold("B");
        let source = ExtractedCourse::manual("Linear Algebra", "C").with_code("MA201");
        let u = unmatched(Matcher::new(&model, options).match_one(&source, &references()));
        assert_eq!(
            u.reason,
            RejectionReason::InvalidGrade {
                grade: "C".to_string()
            }
        );
    }

    #[rstest]
    #[case("Page 2", "non_course_content")]
    #[case("Art", "title_too_short")]
    #[case("Tech in Pottery Workshops", "invalid_formatting")]
    #[case("Underwater Basket Weaving", "no_matching_course")]
    #[case("Programming Pottery Workshop Kilns Glazes", "low_similarity")]
    fn rejection_reasons(#[case] title: &str, #[case] expected: &str) {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual(title, "A");
        let u = unmatched(matcher(&model, MatchMode::Matching).match_one(&source, &references()));
        assert_eq!(u.reason.as_str(), expected);
        assert_eq!(u.best_candidate.is_some(), expected == "low_similarity");
    }

    #[test]
    fn low_similarity_message() {
        let model = GradeModel::default();
        let source = ExtractedCourse::manual("Programming Pottery Workshop Kilns Glazes", "A");
        let u = unmatched(matcher(&model, MatchMode::Matching).match_one(&source, &references()));
        assert_eq!(u.reason.to_string(), "Low similarity score (0.167 < 0.3)");
        assert_eq!(u.best_candidate.map(|b| b.target.code).as_deref(), Some("CS101"));
    }

    #[test]
    fn empty_reference_list_rejects_everything() {
        let model = GradeModel::default();
        let sources = vec![
            ExtractedCourse::manual("Linear Algebra", "A"),
            ExtractedCourse::manual("Operating Systems", "B"),
        ];
        let report = match_to_reference(&sources, &[], 0.3, MatchMode::Matching, &model);
        assert_eq!(report.stats.matched, 0);
        assert_eq!(report.stats.unmatched, 2);
    }
}
