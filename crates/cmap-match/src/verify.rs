//! Second opinion on uncertain rejections.
//!
//! Courses rejected with [`RejectionReason::LowSimilarity`] had a plausible candidate
//! that scored under the threshold. A [`CourseVerifier`] is asked about them in batches
//! of five with a pause between batches. A valid verdict promotes the course to a
//! partial match against its best candidate; an invalid verdict records the verifier's
//! reasoning. A failed batch leaves its courses rejected as they were.

use std::time::Duration;

use cmap_core::collaborators::CourseVerifier;
use cmap_core::entities::{
    CurriculumCourse, ExtractedCourse, MatchReport, MatchResult, MatchedCourse, ScoreBreakdown,
    UnmatchedCourse,
};
use cmap_core::enums::{MatchMode, MatchType, RejectionReason};
use cmap_similarity::{keyword_similarity, lexical_similarity};

use crate::matcher::enrich;

pub const VERIFY_BATCH_SIZE: usize = 5;
pub const VERIFY_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Consults a [`CourseVerifier`] about uncertain rejections.
pub struct UncertainReview<'a> {
    verifier: &'a dyn CourseVerifier,
    mode: MatchMode,
    batch_size: usize,
    batch_delay: Duration,
}

impl<'a> UncertainReview<'a> {
    #[must_use]
    pub const fn new(verifier: &'a dyn CourseVerifier, mode: MatchMode) -> Self {
        Self {
            verifier,
            mode,
            batch_size: VERIFY_BATCH_SIZE,
            batch_delay: VERIFY_BATCH_DELAY,
        }
    }

    #[must_use]
    pub const fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Re-partition `report`, returning a report over the same source courses.
    pub async fn review(
        &self,
        report: MatchReport,
        references: &[CurriculumCourse],
    ) -> MatchReport {
        let (uncertain, settled): (Vec<UnmatchedCourse>, Vec<UnmatchedCourse>) = report
            .unmatched
            .into_iter()
            .partition(|u| matches!(u.reason, RejectionReason::LowSimilarity { .. }));
        if uncertain.is_empty() {
            return MatchReport::from_results(
                report
                    .matched
                    .into_iter()
                    .map(MatchResult::Matched)
                    .chain(settled.into_iter().map(MatchResult::Unmatched)),
            );
        }

        let mut reviewed = Vec::with_capacity(uncertain.len());
        let batches: Vec<&[UnmatchedCourse]> = uncertain.chunks(self.batch_size).collect();
        let last = batches.len() - 1;
        for (i, batch) in batches.into_iter().enumerate() {
            let courses: Vec<ExtractedCourse> = batch.iter().map(|u| u.source.clone()).collect();
            match self.verifier.verify(&courses, references).await {
                Ok(verdicts) => {
                    for (j, unmatched) in batch.iter().enumerate() {
                        reviewed.push(match verdicts.get(j) {
                            Some(v) if v.is_valid => self.promote(unmatched.clone()),
                            Some(v) => MatchResult::Unmatched(UnmatchedCourse {
                                reason: RejectionReason::RejectedByVerifier {
                                    reasoning: v.reasoning.clone(),
                                },
                                ..unmatched.clone()
                            }),
                            None => MatchResult::Unmatched(unmatched.clone()),
                        });
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        %error,
                        courses = batch.len(),
                        "course verifier failed, keeping rejections"
                    );
                    reviewed.extend(batch.iter().cloned().map(MatchResult::Unmatched));
                }
            }
            if i < last && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let report = MatchReport::from_results(
            report
                .matched
                .into_iter()
                .map(MatchResult::Matched)
                .chain(reviewed)
                .chain(settled.into_iter().map(MatchResult::Unmatched)),
        );
        tracing::info!(
            matched = report.stats.matched,
            unmatched = report.stats.unmatched,
            "uncertain courses reviewed"
        );
        report
    }

    fn promote(&self, unmatched: UnmatchedCourse) -> MatchResult {
        let Some(best) = unmatched.best_candidate else {
            return MatchResult::Unmatched(unmatched);
        };
        let source = unmatched.source;
        let course = match self.mode {
            MatchMode::Matching => enrich(&source, &best.target),
            MatchMode::Verification => source.clone(),
        };
        let breakdown = ScoreBreakdown {
            lexical: lexical_similarity(&source.title, &best.target.title),
            keyword: keyword_similarity(&source.title, &best.target.title),
        };
        tracing::debug!(
            title = %source.title,
            target = %best.target.title,
            "verifier accepted course"
        );
        MatchResult::Matched(MatchedCourse {
            course,
            source,
            target: best.target,
            score: best.score,
            match_type: MatchType::PartialMatch,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cmap_core::collaborators::VerificationVerdict;
    use cmap_core::entities::BestCandidate;
    use cmap_core::errors::ProviderError;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Accepts titles containing "Kilns"; records batch sizes.
    #[derive(Default)]
    struct KilnVerifier {
        batches: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl CourseVerifier for KilnVerifier {
        async fn verify(
            &self,
            courses: &[ExtractedCourse],
            _references: &[CurriculumCourse],
        ) -> Result<Vec<VerificationVerdict>, ProviderError> {
            self.batches.lock().unwrap().push(courses.len());
            Ok(courses
                .iter()
                .map(|c| VerificationVerdict {
                    is_valid: c.title.contains("Kilns"),
                    confidence: 0.9,
                    reasoning: "pottery is not on the syllabus".into(),
                })
                .collect())
        }
    }

    struct OfflineVerifier;

    #[async_trait]
    impl CourseVerifier for OfflineVerifier {
        async fn verify(
            &self,
            _courses: &[ExtractedCourse],
            _references: &[CurriculumCourse],
        ) -> Result<Vec<VerificationVerdict>, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }
    }

    fn uncertain(title: &str) -> UnmatchedCourse {
        UnmatchedCourse {
            source: ExtractedCourse::manual(title, "A"),
            reason: RejectionReason::LowSimilarity {
                score: 0.2,
                threshold: 0.3,
            },
            best_candidate: Some(BestCandidate {
                target: CurriculumCourse::new("AR210", "Ceramics Studio")
                    .with_description("Throwing, glazing and firing."),
                score: 0.2,
            }),
        }
    }

    fn report(unmatched: Vec<UnmatchedCourse>) -> MatchReport {
        MatchReport::from_results(unmatched.into_iter().map(MatchResult::Unmatched))
    }

    #[tokio::test]
    async fn verdicts_promote_or_annotate() {
        let verifier = KilnVerifier::default();
        let mut courses: Vec<UnmatchedCourse> =
            (0..6).map(|i| uncertain(&format!("Pottery {i}"))).collect();
        courses.push(uncertain("Kilns and Glazes"));
        courses.push(UnmatchedCourse {
            reason: RejectionReason::NonCourseContent,
            best_candidate: None,
            ..uncertain("Page 2")
        });

        let reviewed = UncertainReview::new(&verifier, MatchMode::Matching)
            .with_batch_delay(Duration::ZERO)
            .review(report(courses), &[])
            .await;

        assert_eq!(*verifier.batches.lock().unwrap(), vec![5, 2]);
        assert_eq!(reviewed.stats.total, 8);
        assert_eq!(reviewed.stats.matched, 1);
        let promoted = &reviewed.matched[0];
        assert_eq!(promoted.match_type, MatchType::PartialMatch);
        assert_eq!(promoted.course.description, "Throwing, glazing and firing.");
        assert_eq!(
            reviewed
                .unmatched
                .iter()
                .filter(|u| u.reason.as_str() == "rejected_by_verifier")
                .count(),
            6
        );
        assert!(
            reviewed
                .unmatched
                .iter()
                .any(|u| u.reason == RejectionReason::NonCourseContent)
        );
    }

    #[tokio::test]
    async fn failures_keep_rejections() {
        let reviewed = UncertainReview::new(&OfflineVerifier, MatchMode::Verification)
            .with_batch_delay(Duration::ZERO)
            .review(report(vec![uncertain("Pottery")]), &[])
            .await;
        assert_eq!(reviewed.stats.matched, 0);
        assert_eq!(reviewed.unmatched[0].reason.as_str(), "low_similarity");
    }
}
