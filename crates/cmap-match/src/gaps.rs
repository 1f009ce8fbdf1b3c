//! Gap and recommendation analysis.
//!
//! Gaps are the in-scope requirement courses that no matched course points at, compared
//! by normalized code. A course is in scope when it has no semester or its semester is
//! at most the target semester. Recommendations come from fixed templates.
//!
//! Courses scheduled after the target semester are not gaps. When a
//! [`DifficultyAssessor`] is available they get a difficulty forecast instead, one
//! call per course; a failed call records `Moderate` with a fixed reason.

use std::collections::HashSet;

use cmap_core::collaborators::DifficultyAssessor;
use cmap_core::entities::{
    CurriculumCourse, ExtractedCourse, FutureChallenge, GapCourse, GapReport, MatchedCourse,
    Recommendation,
};
use cmap_core::enums::{Priority, RecommendationKind};
use cmap_core::text::normalize_code;
use cmap_grades::GradeModel;

/// Mean grade point at or above which electives are suggested.
pub const STRONG_GPA: f64 = 3.5;
/// Mean grade point below which foundations are suggested.
pub const WEAK_GPA: f64 = 2.5;
/// Last semester that counts as early in the program.
pub const EARLY_SEMESTER_LIMIT: u32 = 4;

/// Required courses are high priority; scheduled electives medium; the rest low.
#[must_use]
pub fn priority_of(course: &CurriculumCourse) -> Priority {
    if course.is_required {
        Priority::High
    } else if course.semester.is_some() {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Find gap courses and synthesize recommendations.
#[must_use]
pub fn analyze_gaps(
    matched: &[MatchedCourse],
    requirements: &[CurriculumCourse],
    target_semester: u32,
    model: &GradeModel,
) -> GapReport {
    let covered: HashSet<String> = matched
        .iter()
        .map(|m| normalize_code(&m.target.code))
        .collect();

    let gaps: Vec<GapCourse> = requirements
        .iter()
        .filter(|c| c.semester.is_none_or(|s| s <= target_semester))
        .filter(|c| !covered.contains(&normalize_code(&c.code)))
        .map(|c| GapCourse {
            course: c.clone(),
            priority: priority_of(c),
        })
        .collect();

    let gpa = model.mean_grade_point(matched.iter().map(|m| m.source.grade.as_str()));
    let recommendations = recommend(&gaps, gpa, target_semester);
    tracing::info!(
        gaps = gaps.len(),
        recommendations = recommendations.len(),
        target_semester,
        gpa = ?gpa,
        "gap analysis finished"
    );
    GapReport {
        gaps,
        recommendations,
        future_challenges: Vec::new(),
    }
}

/// [`analyze_gaps`] plus a difficulty forecast for every course scheduled after
/// `target_semester`, judged against the matched courses.
pub async fn analyze_gaps_with_forecast(
    matched: &[MatchedCourse],
    requirements: &[CurriculumCourse],
    target_semester: u32,
    model: &GradeModel,
    assessor: &dyn DifficultyAssessor,
) -> GapReport {
    let mut report = analyze_gaps(matched, requirements, target_semester, model);
    let background: Vec<ExtractedCourse> = matched.iter().map(|m| m.course.clone()).collect();
    report.future_challenges =
        forecast_challenges(assessor, &background, requirements, target_semester).await;
    report
}

/// Difficulty of each course with a semester after `target_semester`, in input order.
pub async fn forecast_challenges(
    assessor: &dyn DifficultyAssessor,
    background: &[ExtractedCourse],
    requirements: &[CurriculumCourse],
    target_semester: u32,
) -> Vec<FutureChallenge> {
    let mut challenges = Vec::new();
    for course in requirements
        .iter()
        .filter(|c| c.semester.is_some_and(|s| s > target_semester))
    {
        let challenge = match assessor.assess_difficulty(background, course).await {
            Ok(assessment) => FutureChallenge {
                course: course.clone(),
                difficulty: assessment.difficulty,
                reason: assessment.reason,
            },
            Err(error) => {
                tracing::warn!(%error, code = %course.code, "difficulty assessment failed");
                FutureChallenge::unassessed(course.clone())
            }
        };
        challenges.push(challenge);
    }
    tracing::debug!(count = challenges.len(), target_semester, "future courses assessed");
    challenges
}

fn titles<'a>(gaps: impl Iterator<Item = &'a GapCourse>, limit: usize) -> Vec<String> {
    gaps.take(limit).map(|g| g.course.title.clone()).collect()
}

/// Template recommendations for `gaps`. `gpa` is the mean grade point of the matched
/// courses; without one no performance message is produced.
#[must_use]
pub fn recommend(
    gaps: &[GapCourse],
    gpa: Option<f64>,
    target_semester: u32,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let by_priority = |p: Priority| gaps.iter().filter(move |g| g.priority == p);

    let high = by_priority(Priority::High).count();
    if high > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::Core,
            message: format!(
                "Focus on completing {high} required courses to meet curriculum requirements."
            ),
            courses: titles(by_priority(Priority::High), usize::MAX),
        });
    }

    match gpa {
        Some(gpa) if gpa >= STRONG_GPA => out.push(Recommendation {
            kind: RecommendationKind::Elective,
            message: "Your strong academic performance suggests you can handle challenging elective courses.".to_string(),
            courses: titles(by_priority(Priority::Medium), usize::MAX),
        }),
        Some(gpa) if gpa < WEAK_GPA => out.push(Recommendation {
            kind: RecommendationKind::Prerequisite,
            message: "Consider strengthening foundational knowledge before taking advanced courses.".to_string(),
            courses: titles(by_priority(Priority::Medium), 3),
        }),
        _ => {}
    }

    if target_semester <= EARLY_SEMESTER_LIMIT {
        out.push(Recommendation {
            kind: RecommendationKind::Core,
            message: "Early in your program - focus on building strong foundations.".to_string(),
            courses: titles(gaps.iter(), 5),
        });
    } else {
        out.push(Recommendation {
            kind: RecommendationKind::Elective,
            message: "Advanced semester - consider specialized courses aligned with your interests."
                .to_string(),
            courses: titles(gaps.iter(), 3),
        });
    }
    out
}
