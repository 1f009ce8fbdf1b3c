//! Extraction-shaped inputs through matching and gap analysis.

use cmap_core::entities::{CurriculumCourse, ExtractedCourse};
use cmap_core::enums::{MatchMode, MatchType, Priority, RejectionReason};
use cmap_grades::GradeModel;
use cmap_match::{MatchOptions, Matcher, analyze_gaps, match_to_reference};
use pretty_assertions::assert_eq;

fn catalog() -> Vec<CurriculumCourse> {
    vec![
        CurriculumCourse::new("CS101", "Introduction to Programming").with_semester(1),
        CurriculumCourse::new("CS102", "Computer Science Fundamentals").with_semester(1),
        CurriculumCourse::new("MA101", "Calculus").with_semester(2),
        CurriculumCourse::new("CS201", "Data Structures").with_semester(3),
        CurriculumCourse::new("CS202", "Discrete Mathematics").with_semester(4),
        CurriculumCourse::new("CS401", "Compilers").with_semester(7),
    ]
}

fn transcript() -> Vec<ExtractedCourse> {
    vec![
        ExtractedCourse::manual("Intro to Programming", "A").with_code("CS 101"),
        ExtractedCourse::manual("Computer Sci Fundamentals", "B+"),
        ExtractedCourse::manual("Page 2", "A"),
        ExtractedCourse::manual("Calculus", "S"),
        ExtractedCourse::manual("Underwater Basket Weaving", "B"),
    ]
}

#[test]
fn matching_is_a_partition() {
    let sources = transcript();
    let report = match_to_reference(
        &sources,
        &catalog(),
        0.3,
        MatchMode::Matching,
        &GradeModel::default(),
    );
    assert_eq!(report.stats.total, sources.len());
    assert_eq!(report.matched.len() + report.unmatched.len(), sources.len());
    for source in &sources {
        let in_matched = report.matched.iter().filter(|m| &m.source == source).count();
        let in_unmatched = report.unmatched.iter().filter(|u| &u.source == source).count();
        assert_eq!(in_matched + in_unmatched, 1, "{}", source.title);
    }
}

#[test]
fn scenarios_two_through_four() {
    let model = GradeModel::default();
    let matcher = Matcher::new(
        &model,
        MatchOptions::new(0.3, MatchMode::Verification).with_grade_threshold("D"),
    );
    let report = matcher.match_all(&transcript(), &catalog());

    let by_title = |title: &str| {
        report
            .unmatched
            .iter()
            .find(|u| u.source.title == title)
            .map(|u| u.reason.clone())
    };
    // S is rejected even though "Calculus" is an exact title.
    assert_eq!(
        by_title("Calculus"),
        Some(RejectionReason::InvalidGrade {
            grade: "S".to_string()
        })
    );
    assert_eq!(by_title("Page 2"), Some(RejectionReason::NonCourseContent));

    let fuzzy = report
        .matched
        .iter()
        .find(|m| m.source.title == "Computer Sci Fundamentals")
        .unwrap();
    assert_eq!(fuzzy.match_type, MatchType::FuzzyTitle);
    assert!(fuzzy.score >= 0.3);

    let coded = report
        .matched
        .iter()
        .find(|m| m.source.title == "Intro to Programming")
        .unwrap();
    assert_eq!(coded.match_type, MatchType::ExactCode);
}

#[test]
fn scenario_five_required_gap_is_high_priority() {
    let model = GradeModel::default();
    let report = match_to_reference(
        &transcript(),
        &catalog(),
        0.3,
        MatchMode::Matching,
        &model,
    );
    let gaps = analyze_gaps(&report.matched, &catalog(), 4, &model);

    let codes: Vec<&str> = gaps.gaps.iter().map(|g| g.course.code.as_str()).collect();
    assert_eq!(codes, vec!["MA101", "CS201", "CS202"]);
    assert!(gaps.gaps.iter().all(|g| g.priority == Priority::High));
    assert_eq!(
        gaps.recommendations[0].courses,
        vec!["Calculus", "Data Structures", "Discrete Mathematics"]
    );
}
