//! End-to-end extraction over a realistic OCR transcript.

use cmap_core::enums::ExtractionMethod;
use cmap_extract::Extractor;
use pretty_assertions::assert_eq;

const TRANSCRIPT: &str = "\
OFFICIAL TRANSCRIPT
Student Name:
Jane Q. Student   Roll No. 2021CS1042
Semester:
CS101 \u{2013} |ntro to Programming (3 credits) A
CS102 - Discrete Mathematics (4 credits) B+
MA101 Calculus I 4 A-
PH101 Physics Lab B
HS105 Community Outreach S
Linear Algebra (3 credits) C-
Technical Writing | A
EE210 Signals & Systems; Sec 2 B
CS101 - Intro to Programming (3 credits) A
==== ---- ==== ----
Cumulative GPA 3.62
";

#[test]
fn realistic_transcript() {
    let courses = Extractor::default()
        .extract_courses(TRANSCRIPT, "C", "default")
        .expect("text is present");

    let got: Vec<(Option<&str>, &str, &str, ExtractionMethod)> = courses
        .iter()
        .map(|c| {
            (
                c.code.as_deref(),
                c.title.as_str(),
                c.grade.as_str(),
                c.extraction_method,
            )
        })
        .collect();

    assert_eq!(
        got,
        vec![
            (Some("CS101"), "Intro to Programming", "A", ExtractionMethod::Pattern),
            (Some("CS102"), "Discrete Mathematics", "B+", ExtractionMethod::Pattern),
            (Some("MA101"), "Calculus I", "A-", ExtractionMethod::Pattern),
            (Some("PH101"), "Physics Lab", "B", ExtractionMethod::Pattern),
            (None, "Technical Writing", "A", ExtractionMethod::Pattern),
            (Some("EE210"), "Signals & Systems; Sec 2", "B", ExtractionMethod::Fuzzy),
        ]
    );
}

#[test]
fn every_course_satisfies_output_invariants() {
    let courses = Extractor::default()
        .extract_courses(TRANSCRIPT, "B", "plaksha")
        .unwrap();
    assert!(!courses.is_empty());
    for course in &courses {
        assert!(course.title.chars().count() >= 4, "{course:?}");
        assert!((0.0..=1.0).contains(&course.confidence));
        assert!(!course.description.is_empty());
        assert_ne!(course.grade, "S");
    }
}
