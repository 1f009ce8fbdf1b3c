//! Course description synthesis.
//!
//! [`basic_description`] is a deterministic template lookup keyed on title words. It is
//! used whenever a course has no description of its own and as the fallback when the
//! AI [`DescriptionGenerator`] fails.

use cmap_core::collaborators::DescriptionGenerator;
use cmap_core::entities::ExtractedCourse;

const STOP_WORDS: &[&str] = &["and", "the", "for", "with", "in", "of", "to", "a", "an"];

/// Subject keywords and the sentence appended for that subject, checked in order.
const SUBJECT_TEMPLATES: &[(&[&str], &str, &str)] = &[
    (
        &["computer", "programming", "software"],
        "Computer science course",
        "Focuses on programming, algorithms, and software development principles.",
    ),
    (
        &["mathematics", "math", "calculus"],
        "Mathematics course",
        "Develops mathematical reasoning and problem-solving skills.",
    ),
    (
        &["physics", "chemistry", "biology"],
        "Science course",
        "Explores fundamental principles and experimental methods.",
    ),
    (
        &["engineering", "design"],
        "Engineering course",
        "Focuses on design principles and practical applications.",
    ),
];

/// Templated description from the title's key terms.
#[must_use]
pub fn basic_description(title: &str) -> String {
    let lower = title.to_lowercase();
    let terms: Vec<&str> = lower
        .split_whitespace()
        .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
        .collect();
    if terms.is_empty() {
        return format!("Course covering {lower}");
    }
    let terms = terms.join(" ");

    SUBJECT_TEMPLATES
        .iter()
        .find(|(keywords, _, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or_else(
            || {
                format!(
                    "Course covering {terms}. Provides foundational knowledge and practical skills in the subject area."
                )
            },
            |(_, subject, focus)| format!("{subject} covering {terms}. {focus}"),
        )
}

/// Description attached to a curriculum course recovered from text.
#[must_use]
pub fn curriculum_description(title: &str) -> String {
    format!("Curriculum requirement: {title}")
}

/// Replace each course's description with an AI-written one, falling back to the
/// template when the generator fails.
pub async fn generate_descriptions(
    generator: &dyn DescriptionGenerator,
    courses: &mut [ExtractedCourse],
) {
    for course in courses.iter_mut() {
        match generator
            .generate_description(&course.title, course.code.as_deref())
            .await
        {
            Ok(text) if !text.trim().is_empty() => course.description = text.trim().to_string(),
            Ok(_) => course.description = basic_description(&course.title),
            Err(error) => {
                tracing::warn!(title = %course.title, %error, "description generation failed");
                course.description = basic_description(&course.title);
            }
        }
    }
}
