//! Curriculum extraction: the same cascade over curriculum-shaped lines.
//!
//! A line holding only a semester marker sets the semester for the lines after it.
//! Lines no pattern claims still yield a course when they are longer than ten
//! characters and contain a course code. Courses without a recoverable code get a
//! synthesized `CURR-<n>` code.

use cmap_core::entities::CurriculumCourse;

use crate::describe::curriculum_description;
use crate::error::ExtractError;
use crate::preprocess::preprocess;
use crate::registry::{COURSE_CODE, CURRICULUM_PATTERNS, SEMESTER_MARKER, first_match};
use crate::transcript::Extractor;

const FALLBACK_MIN_LINE_CHARS: usize = 10;

/// `None` and `Required`/`Core` tags mean required; `Elective` does not.
fn tag_is_required(tag: Option<&str>) -> bool {
    tag.is_none_or(|t| !t.eq_ignore_ascii_case("elective"))
}

/// Text after the first course code, with leading separators removed.
fn fallback_course(line: &str) -> Option<(String, String)> {
    if line.chars().count() <= FALLBACK_MIN_LINE_CHARS {
        return None;
    }
    let code = COURSE_CODE.captures(line)?.get(1)?;
    let title = line[code.end()..]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | '.'))
        .trim();
    (title.chars().count() > 3).then(|| (code.as_str().to_string(), title.to_string()))
}

impl Extractor {
    /// Recover reference courses from curriculum text.
    ///
    /// # Errors
    ///
    /// [`ExtractError::NoExtractableText`] when `raw` is empty or whitespace-only.
    pub fn extract_curriculum(&self, raw: &str) -> Result<Vec<CurriculumCourse>, ExtractError> {
        if raw.trim().is_empty() {
            return Err(ExtractError::NoExtractableText);
        }

        let mut courses: Vec<CurriculumCourse> = Vec::new();
        let mut current_semester: Option<u32> = None;

        for line in preprocess(raw, self.config().min_alphanumeric_ratio) {
            if let Some(caps) = SEMESTER_MARKER.captures(&line) {
                current_semester = caps["semester"].parse().ok();
                tracing::debug!(semester = ?current_semester, "semester marker");
                continue;
            }

            if let Some(found) = first_match(&CURRICULUM_PATTERNS, &line) {
                let code = found
                    .code
                    .unwrap_or_else(|| format!("CURR-{}", courses.len() + 1));
                courses.push(CurriculumCourse {
                    code,
                    description: curriculum_description(&found.title),
                    title: found.title,
                    credits: found.credits,
                    is_required: tag_is_required(found.tag.as_deref()),
                    semester: found.semester.or(current_semester),
                });
                continue;
            }

            if let Some((code, title)) = fallback_course(&line) {
                tracing::debug!(line, "curriculum fallback match");
                courses.push(CurriculumCourse {
                    code,
                    description: curriculum_description(&title),
                    title,
                    credits: None,
                    is_required: true,
                    semester: current_semester,
                });
            }
        }

        tracing::info!(count = courses.len(), "curriculum extraction finished");
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CURRICULUM: &str = "\
Course of Study - B.Tech Computer Science
Semester 1
CS101 - Intro to Programming (4 credits) [Core]
MA101 - Calculus (4 credits)
Technical Writing (2 credits) [Elective]
Semester 2
CS201 Data Structures
Semester 3: CS301 - Algorithms
Also offered: EE210 Signals and Systems (lab)
";

    #[test]
    fn semester_context_tags_and_codes() {
        let courses = Extractor::default().extract_curriculum(CURRICULUM).unwrap();
        let summary: Vec<(&str, &str, bool, Option<u32>)> = courses
            .iter()
            .map(|c| (c.code.as_str(), c.title.as_str(), c.is_required, c.semester))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CS101", "Intro to Programming", true, Some(1)),
                ("MA101", "Calculus", true, Some(1)),
                ("CURR-3", "Technical Writing", false, Some(1)),
                ("CS201", "Data Structures", true, Some(2)),
                ("CS301", "Algorithms", true, Some(3)),
                ("EE210", "Signals and Systems (lab)", true, Some(2)),
            ]
        );
        assert_eq!(courses[0].credits, Some(4.0));
        assert_eq!(
            courses[0].description,
            "Curriculum requirement: Intro to Programming"
        );
    }

    #[test]
    fn empty_curriculum_is_structural() {
        assert!(matches!(
            Extractor::default().extract_curriculum(""),
            Err(ExtractError::NoExtractableText)
        ));
    }

    #[test]
    fn tag_semantics() {
        assert!(tag_is_required(None));
        assert!(tag_is_required(Some("Core")));
        assert!(tag_is_required(Some("required")));
        assert!(!tag_is_required(Some("Elective")));
    }
}
