//! Duplicate removal: first occurrence wins.

use std::collections::HashSet;

use cmap_core::entities::ExtractedCourse;
use cmap_core::text::{normalize_code, normalize_title};

/// Titles this short are only deduplicated on exact equality.
const NEAR_DUPLICATE_MIN_CHARS: usize = 10;
const NEAR_DUPLICATE_OVERLAP: f64 = 0.9;

/// Share of `a`'s words found in `b`, over the longer word count.
fn word_overlap(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split(' ').collect();
    let words_b: Vec<&str> = b.split(' ').collect();
    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    let total = words_a.len().max(words_b.len());
    #[allow(clippy::cast_precision_loss)]
    let overlap = common as f64 / total as f64;
    overlap
}

/// Drop courses repeating an earlier title (exact or near) or code.
#[must_use]
pub fn dedup_courses(courses: Vec<ExtractedCourse>) -> Vec<ExtractedCourse> {
    let mut unique: Vec<ExtractedCourse> = Vec::with_capacity(courses.len());
    let mut kept_titles: Vec<String> = Vec::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut seen_codes: HashSet<String> = HashSet::new();

    for course in courses {
        let title = normalize_title(&course.title);
        let code = course.code.as_deref().map(normalize_code);

        if seen_titles.contains(&title) {
            tracing::debug!(title = %course.title, "skipping duplicate title");
            continue;
        }
        if code.as_ref().is_some_and(|c| seen_codes.contains(c)) {
            tracing::debug!(code = ?course.code, "skipping duplicate code");
            continue;
        }
        let near = title.len() > NEAR_DUPLICATE_MIN_CHARS
            && kept_titles.iter().any(|existing| {
                existing.len() > NEAR_DUPLICATE_MIN_CHARS
                    && word_overlap(&title, existing) > NEAR_DUPLICATE_OVERLAP
            });
        if near {
            tracing::debug!(title = %course.title, "skipping near-duplicate title");
            continue;
        }

        seen_titles.insert(title.clone());
        kept_titles.push(title);
        if let Some(code) = code {
            seen_codes.insert(code);
        }
        unique.push(course);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, code: Option<&str>) -> ExtractedCourse {
        let c = ExtractedCourse::manual(title, "A");
        match code {
            Some(code) => c.with_code(code),
            None => c,
        }
    }

    #[test]
    fn exact_title_duplicate() {
        let out = dedup_courses(vec![
            course("Data Structures", None),
            course("data  structures", None),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Data Structures");
    }

    #[test]
    fn code_duplicate_with_different_spacing() {
        let out = dedup_courses(vec![
            course("Intro to Programming", Some("CS101")),
            course("Introduction to Programming", Some("CS 101")),
        ]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn near_duplicate_titles() {
        let out = dedup_courses(vec![
            course("Advanced Topics in Machine Learning Systems Design Lab", None),
            course("Advanced Topics in Machine Learning Systems Design Lab II", None),
        ]);
        // 8 of 9 words shared: below the cutoff
        assert_eq!(out.len(), 2);

        let out = dedup_courses(vec![
            course("principles of digital signal processing systems and applications today", None),
            course("principles of digital signal processing systems and applications today.", None),
        ]);
        assert_eq!(out.len(), 2, "punctuation makes a different word");
    }

    #[test]
    fn near_duplicate_reordered_words() {
        let out = dedup_courses(vec![
            course("Signals and Systems Laboratory", None),
            course("Systems and Signals Laboratory", None),
        ]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn short_titles_need_exact_match() {
        let out = dedup_courses(vec![course("Art Lab", None), course("Lab Art", None)]);
        assert_eq!(out.len(), 2);
    }
}
