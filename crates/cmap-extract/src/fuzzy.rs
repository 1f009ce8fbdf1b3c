//! Pass 2: trailing-grade recovery for lines no composite pattern claimed.

use crate::registry::{COURSE_CODE, TRAILING_GRADE};

/// Substrings that mark a line as document metadata.
const NON_COURSE_KEYWORDS: &[&str] = &[
    "academic transcript",
    "student name",
    "roll number",
    "program",
    "semester",
    "total credits",
    "gpa",
    "grade point",
    "university",
    "college",
    "department",
    "date",
    "signature",
    "official",
    "transcript",
    "record",
    "completion",
];

const MIN_TITLE_CHARS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;
const MAX_SPECIAL_CHAR_RATIO: f64 = 0.2;

/// A line that survived the fuzzy heuristics; its grade is not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyCandidate {
    pub title: String,
    pub code: String,
    pub grade: String,
}

/// Read `line` as `<text containing a course code> <letter grade>`.
#[must_use]
pub fn fuzzy_candidate(line: &str) -> Option<FuzzyCandidate> {
    let lower = line.to_lowercase();
    if NON_COURSE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return None;
    }

    let grade_match = TRAILING_GRADE.captures(line)?.get(1)?;
    let text = line[..grade_match.start()].trim();

    let chars = text.chars().count();
    if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&chars) || looks_like_metadata(text) {
        return None;
    }

    let code_match = COURSE_CODE.captures(text)?.get(1)?;
    let code = code_match.as_str().to_string();
    let remainder = format!("{}{}", &text[..code_match.start()], &text[code_match.end()..]);
    let title = remainder
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | ','))
        .to_string();
    let title = if title.chars().count() > 3 {
        cmap_core::text::collapse_whitespace(&title)
    } else {
        text.to_string()
    };

    Some(FuzzyCandidate {
        title,
        code,
        grade: grade_match.as_str().to_string(),
    })
}

/// Bracket, parenthesis, or colon-heavy structure, too many symbols, a single word, or
/// a dangling separator.
fn looks_like_metadata(text: &str) -> bool {
    let special = text
        .chars()
        .filter(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '.'))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let special_ratio = special as f64 / text.chars().count() as f64;

    special_ratio > MAX_SPECIAL_CHAR_RATIO
        || text.matches(':').count() > 1
        || (text.contains('[') && text.contains(']'))
        || (text.contains('(') && text.contains(')'))
        || text.split_whitespace().count() < 2
        || text.ends_with('-')
        || text.ends_with('|')
}
