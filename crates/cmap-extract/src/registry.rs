//! The pattern registry.
//!
//! Component patterns (course codes, grades, credit expressions) are plain regex
//! fragments. Composite line patterns combine them into full-line shapes, each tagged
//! with a [`PatternRole`] and using named capture groups, so reading a match never
//! depends on how many groups a pattern happens to have.
//!
//! Composite lists are ordered. [`first_match`] walks them in order and returns the
//! first pattern whose match yields a title longer than three characters; no two
//! patterns ever contribute to the same line.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

// ---------------------------------------------------------------------------
// Component fragments
// ---------------------------------------------------------------------------

/// `CS101`, `CS 101`, `CS-101`, `MATH2010A`.
const CODE: &str = r"[A-Z]{2,4}[ -]?\d{3,4}[A-Z]?";
/// Letter, special, or numeric GPA grade.
const GRADE: &str = r"[A-DF][+-]?|[PSUIW]|[0-4]\.\d{1,2}";
/// Letter and special grades only. Used where no course code anchors the line, so that
/// trailing numbers such as a GPA summary are not read as grades.
const LETTER_GRADE: &str = r"[A-DF][+-]?|[PSUIW]";
const NUMBER: &str = r"\d+(?:\.\d+)?";
const CREDIT_UNIT: &str = r"(?i:credits?|cr|hrs?|hours?|units?)";
const TAG: &str = r"(?i:required|core|elective)";
/// Word-ish title text without colons, parentheses, brackets, or pipes.
const PLAIN_TITLE: &str = r"[A-Za-z][A-Za-z0-9&,/' .-]*?";
/// Looser title text used when parentheses or tags delimit the title.
const DELIMITED_TITLE: &str = r"[^():|\[\]]+?";

/// A course code anywhere in a line.
pub static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,4}\s*\d{3,4}[A-Z]?)\b").expect("valid course code pattern")
});

/// A single letter grade at the end of a line.
pub static TRAILING_GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][+-]?)\s*$").expect("valid trailing grade pattern"));

/// A line that only announces a semester: `Semester 3`, `SEM 3:`.
pub static SEMESTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:semester|sem)\.?\s*(?P<semester>\d{1,2})\s*:?$")
        .expect("valid semester marker pattern")
});

// ---------------------------------------------------------------------------
// PatternRole
// ---------------------------------------------------------------------------

/// The shape a composite pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternRole {
    /// `CS101 - Intro to Programming (3 credits) A`
    FullCourseWithCredits,
    /// `CS201 Data Structures 4 A-`
    CodeTitleCreditsGrade,
    /// `CS101 - Intro to Programming A`
    CodeDashTitleGrade,
    /// `CS101 Intro to Programming A`
    CodeTitleGrade,
    /// `Linear Algebra (4 credits) B+`
    TitleParenCreditsGrade,
    /// `Linear Algebra 4 B+`
    TitleCreditsGrade,
    /// `Linear Algebra (B+)`
    TitleParentheticalGrade,
    /// `Linear Algebra | B+`
    TitlePipeGrade,
    /// `Linear Algebra - B+`
    TitleDashGrade,
    /// `Linear Algebra B+`
    TitleGrade,
    /// `Semester 2: CS201 - Data Structures`
    SemesterCodeTitle,
    /// `CS201 - Data Structures (4 credits) [Core]`
    CodeTitleCreditsTag,
    /// `CS201 Data Structures (4 credits)`
    CodeSpaceTitleCredits,
    /// `Data Structures (4 credits) [Elective]`
    TitleCreditsTag,
    /// `CS201 - Data Structures`
    CodeDashTitle,
    /// `CS201 Data Structures`
    CodeSpaceTitle,
    /// `3. Data Structures`
    NumberedTitle,
}

impl PatternRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullCourseWithCredits => "full_course_with_credits",
            Self::CodeTitleCreditsGrade => "code_title_credits_grade",
            Self::CodeDashTitleGrade => "code_dash_title_grade",
            Self::CodeTitleGrade => "code_title_grade",
            Self::TitleParenCreditsGrade => "title_paren_credits_grade",
            Self::TitleCreditsGrade => "title_credits_grade",
            Self::TitleParentheticalGrade => "title_parenthetical_grade",
            Self::TitlePipeGrade => "title_pipe_grade",
            Self::TitleDashGrade => "title_dash_grade",
            Self::TitleGrade => "title_grade",
            Self::SemesterCodeTitle => "semester_code_title",
            Self::CodeTitleCreditsTag => "code_title_credits_tag",
            Self::CodeSpaceTitleCredits => "code_space_title_credits",
            Self::TitleCreditsTag => "title_credits_tag",
            Self::CodeDashTitle => "code_dash_title",
            Self::CodeSpaceTitle => "code_space_title",
            Self::NumberedTitle => "numbered_title",
        }
    }
}

impl fmt::Display for PatternRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Composite patterns
// ---------------------------------------------------------------------------

/// One entry of a composite list.
#[derive(Debug)]
pub struct CompositePattern {
    pub role: PatternRole,
    regex: Regex,
}

impl CompositePattern {
    fn new(role: PatternRole, pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid composite pattern {role}: {e}"));
        Self { role, regex }
    }
}

/// What a composite pattern pulled out of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatch {
    pub role: PatternRole,
    pub title: String,
    pub code: Option<String>,
    pub grade: Option<String>,
    pub credits: Option<f64>,
    pub semester: Option<u32>,
    pub tag: Option<String>,
}

impl LineMatch {
    fn from_captures(role: PatternRole, caps: &Captures<'_>) -> Self {
        let text = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());
        Self {
            role,
            title: caps
                .name("title")
                .map(|m| clean_title(m.as_str()))
                .unwrap_or_default(),
            code: text("code"),
            grade: text("grade"),
            credits: caps.name("credits").and_then(|m| m.as_str().parse().ok()),
            semester: caps.name("semester").and_then(|m| m.as_str().parse().ok()),
            tag: text("tag"),
        }
    }
}

/// Trim whitespace and separator debris left around a captured title.
fn clean_title(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | '.'));
    cmap_core::text::collapse_whitespace(trimmed)
}

/// Transcript line shapes, in priority order.
pub static TRANSCRIPT_PATTERNS: LazyLock<Vec<CompositePattern>> = LazyLock::new(|| {
    use PatternRole::{
        CodeDashTitleGrade, CodeTitleCreditsGrade, CodeTitleGrade, FullCourseWithCredits,
        TitleCreditsGrade, TitleDashGrade, TitleGrade, TitleParenCreditsGrade,
        TitleParentheticalGrade, TitlePipeGrade,
    };
    vec![
        CompositePattern::new(
            FullCourseWithCredits,
            &format!(
                r"^(?P<code>{CODE})\s*-\s*(?P<title>{DELIMITED_TITLE})\s*\(\s*(?P<credits>{NUMBER})\s*{CREDIT_UNIT}\s*\)\s*(?P<grade>{GRADE})$"
            ),
        ),
        CompositePattern::new(
            CodeTitleCreditsGrade,
            &format!(
                r"^(?P<code>{CODE})\s+(?P<title>{PLAIN_TITLE})\s+(?P<credits>{NUMBER})\s+(?P<grade>{GRADE})$"
            ),
        ),
        CompositePattern::new(
            CodeDashTitleGrade,
            &format!(
                r"^(?P<code>{CODE})\s*-\s*(?P<title>{DELIMITED_TITLE})\s+(?P<grade>{GRADE})$"
            ),
        ),
        CompositePattern::new(
            CodeTitleGrade,
            &format!(r"^(?P<code>{CODE})\s+(?P<title>{PLAIN_TITLE})\s+(?P<grade>{GRADE})$"),
        ),
        CompositePattern::new(
            TitleParenCreditsGrade,
            &format!(
                r"^(?P<title>{DELIMITED_TITLE})\s*\(\s*(?P<credits>{NUMBER})\s*{CREDIT_UNIT}\s*\)\s*(?P<grade>{LETTER_GRADE})$"
            ),
        ),
        CompositePattern::new(
            TitleCreditsGrade,
            &format!(
                r"^(?P<title>{PLAIN_TITLE})\s+(?P<credits>{NUMBER})\s+(?P<grade>{LETTER_GRADE})$"
            ),
        ),
        CompositePattern::new(
            TitleParentheticalGrade,
            &format!(r"^(?P<title>{PLAIN_TITLE})\s*\(\s*(?P<grade>{LETTER_GRADE})\s*\)$"),
        ),
        CompositePattern::new(
            TitlePipeGrade,
            &format!(r"^(?P<title>{PLAIN_TITLE})\s*\|\s*(?P<grade>{LETTER_GRADE})$"),
        ),
        CompositePattern::new(
            TitleDashGrade,
            &format!(r"^(?P<title>{PLAIN_TITLE})\s+-\s+(?P<grade>{LETTER_GRADE})$"),
        ),
        CompositePattern::new(
            TitleGrade,
            &format!(r"^(?P<title>{PLAIN_TITLE})\s+(?P<grade>{LETTER_GRADE})$"),
        ),
    ]
});

/// Curriculum line shapes, in priority order. None of them carry a grade.
pub static CURRICULUM_PATTERNS: LazyLock<Vec<CompositePattern>> = LazyLock::new(|| {
    use PatternRole::{
        CodeDashTitle, CodeSpaceTitle, CodeSpaceTitleCredits, CodeTitleCreditsTag,
        NumberedTitle, SemesterCodeTitle, TitleCreditsTag,
    };
    let credits = format!(r"\s*\(\s*(?P<credits>{NUMBER})\s*{CREDIT_UNIT}\s*\)");
    let tag = format!(r"(?:\s*\[(?P<tag>{TAG})\])?");
    vec![
        CompositePattern::new(
            SemesterCodeTitle,
            &format!(
                r"^(?i:semester|sem)\.?\s*(?P<semester>\d{{1,2}})\s*[:.]\s*(?P<code>{CODE})\s*-\s*(?P<title>{DELIMITED_TITLE})(?:{credits})?{tag}$"
            ),
        ),
        CompositePattern::new(
            CodeTitleCreditsTag,
            &format!(r"^(?P<code>{CODE})\s*-\s*(?P<title>{DELIMITED_TITLE}){credits}{tag}$"),
        ),
        CompositePattern::new(
            CodeSpaceTitleCredits,
            &format!(r"^(?P<code>{CODE})\s+(?P<title>{DELIMITED_TITLE}){credits}{tag}$"),
        ),
        CompositePattern::new(
            TitleCreditsTag,
            &format!(r"^(?P<title>{DELIMITED_TITLE}){credits}{tag}$"),
        ),
        CompositePattern::new(
            CodeDashTitle,
            &format!(r"^(?P<code>{CODE})\s*-\s*(?P<title>{DELIMITED_TITLE}){tag}$"),
        ),
        CompositePattern::new(
            CodeSpaceTitle,
            &format!(r"^(?P<code>{CODE})\s+(?P<title>{PLAIN_TITLE}){tag}$"),
        ),
        CompositePattern::new(
            NumberedTitle,
            &format!(r"^\d+[.)]\s*(?P<title>{PLAIN_TITLE}){tag}$"),
        ),
    ]
});

/// Minimum title length (exclusive) for a pattern to claim a line.
const MIN_TITLE_CHARS: usize = 3;

/// Try `patterns` in order; the first match with a usable title wins the line.
#[must_use]
pub fn first_match(patterns: &[CompositePattern], line: &str) -> Option<LineMatch> {
    for pattern in patterns {
        let Some(caps) = pattern.regex.captures(line) else {
            continue;
        };
        let matched = LineMatch::from_captures(pattern.role, &caps);
        if matched.title.chars().count() > MIN_TITLE_CHARS {
            tracing::debug!(role = %pattern.role, line, "pattern matched");
            return Some(matched);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(TRANSCRIPT_PATTERNS.len(), 10);
        assert_eq!(CURRICULUM_PATTERNS.len(), 7);
    }

    #[test]
    fn full_course_with_credits() {
        let m = first_match(
            &TRANSCRIPT_PATTERNS,
            "CS101 - Intro to Programming (3 credits) A",
        )
        .unwrap();
        assert_eq!(m.role, PatternRole::FullCourseWithCredits);
        assert_eq!(m.code.as_deref(), Some("CS101"));
        assert_eq!(m.title, "Intro to Programming");
        assert_eq!(m.credits, Some(3.0));
        assert_eq!(m.grade.as_deref(), Some("A"));
    }

    #[rstest]
    #[case("CS201 Data Structures 4 A-", PatternRole::CodeTitleCreditsGrade, "Data Structures", "A-")]
    #[case("CS101 - Intro to Programming B+", PatternRole::CodeDashTitleGrade, "Intro to Programming", "B+")]
    #[case("MA 102 Calculus II A", PatternRole::CodeTitleGrade, "Calculus II", "A")]
    #[case("CS301 Operating Systems 3.7", PatternRole::CodeTitleGrade, "Operating Systems", "3.7")]
    #[case("Linear Algebra (4 credits) B+", PatternRole::TitleParenCreditsGrade, "Linear Algebra", "B+")]
    #[case("Linear Algebra 4 B", PatternRole::TitleCreditsGrade, "Linear Algebra", "B")]
    #[case("Linear Algebra (B)", PatternRole::TitleParentheticalGrade, "Linear Algebra", "B")]
    #[case("Linear Algebra | B", PatternRole::TitlePipeGrade, "Linear Algebra", "B")]
    #[case("Linear Algebra - B", PatternRole::TitleDashGrade, "Linear Algebra", "B")]
    #[case("Linear Algebra B", PatternRole::TitleGrade, "Linear Algebra", "B")]
    fn transcript_roles(
        #[case] line: &str,
        #[case] role: PatternRole,
        #[case] title: &str,
        #[case] grade: &str,
    ) {
        let m = first_match(&TRANSCRIPT_PATTERNS, line).unwrap();
        assert_eq!(m.role, role, "line {line:?}");
        assert_eq!(m.title, title);
        assert_eq!(m.grade.as_deref(), Some(grade));
    }

    #[test]
    fn short_titles_do_not_claim_the_line() {
        assert!(first_match(&TRANSCRIPT_PATTERNS, "Art A").is_none());
    }

    #[test]
    fn gpa_summary_is_not_a_course() {
        assert!(first_match(&TRANSCRIPT_PATTERNS, "Cumulative GPA 3.75").is_none());
    }

    #[rstest]
    #[case("Semester 2: CS201 - Data Structures", PatternRole::SemesterCodeTitle, Some("CS201"), "Data Structures")]
    #[case("CS201 - Data Structures (4 credits) [Core]", PatternRole::CodeTitleCreditsTag, Some("CS201"), "Data Structures")]
    #[case("CS201 Data Structures (4 credits)", PatternRole::CodeSpaceTitleCredits, Some("CS201"), "Data Structures")]
    #[case("Data Structures (4 credits) [Elective]", PatternRole::TitleCreditsTag, None, "Data Structures")]
    #[case("CS201 - Data Structures", PatternRole::CodeDashTitle, Some("CS201"), "Data Structures")]
    #[case("CS201 Data Structures", PatternRole::CodeSpaceTitle, Some("CS201"), "Data Structures")]
    #[case("3. Data Structures", PatternRole::NumberedTitle, None, "Data Structures")]
    fn curriculum_roles(
        #[case] line: &str,
        #[case] role: PatternRole,
        #[case] code: Option<&str>,
        #[case] title: &str,
    ) {
        let m = first_match(&CURRICULUM_PATTERNS, line).unwrap();
        assert_eq!(m.role, role, "line {line:?}");
        assert_eq!(m.code.as_deref(), code);
        assert_eq!(m.title, title);
    }

    #[test]
    fn semester_line_carries_semester() {
        let m = first_match(&CURRICULUM_PATTERNS, "Semester 2: CS201 - Data Structures").unwrap();
        assert_eq!(m.semester, Some(2));
    }

    #[test]
    fn tag_is_captured() {
        let m = first_match(
            &CURRICULUM_PATTERNS,
            "HS101 - Ethics in Technology (2 credits) [Elective]",
        )
        .unwrap();
        assert_eq!(m.tag.as_deref(), Some("Elective"));
        assert_eq!(m.credits, Some(2.0));
    }

    #[test]
    fn semester_marker_and_code_helpers() {
        let caps = SEMESTER_MARKER.captures("Semester 3").unwrap();
        assert_eq!(&caps["semester"], "3");
        assert!(SEMESTER_MARKER.captures("Semester 3: CS201").is_none());
        assert_eq!(&COURSE_CODE.captures("Took CS 301 last").unwrap()[1], "CS 301");
        assert_eq!(&TRAILING_GRADE.captures("Something B+").unwrap()[1], "B+");
    }
}
