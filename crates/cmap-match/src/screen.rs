//! Heuristics that explain why a title is not a course.
//!
//! These never decide a match on their own except [`is_likely_non_course`], which the
//! matcher applies before any similarity scoring so that headers such as `Page 2` are
//! rejected regardless of what they happen to resemble.

use std::sync::LazyLock;

use regex::RegexSet;

/// Matched against the lowercased title.
static NON_COURSE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^(page|p\.?)\s*\d+",
        r"^(semester|sem)\s*\d+",
        r"^(year|yr)\s*\d+",
        r"^(total|sum|grand)",
        r"^(credits?|units?|hours?)\s*:",
        r"^(gpa|grade point)",
        r"^(transcript|record|report)",
        r"^(student|name|id)",
        r"^(university|college|school)",
        r"^(date|issued|printed)",
        r"^\d+\.\d+$",
        r"^[a-z]\s*$",
        r"^(and|or|the|of|in|on|at|to|for|with|by)$",
    ])
    .expect("valid non-course patterns")
});

/// Matched against the title as written.
static INVALID_FORMATTING: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^\d+$",
        r"^[A-Z]\s*$",
        r"^\.+$",
        r"^-+$",
        r"^\s*$",
        // truncated prefixes: "Tech in Computer ..."
        r"(?i)^(tech|comp|sci|math|eng)\s+(in|and|or|of)\s+",
    ])
    .expect("valid formatting patterns")
});

/// Titles shorter than this are reported as too short.
pub const MIN_TITLE_CHARS: usize = 5;

/// Page numbers, section headers, totals, student and institution metadata.
#[must_use]
pub fn is_likely_non_course(title: &str) -> bool {
    NON_COURSE.is_match(&title.trim().to_lowercase())
}

#[must_use]
pub fn is_too_short(title: &str) -> bool {
    title.trim().chars().count() < MIN_TITLE_CHARS
}

/// Bare numbers, dots, dashes, single letters, truncated subject prefixes.
#[must_use]
pub fn has_invalid_formatting(title: &str) -> bool {
    INVALID_FORMATTING.is_match(title.trim())
}
