//! Line cleanup before pattern matching.
//!
//! Folds dashes, drops non-ASCII artifacts, undoes the common OCR confusables
//! (`|` for `I`, `0` for `O`), and removes short, header, and noise lines.

use std::sync::LazyLock;

use cmap_core::text::alphanumeric_ratio;
use regex::RegexSet;

/// Lines of this many characters or fewer carry no course.
const MIN_LINE_CHARS: usize = 3;

/// Exact document headers. A line has to be the header and nothing else.
static HEADERS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^academic transcript$",
        r"(?i)^student name:$",
        r"(?i)^roll number:$",
        r"(?i)^program:$",
        r"(?i)^semester:$",
        r"(?i)^total credits:$",
        r"(?i)^gpa:$",
        r"(?i)^grade point average:$",
        r"(?i)^university:$",
        r"(?i)^college:$",
        r"(?i)^department:$",
        r"(?i)^date:$",
        r"(?i)^signature:$",
        r"(?i)^official transcript$",
        r"(?i)^course completion record$",
        r"(?i)^transcript of records$",
    ])
    .expect("valid header patterns")
});

/// Split `text` into cleaned candidate lines.
#[must_use]
pub fn preprocess(text: &str, min_alphanumeric_ratio: f64) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|line| line.len() > MIN_LINE_CHARS)
        .filter(|line| {
            if HEADERS.is_match(line) {
                tracing::debug!(line, "skipping header line");
                return false;
            }
            if alphanumeric_ratio(line) < min_alphanumeric_ratio {
                tracing::debug!(line, "skipping low alphanumeric line");
                return false;
            }
            true
        })
        .collect()
}

/// Clean a single line: dash folding, confusables, non-ASCII removal, trim.
#[must_use]
pub fn clean_line(line: &str) -> String {
    let chars: Vec<char> = line
        .chars()
        .map(|c| match c {
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            other => other,
        })
        .filter(char::is_ascii)
        .collect();

    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
        let next = chars.get(i + 1).copied();
        let between_letters = prev.is_some_and(|p| p.is_ascii_alphabetic())
            && next.is_some_and(|n| n.is_ascii_alphabetic());
        match c {
            '|' if between_letters || next.is_some_and(|n| n.is_ascii_lowercase()) => out.push('I'),
            '0' if between_letters => out.push('O'),
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}
