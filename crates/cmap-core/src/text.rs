//! Text normalization and content hashing.
//!
//! Every comparison in the pipeline goes through one of the normalizers here so that
//! "Intro to Programming", "intro  to programming" and "Intro to Programming." compare
//! equal where they should. [`content_hash`] keys the similarity caches.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Lowercase, replace punctuation with spaces, collapse whitespace.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&replaced)
}

/// Lowercase and collapse whitespace, keeping punctuation. Used for title deduplication.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    collapse_whitespace(&title.to_lowercase())
}

/// Uppercase with whitespace and hyphens removed, so `cs 101`, `CS-101` and `CS101` agree.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Share of characters that are ASCII alphanumeric; 0 for empty text.
#[must_use]
pub fn alphanumeric_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let alnum = text.chars().filter(char::is_ascii_alphanumeric).count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = alnum as f64 / total as f64;
    ratio
}

/// Hash of the normalized text: equal after [`normalize_text`] means equal key.
#[must_use]
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    normalize_text(text).hash(&mut hasher);
    hasher.finish()
}

/// Order-sensitive key for a pair of texts.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> (u64, u64) {
    (content_hash(a), content_hash(b))
}
