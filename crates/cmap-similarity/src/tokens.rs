//! Tokenizers shared by the lexical scorer, the keyword scorer and highlights.

use cmap_core::text::normalize_text;

/// English function words plus words every generated description carries.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from", "up",
    "about", "into", "through", "during", "before", "after", "above", "below", "between", "among",
    "within", "without", "against", "toward", "towards", "upon", "across", "behind", "beneath",
    "beside", "beyond", "inside", "outside", "under", "over", "this", "that", "these", "those",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall", "extracted",
    "transcript", "curriculum", "requirement",
];

/// Academic filler that says nothing about a course's subject.
pub const KEYWORD_STOP_WORDS: &[&str] = &[
    "introduction",
    "advanced",
    "fundamentals",
    "principles",
    "theory",
    "practice",
    "course",
    "study",
    "analysis",
    "design",
    "systems",
    "methods",
    "applications",
    "basic",
    "intermediate",
];

/// Tokens longer than two characters, in order, after [`normalize_text`].
fn significant(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Content tokens with [`STOP_WORDS`] removed. Order and repeats are kept.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    significant(text)
        .into_iter()
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Subject keywords of a title with [`KEYWORD_STOP_WORDS`] removed.
#[must_use]
pub fn keywords(text: &str) -> Vec<String> {
    significant(text)
        .into_iter()
        .filter(|w| !KEYWORD_STOP_WORDS.contains(&w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_drops_short_and_stop_words() {
        assert_eq!(
            tokenize("Introduction to the Theory of Computation (extracted)"),
            vec!["introduction", "theory", "computation"]
        );
    }

    #[test]
    fn keywords_drop_academic_filler() {
        assert_eq!(
            keywords("Advanced Design of Operating Systems"),
            vec!["operating"]
        );
        assert!(keywords("Introduction to AI").is_empty());
    }
}
