//! Title-level scorers used by the matcher.

use std::collections::HashSet;

use cmap_core::text::normalize_text;

use crate::tokens::{keywords, tokenize};

/// Bonus when one normalized string contains the other.
const SUBSTRING_BONUS: f64 = 0.2;
/// Bonus when the token sets are within 20% of each other in size.
const LENGTH_BONUS: f64 = 0.1;
const LENGTH_RATIO_FLOOR: f64 = 0.8;

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Jaccard similarity of content tokens plus substring and length bonuses, in `[0, 1]`.
///
/// Texts equal after normalization score exactly 1.
#[must_use]
pub fn lexical_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize_text(a);
    let norm_b = normalize_text(b);
    if norm_a == norm_b {
        return 1.0;
    }

    let tokens_a: HashSet<String> = tokenize(a).into_iter().collect();
    let tokens_b: HashSet<String> = tokenize(b).into_iter().collect();
    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 0.0;
    }

    let mut score = jaccard(&tokens_a, &tokens_b);

    let contains = !norm_a.is_empty()
        && !norm_b.is_empty()
        && (norm_a.contains(&norm_b) || norm_b.contains(&norm_a));
    if contains {
        score += SUBSTRING_BONUS;
    }

    let (shorter, longer) = if tokens_a.len() <= tokens_b.len() {
        (tokens_a.len(), tokens_b.len())
    } else {
        (tokens_b.len(), tokens_a.len())
    };
    #[allow(clippy::cast_precision_loss)]
    let ratio = shorter as f64 / longer as f64;
    if ratio >= LENGTH_RATIO_FLOOR {
        score += LENGTH_BONUS;
    }

    score.clamp(0.0, 1.0)
}

/// Jaccard similarity of subject keywords. Two keyword-free titles score 1, one scores 0.
#[must_use]
pub fn keyword_similarity(a: &str, b: &str) -> f64 {
    let keys_a: HashSet<String> = keywords(a).into_iter().collect();
    let keys_b: HashSet<String> = keywords(b).into_iter().collect();
    match (keys_a.is_empty(), keys_b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => jaccard(&keys_a, &keys_b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn identical_after_normalization_is_one() {
        let score = lexical_similarity("Data Structures.", "data  structures");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn abbreviation_scores_jaccard_plus_length_bonus() {
        // {computer, sci, fundamentals} vs {computer, science, fundamentals}: 2/4 + 0.1
        let score =
            lexical_similarity("Computer Sci Fundamentals", "Computer Science Fundamentals");
        assert!((score - 0.6).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn substring_bonus_applies() {
        // {linear, algebra} vs {linear, algebra, applications}: 2/3 + 0.2, ratio 2/3 < 0.8
        let score = lexical_similarity("Linear Algebra", "Linear Algebra Applications");
        assert!((score - (2.0 / 3.0 + 0.2)).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn score_is_clipped() {
        let score = lexical_similarity("Organic Chemistry Lab", "Organic Chemistry Lab II");
        assert!(score <= 1.0);
    }

    #[rstest]
    #[case("", "Calculus")]
    #[case("of the", "Calculus")]
    #[case("Pottery", "Thermodynamics")]
    fn unrelated_or_empty_scores_low(#[case] a: &str, #[case] b: &str) {
        assert!(lexical_similarity(a, b) < 0.2);
    }

    #[rstest]
    #[case("Introduction to Design", "Course Study", 1.0)]
    #[case("Introduction to Design", "Quantum Optics", 0.0)]
    #[case("Quantum Optics", "Advanced Quantum Optics", 1.0)]
    #[case("Quantum Optics", "Quantum Mechanics", 1.0 / 3.0)]
    fn keyword_cases(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert!((keyword_similarity(a, b) - expected).abs() < 1e-9);
    }
}
