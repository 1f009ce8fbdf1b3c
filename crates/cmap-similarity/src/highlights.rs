//! Terms two matched descriptions share, for reviewers.

use std::collections::{HashMap, HashSet};

use cmap_core::entities::MatchingHighlights;

use crate::tokens::tokenize;

const MAX_HIGHLIGHTS: usize = 10;
/// Above this fused score every shared term is worth showing.
const HIGH_SIMILARITY: f64 = 0.3;

/// Subject words that are always worth highlighting.
const MEANINGFUL_WORDS: &[&str] = &[
    // core subjects
    "engineering", "physics", "computer", "science", "mathematics", "calculus", "programming",
    "data", "structure", "algorithm", "database", "network", "software", "system", "design",
    "analysis", "management", "development", "technology", "information",
    // economics and business
    "economics", "finance", "accounting", "marketing", "business", "strategy", "market",
    "investment", "trade", "commerce", "entrepreneurship",
    // engineering disciplines
    "mechanical", "electrical", "civil", "chemical", "biomedical", "aerospace", "industrial",
    "environmental", "materials", "nuclear", "petroleum", "mining",
    // computing
    "artificial", "intelligence", "machine", "learning", "deep", "neural", "cybersecurity",
    "blockchain", "cloud", "computing", "web", "mobile", "application",
    // mathematics and statistics
    "statistics", "probability", "linear", "algebra", "geometry", "trigonometry", "differential",
    "integral", "optimization", "numerical", "discrete", "continuous",
    // physical sciences
    "thermodynamics", "mechanics", "dynamics", "kinematics", "optics", "electromagnetism",
    "quantum", "atomic", "molecular", "organic", "inorganic", "biochemistry",
    // general academic
    "research", "methodology", "theory", "practice", "laboratory", "experiment", "project",
    "thesis", "dissertation", "seminar", "workshop", "tutorial",
];

/// Shared content terms of `source` and `target`, in source order, at most ten.
///
/// A shared term is kept when the match scored above 0.3, when it is a recognized
/// subject word, or when it repeats in the source description. Both sides of the
/// result carry the same term list.
#[must_use]
pub fn matching_highlights(source: &str, target: &str, score: f64) -> MatchingHighlights {
    let source_tokens = tokenize(source);
    let target_tokens: HashSet<String> = tokenize(target).into_iter().collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for token in &source_tokens {
        *frequency.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    let terms: Vec<String> = source_tokens
        .iter()
        .filter(|t| target_tokens.contains(*t) && seen.insert(t.as_str()))
        .filter(|t| {
            score > HIGH_SIMILARITY
                || MEANINGFUL_WORDS.contains(&t.as_str())
                || frequency.get(t.as_str()).copied().unwrap_or(0) > 1
        })
        .take(MAX_HIGHLIGHTS)
        .cloned()
        .collect();

    MatchingHighlights {
        source_highlights: terms.clone(),
        target_highlights: terms,
    }
}
