//! TF-IDF weighting over a reference corpus.
//!
//! `idf(term) = ln(N / (1 + df(term)))`; terms absent from the corpus weigh 0. A term
//! present in every document gets a slightly negative weight, which still contributes
//! to cosine similarity.
//!
//! A term found in exactly `N - 1` documents also weighs 0. With a two-document corpus
//! that covers every term appearing in only one document, so a description built from
//! such terms has a zero vector and scores 0 even against itself. Rankings over tiny
//! reference lists lean on the other signals.

use std::collections::{HashMap, HashSet};

use cmap_core::text::normalize_text;

/// Sparse term → weight vector.
pub type TfidfVector = HashMap<String, f64>;

fn words(text: &str) -> Vec<String> {
    normalize_text(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Inverse document frequencies of a fixed corpus.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    idf: HashMap<String, f64>,
    documents: usize,
}

impl IdfTable {
    /// Document frequencies of `corpus`. See the module docs for the `df = N - 1` case.
    #[must_use]
    pub fn from_corpus<'a>(corpus: impl IntoIterator<Item = &'a str>) -> Self {
        let mut df: HashMap<String, usize> = HashMap::new();
        let mut documents = 0;
        for doc in corpus {
            documents += 1;
            let unique: HashSet<String> = words(doc).into_iter().collect();
            for word in unique {
                *df.entry(word).or_insert(0) += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let idf = df
            .into_iter()
            .map(|(term, freq)| {
                let weight = (documents as f64 / (1.0 + freq as f64)).ln();
                (term, weight)
            })
            .collect();
        Self { idf, documents }
    }

    #[must_use]
    pub const fn documents(&self) -> usize {
        self.documents
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Term frequency (count / document length) times IDF, per distinct term.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weigh(&self, doc: &str) -> TfidfVector {
        let words = words(doc);
        if words.is_empty() {
            return TfidfVector::new();
        }
        let mut tf: HashMap<String, usize> = HashMap::new();
        for word in &words {
            *tf.entry(word.clone()).or_insert(0) += 1;
        }
        let len = words.len() as f64;
        tf.into_iter()
            .map(|(term, count)| {
                let weight = (count as f64 / len) * self.idf(&term);
                (term, weight)
            })
            .collect()
    }
}

/// Cosine similarity of two sparse vectors; 0 when either norm is 0.
#[must_use]
pub fn cosine(a: &TfidfVector, b: &TfidfVector) -> f64 {
    let dot: f64 = a
        .iter()
        .map(|(term, wa)| wa * b.get(term).copied().unwrap_or(0.0))
        .sum();
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
