//! Extractor tuning.

use serde::{Deserialize, Serialize};

const fn default_min_alphanumeric_ratio() -> f64 {
    0.2
}

/// A typical transcript has about this many courses; fewer pattern hits trigger the
/// fuzzy pass.
const fn default_expected_course_count() -> usize {
    16
}

const fn default_ai_min_unprocessed_chars() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Lines with a lower share of alphanumeric characters are dropped as noise.
    #[serde(default = "default_min_alphanumeric_ratio")]
    pub min_alphanumeric_ratio: f64,

    #[serde(default = "default_expected_course_count")]
    pub expected_course_count: usize,

    /// Unprocessed text must exceed this many characters before AI extraction runs.
    #[serde(default = "default_ai_min_unprocessed_chars")]
    pub ai_min_unprocessed_chars: usize,

    #[serde(default)]
    pub ai_enabled: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_alphanumeric_ratio: default_min_alphanumeric_ratio(),
            expected_course_count: default_expected_course_count(),
            ai_min_unprocessed_chars: default_ai_min_unprocessed_chars(),
            ai_enabled: false,
        }
    }
}
