//! Matcher thresholds.

use serde::{Deserialize, Serialize};

const fn default_threshold() -> f64 {
    0.3
}

const fn default_matching_partial_factor() -> f64 {
    0.7
}

const fn default_verification_partial_factor() -> f64 {
    0.8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Minimum lexical similarity for a fuzzy title match.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Partial matches need `factor * threshold` keyword similarity in matching mode.
    #[serde(default = "default_matching_partial_factor")]
    pub matching_partial_factor: f64,

    /// Same, in verification mode.
    #[serde(default = "default_verification_partial_factor")]
    pub verification_partial_factor: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            matching_partial_factor: default_matching_partial_factor(),
            verification_partial_factor: default_verification_partial_factor(),
        }
    }
}
