//! Grade Model selection.

use serde::{Deserialize, Serialize};

fn default_institution() -> String {
    "default".to_string()
}

fn default_threshold() -> String {
    "C".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradingConfig {
    /// Institution key selecting the grade table (`default`, `plaksha`, ...).
    /// Unknown keys fall back to `default`.
    #[serde(default = "default_institution")]
    pub institution: String,

    /// Minimum grade a transcript course needs to be kept.
    #[serde(default = "default_threshold")]
    pub threshold: String,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            threshold: default_threshold(),
        }
    }
}
