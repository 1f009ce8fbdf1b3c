use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output of Grade Model normalization. Never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GradeResult {
    pub normalized_grade: String,
    /// On the 4.3-point scale.
    pub numeric_value: f64,
    pub is_valid: bool,
}

impl GradeResult {
    /// An unrecognized or rejected token: passes through with value 0.
    #[must_use]
    pub fn invalid(normalized_grade: impl Into<String>) -> Self {
        Self {
            normalized_grade: normalized_grade.into(),
            numeric_value: 0.0,
            is_valid: false,
        }
    }
}
