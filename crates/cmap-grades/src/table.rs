//! Grade-value and threshold tables per institution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest value on the scale (`A+`).
pub const MAX_GRADE_POINT: f64 = 4.3;

/// Letter → grade point. `P` counts as full credit; `U`, `I`, `W` carry no points.
/// `S` is deliberately absent.
const STANDARD_SCALE: &[(&str, f64)] = &[
    ("A+", 4.3),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
    ("P", 4.0),
    ("U", 0.0),
    ("I", 0.0),
    ("W", 0.0),
];

/// Minimum grade point that counts as reaching each letter band.
const STANDARD_THRESHOLDS: &[(&str, f64)] = &[("A", 3.7), ("B", 3.0), ("C", 2.0), ("D", 1.0)];

/// Institution whose grade table is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Institution {
    #[default]
    Default,
    Plaksha,
}

impl Institution {
    /// Resolve a configuration key. Unknown keys map to [`Self::Default`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "plaksha" => Self::Plaksha,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Plaksha => "plaksha",
        }
    }

    pub(crate) const fn scale(self) -> &'static [(&'static str, f64)] {
        match self {
            // Plaksha reports on the standard letter scale.
            Self::Default | Self::Plaksha => STANDARD_SCALE,
        }
    }

    pub(crate) const fn thresholds(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Default | Self::Plaksha => STANDARD_THRESHOLDS,
        }
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
