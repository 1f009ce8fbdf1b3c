//! Grade normalization and threshold comparison.

use cmap_core::entities::GradeResult;

use crate::table::{Institution, MAX_GRADE_POINT, lookup};

/// Grade token reserved for rejection under every institution.
const RESERVED_REJECTION: &str = "S";

/// The Grade Model for one institution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeModel {
    institution: Institution,
}

impl GradeModel {
    #[must_use]
    pub const fn new(institution: Institution) -> Self {
        Self { institution }
    }

    /// Model for a configuration key; unknown keys use the default table.
    #[must_use]
    pub fn for_institution(key: &str) -> Self {
        Self::new(Institution::from_key(key))
    }

    #[must_use]
    pub const fn institution(&self) -> Institution {
        self.institution
    }

    /// Map a grade token onto the scale.
    ///
    /// Letter grades are trimmed, uppercased, and have inner whitespace removed
    /// (`"b +"` → `"B+"`). Numeric GPA strings within `[0, 4.3]` keep their text and
    /// take their own value. `S` normalizes to `"S"` but is never valid. Anything else
    /// passes through unmapped with value 0.
    #[must_use]
    pub fn normalize(&self, grade: &str) -> GradeResult {
        let compact: String = grade
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if let Some(value) = parse_numeric(&compact) {
            return GradeResult {
                normalized_grade: compact,
                numeric_value: value,
                is_valid: value > 0.0,
            };
        }

        if compact == RESERVED_REJECTION {
            tracing::debug!(grade, "reserved grade rejected");
            return GradeResult::invalid(compact);
        }

        match lookup(self.institution.scale(), &compact) {
            Some(value) => {
                let is_valid = value > 0.0 || compact == "P";
                GradeResult {
                    normalized_grade: compact,
                    numeric_value: value,
                    is_valid,
                }
            }
            None => GradeResult::invalid(compact),
        }
    }

    /// True when `grade` is worth at least as much as `threshold`.
    #[must_use]
    pub fn meets_threshold(&self, grade: &str, threshold: &str) -> bool {
        self.normalize(grade).numeric_value >= self.normalize(threshold).numeric_value
    }

    /// Valid and at or above `threshold`: the acceptance rule for extracted courses.
    #[must_use]
    pub fn accepts(&self, grade: &str, threshold: &str) -> bool {
        self.normalize(grade).is_valid && self.meets_threshold(grade, threshold)
    }

    /// Minimum grade point for a letter band (`A`, `B`, `C`, `D`).
    #[must_use]
    pub fn threshold_default(&self, letter: &str) -> Option<f64> {
        lookup(
            self.institution.thresholds(),
            &letter.trim().to_ascii_uppercase(),
        )
    }

    /// Nearest letter at or below a grade point.
    #[must_use]
    pub fn to_letter(numeric: f64) -> &'static str {
        const BANDS: &[(f64, &str)] = &[
            (MAX_GRADE_POINT, "A+"),
            (3.7, "A"),
            (3.3, "B+"),
            (3.0, "B"),
            (2.7, "B-"),
            (2.3, "C+"),
            (2.0, "C"),
            (1.7, "C-"),
            (1.3, "D+"),
            (1.0, "D"),
            (0.7, "D-"),
        ];
        BANDS
            .iter()
            .find(|(floor, _)| numeric >= *floor)
            .map_or("F", |(_, letter)| letter)
    }
}

/// Parse a plain decimal GPA string within the scale.
fn parse_numeric(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !first.is_ascii_digit() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    (0.0..=MAX_GRADE_POINT).contains(&value).then_some(value)
}
