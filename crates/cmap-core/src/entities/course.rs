use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ExtractionMethod;
use crate::errors::CoreError;

/// Shortest title a course record may carry.
pub const MIN_TITLE_CHARS: usize = 4;

/// A course recovered from transcript text.
///
/// `title` is at least four characters and `grade` has passed Grade Model
/// validation before a record leaves the extractor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractedCourse {
    pub title: String,
    pub description: String,
    pub grade: String,
    pub credits: Option<f64>,
    pub semester: Option<u32>,
    pub code: Option<String>,
    /// In `[0, 1]`; see [`ExtractionMethod::default_confidence`].
    pub confidence: f64,
    pub extraction_method: ExtractionMethod,
}

impl ExtractedCourse {
    /// A manually entered course with full confidence and no optional fields.
    #[must_use]
    pub fn manual(title: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            grade: grade.into(),
            credits: None,
            semester: None,
            code: None,
            confidence: ExtractionMethod::Manual.default_confidence(),
            extraction_method: ExtractionMethod::Manual,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_credits(mut self, credits: f64) -> Self {
        self.credits = Some(credits);
        self
    }

    /// The text used for description-level similarity: the description when present,
    /// the title otherwise.
    #[must_use]
    pub fn match_text(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.title
        } else {
            &self.description
        }
    }

    /// Check the record invariants for courses that arrive from outside the extractor.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] when the title is shorter than [`MIN_TITLE_CHARS`] or
    /// the confidence lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().chars().count() < MIN_TITLE_CHARS {
            return Err(CoreError::Validation(format!(
                "title {:?} is shorter than {MIN_TITLE_CHARS} characters",
                self.title
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::Validation(format!(
                "confidence {} of {:?} is outside [0, 1]",
                self.confidence, self.title
            )));
        }
        Ok(())
    }
}

/// A reference course from a curriculum or course catalog. Read-only for a matching run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CurriculumCourse {
    pub code: String,
    pub title: String,
    pub description: String,
    pub credits: Option<f64>,
    pub is_required: bool,
    pub semester: Option<u32>,
}

impl CurriculumCourse {
    #[must_use]
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: String::new(),
            credits: None,
            is_required: true,
            semester: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    #[must_use]
    pub const fn elective(mut self) -> Self {
        self.is_required = false;
        self
    }

    #[must_use]
    pub fn match_text(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}
