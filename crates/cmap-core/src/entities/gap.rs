use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::CurriculumCourse;
use crate::enums::{Difficulty, Priority, RecommendationKind};

/// A required curriculum course with no matched transcript course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GapCourse {
    pub course: CurriculumCourse,
    pub priority: Priority,
}

/// A templated recommendation parameterized by counts and course titles.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub courses: Vec<String>,
}

/// Reason recorded when the difficulty of an upcoming course could not be assessed.
pub const UNASSESSED_REASON: &str = "Unable to assess difficulty";

/// Forecast for a course the student has not reached yet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FutureChallenge {
    pub course: CurriculumCourse,
    pub difficulty: Difficulty,
    pub reason: String,
}

impl FutureChallenge {
    /// `Moderate` with [`UNASSESSED_REASON`], used when the assessor fails.
    #[must_use]
    pub fn unassessed(course: CurriculumCourse) -> Self {
        Self {
            course,
            difficulty: Difficulty::Moderate,
            reason: UNASSESSED_REASON.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GapReport {
    pub gaps: Vec<GapCourse>,
    pub recommendations: Vec<Recommendation>,
    /// Empty unless a difficulty assessor was consulted.
    #[serde(default)]
    pub future_challenges: Vec<FutureChallenge>,
}
