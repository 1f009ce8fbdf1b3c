//! Value objects produced and consumed within a single coursemap run.
//!
//! None of these carry identity: they are created by the extractor or the matcher,
//! handed to the next stage, and dropped. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema validation.

mod course;
mod gap;
mod grade;
mod matching;

pub use course::{CurriculumCourse, ExtractedCourse, MIN_TITLE_CHARS};
pub use gap::{FutureChallenge, GapCourse, GapReport, Recommendation, UNASSESSED_REASON};
pub use grade::GradeResult;
pub use matching::{
    BestCandidate, MatchCandidate, MatchReport, MatchResult, MatchStats, MatchedCourse,
    MatchingHighlights, ScoreBreakdown, SimilarityBreakdown, UnmatchedCourse,
};
