//! # cmap-match
//!
//! Decides, for each extracted course, whether it corresponds to a reference course.
//!
//! - [`Matcher`] runs the exact-code → exact-title → fuzzy-title → partial-keyword
//!   cascade and explains every rejection with a [`RejectionReason`](cmap_core::enums::RejectionReason).
//! - [`UncertainReview`] asks a [`CourseVerifier`](cmap_core::collaborators::CourseVerifier)
//!   about low-similarity rejections.
//! - [`analyze_gaps`] compares matched courses with program requirements and produces
//!   template recommendations; [`analyze_gaps_with_forecast`] also asks a
//!   [`DifficultyAssessor`](cmap_core::collaborators::DifficultyAssessor) about later courses.
//! - [`InMemoryCatalog`] is a [`CurriculumSource`](cmap_core::collaborators::CurriculumSource)
//!   over a list of reference courses.
//!
//! Every source course ends up in exactly one of `matched` or `unmatched`.

mod catalog;
mod error;
pub mod gaps;
mod matcher;
pub mod screen;
mod verify;

pub use catalog::{InMemoryCatalog, load_references};
pub use error::MatchError;
pub use gaps::{
    analyze_gaps, analyze_gaps_with_forecast, forecast_challenges, priority_of, recommend,
};
pub use matcher::{
    EXACT_CODE_SCORE, EXACT_TITLE_SCORE, MatchOptions, Matcher, enrich, match_to_reference,
};
pub use verify::{UncertainReview, VERIFY_BATCH_DELAY, VERIFY_BATCH_SIZE};
