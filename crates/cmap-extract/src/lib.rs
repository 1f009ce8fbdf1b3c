//! # cmap-extract
//!
//! Turns noisy, OCR-derived transcript and curriculum text into course records.
//!
//! - [`preprocess`] cleans lines and drops headers and noise
//! - [`registry`] holds the ordered, role-named pattern lists
//! - [`Extractor`] runs the pattern, fuzzy, and optional AI passes, then filters
//!   by grade and deduplicates
//! - [`describe`] synthesizes descriptions from titles
//!
//! Validation failures never surface as errors: lines that do not parse and courses
//! with unacceptable grades are dropped. The only error is a document with no text.

mod curriculum;
pub mod dedup;
pub mod describe;
mod error;
pub mod fuzzy;
pub mod preprocess;
pub mod registry;
mod transcript;

pub use error::ExtractError;
pub use transcript::{Extractor, MIN_TITLE_CHARS};
