//! # cmap-grades
//!
//! The Grade Model: a canonical letter-grade table on a 4.3-point scale, format
//! normalization, validation, and threshold comparison.
//!
//! Tables are keyed by an [`Institution`]; unknown institution keys fall back to
//! [`Institution::Default`] silently. Nothing here returns an error: unparseable input
//! yields `is_valid = false` with a numeric value of 0, and callers filter on
//! [`GradeResult::is_valid`](cmap_core::entities::GradeResult) or
//! [`GradeModel::meets_threshold`].
//!
//! `S` is a reserved rejection under every institution.

mod gpa;
mod model;
mod table;

pub use model::GradeModel;
pub use table::Institution;
