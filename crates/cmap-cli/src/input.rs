//! Reading transcripts and reference lists from disk.
//!
//! A `.json` file is taken as already-extracted records; anything else is OCR text
//! that goes through the extractor.

use std::path::Path;

use anyhow::Context;
use cmap_core::entities::{CurriculumCourse, ExtractedCourse};
use cmap_extract::Extractor;

use crate::context::AppContext;

pub fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Transcript courses from a JSON file or extracted from text with the configured
/// grade threshold and institution.
pub fn load_transcript(path: &Path, ctx: &AppContext) -> anyhow::Result<Vec<ExtractedCourse>> {
    if is_json(path) {
        let courses: Vec<ExtractedCourse> = read_json(path)?;
        for course in &courses {
            course
                .validate()
                .with_context(|| format!("invalid course record in {}", path.display()))?;
        }
        return Ok(courses);
    }
    let text = read_text(path)?;
    let grading = &ctx.config.grading;
    Extractor::new(ctx.config.extraction.clone())
        .extract_courses(&text, &grading.threshold, &grading.institution)
        .with_context(|| format!("no courses could be read from {}", path.display()))
}

/// Reference courses from a JSON file or extracted from curriculum text.
pub fn load_reference(path: &Path, ctx: &AppContext) -> anyhow::Result<Vec<CurriculumCourse>> {
    if is_json(path) {
        return read_json(path);
    }
    let text = read_text(path)?;
    Extractor::new(ctx.config.extraction.clone())
        .extract_curriculum(&text)
        .with_context(|| format!("no courses could be read from {}", path.display()))
}
