//! Multi-pass transcript extraction.
//!
//! ```text
//! raw text ─▶ preprocess ─▶ pass 1 (patterns, 0.9)
//!                              │ fewer than expected?
//!                              ▼
//!                           pass 2 (fuzzy, 0.7)
//!                              │ enough unprocessed text and an AI extractor?
//!                              ▼
//!                           pass 3 (AI on masked text, 0.6)
//!                              ▼
//!                   grade filter ─▶ dedup ─▶ ExtractedCourse[]
//! ```

use cmap_config::ExtractionConfig;
use cmap_core::collaborators::AiCourseExtractor;
use cmap_core::entities::ExtractedCourse;
use cmap_core::enums::ExtractionMethod;
use cmap_core::pii::mask_pii;
use cmap_grades::GradeModel;

use crate::dedup::dedup_courses;
use crate::describe::basic_description;
use crate::error::ExtractError;
use crate::fuzzy::fuzzy_candidate;
use crate::preprocess::preprocess;
use crate::registry::{TRANSCRIPT_PATTERNS, first_match};

/// Minimum title length that survives extraction.
pub const MIN_TITLE_CHARS: usize = 4;

/// Runs the extraction cascade with one set of tuning values.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

/// Lines after preprocessing plus which of them a pass already turned into a course.
struct LineState {
    lines: Vec<String>,
    processed: Vec<bool>,
}

impl LineState {
    fn new(lines: Vec<String>) -> Self {
        let processed = vec![false; lines.len()];
        Self { lines, processed }
    }

    fn unprocessed(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.processed[*i])
            .map(|(i, line)| (i, line.as_str()))
    }

    fn unprocessed_text(&self) -> String {
        self.unprocessed()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extractor {
    #[must_use]
    pub const fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Passes 1 and 2, then grade filtering and deduplication.
    ///
    /// # Errors
    ///
    /// [`ExtractError::NoExtractableText`] when `raw` is empty or whitespace-only.
    pub fn extract_courses(
        &self,
        raw: &str,
        threshold: &str,
        institution: &str,
    ) -> Result<Vec<ExtractedCourse>, ExtractError> {
        let model = GradeModel::for_institution(institution);
        let (courses, _) = self.run_local_passes(raw, threshold, &model)?;
        Ok(finalize(courses, threshold, &model))
    }

    /// Like [`Self::extract_courses`], with pass 3 delegated to `ai` when enough text
    /// is left unprocessed. Only PII-masked text reaches `ai`; its failures yield no
    /// candidates.
    ///
    /// # Errors
    ///
    /// [`ExtractError::NoExtractableText`] when `raw` is empty or whitespace-only.
    pub async fn extract_courses_with_ai(
        &self,
        raw: &str,
        threshold: &str,
        institution: &str,
        ai: &dyn AiCourseExtractor,
    ) -> Result<Vec<ExtractedCourse>, ExtractError> {
        let model = GradeModel::for_institution(institution);
        let (mut courses, state) = self.run_local_passes(raw, threshold, &model)?;

        let remaining = state.unprocessed_text();
        if remaining.len() > self.config.ai_min_unprocessed_chars {
            let masked = mask_pii(&remaining);
            tracing::info!(chars = masked.len(), "pass 3: ai extraction on masked text");
            match ai.extract_candidates(&masked).await {
                Ok(candidates) => {
                    tracing::info!(count = candidates.len(), "pass 3 candidates");
                    courses.extend(candidates.into_iter().map(into_ai_course));
                }
                Err(error) => tracing::warn!(%error, "ai extraction failed, continuing without it"),
            }
        } else {
            tracing::debug!(chars = remaining.len(), "pass 3 skipped: too little unprocessed text");
        }

        Ok(finalize(courses, threshold, &model))
    }

    fn run_local_passes(
        &self,
        raw: &str,
        threshold: &str,
        model: &GradeModel,
    ) -> Result<(Vec<ExtractedCourse>, LineState), ExtractError> {
        if raw.trim().is_empty() {
            return Err(ExtractError::NoExtractableText);
        }
        let mut state = LineState::new(preprocess(raw, self.config.min_alphanumeric_ratio));
        tracing::debug!(lines = state.lines.len(), "preprocessed transcript");

        let mut courses = pattern_pass(&mut state, threshold, model);
        tracing::info!(count = courses.len(), "pass 1: pattern cascade");

        if courses.len() < self.config.expected_course_count {
            let fuzzy = fuzzy_pass(&mut state, threshold, model);
            tracing::info!(count = fuzzy.len(), "pass 2: fuzzy fallback");
            courses.extend(fuzzy);
        }
        Ok((courses, state))
    }
}

fn pattern_pass(state: &mut LineState, threshold: &str, model: &GradeModel) -> Vec<ExtractedCourse> {
    let mut courses = Vec::new();
    for (i, line) in state.lines.iter().enumerate() {
        let Some(found) = first_match(&TRANSCRIPT_PATTERNS, line) else {
            continue;
        };
        let Some(grade) = found.grade else {
            continue;
        };
        if !model.accepts(&grade, threshold) {
            tracing::debug!(line, grade, threshold, "pattern match rejected by grade");
            continue;
        }
        courses.push(ExtractedCourse {
            description: basic_description(&found.title),
            title: found.title,
            grade,
            credits: found.credits,
            semester: None,
            code: found.code,
            confidence: ExtractionMethod::Pattern.default_confidence(),
            extraction_method: ExtractionMethod::Pattern,
        });
        state.processed[i] = true;
    }
    courses
}

fn fuzzy_pass(state: &mut LineState, threshold: &str, model: &GradeModel) -> Vec<ExtractedCourse> {
    let mut courses = Vec::new();
    let mut claimed = Vec::new();
    for (i, line) in state.unprocessed() {
        let Some(candidate) = fuzzy_candidate(line) else {
            continue;
        };
        if !model.accepts(&candidate.grade, threshold) {
            continue;
        }
        courses.push(ExtractedCourse {
            description: basic_description(&candidate.title),
            title: candidate.title,
            grade: candidate.grade,
            credits: None,
            semester: None,
            code: Some(candidate.code),
            confidence: ExtractionMethod::Fuzzy.default_confidence(),
            extraction_method: ExtractionMethod::Fuzzy,
        });
        claimed.push(i);
    }
    for i in claimed {
        state.processed[i] = true;
    }
    courses
}

fn into_ai_course(mut course: ExtractedCourse) -> ExtractedCourse {
    course.title = cmap_core::text::collapse_whitespace(&course.title);
    if course.description.trim().is_empty() {
        course.description = basic_description(&course.title);
    }
    course.confidence = ExtractionMethod::Ai.default_confidence();
    course.extraction_method = ExtractionMethod::Ai;
    course
}

/// Grade normalization and threshold, minimum title length, deduplication.
fn finalize(courses: Vec<ExtractedCourse>, threshold: &str, model: &GradeModel) -> Vec<ExtractedCourse> {
    let filtered: Vec<ExtractedCourse> = model
        .filter_by_threshold(courses, threshold)
        .into_iter()
        .filter(|c| c.title.chars().count() >= MIN_TITLE_CHARS)
        .collect();
    let unique = dedup_courses(filtered);
    tracing::info!(count = unique.len(), "extraction finished");
    unique
}
