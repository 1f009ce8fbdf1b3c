//! Prompt construction and answer parsing for each AI collaborator.
//!
//! Parsers are lenient about presentation (code fences, trailing prose) but strict
//! about shape: an answer that cannot be read becomes [`LlmError::Parse`].

use cmap_core::collaborators::{DifficultyAssessment, VerificationVerdict};
use cmap_core::entities::{CurriculumCourse, ExtractedCourse};
use cmap_core::enums::{Difficulty, ExtractionMethod};
use serde::Deserialize;

use crate::error::LlmError;

/// Reference courses shown to the verifier.
const VERIFIER_REFERENCE_LIMIT: usize = 20;

pub const EXTRACTION_SYSTEM: &str = "You are an expert at extracting course information from academic transcripts. Return only valid courses with proper grades.";

pub const VERIFICATION_SYSTEM: &str = "You are an expert at identifying valid academic courses and filtering out non-course content from transcripts. Be conservative: when in doubt, reject the course.";

pub fn similarity_prompt(a: &str, b: &str) -> String {
    format!(
        "Compare these two course descriptions and return a similarity score between 0 and 1, \
where 1 means identical content and 0 means completely unrelated.

Course 1: {a}

Course 2: {b}

Consider:
- Learning objectives and outcomes
- Topics covered
- Skill development
- Prerequisites and level

Return only a decimal number between 0 and 1."
    )
}

/// Leading decimal of the answer, clamped to `[0, 1]`. Unreadable answers score 0.
pub fn parse_similarity(answer: &str) -> f64 {
    let trimmed = answer.trim();
    let numeric: String = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && c == '-'))
        .map(|(_, c)| c)
        .collect();
    let value: f64 = numeric.parse().unwrap_or(0.0);
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

pub fn extraction_prompt(masked_text: &str) -> String {
    format!(
        "Extract course information from this transcript text. Return only courses that have a grade.

Text: {masked_text}

Return a JSON array of courses with this structure:
[
  {{
    \"title\": \"Course Title\",
    \"grade\": \"A\",
    \"credits\": 3,
    \"code\": \"CS101\"
  }}
]

Return only the JSON array."
    )
}

#[derive(Debug, Deserialize)]
struct AiCourse {
    #[serde(default)]
    title: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    credits: Option<serde_json::Value>,
    #[serde(default)]
    code: Option<String>,
}

/// Credits arrive as numbers or numeric strings.
fn credits_of(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read the model's JSON array into AI-method courses with empty descriptions.
///
/// # Errors
///
/// [`LlmError::Parse`] when the answer is not a JSON array of course objects.
pub fn parse_extracted(answer: &str) -> Result<Vec<ExtractedCourse>, LlmError> {
    let courses: Vec<AiCourse> = serde_json::from_str(strip_fences(answer))
        .map_err(|e| LlmError::Parse(format!("extraction answer: {e}")))?;
    Ok(courses
        .into_iter()
        .filter(|c| !c.title.trim().is_empty())
        .map(|c| ExtractedCourse {
            credits: credits_of(c.credits.as_ref()),
            title: c.title.trim().to_string(),
            description: String::new(),
            grade: c.grade.trim().to_string(),
            semester: None,
            code: c.code.filter(|code| !code.trim().is_empty()),
            confidence: ExtractionMethod::Ai.default_confidence(),
            extraction_method: ExtractionMethod::Ai,
        })
        .collect())
}

pub fn description_prompt(title: &str, code: Option<&str>) -> String {
    let subject = code.map_or_else(|| format!("\"{title}\""), |c| format!("{c}: \"{title}\""));
    format!(
        "Write a two-sentence academic course description for {subject}. \
Describe the topics covered and the skills students develop. Return only the description."
    )
}

pub fn verification_prompt(courses: &[ExtractedCourse], references: &[CurriculumCourse]) -> String {
    let reference_list: Vec<String> = references
        .iter()
        .take(VERIFIER_REFERENCE_LIMIT)
        .map(|c| format!("- {}: {}", c.code, c.title))
        .collect();
    let uncertain: Vec<String> = courses
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. \"{}\"", i + 1, c.title))
        .collect();

    format!(
        "You are an academic course verification expert. Determine whether courses extracted \
from a transcript are valid academic courses that could appear in a curriculum.

CURRICULUM COURSES (valid courses that exist):
{}

UNCERTAIN COURSES TO VERIFY:
{}

For each uncertain course, decide whether it is a real academic course or a header, \
metadata line, formatting artifact, or partial title.

Respond in JSON format:
{{
  \"verifications\": [
    {{ \"courseNumber\": 1, \"isValid\": true, \"confidence\": 0.9, \"reasoning\": \"Brief explanation\" }}
  ]
}}",
        reference_list.join("\n"),
        uncertain.join("\n")
    )
}

#[derive(Debug, Deserialize)]
struct VerificationAnswer {
    #[serde(default)]
    verifications: Vec<Verification>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Verification {
    course_number: usize,
    #[serde(default)]
    is_valid: bool,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    reasoning: String,
}

/// One verdict per submitted course, in order. Courses the model skipped are rejected.
///
/// # Errors
///
/// [`LlmError::Parse`] when the answer is not the expected JSON object.
pub fn parse_verdicts(answer: &str, count: usize) -> Result<Vec<VerificationVerdict>, LlmError> {
    let parsed: VerificationAnswer = serde_json::from_str(strip_fences(answer))
        .map_err(|e| LlmError::Parse(format!("verification answer: {e}")))?;

    let mut verdicts = vec![
        VerificationVerdict {
            is_valid: false,
            confidence: 0.5,
            reasoning: "No verdict returned for this course".to_string(),
        };
        count
    ];
    for v in parsed.verifications {
        if let Some(slot) = v.course_number.checked_sub(1).and_then(|i| verdicts.get_mut(i)) {
            *slot = VerificationVerdict {
                is_valid: v.is_valid,
                confidence: v.confidence.clamp(0.0, 1.0),
                reasoning: v.reasoning,
            };
        }
    }
    Ok(verdicts)
}

pub fn difficulty_prompt(background: &[ExtractedCourse], course: &CurriculumCourse) -> String {
    let taken: Vec<String> = background
        .iter()
        .map(|c| format!("{}: {}", c.title, c.match_text()))
        .collect();
    format!(
        "Based on the student's academic background, assess the difficulty level of this \
upcoming course and provide reasoning.

Student's Background:
{}

Upcoming Course:
{}: {}
Description: {}

Assess the difficulty level as one of: \"Easy\", \"Moderate\", \"Challenging\", \"Very Challenging\"

Provide your response in this exact format:
Difficulty: [difficulty level]
Reason: [brief explanation of why this course would be at this difficulty level for this student]",
        taken.join("\n\n"),
        course.code,
        course.title,
        course.description
    )
}

/// Value after `label:` on the first line that starts with it.
fn labelled<'a>(answer: &'a str, label: &str) -> Option<&'a str> {
    answer.lines().find_map(|line| {
        let line = line.trim().trim_start_matches(['*', '-', ' ']);
        let (key, value) = line.split_once(':')?;
        let value = value.trim().trim_matches('*').trim();
        (key.trim().trim_matches('*').eq_ignore_ascii_case(label) && !value.is_empty())
            .then_some(value)
    })
}

/// Read `Difficulty:` and `Reason:` lines. Missing or unknown levels read as `Moderate`.
pub fn parse_difficulty(answer: &str) -> DifficultyAssessment {
    DifficultyAssessment {
        difficulty: labelled(answer, "difficulty")
            .and_then(Difficulty::from_label)
            .unwrap_or_default(),
        reason: labelled(answer, "reason")
            .unwrap_or("Assessment not available")
            .to_string(),
    }
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_fences(answer: &str) -> &str {
    let trimmed = answer.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn similarity_parsing_clamps_and_defaults() {
        assert!((parse_similarity("0.82") - 0.82).abs() < 1e-9);
        assert!((parse_similarity(" 0.7 - mostly overlapping") - 0.7).abs() < 1e-9);
        assert!((parse_similarity("1.4") - 1.0).abs() < f64::EPSILON);
        assert!(parse_similarity("-0.2").abs() < f64::EPSILON);
        assert!(parse_similarity("about half").abs() < f64::EPSILON);
        assert!(parse_similarity("").abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_prompt_embeds_both_texts() {
        let prompt = similarity_prompt("Graph theory", "Discrete structures");
        assert!(prompt.contains("Course 1: Graph theory"));
        assert!(prompt.contains("Course 2: Discrete structures"));
    }

    #[test]
    fn extraction_parses_fenced_array() {
        let answer = "```json\n[\n  {\"title\": \"Operating Systems\", \"grade\": \"B+\", \"credits\": \"4\", \"code\": \"CS330\"},\n  {\"title\": \"  \", \"grade\": \"A\"},\n  {\"title\": \"Ethics\", \"grade\": \"A\", \"credits\": 2, \"code\": \"\"}\n]\n```";
        let courses = parse_extracted(answer).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].title, "Operating Systems");
        assert_eq!(courses[0].credits, Some(4.0));
        assert_eq!(courses[0].code.as_deref(), Some("CS330"));
        assert_eq!(courses[0].extraction_method, ExtractionMethod::Ai);
        assert!(courses[0].description.is_empty());
        assert_eq!(courses[1].code, None);
        assert_eq!(courses[1].credits, Some(2.0));
    }

    #[test]
    fn extraction_rejects_prose() {
        assert!(matches!(
            parse_extracted("I could not find any courses."),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn verdicts_fill_missing_and_ignore_out_of_range() {
        let answer = r#"{"verifications": [
            {"courseNumber": 2, "isValid": true, "confidence": 0.9, "reasoning": "Real course"},
            {"courseNumber": 0, "isValid": true, "confidence": 1.0, "reasoning": "bogus"},
            {"courseNumber": 7, "isValid": true, "confidence": 1.0, "reasoning": "bogus"}
        ]}"#;
        let verdicts = parse_verdicts(answer, 3).unwrap();
        assert_eq!(verdicts.len(), 3);
        assert!(!verdicts[0].is_valid);
        assert!(verdicts[1].is_valid);
        assert_eq!(verdicts[1].reasoning, "Real course");
        assert!(!verdicts[2].is_valid);
    }

    #[test]
    fn verification_prompt_lists_numbered_courses() {
        let courses = vec![
            ExtractedCourse::manual("Quantum Mechanics", "A"),
            ExtractedCourse::manual("Page 2 of 3", "A"),
        ];
        let refs = vec![CurriculumCourse::new("PH201", "Quantum Physics")];
        let prompt = verification_prompt(&courses, &refs);
        assert!(prompt.contains("- PH201: Quantum Physics"));
        assert!(prompt.contains("1. \"Quantum Mechanics\""));
        assert!(prompt.contains("2. \"Page 2 of 3\""));
    }

    #[test]
    fn description_prompt_mentions_code() {
        assert!(description_prompt("Compilers", Some("CS420")).contains("CS420: \"Compilers\""));
        assert!(description_prompt("Compilers", None).contains("for \"Compilers\"."));
    }

    #[test]
    fn difficulty_answer_parsing() {
        let parsed = parse_difficulty(
            "Difficulty: Very Challenging\nReason: No calculus or linear algebra on record.",
        );
        assert_eq!(parsed.difficulty, Difficulty::VeryChallenging);
        assert_eq!(parsed.reason, "No calculus or linear algebra on record.");

        let bold = parse_difficulty("**Difficulty:** Easy\n**Reason:** Already took CS101.");
        assert_eq!(bold.difficulty, Difficulty::Easy);
        assert_eq!(bold.reason, "Already took CS101.");

        let vague = parse_difficulty("It depends on the student.");
        assert_eq!(vague.difficulty, Difficulty::Moderate);
        assert_eq!(vague.reason, "Assessment not available");
    }

    #[test]
    fn difficulty_prompt_lists_background_and_course() {
        let background = vec![
            ExtractedCourse::manual("Calculus", "A").with_description("Limits and derivatives."),
        ];
        let course = CurriculumCourse::new("MA301", "Real Analysis")
            .with_description("Sequences, continuity and integration.");
        let prompt = difficulty_prompt(&background, &course);
        assert!(prompt.contains("Calculus: Limits and derivatives."));
        assert!(prompt.contains("MA301: Real Analysis"));
        assert!(prompt.contains("Description: Sequences, continuity and integration."));
    }

    #[test]
    fn strip_fences_variants() {
        assert_eq!(strip_fences("[1]"), "[1]");
        assert_eq!(strip_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```\n"), "{\"a\":1}");
    }
}
