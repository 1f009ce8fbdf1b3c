//! Collaborator trait implementations for [`LlmClient`].

use async_trait::async_trait;
use cmap_core::collaborators::{
    AiCourseExtractor, CourseVerifier, DescriptionGenerator, DifficultyAssessment,
    DifficultyAssessor, EmbeddingProvider, SemanticJudge, VerificationVerdict,
    is_placeholder_text,
};
use cmap_core::entities::{CurriculumCourse, ExtractedCourse};
use cmap_core::errors::ProviderError;
use cmap_core::pii::MaskedText;

use crate::prompts::{
    EXTRACTION_SYSTEM, VERIFICATION_SYSTEM, description_prompt, difficulty_prompt,
    extraction_prompt, parse_difficulty, parse_extracted, parse_similarity, parse_verdicts,
    similarity_prompt, verification_prompt,
};
use crate::wire::ChatMessage;
use crate::{ChatOptions, LlmClient};

#[async_trait]
impl SemanticJudge for LlmClient {
    async fn judge_similarity(&self, a: &str, b: &str) -> Result<f64, ProviderError> {
        let answer = self
            .chat(
                vec![ChatMessage::user(similarity_prompt(a, b))],
                ChatOptions::precise(),
            )
            .await?;
        Ok(parse_similarity(&answer))
    }
}

#[async_trait]
impl AiCourseExtractor for LlmClient {
    async fn extract_candidates(
        &self,
        text: &MaskedText,
    ) -> Result<Vec<ExtractedCourse>, ProviderError> {
        let answer = self
            .chat(
                vec![
                    ChatMessage::system(EXTRACTION_SYSTEM),
                    ChatMessage::user(extraction_prompt(text.as_str())),
                ],
                ChatOptions {
                    max_tokens: Some(1000),
                    ..ChatOptions::precise()
                },
            )
            .await?;
        let courses = parse_extracted(&answer)?;
        tracing::debug!(count = courses.len(), "ai extraction parsed");
        Ok(courses)
    }
}

#[async_trait]
impl DescriptionGenerator for LlmClient {
    async fn generate_description(
        &self,
        title: &str,
        code: Option<&str>,
    ) -> Result<String, ProviderError> {
        Ok(self
            .chat(
                vec![ChatMessage::user(description_prompt(title, code))],
                ChatOptions {
                    temperature: 0.3,
                    max_tokens: Some(200),
                    json_mode: false,
                },
            )
            .await?)
    }
}

#[async_trait]
impl CourseVerifier for LlmClient {
    async fn verify(
        &self,
        courses: &[ExtractedCourse],
        references: &[CurriculumCourse],
    ) -> Result<Vec<VerificationVerdict>, ProviderError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }
        let answer = self
            .chat(
                vec![
                    ChatMessage::system(VERIFICATION_SYSTEM),
                    ChatMessage::user(verification_prompt(courses, references)),
                ],
                ChatOptions {
                    json_mode: true,
                    ..ChatOptions::precise()
                },
            )
            .await?;
        Ok(parse_verdicts(&answer, courses.len())?)
    }
}

#[async_trait]
impl DifficultyAssessor for LlmClient {
    async fn assess_difficulty(
        &self,
        background: &[ExtractedCourse],
        course: &CurriculumCourse,
    ) -> Result<DifficultyAssessment, ProviderError> {
        let answer = self
            .chat(
                vec![ChatMessage::user(difficulty_prompt(background, course))],
                ChatOptions {
                    temperature: 0.3,
                    max_tokens: Some(200),
                    json_mode: false,
                },
            )
            .await?;
        let assessment = parse_difficulty(&answer);
        tracing::debug!(
            code = %course.code,
            difficulty = %assessment.difficulty,
            "difficulty assessed"
        );
        Ok(assessment)
    }
}

#[async_trait]
impl EmbeddingProvider for LlmClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if text.trim().is_empty() {
            return Err(ProviderError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }
        if is_placeholder_text(text) {
            tracing::debug!("placeholder text, skipping embedding");
            return Ok(Vec::new());
        }
        Ok(self.embedding(text).await?)
    }
}
