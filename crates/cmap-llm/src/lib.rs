//! # cmap-llm
//!
//! HTTP client for an OpenAI-compatible (Azure-style) chat-completion and embedding
//! service, implementing coursemap's AI collaborators:
//!
//! - [`SemanticJudge`](cmap_core::collaborators::SemanticJudge): prompted 0–1 similarity
//! - [`AiCourseExtractor`](cmap_core::collaborators::AiCourseExtractor): JSON course list
//!   from PII-masked transcript text
//! - [`DescriptionGenerator`](cmap_core::collaborators::DescriptionGenerator)
//! - [`CourseVerifier`](cmap_core::collaborators::CourseVerifier)
//! - [`EmbeddingProvider`](cmap_core::collaborators::EmbeddingProvider): remote embeddings
//!
//! Requests go to `{root}/openai/deployments/{deployment}/...?api-version=...` with an
//! `api-key` header. The client never retries; a 429 surfaces as
//! [`LlmError::RateLimited`] and the caller's batching owns the backoff.

mod error;
mod http;
mod prompts;
mod services;
mod wire;

pub use error::LlmError;

use std::time::Duration;

use cmap_config::LlmConfig;

use crate::http::{ensure_success, resource_root};
use crate::wire::{
    ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse, ResponseFormat,
};

/// Sampling options for one chat call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChatOptions {
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub json_mode: bool,
}

impl ChatOptions {
    pub const fn precise() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: None,
            json_mode: false,
        }
    }
}

/// Client for the configured chat and embedding deployments.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// [`LlmError::NotConfigured`] when endpoint or API key is empty;
    /// [`LlmError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("coursemap/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn deployment_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{deployment}/{operation}?api-version={}",
            resource_root(&self.config.endpoint),
            self.config.api_version
        )
    }

    /// Send one chat-completion request and return the trimmed answer.
    pub(crate) async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.chat_deployment,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let url = self.deployment_url(&self.config.chat_deployment, "chat/completions");
        tracing::debug!(deployment = %self.config.chat_deployment, "chat completion request");

        let resp = ensure_success(
            self.http
                .post(&url)
                .header("api-key", &self.config.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let data: ChatResponse = resp.json().await?;
        data.into_content().ok_or(LlmError::EmptyResponse)
    }

    /// Embed `text` with the embedding deployment.
    ///
    /// # Errors
    ///
    /// [`LlmError::InvalidInput`] for empty input, transport and status errors from
    /// the service, [`LlmError::EmptyResponse`] when no vector comes back.
    pub async fn embedding(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        if text.trim().is_empty() {
            return Err(LlmError::InvalidInput("cannot embed empty text".to_string()));
        }
        let body = EmbeddingRequest {
            model: &self.config.embedding_deployment,
            input: text,
        };
        let url = self.deployment_url(&self.config.embedding_deployment, "embeddings");
        tracing::debug!(
            deployment = %self.config.embedding_deployment,
            chars = text.len(),
            "embedding request"
        );

        let resp = ensure_success(
            self.http
                .post(&url)
                .header("api-key", &self.config.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let data: EmbeddingResponse = resp.json().await?;
        data.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn configured() -> LlmConfig {
        LlmConfig {
            endpoint: "https://acme.openai.azure.com/openai/deployments/old".to_string(),
            api_key: "secret".to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn unconfigured_client_is_refused() {
        let err = LlmClient::new(LlmConfig::default()).unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[test]
    fn deployment_urls_use_resource_root() {
        let client = LlmClient::new(configured()).unwrap();
        assert_eq!(
            client.deployment_url("gpt-4.1", "chat/completions"),
            "https://acme.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2025-01-01-preview"
        );
    }

    #[tokio::test]
    async fn empty_embedding_input_fails_fast() {
        let client = LlmClient::new(configured()).unwrap();
        assert!(matches!(
            client.embedding("  ").await,
            Err(LlmError::InvalidInput(_))
        ));
    }
}
