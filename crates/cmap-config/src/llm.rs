//! OpenAI-compatible chat and embedding endpoint.

use serde::{Deserialize, Serialize};

fn default_chat_deployment() -> String {
    "gpt-4.1".to_string()
}

fn default_embedding_deployment() -> String {
    "text-embedding-3-large".to_string()
}

fn default_api_version() -> String {
    "2025-01-01-preview".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Base URL (e.g., `https://my-resource.openai.azure.com`).
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_chat_deployment")]
    pub chat_deployment: String,

    #[serde(default = "default_embedding_deployment")]
    pub embedding_deployment: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            chat_deployment: default_chat_deployment(),
            embedding_deployment: default_embedding_deployment(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Check if the endpoint and key are both present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }
}
