//! Request and response bodies of the OpenAI-compatible REST API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
}

/// Error envelope of an OpenAI-compatible service:
/// `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub error: ServiceError,
}

#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHAT_FIXTURE: &str = r#"{
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": "  0.82\n" },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 120, "completion_tokens": 2, "total_tokens": 122 }
    }"#;

    const EMBEDDING_FIXTURE: &str = r#"{
        "object": "list",
        "data": [ { "object": "embedding", "index": 0, "embedding": [0.25, -0.5, 1.0] } ],
        "model": "text-embedding-3-large"
    }"#;

    #[test]
    fn parse_chat_response() {
        let resp: ChatResponse = serde_json::from_str(CHAT_FIXTURE).unwrap();
        assert_eq!(resp.into_content().as_deref(), Some("0.82"));
    }

    #[test]
    fn chat_response_without_content() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(resp.into_content().is_none());
        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_content().is_none());
    }

    #[test]
    fn parse_embedding_response() {
        let resp: EmbeddingResponse = serde_json::from_str(EMBEDDING_FIXTURE).unwrap();
        assert_eq!(resp.data[0].embedding, vec![0.25, -0.5, 1.0]);
    }

    #[test]
    fn chat_request_omits_unset_options() {
        let req = ChatRequest {
            model: "gpt-4.1",
            messages: vec![ChatMessage::user("hi")],
            temperature: 0.1,
            max_tokens: None,
            response_format: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("response_format").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn json_mode_serializes_type() {
        let format = ResponseFormat {
            kind: "json_object",
        };
        assert_eq!(
            serde_json::to_string(&format).unwrap(),
            r#"{"type":"json_object"}"#
        );
    }
}
