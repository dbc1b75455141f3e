//! OpenAI API wire types.
//!
//! These are OpenAI-specific request/response structures used for HTTP
//! communication with the chat-completions and completions endpoints. They
//! are NOT the generic completion types from `chatrelay-types` -- those are
//! provider-agnostic.

use serde::{Deserialize, Serialize};

use chatrelay_types::llm::{CompletionRequest, PromptRequest};

/// A single message in an OpenAI chat request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionBody {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub n: u8,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl From<&CompletionRequest> for ChatCompletionBody {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|entry| WireMessage {
                    role: entry.role.to_string(),
                    content: entry.content.clone(),
                })
                .collect(),
            n: request.n,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        }
    }
}

/// Request body for `POST /completions`.
#[derive(Debug, Clone, Serialize)]
pub struct TextCompletionBody {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl From<&PromptRequest> for TextCompletionBody {
    fn from(request: &PromptRequest) -> Self {
        Self {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            n: request.n,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
        }
    }
}

/// Response body for `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<ChatChoice>,
}

/// One candidate completion in a chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: WireMessage,
}

/// Response body for `POST /completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<TextChoice>,
}

/// One candidate completion in a completion-style response.
#[derive(Debug, Clone, Deserialize)]
pub struct TextChoice {
    pub text: String,
}

/// Error envelope returned by the API on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// The error object inside an [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::{Role, TranscriptEntry};

    #[test]
    fn test_chat_body_from_request() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                TranscriptEntry {
                    role: Role::User,
                    content: "Hello".to_string(),
                },
                TranscriptEntry {
                    role: Role::System,
                    content: "Hi there".to_string(),
                },
            ],
            n: 1,
            max_tokens: 256,
            temperature: Some(0.7),
            top_p: Some(1.0),
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
        };

        let body = ChatCompletionBody::from(&request);
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.messages[1].role, "system");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["n"], 1);
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["temperature"], 0.7);
    }

    #[test]
    fn test_chat_response_fixture() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.choices[0].message.content, "Hello!");
    }

    #[test]
    fn test_text_response_fixture() {
        let json = r#"{
            "id": "cmpl-456",
            "object": "text_completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{"text": "Once upon a time", "index": 0, "finish_reason": "length"}]
        }"#;
        let response: TextCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].text, "Once upon a time");
    }

    #[test]
    fn test_error_envelope_fixture() {
        let json = r#"{
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        }"#;
        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Incorrect API key provided");
        assert_eq!(response.error.code.as_deref(), Some("invalid_api_key"));
        assert_eq!(response.error.kind.as_deref(), Some("invalid_request_error"));
    }
}
