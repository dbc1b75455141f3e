//! Completion request/response types for Chatrelay.
//!
//! These types model the data shapes for remote completion calls: the chat
//! transcript request, the completion-style prompt request, the extracted
//! response, and the transport error taxonomy. They are provider-agnostic;
//! wire-level structs live with the backend implementations in
//! `chatrelay-infra`.

use serde::{Deserialize, Serialize};

use crate::chat::TranscriptEntry;

/// Request for a chat completion over a full transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<TranscriptEntry>,
    /// Number of candidate completions to request. The first is used.
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

/// Request for a completion-style call: one free-text prompt, no transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub model: String,
    pub prompt: String,
    /// Number of candidate completions to request. The first is used.
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

/// Response from a completion backend: the first candidate's text plus the
/// identifiers needed for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    pub content: String,
}

/// Errors from remote completion calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("authentication rejected by provider")]
    AuthenticationFailed,

    #[error("rate limited by provider")]
    RateLimited,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_completion_request_skips_unset_knobs() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![TranscriptEntry {
                role: Role::User,
                content: "Hello".to_string(),
            }],
            n: 1,
            max_tokens: 256,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("top_p").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_prompt_request_serializes_prompt() {
        let request = PromptRequest {
            model: "gpt-4o-mini".to_string(),
            prompt: "Say hello".to_string(),
            n: 1,
            max_tokens: 64,
            temperature: Some(0.7),
            top_p: Some(1.0),
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "Say hello");
        assert_eq!(json["temperature"], 0.7);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::InvalidRequest("max_tokens out of range".to_string());
        assert!(err.to_string().contains("max_tokens out of range"));
        assert_eq!(
            LlmError::AuthenticationFailed.to_string(),
            "authentication rejected by provider"
        );
    }
}
