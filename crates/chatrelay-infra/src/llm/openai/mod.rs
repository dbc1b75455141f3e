//! OpenAiBackend -- concrete `CompletionBackend` implementation for the
//! OpenAI API.
//!
//! Sends chat requests to `/chat/completions` and completion-style requests
//! to `/completions`, maps non-2xx statuses onto the transport error
//! taxonomy, and extracts the first candidate's text.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use chatrelay_core::llm::backend::CompletionBackend;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, PromptRequest};

use self::types::{
    ApiErrorResponse, ChatCompletionBody, ChatCompletionResponse, TextCompletionBody,
    TextCompletionResponse,
};

/// Default OpenAI API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI completion backend.
///
/// # API Key Security
///
/// Does NOT derive Debug: the `SecretString` field keeps the key out of
/// formatted output, and omitting Debug entirely avoids exposing the rest
/// of the client state.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiBackend {
    /// Create a backend against the public OpenAI API.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and deserialize the 2xx response.
    ///
    /// Non-2xx statuses are classified into the error taxonomy before the
    /// body is discarded, so the original diagnostic text survives.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, LlmError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &error_body));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }
}

impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionBody::from(request);
        let response: ChatCompletionResponse =
            self.post_json("/chat/completions", &body).await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                LlmError::Deserialization("response contained no candidates".to_string())
            })?;

        Ok(CompletionResponse {
            id: response.id,
            model: response.model,
            content,
        })
    }

    async fn chat_completion(
        &self,
        request: &PromptRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let body = TextCompletionBody::from(request);
        let response: TextCompletionResponse = self.post_json("/completions", &body).await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.text.clone())
            .ok_or_else(|| {
                LlmError::Deserialization("response contained no candidates".to_string())
            })?;

        Ok(CompletionResponse {
            id: response.id,
            model: response.model,
            content,
        })
    }
}

/// Classify a non-2xx status into the transport error taxonomy.
///
/// The API's error envelope is parsed for its message when present so the
/// logged diagnostic is the provider's own wording, not raw JSON.
fn classify_status(status: u16, body: &str) -> LlmError {
    let detail = error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        400 | 404 | 422 => LlmError::InvalidRequest(detail),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {detail}"),
        },
    }
}

/// Extract the message from an API error envelope, if the body is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        assert!(matches!(
            classify_status(401, ""),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            classify_status(403, ""),
            LlmError::AuthenticationFailed
        ));
    }

    #[test]
    fn test_classify_rate_limit() {
        assert!(matches!(classify_status(429, ""), LlmError::RateLimited));
    }

    #[test]
    fn test_classify_invalid_request_keeps_detail() {
        let body = r#"{"error":{"message":"max_tokens too large","type":"invalid_request_error","code":null}}"#;
        match classify_status(400, body) {
            LlmError::InvalidRequest(detail) => assert_eq!(detail, "max_tokens too large"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_statuses_are_provider_errors() {
        match classify_status(503, "upstream unavailable") {
            LlmError::Provider { message } => {
                assert!(message.contains("503"));
                assert!(message.contains("upstream unavailable"));
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_error_message_falls_back_on_raw_body() {
        assert_eq!(error_message("not json"), None);
        match classify_status(400, "not json") {
            LlmError::InvalidRequest(detail) => assert_eq!(detail, "not json"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_base_url_override() {
        let backend = OpenAiBackend::new(SecretString::from("sk-test"))
            .with_base_url("http://localhost:9000/v1");
        assert_eq!(
            backend.url("/chat/completions"),
            "http://localhost:9000/v1/chat/completions"
        );
    }
}
