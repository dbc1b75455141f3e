//! CompletionBackend trait definition.
//!
//! This is the capability contract every completion backend implements:
//! a chat call over a full transcript and a completion-style call over a
//! single prompt. Swapping the remote provider never touches the session
//! or log logic.

use std::future::Future;
use std::sync::Arc;

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, PromptRequest};

/// Trait for completion backends (OpenAI today, substitutable).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). For dynamic
/// dispatch, wrap an implementation in
/// [`BoxCompletionBackend`](super::box_backend::BoxCompletionBackend).
///
/// Implementations live in `chatrelay-infra` (e.g. `OpenAiBackend`).
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a chat completion request over a full transcript.
    fn chat(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a completion-style request: one free-text prompt, no transcript.
    fn chat_completion(
        &self,
        request: &PromptRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;
}

/// A shared backend is itself a backend, so one connection pool can serve
/// many sessions.
impl<B: CompletionBackend> CompletionBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn chat(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        (**self).chat(request)
    }

    fn chat_completion(
        &self,
        request: &PromptRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        (**self).chat_completion(request)
    }
}
