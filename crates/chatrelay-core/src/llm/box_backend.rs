//! BoxCompletionBackend -- object-safe dynamic dispatch wrapper for
//! CompletionBackend.
//!
//! 1. Define an object-safe `CompletionBackendDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionBackendDyn` for all `T: CompletionBackend`
//! 3. `BoxCompletionBackend` wraps `Box<dyn CompletionBackendDyn>` and
//!    delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, PromptRequest};

use super::backend::CompletionBackend;

/// Object-safe version of [`CompletionBackend`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch
/// (`dyn CompletionBackendDyn`). A blanket implementation is provided for
/// all types implementing `CompletionBackend`.
pub trait CompletionBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn chat_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

    fn chat_completion_boxed<'a>(
        &'a self,
        request: &'a PromptRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;
}

/// Blanket implementation: any `CompletionBackend` automatically implements
/// `CompletionBackendDyn`.
impl<T: CompletionBackend> CompletionBackendDyn for T {
    fn name(&self) -> &str {
        CompletionBackend::name(self)
    }

    fn chat_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.chat(request))
    }

    fn chat_completion_boxed<'a>(
        &'a self,
        request: &'a PromptRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.chat_completion(request))
    }
}

/// Type-erased completion backend for runtime backend selection.
///
/// Since `CompletionBackend` uses RPITIT, it cannot be used as a trait
/// object directly. `BoxCompletionBackend` wraps any implementation behind
/// dynamic dispatch and implements `CompletionBackend` itself, so session
/// clients accept it like any other backend.
pub struct BoxCompletionBackend {
    inner: Box<dyn CompletionBackendDyn + Send + Sync>,
}

impl BoxCompletionBackend {
    /// Wrap a concrete `CompletionBackend` in a type-erased box.
    pub fn new<T: CompletionBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }
}

impl CompletionBackend for BoxCompletionBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn chat(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.inner.chat_boxed(request).await
    }

    async fn chat_completion(
        &self,
        request: &PromptRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.chat_completion_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct EchoBackend;

    impl CompletionBackend for EchoBackend {
        fn name(&self) -> &str {
            "echo"
        }

        async fn chat(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let content = request
                .messages
                .last()
                .map(|entry| entry.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                id: "echo-1".to_string(),
                model: request.model.clone(),
                content,
            })
        }

        async fn chat_completion(
            &self,
            request: &PromptRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "echo-2".to_string(),
                model: request.model.clone(),
                content: request.prompt.clone(),
            })
        }
    }

    fn chat_request() -> CompletionRequest {
        CompletionRequest {
            model: "test-model".to_string(),
            messages: vec![chatrelay_types::chat::TranscriptEntry {
                role: chatrelay_types::chat::Role::User,
                content: "ping".to_string(),
            }],
            n: 1,
            max_tokens: 16,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }

    #[tokio::test]
    async fn test_boxed_backend_delegates() {
        let backend = BoxCompletionBackend::new(EchoBackend);
        assert_eq!(CompletionBackend::name(&backend), "echo");

        let response = backend.chat(&chat_request()).await.unwrap();
        assert_eq!(response.content, "ping");
    }

    #[tokio::test]
    async fn test_arc_of_box_is_a_backend() {
        let backend = Arc::new(BoxCompletionBackend::new(EchoBackend));
        let response = backend
            .chat_completion(&PromptRequest {
                model: "test-model".to_string(),
                prompt: "pong".to_string(),
                n: 1,
                max_tokens: 16,
                temperature: None,
                top_p: None,
                frequency_penalty: None,
                presence_penalty: None,
            })
            .await
            .unwrap();
        assert_eq!(response.content, "pong");
    }
}
