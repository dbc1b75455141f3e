//! Test support for handler tests: a canned completion backend and state
//! builders.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::SecretString;

use chatrelay_core::chat::registry::SessionRegistry;
use chatrelay_core::llm::backend::CompletionBackend;
use chatrelay_core::llm::box_backend::BoxCompletionBackend;
use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, PromptRequest};

use crate::state::AppState;

/// What the canned backend should do on every call.
pub enum Canned {
    /// Reply with `"{prefix} #{call_number}"`.
    Reply(&'static str),
    /// Fail with an authentication error.
    AuthError,
}

/// Backend returning canned results, numbering successive replies so tests
/// can tell a regenerated response from the original.
pub struct CannedBackend {
    canned: Canned,
    calls: AtomicUsize,
}

impl CannedBackend {
    fn respond(&self, model: &str) -> Result<CompletionResponse, LlmError> {
        match &self.canned {
            Canned::Reply(prefix) => {
                let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(CompletionResponse {
                    id: format!("resp-{call}"),
                    model: model.to_string(),
                    content: format!("{prefix} #{call}"),
                })
            }
            Canned::AuthError => Err(LlmError::AuthenticationFailed),
        }
    }
}

impl CompletionBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn chat(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.respond(&request.model)
    }

    async fn chat_completion(
        &self,
        request: &PromptRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.respond(&request.model)
    }
}

/// Build an `AppState` over a canned backend.
pub fn state_with(canned: Canned, webhook_secret: Option<&str>) -> AppState {
    AppState {
        backend: Arc::new(BoxCompletionBackend::new(CannedBackend {
            canned,
            calls: AtomicUsize::new(0),
        })),
        sessions: Arc::new(SessionRegistry::new()),
        model: "test-model".to_string(),
        webhook_secret: webhook_secret.map(SecretString::from),
    }
}
