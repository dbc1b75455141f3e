//! Application state wiring the backend and session registry together.
//!
//! `AppState` holds the shared completion backend and the per-session
//! registry used by both the CLI and the HTTP handlers. The backend is
//! selected once at startup from configuration; every session client gets
//! an `Arc` handle to it.

use std::sync::Arc;

use secrecy::SecretString;

use chatrelay_core::chat::client::ChatClient;
use chatrelay_core::chat::registry::SessionRegistry;
use chatrelay_core::llm::box_backend::BoxCompletionBackend;
use chatrelay_infra::config::RelayConfig;
use chatrelay_infra::llm::create_backend;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BoxCompletionBackend>,
    pub sessions: Arc<SessionRegistry>,
    pub model: String,
    pub webhook_secret: Option<SecretString>,
}

impl AppState {
    /// Wire the application state from resolved configuration.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            backend: Arc::new(create_backend(config)),
            sessions: Arc::new(SessionRegistry::new()),
            model: config.model.clone(),
            webhook_secret: config.webhook_secret.clone(),
        }
    }

    /// Create a chat client for a fresh conversation over the shared backend.
    pub fn new_client(&self) -> ChatClient<Arc<BoxCompletionBackend>> {
        ChatClient::new(Arc::clone(&self.backend), self.model.clone())
    }
}
