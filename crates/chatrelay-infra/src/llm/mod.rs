//! Completion backend implementations.
//!
//! Contains the concrete implementation of the `CompletionBackend` trait
//! defined in `chatrelay-core`, plus a factory ([`create_backend`]) that
//! constructs the boxed backend from a [`RelayConfig`].

pub mod openai;

use chatrelay_core::llm::box_backend::BoxCompletionBackend;

use crate::config::RelayConfig;

use self::openai::OpenAiBackend;

/// Create a [`BoxCompletionBackend`] from a [`RelayConfig`].
///
/// The base URL override from the config is applied when present, so the
/// same backend serves the real API, a proxy, or a test server.
pub fn create_backend(config: &RelayConfig) -> BoxCompletionBackend {
    let mut backend = OpenAiBackend::new(config.api_key.clone());
    if let Some(base_url) = &config.base_url {
        backend = backend.with_base_url(base_url.clone());
    }
    tracing::debug!(model = %config.model, "openai backend configured");
    BoxCompletionBackend::new(backend)
}
