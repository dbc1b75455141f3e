//! Session registry for concurrent hosts.
//!
//! The chat client carries no locking discipline of its own, so a host
//! serving many conversations at once must give each one exclusive
//! ownership of its log. The registry enforces that shape: one
//! `tokio::sync::Mutex<ChatClient>` per session, keyed by a time-sortable
//! UUIDv7, with the shared backend handed in as an `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::llm::box_backend::BoxCompletionBackend;

use super::client::ChatClient;

/// A registered session: the exclusively-locked client plus metadata.
pub struct SessionEntry {
    pub client: Mutex<ChatClient<Arc<BoxCompletionBackend>>>,
    pub created_at: DateTime<Utc>,
}

/// Registry of live chat sessions, indexed by session id.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<SessionEntry>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a new session and return its id.
    pub fn create(&self, client: ChatClient<Arc<BoxCompletionBackend>>) -> Uuid {
        let id = Uuid::now_v7();
        let entry = SessionEntry {
            client: Mutex::new(client),
            created_at: Utc::now(),
        };
        self.sessions.insert(id, Arc::new(entry));
        id
    }

    /// Look up a session by id.
    pub fn get(&self, id: Uuid) -> Option<Arc<SessionEntry>> {
        self.sessions.get(&id).map(|entry| Arc::clone(&entry))
    }

    /// Remove a session. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::CompletionBackend;
    use chatrelay_types::chat::Role;
    use chatrelay_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, PromptRequest,
    };

    struct StaticBackend;

    impl CompletionBackend for StaticBackend {
        fn name(&self) -> &str {
            "static"
        }

        async fn chat(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "r".to_string(),
                model: request.model.clone(),
                content: "reply".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            request: &PromptRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "r".to_string(),
                model: request.model.clone(),
                content: "reply".to_string(),
            })
        }
    }

    fn shared_backend() -> Arc<BoxCompletionBackend> {
        Arc::new(BoxCompletionBackend::new(StaticBackend))
    }

    #[tokio::test]
    async fn test_create_get_remove() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let id = registry.create(ChatClient::new(shared_backend(), "test-model"));
        assert_eq!(registry.len(), 1);

        let entry = registry.get(id).expect("session exists");
        assert!(entry.client.lock().await.log().is_empty());

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.get(id).is_none());
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_logs() {
        let registry = SessionRegistry::new();
        let backend = shared_backend();
        let a = registry.create(ChatClient::new(Arc::clone(&backend), "test-model"));
        let b = registry.create(ChatClient::new(backend, "test-model"));

        {
            let entry = registry.get(a).unwrap();
            let mut client = entry.client.lock().await;
            let message = client.message(Role::User, "Hello");
            client.chat(&message, 64).await.unwrap();
        }

        let entry_a = registry.get(a).unwrap();
        let entry_b = registry.get(b).unwrap();
        assert_eq!(entry_a.client.lock().await.log().len(), 2);
        assert_eq!(entry_b.client.lock().await.log().len(), 0);
    }
}
