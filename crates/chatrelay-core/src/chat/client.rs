//! Chat client orchestration: message identity, transcript upkeep, and the
//! remote call boundary.
//!
//! `ChatClient` owns one conversation: a [`ChatLog`], the
//! [`MessageFactory`] that hands out message ids, and a completion backend.
//! Remote failures are classified and logged here, at the call boundary,
//! and surfaced as [`ChatOutcome::Failure`] payloads -- never retried,
//! never raised. Transcript precondition violations are the exception:
//! those propagate as [`SessionError`] faults.

use chatrelay_types::chat::{ChatFailure, ChatOutcome, ChatReply, Message, Role};
use chatrelay_types::error::SessionError;
use chatrelay_types::llm::{CompletionRequest, LlmError, PromptRequest};

use crate::llm::backend::CompletionBackend;

use super::log::ChatLog;

/// Candidate completions requested per call. Only the first is used.
const DEFAULT_CANDIDATES: u8 = 1;
/// Sampling temperature sent with every request.
const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Nucleus sampling cutoff sent with every request.
const DEFAULT_TOP_P: f64 = 1.0;
/// Frequency penalty sent with every request.
const DEFAULT_FREQUENCY_PENALTY: f64 = 0.0;
/// Presence penalty sent with every request.
const DEFAULT_PRESENCE_PENALTY: f64 = 0.0;

/// Hands out message ids for one session.
///
/// An explicit counter starting at 1, strictly increasing, never reused.
/// Owned by the [`ChatClient`] rather than living in global state, so test
/// runs and sessions stay isolated.
#[derive(Debug)]
pub struct MessageFactory {
    next_id: u64,
}

impl MessageFactory {
    /// Create a factory whose first id is 1.
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Construct a message with a fresh id.
    pub fn message(&mut self, role: Role, content: impl Into<String>) -> Message {
        let id = self.next_id;
        self.next_id += 1;
        Message {
            id,
            role,
            content: content.into(),
        }
    }
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// One conversation against a completion backend.
///
/// The client exclusively owns its log; a concurrent host must wrap each
/// client in its own lock (see
/// [`SessionRegistry`](super::registry::SessionRegistry)) -- the client
/// itself carries no locking discipline.
pub struct ChatClient<B> {
    backend: B,
    model: String,
    log: ChatLog,
    factory: MessageFactory,
}

impl<B: CompletionBackend> ChatClient<B> {
    /// Create a client with an empty transcript.
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            log: ChatLog::new(),
            factory: MessageFactory::new(),
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The conversation transcript.
    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Construct a message with a fresh id from this session's factory.
    pub fn message(&mut self, role: Role, content: impl Into<String>) -> Message {
        self.factory.message(role, content)
    }

    /// Run one chat turn.
    ///
    /// A message not yet in the transcript is appended first, so the
    /// remote call always sees the full conversation including this turn.
    /// On success the reply is appended as a system-role entry (replies
    /// are not identity-tracked) -- unless the given id was already
    /// recorded (a re-ask), in which case nothing is appended and the
    /// caller is expected to use [`regenerate`](Self::regenerate) for
    /// in-place edits. On failure the just-appended turn is retracted,
    /// leaving the transcript exactly as it was before the call.
    pub async fn chat(
        &mut self,
        message: &Message,
        max_tokens: u32,
    ) -> Result<ChatOutcome, SessionError> {
        let newly_added = !self.log.contains(message.id);
        if newly_added {
            self.log.add_message(message)?;
        }

        let request = self.chat_request(max_tokens);
        match self.backend.chat(&request).await {
            Ok(response) => {
                if newly_added {
                    self.log.append_reply(response.content.clone());
                }
                Ok(ChatOutcome::Reply(ChatReply {
                    role: Role::System,
                    content: response.content,
                }))
            }
            Err(err) => {
                let failure = self.classify_and_log(&err);
                if newly_added {
                    self.log.retract(message.id);
                }
                Ok(ChatOutcome::Failure(failure))
            }
        }
    }

    /// Run a stateless completion-style call: no transcript interaction.
    pub async fn chat_completion(&self, prompt: &str, max_tokens: u32) -> ChatOutcome {
        let request = PromptRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: DEFAULT_CANDIDATES,
            max_tokens,
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: Some(DEFAULT_TOP_P),
            frequency_penalty: Some(DEFAULT_FREQUENCY_PENALTY),
            presence_penalty: Some(DEFAULT_PRESENCE_PENALTY),
        };
        match self.backend.chat_completion(&request).await {
            Ok(response) => ChatOutcome::Reply(ChatReply {
                role: Role::System,
                content: response.content,
            }),
            Err(err) => ChatOutcome::Failure(self.classify_and_log(&err)),
        }
    }

    /// Regenerate the response to an existing user turn in place.
    ///
    /// Preconditions are checked up front: the id must be recorded and must
    /// have a following entry. The remote call runs over the full
    /// transcript; on success only the following entry's content changes --
    /// its position and every other entry stay untouched. On failure the
    /// transcript is left as-is and the failure payload is returned.
    pub async fn regenerate(
        &mut self,
        message_id: u64,
        max_tokens: u32,
    ) -> Result<ChatOutcome, SessionError> {
        let index = self
            .log
            .index_of(message_id)
            .ok_or(SessionError::UnknownMessage(message_id))?;
        if index + 1 >= self.log.len() {
            return Err(SessionError::MissingResponse(message_id));
        }

        let request = self.chat_request(max_tokens);
        match self.backend.chat(&request).await {
            Ok(response) => {
                self.log
                    .rewrite_response(message_id, response.content.clone())?;
                Ok(ChatOutcome::Reply(ChatReply {
                    role: Role::System,
                    content: response.content,
                }))
            }
            Err(err) => Ok(ChatOutcome::Failure(self.classify_and_log(&err))),
        }
    }

    fn chat_request(&self, max_tokens: u32) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.log.entries().to_vec(),
            n: DEFAULT_CANDIDATES,
            max_tokens,
            temperature: Some(DEFAULT_TEMPERATURE),
            top_p: Some(DEFAULT_TOP_P),
            frequency_penalty: Some(DEFAULT_FREQUENCY_PENALTY),
            presence_penalty: Some(DEFAULT_PRESENCE_PENALTY),
        }
    }

    /// Classify a transport error and log it with category and diagnostic.
    fn classify_and_log(&self, err: &LlmError) -> ChatFailure {
        let failure = ChatFailure::classify(err);
        tracing::error!(
            backend = self.backend.name(),
            category = %failure.error,
            error = %err,
            "completion request failed"
        );
        failure
    }
}
