//! Chat message and outcome types for Chatrelay.
//!
//! These types model a single conversation turn and the tagged result of a
//! completion call: a reply on success, a classified failure payload
//! otherwise. Callers branch on the `ChatOutcome` variant, never on the
//! presence of a JSON key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::llm::LlmError;

/// Role of a message in a conversation.
///
/// Replies from the model are recorded under `System`; there is no third
/// role in this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::System => write!(f, "system"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "system" => Ok(Role::System),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A single chat turn with a stable identifier.
///
/// Ids are handed out by `MessageFactory` in `chatrelay-core`: strictly
/// increasing from 1 and never reused within a session. Content is only
/// ever rewritten through the regenerate operation, which works on the
/// transcript copy, not on this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
}

/// The serialized role/content record stored in a transcript.
///
/// This is the literal shape sent to the remote API. It is a copy taken at
/// append time: mutating the original `Message` afterwards does not reach
/// the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for TranscriptEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// User-visible category of a failed completion call.
///
/// Serializes to the fixed wire strings expected by clients of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    #[serde(rename = "ERROR_AUTHENTICATION")]
    Authentication,
    #[serde(rename = "ERROR_RATE_LIMIT")]
    RateLimit,
    #[serde(rename = "ERROR_INVALID_REQUEST")]
    InvalidRequest,
    #[serde(rename = "ERROR_OPENAI")]
    Upstream,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Authentication => write!(f, "ERROR_AUTHENTICATION"),
            FailureKind::RateLimit => write!(f, "ERROR_RATE_LIMIT"),
            FailureKind::InvalidRequest => write!(f, "ERROR_INVALID_REQUEST"),
            FailureKind::Upstream => write!(f, "ERROR_OPENAI"),
        }
    }
}

/// Successful completion payload: the reply turn as role + content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub role: Role,
    pub content: String,
}

/// Failure payload surfaced to callers instead of a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFailure {
    pub error: FailureKind,
    pub message: String,
}

impl ChatFailure {
    /// Classify a transport error into its user-visible payload.
    ///
    /// The mapping is total: every `LlmError` lands in one of the four
    /// categories, with anything unrecognized folded into `Upstream`.
    pub fn classify(err: &LlmError) -> Self {
        let (error, message) = match err {
            LlmError::AuthenticationFailed => {
                (FailureKind::Authentication, "User Not Authorised")
            }
            LlmError::RateLimited => (FailureKind::RateLimit, "Rate Limit Exceeded"),
            LlmError::InvalidRequest(_) => (FailureKind::InvalidRequest, "Invalid Request"),
            LlmError::Provider { .. } | LlmError::Deserialization(_) => {
                (FailureKind::Upstream, "OpenAI Service Error")
            }
        };
        Self {
            error,
            message: message.to_string(),
        }
    }
}

/// Tagged result of a completion call.
///
/// Untagged serde representation keeps the wire shapes flat:
/// `{"role":..,"content":..}` on success, `{"error":..,"message":..}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatOutcome {
    Reply(ChatReply),
    Failure(ChatFailure),
}

impl ChatOutcome {
    /// Whether this outcome is a reply.
    pub fn is_reply(&self) -> bool {
        matches!(self, ChatOutcome::Reply(_))
    }

    /// The reply payload, if this outcome is one.
    pub fn as_reply(&self) -> Option<&ChatReply> {
        match self {
            ChatOutcome::Reply(reply) => Some(reply),
            ChatOutcome::Failure(_) => None,
        }
    }

    /// The failure payload, if this outcome is one.
    pub fn as_failure(&self) -> Option<&ChatFailure> {
        match self {
            ChatOutcome::Reply(_) => None,
            ChatOutcome::Failure(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::System] {
            let s = role.to_string();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");
        let parsed: Role = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(parsed, Role::System);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("assistant".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"assistant\"").is_err());
    }

    #[test]
    fn test_transcript_entry_is_a_copy() {
        let mut message = Message {
            id: 1,
            role: Role::User,
            content: "Hello".to_string(),
        };
        let entry = TranscriptEntry::from(&message);
        message.content.push_str(", world");
        assert_eq!(entry.content, "Hello");
    }

    #[test]
    fn test_failure_kind_wire_strings() {
        let cases = [
            (FailureKind::Authentication, "ERROR_AUTHENTICATION"),
            (FailureKind::RateLimit, "ERROR_RATE_LIMIT"),
            (FailureKind::InvalidRequest, "ERROR_INVALID_REQUEST"),
            (FailureKind::Upstream, "ERROR_OPENAI"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.to_string(), expected);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{expected}\""));
        }
    }

    #[test]
    fn test_classify_authentication() {
        let failure = ChatFailure::classify(&LlmError::AuthenticationFailed);
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "ERROR_AUTHENTICATION",
                "message": "User Not Authorised",
            })
        );
    }

    #[test]
    fn test_classify_covers_all_errors() {
        let cases = [
            (LlmError::RateLimited, FailureKind::RateLimit),
            (
                LlmError::InvalidRequest("bad param".to_string()),
                FailureKind::InvalidRequest,
            ),
            (
                LlmError::Provider {
                    message: "boom".to_string(),
                },
                FailureKind::Upstream,
            ),
            (
                LlmError::Deserialization("truncated".to_string()),
                FailureKind::Upstream,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ChatFailure::classify(&err).error, expected);
        }
    }

    #[test]
    fn test_outcome_wire_shapes() {
        let reply = ChatOutcome::Reply(ChatReply {
            role: Role::System,
            content: "Hi there".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({"role": "system", "content": "Hi there"})
        );

        let failure = ChatOutcome::Failure(ChatFailure {
            error: FailureKind::RateLimit,
            message: "Rate Limit Exceeded".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            serde_json::json!({"error": "ERROR_RATE_LIMIT", "message": "Rate Limit Exceeded"})
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let reply = ChatOutcome::Reply(ChatReply {
            role: Role::System,
            content: "ok".to_string(),
        });
        assert!(reply.is_reply());
        assert!(reply.as_reply().is_some());
        assert!(reply.as_failure().is_none());

        let failure = ChatOutcome::Failure(ChatFailure::classify(&LlmError::RateLimited));
        assert!(!failure.is_reply());
        assert!(failure.as_failure().is_some());
    }
}
