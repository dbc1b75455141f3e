//! Conversation model for Chatrelay.
//!
//! - `ChatLog`: ordered transcript with an id-to-index map
//! - `MessageFactory` / `ChatClient`: message identity and call orchestration
//! - `SessionRegistry`: per-session exclusive ownership for concurrent hosts

pub mod client;
pub mod log;
pub mod registry;
