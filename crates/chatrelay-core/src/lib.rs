//! Session logic and backend abstractions for Chatrelay.
//!
//! This crate owns the conversation model (transcript log, message
//! identity, chat client orchestration) and defines the capability trait
//! that concrete completion backends implement. It depends only on
//! `chatrelay-types` -- never on HTTP or any IO crate.

pub mod chat;
pub mod llm;
