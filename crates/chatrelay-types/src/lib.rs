//! Shared domain types for Chatrelay.
//!
//! This crate contains the types used across the Chatrelay service:
//! chat roles, messages, transcript records, completion request/response
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod error;
pub mod llm;
