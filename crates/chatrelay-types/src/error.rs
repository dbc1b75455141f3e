//! Session precondition faults.
//!
//! These are not part of the user-visible failure taxonomy in
//! [`crate::chat::ChatFailure`]. A `SessionError` means the caller violated
//! a transcript precondition; it propagates as a fault rather than being
//! converted into a payload.

use thiserror::Error;

/// Errors from transcript operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("message {0} is already recorded in the transcript")]
    DuplicateMessage(u64),

    #[error("message {0} is not in the transcript")]
    UnknownMessage(u64),

    #[error("message {0} has no response entry to overwrite")]
    MissingResponse(u64),
}
