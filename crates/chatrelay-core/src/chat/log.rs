//! Ordered transcript of a conversation with O(1) lookup by message id.
//!
//! The log stores serialized [`TranscriptEntry`] records -- copies taken at
//! append time -- in conversation order. `id_map` gives each message id its
//! index; the invariant is that `entries[id_map[id]]` is the entry appended
//! for that id. Appends never reorder or remove existing entries; the only
//! mutations besides append are `rewrite_response` (regenerate) and
//! `retract` (rollback of the final entry after a failed remote call).

use std::collections::HashMap;

use chatrelay_types::chat::{Message, Role, TranscriptEntry};
use chatrelay_types::error::SessionError;

/// Ordered transcript plus id-to-index map.
#[derive(Debug, Default, Clone)]
pub struct ChatLog {
    entries: Vec<TranscriptEntry>,
    id_map: HashMap<u64, usize>,
}

impl ChatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transcript entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a message id has been recorded.
    pub fn contains(&self, id: u64) -> bool {
        self.id_map.contains_key(&id)
    }

    /// Index of the entry recorded for a message id.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.id_map.get(&id).copied()
    }

    /// The transcript in conversation order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Serialize a message and append it, recording its id at the new index.
    ///
    /// Returns the index of the appended entry. Fails with
    /// [`SessionError::DuplicateMessage`] if the id is already recorded --
    /// appending twice would leave `id_map` pointing at only the last copy.
    pub fn add_message(&mut self, message: &Message) -> Result<usize, SessionError> {
        if self.id_map.contains_key(&message.id) {
            return Err(SessionError::DuplicateMessage(message.id));
        }
        self.entries.push(TranscriptEntry::from(message));
        let index = self.entries.len() - 1;
        self.id_map.insert(message.id, index);
        Ok(index)
    }

    /// Append a system-role reply entry.
    ///
    /// Replies are not identity-tracked: only caller-constructed turns get
    /// an `id_map` entry. Regeneration addresses a reply through the id of
    /// the user turn preceding it.
    pub fn append_reply(&mut self, content: String) {
        self.entries.push(TranscriptEntry {
            role: Role::System,
            content,
        });
    }

    /// Remove the entry for `id`, but only if it is the final entry.
    ///
    /// Used to roll back a just-appended turn after a failed remote call so
    /// failure paths leave the transcript unchanged. Interior entries are
    /// never removed; a non-final id is a no-op returning `false`.
    pub fn retract(&mut self, id: u64) -> bool {
        match self.id_map.get(&id) {
            Some(&index) if index + 1 == self.entries.len() => {
                self.entries.pop();
                self.id_map.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Overwrite the content of the entry immediately following `id`.
    ///
    /// This is the regenerate edit: the response entry keeps its position,
    /// only its content changes. Fails with `UnknownMessage` if `id` was
    /// never recorded and `MissingResponse` if no entry follows it.
    pub fn rewrite_response(&mut self, id: u64, content: String) -> Result<(), SessionError> {
        let index = self
            .index_of(id)
            .ok_or(SessionError::UnknownMessage(id))?;
        let response = self
            .entries
            .get_mut(index + 1)
            .ok_or(SessionError::MissingResponse(id))?;
        response.content = content;
        Ok(())
    }
}
