//! Moderator note attached to a user.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

/// Storage-assigned note identifier.
pub type NoteId = i64;

/// Free-form note a moderator keeps about a member.
///
/// Only `content` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Member the note is about.
    pub user_id: Snowflake,
    /// Moderator who wrote the note.
    pub moderator_id: Snowflake,
    pub content: String,
    /// Set by storage on insert.
    pub created_at: EpochMillis,
}
