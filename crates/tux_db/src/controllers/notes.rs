//! Notes table controller.
//!
//! # Invariants
//! - `update_note` touches `content` only; id and references never change.
//! - A miss is `None`/empty. Foreign-key violations surface as storage errors.

use crate::model::note::{Note, NoteId};
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for Note {
    const NAME: &'static str = "notes";
    const COLUMNS: &'static [&'static str] =
        &["id", "user_id", "moderator_id", "content", "created_at"];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            moderator_id: row.get("moderator_id")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// CRUD access to moderator notes.
pub struct NotesController<'conn> {
    table: TableQuery<'conn, Note>,
}

impl<'conn> NotesController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    /// Every note, oldest first. Unbounded.
    pub fn get_all_notes(&self) -> QueryResult<Vec<Note>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_note_by_id(&self, note_id: NoteId) -> QueryResult<Option<Note>> {
        self.table.find_first(&Filter::eq("id", note_id))
    }

    /// Inserts a note; storage assigns `id` and `created_at`.
    pub fn create_note(
        &self,
        user_id: Snowflake,
        moderator_id: Snowflake,
        content: &str,
    ) -> QueryResult<Note> {
        self.table.create(
            &Data::new()
                .set("user_id", user_id)
                .set("moderator_id", moderator_id)
                .set("content", content.to_owned()),
        )
    }

    /// Removes the note if present. A missing id is not an error.
    pub fn delete_note(&self, note_id: NoteId) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", note_id))?;
        Ok(())
    }

    /// Replaces the note's content. `None` when no note has this id.
    pub fn update_note(&self, note_id: NoteId, content: &str) -> QueryResult<Option<Note>> {
        self.table.update(
            &Filter::eq("id", note_id),
            &Data::new().set("content", content.to_owned()),
        )
    }

    pub fn get_notes_by_user_id(&self, user_id: Snowflake) -> QueryResult<Vec<Note>> {
        self.table.find_many(&Filter::eq("user_id", user_id))
    }

    pub fn get_notes_by_moderator_id(&self, moderator_id: Snowflake) -> QueryResult<Vec<Note>> {
        self.table.find_many(&Filter::eq("moderator_id", moderator_id))
    }
}
