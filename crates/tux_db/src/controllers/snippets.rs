//! Snippets table controller.
//!
//! # Invariants
//! - `(guild_id, name)` is unique; a duplicate create fails in storage.
//! - Name lookups are exact. Case folding is the command layer's call.

use crate::model::snippet::{Snippet, SnippetId};
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for Snippet {
    const NAME: &'static str = "snippets";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "content",
        "author_id",
        "guild_id",
        "created_at",
    ];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            content: row.get("content")?,
            author_id: row.get("author_id")?,
            guild_id: row.get("guild_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct SnippetsController<'conn> {
    table: TableQuery<'conn, Snippet>,
}

impl<'conn> SnippetsController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_snippets(&self) -> QueryResult<Vec<Snippet>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_snippet_by_id(&self, snippet_id: SnippetId) -> QueryResult<Option<Snippet>> {
        self.table.find_first(&Filter::eq("id", snippet_id))
    }

    pub fn get_snippet_by_name(
        &self,
        guild_id: Snowflake,
        name: &str,
    ) -> QueryResult<Option<Snippet>> {
        self.table
            .find_first(&Filter::eq("guild_id", guild_id).and_eq("name", name.to_owned()))
    }

    pub fn get_snippets_by_guild_id(&self, guild_id: Snowflake) -> QueryResult<Vec<Snippet>> {
        self.table.find_many(&Filter::eq("guild_id", guild_id))
    }

    pub fn get_snippets_by_author_id(&self, author_id: Snowflake) -> QueryResult<Vec<Snippet>> {
        self.table.find_many(&Filter::eq("author_id", author_id))
    }

    pub fn create_snippet(
        &self,
        name: &str,
        content: &str,
        author_id: Snowflake,
        guild_id: Snowflake,
    ) -> QueryResult<Snippet> {
        self.table.create(
            &Data::new()
                .set("name", name.to_owned())
                .set("content", content.to_owned())
                .set("author_id", author_id)
                .set("guild_id", guild_id),
        )
    }

    pub fn update_snippet_content(
        &self,
        snippet_id: SnippetId,
        content: &str,
    ) -> QueryResult<Option<Snippet>> {
        self.table.update(
            &Filter::eq("id", snippet_id),
            &Data::new().set("content", content.to_owned()),
        )
    }

    pub fn delete_snippet(&self, snippet_id: SnippetId) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", snippet_id))?;
        Ok(())
    }
}
