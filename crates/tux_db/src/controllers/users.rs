//! Users table controller.

use crate::model::user::{User, UserFields};
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for User {
    const NAME: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "display_name",
        "mention",
        "bot",
        "created_at",
        "joined_at",
    ];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            display_name: row.get("display_name")?,
            mention: row.get("mention")?,
            bot: row.get("bot")?,
            created_at: row.get("created_at")?,
            joined_at: row.get("joined_at")?,
        })
    }
}

fn field_data(fields: &UserFields) -> Data {
    Data::new()
        .set("name", fields.name.clone())
        .set("display_name", fields.display_name.clone())
        .set("mention", fields.mention.clone())
        .set("bot", fields.bot)
        .set("created_at", fields.created_at)
        .set("joined_at", fields.joined_at)
}

/// CRUD access to known Discord users.
pub struct UsersController<'conn> {
    table: TableQuery<'conn, User>,
}

impl<'conn> UsersController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_users(&self) -> QueryResult<Vec<User>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_user_by_id(&self, user_id: Snowflake) -> QueryResult<Option<User>> {
        self.table.find_first(&Filter::eq("id", user_id))
    }

    /// Inserts a user under their Discord id. An existing id is a storage error.
    pub fn create_user(&self, user_id: Snowflake, fields: &UserFields) -> QueryResult<User> {
        self.table.create(&field_data(fields).set("id", user_id))
    }

    pub fn update_user(
        &self,
        user_id: Snowflake,
        fields: &UserFields,
    ) -> QueryResult<Option<User>> {
        self.table
            .update(&Filter::eq("id", user_id), &field_data(fields))
    }

    /// Inserts the user, or overwrites every field of the existing row.
    pub fn sync_user(&self, user_id: Snowflake, fields: &UserFields) -> QueryResult<User> {
        self.table.upsert(
            &field_data(fields).set("id", user_id),
            &["id"],
            &field_data(fields),
        )
    }

    /// Removes the user; their notes, infractions, reminders, snippets and
    /// role links go with them.
    ///
    /// # Errors
    /// - Constraint error while the user is still the moderator on any note
    ///   or infraction. Nothing is removed in that case.
    pub fn delete_user(&self, user_id: Snowflake) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", user_id))?;
        Ok(())
    }
}
