//! Reminders table controller.
//!
//! Expiry is evaluated against a caller-supplied `now`.

use crate::model::reminder::{Reminder, ReminderId};
use crate::model::{EpochMillis, Snowflake};
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for Reminder {
    const NAME: &'static str = "reminders";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "content",
        "created_at",
        "expires_at",
        "channel_id",
        "guild_id",
    ];
    const ORDER_BY: &'static str = "id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            expires_at: row.get("expires_at")?,
            channel_id: row.get("channel_id")?,
            guild_id: row.get("guild_id")?,
        })
    }
}

pub struct RemindersController<'conn> {
    table: TableQuery<'conn, Reminder>,
}

impl<'conn> RemindersController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_reminders(&self) -> QueryResult<Vec<Reminder>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_reminder_by_id(&self, reminder_id: ReminderId) -> QueryResult<Option<Reminder>> {
        self.table.find_first(&Filter::eq("id", reminder_id))
    }

    pub fn create_reminder(
        &self,
        user_id: Snowflake,
        content: &str,
        expires_at: EpochMillis,
        channel_id: Snowflake,
        guild_id: Snowflake,
    ) -> QueryResult<Reminder> {
        self.table.create(
            &Data::new()
                .set("user_id", user_id)
                .set("content", content.to_owned())
                .set("expires_at", expires_at)
                .set("channel_id", channel_id)
                .set("guild_id", guild_id),
        )
    }

    /// Replaces the reminder text; the schedule stays as created.
    pub fn update_reminder(
        &self,
        reminder_id: ReminderId,
        content: &str,
    ) -> QueryResult<Option<Reminder>> {
        self.table.update(
            &Filter::eq("id", reminder_id),
            &Data::new().set("content", content.to_owned()),
        )
    }

    pub fn delete_reminder(&self, reminder_id: ReminderId) -> QueryResult<()> {
        self.table.delete(&Filter::eq("id", reminder_id))?;
        Ok(())
    }

    pub fn get_reminders_by_user_id(&self, user_id: Snowflake) -> QueryResult<Vec<Reminder>> {
        self.table.find_many(&Filter::eq("user_id", user_id))
    }

    pub fn get_reminders_by_guild_id(&self, guild_id: Snowflake) -> QueryResult<Vec<Reminder>> {
        self.table.find_many(&Filter::eq("guild_id", guild_id))
    }

    /// Reminders due at or before `now`.
    pub fn get_expired_reminders(&self, now: EpochMillis) -> QueryResult<Vec<Reminder>> {
        self.table.find_many(&Filter::lte("expires_at", now))
    }
}
