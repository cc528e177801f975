//! Per-emoji usage counters.

use crate::model::emoji_stat::EmojiStat;
use crate::model::Snowflake;
use crate::query::{Data, Filter, QueryResult, Table, TableQuery};
use rusqlite::{Connection, Row};

impl Table for EmojiStat {
    const NAME: &'static str = "emoji_stats";
    const COLUMNS: &'static [&'static str] = &["emoji_id", "count"];
    const ORDER_BY: &'static str = "emoji_id ASC";

    fn from_row(row: &Row<'_>) -> QueryResult<Self> {
        Ok(Self {
            emoji_id: row.get("emoji_id")?,
            count: row.get("count")?,
        })
    }
}

/// Per-emoji usage counters.
pub struct EmojiStatsController<'conn> {
    table: TableQuery<'conn, EmojiStat>,
}

impl<'conn> EmojiStatsController<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            table: TableQuery::new(conn),
        }
    }

    pub fn get_all_emoji_stats(&self) -> QueryResult<Vec<EmojiStat>> {
        self.table.find_many(&Filter::all())
    }

    pub fn get_emoji_stats(&self, emoji_id: Snowflake) -> QueryResult<Option<EmojiStat>> {
        self.table.find_first(&Filter::eq("emoji_id", emoji_id))
    }

    /// Starts tracking an emoji at zero uses.
    pub fn create_emoji_stats(&self, emoji_id: Snowflake) -> QueryResult<EmojiStat> {
        self.table.create(&Data::new().set("emoji_id", emoji_id))
    }

    /// Counts one use, creating the counter on first sight.
    pub fn increment_emoji_count(&self, emoji_id: Snowflake) -> QueryResult<EmojiStat> {
        self.table.upsert(
            &Data::new().set("emoji_id", emoji_id).increment("count", 1),
            &["emoji_id"],
            &Data::new().increment("count", 1),
        )
    }

    pub fn update_emoji_count(
        &self,
        emoji_id: Snowflake,
        count: i64,
    ) -> QueryResult<Option<EmojiStat>> {
        self.table.update(
            &Filter::eq("emoji_id", emoji_id),
            &Data::new().set("count", count),
        )
    }

    pub fn delete_emoji_stats(&self, emoji_id: Snowflake) -> QueryResult<()> {
        self.table.delete(&Filter::eq("emoji_id", emoji_id))?;
        Ok(())
    }
}
