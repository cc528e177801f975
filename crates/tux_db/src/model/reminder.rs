//! Scheduled reminder.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

pub type ReminderId = i64;

/// A message the bot owes a user once `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user_id: Snowflake,
    pub content: String,
    pub created_at: EpochMillis,
    pub expires_at: EpochMillis,
    /// Channel the reminder is delivered to.
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
}
