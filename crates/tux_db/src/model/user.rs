//! Guild member record.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

/// A Discord user the bot has seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub display_name: String,
    pub mention: String,
    pub bot: bool,
    /// Account creation time, when Discord reported it.
    pub created_at: Option<EpochMillis>,
    /// Guild join time, when Discord reported it.
    pub joined_at: Option<EpochMillis>,
}

/// Writable user columns, shared by create, update and sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub display_name: String,
    pub mention: String,
    pub bot: bool,
    pub created_at: Option<EpochMillis>,
    pub joined_at: Option<EpochMillis>,
}
