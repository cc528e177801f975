//! Guild role record.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub hoist: bool,
    pub managed: bool,
    pub mentionable: bool,
    pub mention: String,
    /// Packed RGB value as Discord reports it.
    pub color: i64,
    pub created_at: Option<EpochMillis>,
}

/// Writable role columns, shared by create, update and sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFields {
    pub name: String,
    pub hoist: bool,
    pub managed: bool,
    pub mentionable: bool,
    pub mention: String,
    pub color: i64,
    pub created_at: Option<EpochMillis>,
}
