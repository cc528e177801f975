//! Moderation infraction model.
//!
//! # Invariants
//! - `infraction_type` is a closed set; unknown persisted values are rejected
//!   on read rather than masked.
//! - Only `infraction_reason` changes after creation.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

pub type InfractionId = i64;

/// Kind of moderation action recorded against a member.
///
/// Serialized in snake_case, which is also the stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfractionType {
    Ban,
    Unban,
    /// Ban of a user who is not a guild member.
    Hackban,
    /// Ban that lifts at `expires_at`.
    Tempban,
    Kick,
    Timeout,
    Untimeout,
    Warn,
    Jail,
    Unjail,
    /// Revokes snippet command access.
    Snippetban,
    Snippetunban,
}

/// One moderation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infraction {
    pub id: InfractionId,
    pub user_id: Snowflake,
    pub moderator_id: Snowflake,
    pub infraction_type: InfractionType,
    pub infraction_reason: Option<String>,
    pub created_at: EpochMillis,
    /// Set for temporary actions only.
    pub expires_at: Option<EpochMillis>,
}
