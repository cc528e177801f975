//! Emoji usage counter record.

use super::Snowflake;
use serde::{Deserialize, Serialize};

/// Usage counter for one custom emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiStat {
    pub emoji_id: Snowflake,
    pub count: i64,
}
