//! Guild text snippet.

use super::{EpochMillis, Snowflake};
use serde::{Deserialize, Serialize};

pub type SnippetId = i64;

/// Named canned response. Names are unique per guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub name: String,
    pub content: String,
    pub author_id: Snowflake,
    pub guild_id: Snowflake,
    pub created_at: EpochMillis,
}
