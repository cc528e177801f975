//! Typed row records for every table the bot persists.
//!
//! # Invariants
//! - Identifiers are immutable once assigned; Discord-owned ids are snowflakes.
//! - Timestamps are Unix epoch milliseconds.
//! - Foreign references are plain ids; storage enforces them, records never
//!   traverse them.

pub mod emoji_stat;
pub mod infraction;
pub mod note;
pub mod reminder;
pub mod role;
pub mod snippet;
pub mod user;
pub mod user_role;

/// Discord snowflake identifier.
pub type Snowflake = i64;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;
