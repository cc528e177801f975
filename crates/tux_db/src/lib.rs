//! Database access layer for the Tux moderation bot.
//! One controller per table, all sharing a single SQLite connection owned by
//! `DatabaseController`.

pub mod config;
pub mod controllers;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;

pub use config::{ConfigError, DatabaseConfig, DatabaseLocation, LoggingConfig};
pub use controllers::{
    DatabaseController, EmojiStatsController, InfractionsController, NotesController,
    RemindersController, RolesController, SnippetsController, UserRolesController,
    UsersController,
};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::emoji_stat::EmojiStat;
pub use model::infraction::{Infraction, InfractionId, InfractionType};
pub use model::note::{Note, NoteId};
pub use model::reminder::{Reminder, ReminderId};
pub use model::role::{Role, RoleFields};
pub use model::snippet::{Snippet, SnippetId};
pub use model::user::{User, UserFields};
pub use model::user_role::UserRole;
pub use model::{EpochMillis, Snowflake};
pub use query::{Data, Filter, QueryError, QueryResult, Table, TableQuery};
