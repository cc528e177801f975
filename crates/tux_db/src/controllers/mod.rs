//! Per-table controllers and the `DatabaseController` that owns their
//! connection.
//!
//! # Responsibility
//! - Give the command layer named access to one controller per table.
//! - Keep the one shared connection owned in a single place.
//!
//! # Invariants
//! - Sub-controllers borrow the owner's connection and never outlive it.
//! - Every controller method issues exactly one statement.
//! - Connections adopted through `from_connection` are fully migrated.

mod emojistats;
mod infractions;
mod notes;
mod reminders;
mod roles;
mod snippets;
mod user_roles;
mod users;

pub use emojistats::EmojiStatsController;
pub use infractions::InfractionsController;
pub use notes::NotesController;
pub use reminders::RemindersController;
pub use roles::RolesController;
pub use snippets::SnippetsController;
pub use user_roles::UserRolesController;
pub use users::UsersController;

use crate::config::DatabaseConfig;
use crate::db::{ensure_migrated, ensure_table_ready, open_db_in_memory, open_with_config, DbResult};
use crate::model::emoji_stat::EmojiStat;
use crate::model::infraction::Infraction;
use crate::model::note::Note;
use crate::model::reminder::Reminder;
use crate::model::role::Role;
use crate::model::snippet::Snippet;
use crate::model::user::User;
use crate::model::user_role::UserRole;
use crate::query::Table;
use rusqlite::Connection;

/// Owner of the bot's database connection.
pub struct DatabaseController {
    conn: Connection,
}

impl DatabaseController {
    /// Opens and migrates the database described by `config`.
    pub fn open(config: &DatabaseConfig) -> DbResult<Self> {
        Ok(Self {
            conn: open_with_config(config)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Adopts a connection opened elsewhere.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations are behind or ahead.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema does
    ///   not carry what the typed rows read.
    pub fn from_connection(conn: Connection) -> DbResult<Self> {
        ensure_migrated(&conn)?;
        ensure_ready::<User>(&conn)?;
        ensure_ready::<Role>(&conn)?;
        ensure_ready::<UserRole>(&conn)?;
        ensure_ready::<Infraction>(&conn)?;
        ensure_ready::<Note>(&conn)?;
        ensure_ready::<Reminder>(&conn)?;
        ensure_ready::<Snippet>(&conn)?;
        ensure_ready::<EmojiStat>(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    pub fn users(&self) -> UsersController<'_> {
        UsersController::new(&self.conn)
    }

    pub fn infractions(&self) -> InfractionsController<'_> {
        InfractionsController::new(&self.conn)
    }

    pub fn notes(&self) -> NotesController<'_> {
        NotesController::new(&self.conn)
    }

    pub fn snippets(&self) -> SnippetsController<'_> {
        SnippetsController::new(&self.conn)
    }

    pub fn reminders(&self) -> RemindersController<'_> {
        RemindersController::new(&self.conn)
    }

    pub fn roles(&self) -> RolesController<'_> {
        RolesController::new(&self.conn)
    }

    pub fn user_roles(&self) -> UserRolesController<'_> {
        UserRolesController::new(&self.conn)
    }

    pub fn emojistats(&self) -> EmojiStatsController<'_> {
        EmojiStatsController::new(&self.conn)
    }
}

fn ensure_ready<T: Table>(conn: &Connection) -> DbResult<()> {
    ensure_table_ready(conn, T::NAME, T::COLUMNS)
}
