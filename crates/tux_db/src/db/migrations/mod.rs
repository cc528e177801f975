//! Embedded schema migrations, grouped by the bot feature that owns them.
//!
//! # Invariants
//! - Step versions are contiguous from 1 and applied in order.
//! - Every table a step declares exists once the step has run.
//! - All pending steps commit together or not at all.

use crate::db::{ensure_table_ready, schema_version, DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
    tables: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "members",
        sql: include_str!("0001_members.sql"),
        tables: &["users", "roles", "user_roles"],
    },
    Migration {
        version: 2,
        name: "moderation",
        sql: include_str!("0002_moderation.sql"),
        tables: &["infractions", "notes"],
    },
    Migration {
        version: 3,
        name: "guild_content",
        sql: include_str!("0003_guild_content.sql"),
        tables: &["reminders", "snippets", "emoji_stats"],
    },
];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `MissingRequiredTable` when a step ran but did not create what it owns.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_steps(conn, MIGRATIONS)
}

fn run_steps(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let target = steps.last().map_or(0, |step| step.version);
    if from_version > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target,
        });
    }

    let pending: Vec<&Migration> = steps
        .iter()
        .skip_while(|step| step.version <= from_version)
        .collect();
    let Some(last) = pending.last() else {
        return Ok(());
    };

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        for &table in step.tables {
            ensure_table_ready(&tx, table, &[])?;
        }
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={} steps={}",
        last.version,
        pending.len()
    );
    Ok(())
}
