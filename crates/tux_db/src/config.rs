//! Database and logging configuration.
//!
//! Values can be built directly or read from the process environment. Reads go
//! through `dotenvy`, so a `.env` file next to the bot is honoured the same way
//! the bot's `DATABASE_URL` always has been.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const BUSY_TIMEOUT_VAR: &str = "DATABASE_BUSY_TIMEOUT_MS";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),
    #[error("environment variable `{var}` has an invalid value: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Reads `DATABASE_URL` and the optional `DATABASE_BUSY_TIMEOUT_MS`.
    ///
    /// # Errors
    /// - `MissingVar` when `DATABASE_URL` is unset.
    /// - `InvalidVar` when either value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url =
            dotenvy::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingVar(DATABASE_URL_VAR))?;
        let mut config = Self {
            location: parse_database_url(&url)?,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        };

        if let Ok(raw) = dotenvy::var(BUSY_TIMEOUT_VAR) {
            config.busy_timeout = parse_busy_timeout(&raw)?;
        }

        Ok(config)
    }
}

/// Logging settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
        }
    }

    /// Reads `LOG_DIR` (required) and `LOG_LEVEL` (build-mode default).
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_dir = dotenvy::var(LOG_DIR_VAR).map_err(|_| ConfigError::MissingVar(LOG_DIR_VAR))?;
        let level = dotenvy::var(LOG_LEVEL_VAR)
            .unwrap_or_else(|_| crate::logging::default_log_level().to_string());
        Ok(Self::new(level, log_dir))
    }
}

/// Parses the SQLite URL forms accepted in `DATABASE_URL`.
///
/// `file:<path>`, `sqlite://<path>`, `sqlite:<path>` and bare paths map to a
/// file; `:memory:` and `sqlite::memory:` map to an in-memory database.
pub fn parse_database_url(raw: &str) -> Result<DatabaseLocation, ConfigError> {
    let trimmed = raw.trim();
    let path = ["sqlite://", "sqlite:", "file://", "file:"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    // Query parameters such as `?mode=rwc` only matter to other drivers.
    let path = path.split('?').next().unwrap_or_default();

    if path.is_empty() {
        return Err(ConfigError::InvalidVar {
            var: DATABASE_URL_VAR,
            reason: "database path is empty".to_string(),
        });
    }
    if path == ":memory:" {
        return Ok(DatabaseLocation::Memory);
    }

    Ok(DatabaseLocation::File(Path::new(path).to_path_buf()))
}

fn parse_busy_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| ConfigError::InvalidVar {
            var: BUSY_TIMEOUT_VAR,
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{
        parse_busy_timeout, parse_database_url, ConfigError, DatabaseConfig, DatabaseLocation,
        LoggingConfig, BUSY_TIMEOUT_VAR, DATABASE_URL_VAR, DEFAULT_BUSY_TIMEOUT, LOG_DIR_VAR,
        LOG_LEVEL_VAR,
    };
    use std::env;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn url_prefixes_resolve_to_file_paths() {
        for raw in [
            "file:./tux.db",
            "sqlite://./tux.db",
            "sqlite:./tux.db",
            "./tux.db",
        ] {
            assert_eq!(
                parse_database_url(raw).unwrap(),
                DatabaseLocation::File(PathBuf::from("./tux.db")),
                "{raw}"
            );
        }
    }

    #[test]
    fn query_parameters_are_dropped() {
        assert_eq!(
            parse_database_url("sqlite:///var/lib/tux/tux.db?mode=rwc").unwrap(),
            DatabaseLocation::File(PathBuf::from("/var/lib/tux/tux.db"))
        );
    }

    #[test]
    fn memory_urls_resolve_to_memory() {
        assert_eq!(
            parse_database_url("sqlite::memory:").unwrap(),
            DatabaseLocation::Memory
        );
        assert_eq!(
            parse_database_url(" :memory: ").unwrap(),
            DatabaseLocation::Memory
        );
    }

    #[test]
    fn empty_url_is_rejected() {
        let err = parse_database_url("file:").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "DATABASE_URL", .. }));
    }

    #[test]
    fn busy_timeout_parses_milliseconds() {
        assert_eq!(parse_busy_timeout("250").unwrap(), Duration::from_millis(250));
        assert!(parse_busy_timeout("soon").is_err());
    }

    // Sole test mutating these variables; tests share one process.
    #[test]
    fn from_env_reads_and_validates_variables() {
        // Loads any `.env` once, before the variables are cleared.
        let _ = dotenvy::var(DATABASE_URL_VAR);
        for var in [DATABASE_URL_VAR, BUSY_TIMEOUT_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR] {
            env::remove_var(var);
        }

        assert_eq!(
            DatabaseConfig::from_env(),
            Err(ConfigError::MissingVar(DATABASE_URL_VAR))
        );

        env::set_var(DATABASE_URL_VAR, "sqlite::memory:");
        assert_eq!(DatabaseConfig::from_env().unwrap(), DatabaseConfig::in_memory());

        env::set_var(DATABASE_URL_VAR, "file:/srv/tux/tux.db");
        env::set_var(BUSY_TIMEOUT_VAR, "250");
        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(
            config.location,
            DatabaseLocation::File(PathBuf::from("/srv/tux/tux.db"))
        );
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_ne!(config.busy_timeout, DEFAULT_BUSY_TIMEOUT);

        env::set_var(BUSY_TIMEOUT_VAR, "soon");
        assert!(matches!(
            DatabaseConfig::from_env(),
            Err(ConfigError::InvalidVar { var: BUSY_TIMEOUT_VAR, .. })
        ));

        assert_eq!(
            LoggingConfig::from_env(),
            Err(ConfigError::MissingVar(LOG_DIR_VAR))
        );

        env::set_var(LOG_DIR_VAR, "/var/log/tux");
        let logging = LoggingConfig::from_env().unwrap();
        assert_eq!(logging.level, crate::logging::default_log_level());
        assert_eq!(logging.log_dir, PathBuf::from("/var/log/tux"));

        env::set_var(LOG_LEVEL_VAR, "warn");
        assert_eq!(LoggingConfig::from_env().unwrap().level, "warn");

        for var in [DATABASE_URL_VAR, BUSY_TIMEOUT_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR] {
            env::remove_var(var);
        }
    }
}
