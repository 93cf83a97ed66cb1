//! Process configuration sourced from the environment.
//!
//! # Responsibility
//! - Load an optional `.env` override file into the process environment.
//! - Resolve database location and logging settings from variables.
//!
//! # Invariants
//! - A missing `.env` file is never fatal.
//! - `DB_PATH` wins over `DB_NAME`; both absent yields `books.sqlite3`.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "DB_PATH";
pub const DB_NAME_VAR: &str = "DB_NAME";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

const DEFAULT_DB_NAME: &str = "books";
const DB_FILE_EXTENSION: &str = "sqlite3";

/// Outcome of looking for a `.env` override file.
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    /// Not found or unreadable; carries the loader message.
    Missing(String),
}

/// Loads `.env` from the working directory (or a parent) if present.
///
/// Variables already set in the process environment are not overwritten.
pub fn load_env_file() -> EnvFile {
    match dotenvy::dotenv() {
        Ok(path) => EnvFile::Loaded(path),
        Err(err) => EnvFile::Missing(err.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDbName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDbName(name) => write!(
                f,
                "{DB_NAME_VAR} must be a bare name without path separators, got `{name}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr only when `None`.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = match read(DB_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => {
                let name = read(DB_NAME_VAR).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                if name.contains(['/', '\\']) {
                    return Err(ConfigError::InvalidDbName(name));
                }
                PathBuf::from(format!("{name}.{DB_FILE_EXTENSION}"))
            }
        };

        Ok(Self {
            db_path,
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
        })
    }
}
