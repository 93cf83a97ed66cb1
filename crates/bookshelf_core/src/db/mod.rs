//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open, ping and configure the SQLite connection backing the books table.
//! - Ensure the `books` table exists before any request is served.
//! - Hand out the connection as an explicitly shared handle.
//!
//! # Invariants
//! - The schema step runs on every open; `PRAGMA user_version` is ignored.
//! - Repositories must not touch the connection before `open_db*` succeeds.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory, ping};
pub use schema::ensure_schema;

pub type DbResult<T> = Result<T, DbError>;

/// Connection handle shared by every repository and request task.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Wraps a bootstrapped connection for concurrent use.
pub fn share(conn: Connection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A task panicked while holding the connection lock.
    ConnectionPoisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ConnectionPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
