//! Schema bootstrap for the `books` table.
//!
//! # Invariants
//! - Runs on every open, regardless of `PRAGMA user_version`.
//! - The DDL is `IF NOT EXISTS`, so an existing `books` table and its rows
//!   are kept as they are.

use crate::db::DbResult;
use log::info;
use rusqlite::Connection;

const BOOKS_SCHEMA_SQL: &str = include_str!("books.sql");

/// Creates the `books` table when it is missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(BOOKS_SCHEMA_SQL)?;
    info!("event=db_schema module=db status=ok table=books");
    Ok(())
}
