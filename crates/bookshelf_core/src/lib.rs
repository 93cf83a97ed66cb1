//! Core domain logic for the bookshelf service.
//! This crate is the single source of truth for book invariants and storage.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{load_env_file, AppConfig, ConfigError, EnvFile};
pub use logging::{default_log_level, flush_logging, init_logging};
pub use model::book::{Book, BookId, BookValidationError, UNASSIGNED_BOOK_ID};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_service::BookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
