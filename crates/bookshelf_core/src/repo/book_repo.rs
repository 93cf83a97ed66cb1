//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Book::validate()` before SQL mutations.
//! - Update/delete touching zero rows report `NotFound`, never insert.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{DbError, SharedConnection};
use crate::model::book::{Book, BookId, BookValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, year FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book with id {id} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
///
/// `Send + Sync` so one instance can serve concurrent request tasks.
pub trait BookRepository: Send + Sync {
    /// Inserts `book` and writes the generated id back onto it.
    fn create_book(&self, book: &mut Book) -> RepoResult<BookId>;
    /// Lists every book ordered by id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Book>;
    /// Replaces title/year of the row matching `book.id`.
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
#[derive(Clone)]
pub struct SqliteBookRepository {
    conn: SharedConnection,
}

impl SqliteBookRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let guard = self.conn.lock().map_err(|_| DbError::ConnectionPoisoned)?;
        f(&guard)
    }
}

impl BookRepository for SqliteBookRepository {
    fn create_book(&self, book: &mut Book) -> RepoResult<BookId> {
        book.validate()?;

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO books (title, year) VALUES (?1, ?2);",
                params![book.title.as_str(), book.year],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        book.id = id;
        Ok(id)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut books = Vec::new();

            while let Some(row) = rows.next()? {
                books.push(parse_book_row(row)?);
            }

            Ok(books)
        })
    }

    fn get_book(&self, id: BookId) -> RepoResult<Book> {
        let found = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_book_row(row)?));
            }

            Ok(None)
        })?;

        found.ok_or(RepoError::NotFound(id))
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let changed = self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE books SET title = ?1, year = ?2 WHERE id = ?3;",
                params![book.title.as_str(), book.year, book.id],
            )?;
            Ok(changed)
        })?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
            Ok(changed)
        })?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        year: row.get("year")?,
    };
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("books row {} failed validation: {err}", book.id))
    })?;
    Ok(book)
}
