//! Book use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for the HTTP layer.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Updates are rejected before storage when the target id is unassigned.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookId, BookValidationError};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new book; `book.id` holds the assigned id afterwards.
    pub fn create_book(&self, book: &mut Book) -> RepoResult<BookId> {
        self.repo.create_book(book)
    }

    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Book> {
        self.repo.get_book(id)
    }

    /// Replaces title/year of an existing book.
    ///
    /// Returns `MissingId` for an unassigned id, otherwise repository-level
    /// not-found or validation errors unchanged.
    pub fn update_book(&self, book: &Book) -> RepoResult<()> {
        if !book.has_id() {
            return Err(RepoError::Validation(BookValidationError::MissingId));
        }
        self.repo.update_book(book)
    }

    pub fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }
}
