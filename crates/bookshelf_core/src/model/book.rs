//! Book domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its wire shape.
//! - Own field-level validation shared by repository and service.
//!
//! # Invariants
//! - `id == 0` means "not yet assigned by storage".
//! - `title` is never blank and `year` is never zero for a valid book.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier (SQLite `INTEGER PRIMARY KEY`).
pub type BookId = i64;

/// Placeholder id carried by books that have not been inserted yet.
pub const UNASSIGNED_BOOK_ID: BookId = 0;

/// Canonical book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub year: i64,
}

/// Validation errors raised before a book reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// `title` is empty or whitespace only.
    EmptyTitle,
    /// `year` is absent (zero).
    MissingYear,
    /// Mutation requested without a storage-assigned id.
    MissingId,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::MissingYear => write!(f, "year is required"),
            Self::MissingId => write!(f, "book id is required for update"),
        }
    }
}

impl Error for BookValidationError {}

impl Book {
    /// Creates a book that has not been persisted yet.
    pub fn new(title: impl Into<String>, year: i64) -> Self {
        Self::with_id(UNASSIGNED_BOOK_ID, title, year)
    }

    /// Creates a book with a known identifier, e.g. when targeting an update.
    pub fn with_id(id: BookId, title: impl Into<String>, year: i64) -> Self {
        Self {
            id,
            title: title.into(),
            year,
        }
    }

    /// Returns whether storage has assigned an identifier yet.
    pub fn has_id(&self) -> bool {
        self.id != UNASSIGNED_BOOK_ID
    }

    /// Validates the writable fields.
    ///
    /// Does not check `id`; create ignores it and update checks it in the
    /// service layer.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.year == 0 {
            return Err(BookValidationError::MissingYear);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookValidationError};

    #[test]
    fn new_book_has_no_id() {
        let book = Book::new("Dune", 1965);
        assert!(!book.has_id());
        assert_eq!(book.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_title_before_year() {
        let book = Book::new("   ", 0);
        assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));
    }

    #[test]
    fn validate_rejects_zero_year() {
        let book = Book::new("Dune", 0);
        assert_eq!(book.validate(), Err(BookValidationError::MissingYear));
    }

    #[test]
    fn negative_years_are_allowed() {
        assert_eq!(Book::new("The Odyssey", -700).validate(), Ok(()));
    }
}
