//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the book data access contract.
//! - Isolate SQLite query details from service/HTTP orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Book::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod book_repo;
