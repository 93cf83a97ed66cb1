//! Domain model for the books resource.
//!
//! # Responsibility
//! - Define the canonical `Book` record shared by storage, service and HTTP.
//!
//! # Invariants
//! - Every persisted book is identified by a unique, storage-assigned `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
