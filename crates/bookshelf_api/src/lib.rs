//! HTTP surface for the bookshelf service.
//!
//! # Responsibility
//! - Expose book CRUD over JSON/HTTP on top of `bookshelf_core::BookService`.
//! - Own the cross-origin policy, request logging and panic recovery.
//!
//! # Invariants
//! - Handlers never block the async runtime; storage calls run on the
//!   blocking pool.
//! - Every failure becomes a JSON `{"error": ...}` body with a status code.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use handlers::{AppState, BookEnvelope, BookPayload, MessageResponse};
pub use router::{build_router, serve, ALLOWED_ORIGINS, LISTEN_PORT};
