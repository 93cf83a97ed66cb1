//! Book route handlers.
//!
//! # Responsibility
//! - Parse path ids and JSON bodies into core types.
//! - Run service calls on the blocking pool and shape JSON responses.
//!
//! # Invariants
//! - Body fields are taken from the payload; the id always comes from the path.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bookshelf_core::{Book, BookId, BookRepository, BookService, RepoResult, UNASSIGNED_BOOK_ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CREATED_MESSAGE: &str = "Book created successfully";
const UPDATED_MESSAGE: &str = "Book updated successfully";
const DELETED_MESSAGE: &str = "Book deleted successfully";

/// Shared router state: one service instance for every request task.
pub struct AppState<R: BookRepository> {
    service: Arc<BookService<R>>,
}

impl<R: BookRepository> AppState<R> {
    pub fn new(service: BookService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<R: BookRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub year: i64,
}

impl BookPayload {
    fn into_book(self, id: BookId) -> Book {
        Book::with_id(id, self.title, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEnvelope {
    pub message: String,
    pub book: Book,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_books<R: BookRepository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = run_blocking(&state, |service| service.list_books()).await?;
    Ok(Json(books))
}

pub async fn get_book<R: BookRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&raw_id)?;
    let book = run_blocking(&state, move |service| service.get_book(id)).await?;
    Ok(Json(book))
}

pub async fn create_book<R: BookRepository + 'static>(
    State(state): State<AppState<R>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<BookEnvelope>), ApiError> {
    let payload = parse_payload(payload)?;
    let book = run_blocking(&state, move |service| {
        let mut book = payload.into_book(UNASSIGNED_BOOK_ID);
        service.create_book(&mut book)?;
        Ok(book)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookEnvelope {
            message: CREATED_MESSAGE.to_string(),
            book,
        }),
    ))
}

pub async fn update_book<R: BookRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookEnvelope>, ApiError> {
    let id = parse_book_id(&raw_id)?;
    let book = parse_payload(payload)?.into_book(id);
    let book = run_blocking(&state, move |service| {
        service.update_book(&book)?;
        Ok(book)
    })
    .await?;

    Ok(Json(BookEnvelope {
        message: UPDATED_MESSAGE.to_string(),
        book,
    }))
}

pub async fn delete_book<R: BookRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_book_id(&raw_id)?;
    run_blocking(&state, move |service| service.delete_book(id)).await?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

async fn run_blocking<R, T, F>(state: &AppState<R>, f: F) -> Result<T, ApiError>
where
    R: BookRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&BookService<R>) -> RepoResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    let outcome = tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))?;
    Ok(outcome?)
}

fn parse_book_id(raw: &str) -> Result<BookId, ApiError> {
    raw.trim()
        .parse::<BookId>()
        .map_err(|_| ApiError::BadRequest(format!("invalid book id `{raw}`")))
}

fn parse_payload(
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<BookPayload, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(ApiError::BadRequest(format!(
            "invalid book payload: {}",
            rejection.body_text()
        ))),
    }
}
