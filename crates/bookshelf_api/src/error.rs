//! Error-to-response mapping for the HTTP layer.
//!
//! # Invariants
//! - Validation and malformed input map to 400.
//! - `NotFound` maps to 404 on every by-id route.
//! - Everything else maps to 500 with the error message in the payload.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::RepoError;
use log::{error, warn};
use serde_json::json;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    /// Unparseable path id or JSON body.
    BadRequest(String),
    Repo(RepoError),
    /// The blocking task running the storage call failed to complete.
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Repo(RepoError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Repo(RepoError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Repo(RepoError::Db(_) | RepoError::InvalidData(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Worker(message) => write!(f, "storage worker failed: {message}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::BadRequest(_) | Self::Worker(_) => None,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(
                "event=http_error module=http status=error http_status={} error={}",
                status.as_u16(),
                message
            );
        } else {
            warn!(
                "event=http_error module=http status=rejected http_status={} error={}",
                status.as_u16(),
                message
            );
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
