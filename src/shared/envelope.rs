//! Uniform response shapes: every endpoint answers either a success envelope
//! or `{"error": "..."}` with the mapped status code. Nothing in between.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// `{rows, limit[, offset]}`. The `offset` field is echoed only for
/// resources that accept it.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub rows: Vec<T>,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Bare `{rows}` for the narrower per-ticket attachment listing.
#[derive(Debug, Serialize)]
pub struct Rows<T> {
    pub rows: Vec<T>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("bad session")]
    BadSession,
    #[error("missing email or password")]
    MissingCredentials,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("bad ticket id")]
    BadTicketId,
    #[error("ticket not found")]
    TicketNotFound,
    #[error("pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("query error: {0}")]
    Store(#[from] diesel::result::Error),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            ApiError::BadSession => (StatusCode::UNAUTHORIZED, "Bad session"),
            ApiError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "Missing email or password")
            }
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            ApiError::BadTicketId => (StatusCode::BAD_REQUEST, "Bad ticket id"),
            ApiError::TicketNotFound => (StatusCode::NOT_FOUND, "Ticket not found"),
            // Store internals are logged, never echoed to the client.
            ApiError::Pool(_) | ApiError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DB error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Pool(_) | ApiError::Store(_)) {
            error!("store failure: {self}");
        }
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
