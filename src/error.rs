//! Request-level error type and its HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, PlatterError>;

#[derive(Error, Debug)]
pub enum PlatterError {
    /// The menu store could not be reached or a query failed. Fatal to the
    /// request; fatal to the process only at startup.
    #[error("menu store error: {0}")]
    Store(#[from] tokio_rusqlite::Error),

    /// The completion API call failed (transport or API error). Surfaced
    /// immediately, no retry.
    #[error("completion request failed: {0}")]
    Completion(String),

    /// The request body is missing a required field.
    #[error("{0}")]
    MalformedPayload(String),

    /// Startup configuration problem. Never produced during request handling.
    #[error("configuration error: {0}")]
    Config(String),
}

impl IntoResponse for PlatterError {
    fn into_response(self) -> Response {
        let (status, summary) = match &self {
            PlatterError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching menu"),
            PlatterError::Completion(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process request")
            }
            PlatterError::MalformedPayload(_) => (StatusCode::BAD_REQUEST, "Malformed payload"),
            PlatterError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured")
            }
        };

        error!("{summary}: {self}");

        (
            status,
            Json(json!({ "error": summary, "details": self.to_string() })),
        )
            .into_response()
    }
}
