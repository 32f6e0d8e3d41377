//! Error types for retrograde
//!
//! Defines the service-wide error taxonomy using thiserror. Every failure
//! inside the reversal pipeline (decode, reverse, encode, store) is
//! normalized to one of these variants before it crosses a module boundary,
//! and the `IntoResponse` impl is the single place errors are translated
//! into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Main error type for retrograde
#[derive(Error, Debug)]
pub enum Error {
    /// Upload not recognized as any supported audio container/codec
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Recognized container with unparseable or truncated content
    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    /// Workspace or output store allocation failure
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Decode succeeded but re-encoding the reversed audio failed
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Malformed request (bad multipart body, missing file field)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured size limit
    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    /// Requested artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything unanticipated
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using the retrograde Error
pub type Result<T> = std::result::Result<T, Error>;

/// Uniform error body returned to callers.
///
/// Carries a human-readable summary only. Internal paths, query text, and
/// backtraces stay in the server log.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl Error {
    /// HTTP status for this error kind.
    ///
    /// The mapping is deterministic per kind so callers can distinguish
    /// their own mistakes (4xx) from service faults (5xx).
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::CorruptInput(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::ResourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Encoding(_)
            | Error::Database(_)
            | Error::Io(_)
            | Error::Config(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full detail stays server-side; the client gets the summary only.
        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
