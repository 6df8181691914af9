/**
 * API Error Types
 *
 * This module defines the error taxonomy shared by all handlers. Each
 * variant maps to one HTTP status class:
 *
 * - `MissingField`, `InvalidIdentifier`, `MalformedBody` - 400, raised by
 *   validation or body decoding before any store access
 * - `NotFound`, `NotFoundOrUnauthorized` - 404; the combined variant is used
 *   where the handler must not disclose whether the record is absent or
 *   merely owned by someone else
 * - `Forbidden` - 403, raised when the record exists but the caller does
 *   not own it
 * - `UploadFailed` - 500, media host rejected or dropped an upload
 * - `Database` / `Internal` - 500, infrastructure failures; details are
 *   logged, never returned to the client
 */

use axum::http::StatusCode;
use thiserror::Error;

/// All errors a handler can surface to the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is absent or blank after trimming.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// An identifier does not match the store's fixed token format.
    #[error("invalid {what} id")]
    InvalidIdentifier { what: &'static str },

    /// The request body could not be decoded (e.g. a broken multipart
    /// stream). A client-side encoding problem, not a server failure.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The record is absent or owned by another principal; which of the two
    /// is deliberately not disclosed.
    #[error("{0} not found or unauthorized")]
    NotFoundOrUnauthorized(&'static str),

    /// The record exists but the caller does not own it.
    #[error("{0}")]
    Forbidden(&'static str),

    /// The media host rejected or dropped an upload.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// Store round trip failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Anything else that should surface as a 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_id(what: &'static str) -> Self {
        Self::InvalidIdentifier { what }
    }

    /// Map this error to its HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField { .. } | Self::InvalidIdentifier { .. } | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) | Self::NotFoundOrUnauthorized(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::UploadFailed(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the error envelope.
    ///
    /// Infrastructure variants return a generic message; the underlying
    /// error is logged at the conversion boundary instead.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::UploadFailed(_) => "Failed to upload media".to_string(),
            other => other.to_string(),
        }
    }
}
