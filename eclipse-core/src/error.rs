//! Error types for Eclipse Core

use thiserror::Error;

/// Result type alias using EclipseError
pub type Result<T> = std::result::Result<T, EclipseError>;

/// Top-level error type returned by every fetch operation
///
/// Nothing here is retried or cancelled implicitly; a caller that wants a
/// retry policy builds it on top of these variants.
#[derive(Debug, Error)]
pub enum EclipseError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by the HTTP transport underneath the search client
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors that occur in document-store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// A per-record decode failure
///
/// Batch readers log these and drop the offending record; they never fail
/// the whole call.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field `{field}` is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Malformed record: {0}")]
    Json(#[from] serde_json::Error),
}
