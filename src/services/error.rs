//! Error types shared by the external collaborators.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the stock, catalog and storage services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote service could not answer the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The remote service does not know the requested resource.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The service answered with data that does not match the request.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// A local I/O failure (file-backed storage).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
