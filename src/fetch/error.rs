//! Fetch error definitions.

use thiserror::Error;

/// Errors that are not a confirmed absence.
///
/// None of these are ever recorded in the absence cache: the next
/// navigation retries the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request path could not be turned into a URL.
    #[error("invalid URL for {path}: {reason}")]
    InvalidUrl { path: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection or protocol failure.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The response body could not be read.
    #[error("reading body of {url} failed: {reason}")]
    Body { url: String, reason: String },
}
