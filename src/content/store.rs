//! Content store abstraction.

use async_trait::async_trait;
use serde_json::Value;

use super::query::Query;

/// Errors from talking to the content store.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Network failure or timeout.
    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("content store returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("content store response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured project or dataset produced an invalid URL.
    #[error("invalid content store url: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only query access to the content store.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug {
    /// Runs a query and returns its `result` value (`null` when nothing
    /// matched a single-document query).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] on transport, status or decode failure.
    async fn fetch(&self, query: &Query) -> Result<Value, ContentError>;
}
