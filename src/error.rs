//! API error types with HTTP status code mapping.
//!
//! [`SiteError`] is the error type for the JSON endpoints. Each variant
//! maps to a status code and one of two body shapes: `{"error": ...}` for
//! public form and redirect endpoints, `{"message": ...}` for the
//! revalidation webhook.

use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Message returned with every 429.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please try again later.";

/// `{"error": "..."}` response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// `{"message": "..."}` response body used by the webhook.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant            | Status | Body        |
/// |--------------------|--------|-------------|
/// | `Validation`       | 400    | `{error}`   |
/// | `MalformedWebhook` | 400    | `{message}` |
/// | `InvalidSecret`    | 401    | `{message}` |
/// | `RateLimited`      | 429    | `{error}`   |
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),

    /// Webhook body could not be parsed.
    #[error("Error parsing request body")]
    MalformedWebhook,

    /// Webhook secret missing or wrong.
    #[error("Invalid secret")]
    InvalidSecret,

    /// Client exceeded the rate limit.
    #[error("Too many requests. Please try again later.")]
    RateLimited {
        /// Time until the client's window resets.
        retry_after: Duration,
    },
}

impl SiteError {
    /// Shorthand for a [`SiteError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedWebhook => StatusCode::BAD_REQUEST,
            Self::InvalidSecret => StatusCode::UNAUTHORIZED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let mut response = match self {
            Self::MalformedWebhook | Self::InvalidSecret => {
                axum::Json(MessageResponse { message }).into_response()
            }
            Self::RateLimited { retry_after } => {
                let mut response = axum::Json(ErrorResponse { error: message }).into_response();
                let secs = retry_after.as_secs().max(1);
                if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                response
            }
            Self::Validation(_) => {
                axum::Json(ErrorResponse { error: message }).into_response()
            }
        };
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            SiteError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(SiteError::InvalidSecret.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(SiteError::MalformedWebhook.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            SiteError::RateLimited {
                retry_after: Duration::from_secs(3)
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn rate_limited_sets_retry_after() {
        let response = SiteError::RateLimited {
            retry_after: Duration::from_millis(2_500),
        }
        .into_response();
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).map(HeaderValue::as_bytes),
            Some(b"2".as_slice())
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(SiteError::MalformedWebhook.to_string(), "Error parsing request body");
        assert_eq!(
            SiteError::RateLimited {
                retry_after: Duration::ZERO
            }
            .to_string(),
            RATE_LIMIT_MESSAGE
        );
    }
}
