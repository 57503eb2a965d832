//! Per-client rate limiting for the affiliate redirect routes.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::domain::RateDecision;
use crate::domain::click_event::UNKNOWN;
use crate::error::SiteError;

/// Derives the rate-limit key for a request.
///
/// Uses the first hop of `X-Forwarded-For`, then `X-Real-IP`, then the
/// shared `"unknown"` bucket.
#[must_use]
pub fn client_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Middleware that rejects clients over the configured request budget.
///
/// # Errors
///
/// Returns [`SiteError::RateLimited`] once the client's window is spent.
pub async fn enforce(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, SiteError> {
    let key = client_key(request.headers());
    match state.rate_limiter.check_and_increment(&key) {
        RateDecision::Allowed { .. } => Ok(next.run(request).await),
        RateDecision::Limited { retry_after } => {
            tracing::warn!(
                client = %key,
                path = %request.uri().path(),
                "rate limit exceeded"
            );
            Err(SiteError::RateLimited { retry_after })
        }
    }
}
