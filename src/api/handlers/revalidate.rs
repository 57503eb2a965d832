//! Content store webhook: `POST /api/revalidate?secret=...`.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::SecondsFormat;

use crate::api::dto::{RevalidateQuery, RevalidateResponse};
use crate::app_state::AppState;
use crate::error::{MessageResponse, SiteError};
use crate::service::RevalidationRequest;

/// `POST /api/revalidate` — Drop cached pages affected by a content change.
///
/// The secret is checked before the body is read.
///
/// # Errors
///
/// Returns [`SiteError::InvalidSecret`] on a missing or wrong secret and
/// [`SiteError::MalformedWebhook`] when the body is not a webhook payload.
#[utoipa::path(
    post,
    path = "/api/revalidate",
    tag = "Webhooks",
    summary = "Revalidate cached pages",
    description = "Called by the content store after publishing. The document type and slug select which rendered paths are dropped from the page cache.",
    params(RevalidateQuery),
    request_body = RevalidationRequest,
    responses(
        (status = 200, description = "Paths revalidated", body = RevalidateResponse),
        (status = 400, description = "Unparseable body", body = MessageResponse),
        (status = 401, description = "Invalid secret", body = MessageResponse),
    )
)]
pub async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, SiteError> {
    state.revalidation.verify_secret(query.secret.as_deref())?;

    let request: RevalidationRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "revalidation payload rejected");
        SiteError::MalformedWebhook
    })?;

    let outcome = state.revalidation.revalidate(&request).await;
    Ok(Json(RevalidateResponse {
        revalidated: true,
        paths: outcome.paths,
        timestamp: outcome.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/revalidate", post(revalidate))
}
