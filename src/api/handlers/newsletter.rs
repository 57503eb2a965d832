//! Newsletter signup: `POST /api/newsletter` and `GET /api/newsletter`.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{NewsletterRequest, NewsletterStats, SuccessResponse};
use crate::app_state::AppState;
use crate::domain::SubscribeOutcome;
use crate::error::{ErrorResponse, SiteError};

/// `POST /api/newsletter` — Subscribe an address.
///
/// Subscribing an address twice succeeds with `"Already subscribed"`.
///
/// # Errors
///
/// Returns [`SiteError::Validation`] on an unparseable body or a missing
/// or malformed address.
#[utoipa::path(
    post,
    path = "/api/newsletter",
    tag = "Forms",
    summary = "Subscribe to the newsletter",
    request_body = NewsletterRequest,
    responses(
        (status = 200, description = "Subscribed or already subscribed", body = SuccessResponse),
        (status = 400, description = "Missing or invalid email", body = ErrorResponse),
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<NewsletterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SiteError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "newsletter body rejected");
        SiteError::validation("Invalid request body")
    })?;
    let email = request.validate()?;

    let message = match state.subscribers.subscribe(email).await {
        SubscribeOutcome::Subscribed => {
            tracing::info!(email = %email, "newsletter subscription");
            "Successfully subscribed"
        }
        SubscribeOutcome::AlreadySubscribed => "Already subscribed",
    };
    Ok(Json(SuccessResponse::new(message)))
}

/// `GET /api/newsletter` — Subscriber count.
#[utoipa::path(
    get,
    path = "/api/newsletter",
    tag = "Forms",
    summary = "Newsletter statistics",
    responses(
        (status = 200, description = "Subscriber count", body = NewsletterStats),
    )
)]
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(NewsletterStats {
        count: state.subscribers.count().await,
        message: "Newsletter stats".to_string(),
    })
}

/// Newsletter routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/newsletter", get(stats).post(subscribe))
}
