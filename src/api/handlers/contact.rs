//! Contact form: `POST /api/contact`.

use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{ContactRequest, SuccessResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, SiteError};

const CONTACT_ACK: &str = "Thank you for your message. We will get back to you soon.";

/// `POST /api/contact` — Validate and record a contact message.
///
/// Messages are written to the log; no mail is sent.
///
/// # Errors
///
/// Returns [`SiteError::Validation`] on an unparseable body, a missing
/// field or a malformed address.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Forms",
    summary = "Submit the contact form",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message accepted", body = SuccessResponse),
        (status = 400, description = "Missing field or invalid email", body = ErrorResponse),
    )
)]
pub async fn submit_contact(
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SiteError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "contact body rejected");
        SiteError::validation("Invalid request body")
    })?;
    let message = request.validate()?;

    tracing::info!(
        name = %message.name,
        email = %message.email,
        subject = %message.subject,
        message = %message.message,
        timestamp = %Utc::now().to_rfc3339(),
        "contact form submission"
    );

    Ok(Json(SuccessResponse::new(CONTACT_ACK)))
}

/// Contact form routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit_contact))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::content::testing::FakeStore;
    use crate::test_support::{post_json, send, test_app};

    #[tokio::test]
    async fn accepts_complete_submission() {
        let app = test_app(FakeStore::new(), &[]);
        let body = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "Great site"
        });
        let response = send(&app, post_json("/api/contact", &body.to_string())).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({
                "success": true,
                "message": "Thank you for your message. We will get back to you soon."
            })
        );
    }

    #[tokio::test]
    async fn missing_field_is_400() {
        let app = test_app(FakeStore::new(), &[]);
        let body = json!({"name": "Ada", "email": "ada@example.com", "subject": "Hi"});
        let response = send(&app, post_json("/api/contact", &body.to_string())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({"error": "All fields are required"}));
    }

    #[tokio::test]
    async fn invalid_email_is_400() {
        let app = test_app(FakeStore::new(), &[]);
        let body = json!({"name": "Ada", "email": "ada@", "subject": "Hi", "message": "m"});
        let response = send(&app, post_json("/api/contact", &body.to_string())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({"error": "Invalid email format"}));
    }

    #[tokio::test]
    async fn unparseable_body_is_400() {
        let app = test_app(FakeStore::new(), &[]);
        let response = send(&app, post_json("/api/contact", "{not json")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
