//! System endpoints: health check and content schema.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::api::dto::{
    HealthResponse, HealthStatus, SchemaValidationResponse, ServiceStatus, ServicesHealth,
};
use crate::app_state::AppState;
use crate::domain::schema::{SchemaType, Severity, catalog, schema_type};
use crate::error::{ErrorResponse, SiteError};

/// `GET /api/health` — Service health status.
///
/// Probes the content store once; answers 503 when it does not respond.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    description = "Reports whether the content store answered a probe query.",
    responses(
        (status = 200, description = "All dependencies healthy", body = HealthResponse),
        (status = 503, description = "Content store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let (status, code, content_store) = if state.content.ping().await {
        (HealthStatus::Healthy, StatusCode::OK, ServiceStatus::Healthy)
    } else {
        (
            HealthStatus::Degraded,
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus::Unhealthy,
        )
    };
    (
        code,
        Json(HealthResponse {
            status,
            timestamp,
            services: ServicesHealth { content_store },
        }),
    )
}

/// `GET /api/schema` — Content authoring schema.
#[utoipa::path(
    get,
    path = "/api/schema",
    tag = "System",
    summary = "Content schema catalog",
    description = "Returns every document and object type the content store is configured with, including field definitions and validation rules.",
    responses(
        (status = 200, description = "Schema catalog", body = Vec<SchemaType>),
    )
)]
pub async fn schema_handler() -> impl IntoResponse {
    Json(catalog())
}

/// `POST /api/schema/{type_name}/validate` — Check a draft document.
///
/// # Errors
///
/// Returns [`SiteError::Validation`] for an unknown type name or a body
/// that is not a JSON object.
#[utoipa::path(
    post,
    path = "/api/schema/{type_name}/validate",
    tag = "System",
    summary = "Validate a document against the schema",
    description = "Applies the field rules of one schema type to a raw document. Only the type's own fields are checked.",
    params(("type_name" = String, Path, description = "Schema type name, e.g. `casino`")),
    request_body = Object,
    responses(
        (status = 200, description = "Validation findings", body = SchemaValidationResponse),
        (status = 400, description = "Unknown type or malformed body", body = ErrorResponse),
    )
)]
pub async fn validate_handler(
    Path(type_name): Path<String>,
    body: Bytes,
) -> Result<Json<SchemaValidationResponse>, SiteError> {
    let Some(schema) = schema_type(&type_name) else {
        return Err(SiteError::validation(format!("Unknown schema type `{type_name}`")));
    };
    let document = serde_json::from_slice::<Value>(&body)
        .ok()
        .filter(Value::is_object)
        .ok_or_else(|| SiteError::validation("Document must be a JSON object"))?;

    let violations = schema.validate(&document);
    let valid = violations.iter().all(|v| v.severity != Severity::Error);
    tracing::debug!(
        type_name = schema.name,
        valid,
        findings = violations.len(),
        "document validated"
    );
    Ok(Json(SchemaValidationResponse {
        type_name: schema.name,
        valid,
        violations,
    }))
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/schema", get(schema_handler))
        .route("/api/schema/{type_name}/validate", post(validate_handler))
}
