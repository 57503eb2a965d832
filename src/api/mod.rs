//! JSON API layer: route handlers, DTOs, rate limiting, and router
//! composition.
//!
//! Form and webhook endpoints live under `/api`; affiliate redirects live
//! under `/go` behind the per-client rate limiter.

pub mod dto;
pub mod handlers;
pub mod rate_limit;

use axum::{Router, middleware};
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the JSON endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "casino-guide",
        description = "Forms, webhooks, redirects and health endpoints of the casino guide site."
    ),
    paths(
        handlers::redirect::follow_affiliate_link,
        handlers::contact::submit_contact,
        handlers::newsletter::subscribe,
        handlers::newsletter::stats,
        handlers::revalidate::revalidate,
        handlers::system::health_handler,
        handlers::system::schema_handler,
        handlers::system::validate_handler,
    ),
    components(schemas(
        dto::ContactRequest,
        dto::NewsletterRequest,
        dto::NewsletterStats,
        dto::SuccessResponse,
        dto::RevalidateResponse,
        dto::HealthResponse,
        dto::HealthStatus,
        dto::ServicesHealth,
        dto::ServiceStatus,
        dto::SchemaValidationResponse,
        crate::domain::schema::Violation,
        crate::domain::schema::Severity,
        crate::service::RevalidationRequest,
        crate::error::ErrorResponse,
        crate::error::MessageResponse,
    )),
    tags(
        (name = "Redirects", description = "Affiliate link tracking"),
        (name = "Forms", description = "Contact and newsletter forms"),
        (name = "Webhooks", description = "Content store callbacks"),
        (name = "System", description = "Health and schema"),
    )
)]
pub struct ApiDoc;

/// Builds the JSON API router.
///
/// The rate limiter is attached to the `/go/*` routes only.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let redirects = handlers::redirect::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        rate_limit::enforce,
    ));

    let router = Router::new().merge(redirects).merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_json_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/go/{slug}",
            "/api/contact",
            "/api/newsletter",
            "/api/revalidate",
            "/api/health",
            "/api/schema",
            "/api/schema/{type_name}/validate",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
