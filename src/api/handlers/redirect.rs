//! Affiliate redirect: `GET /go/{slug}`.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;
use crate::error::ErrorResponse;
use crate::service::{ClickContext, FALLBACK_LOCATION};

/// `GET /go/{slug}` — Redirect to a casino's affiliate URL.
///
/// Always answers 302. Unknown casinos and content store failures send the
/// visitor to `/`.
#[utoipa::path(
    get,
    path = "/go/{slug}",
    tag = "Redirects",
    summary = "Follow an affiliate link",
    description = "Logs a click event and redirects to the casino's affiliate URL, or to `/` when none is known. Rate limited per client address.",
    params(("slug" = String, Path, description = "Casino slug")),
    responses(
        (status = 302, description = "Redirect to the affiliate URL or `/`"),
        (status = 429, description = "Too many requests", body = ErrorResponse),
    )
)]
pub async fn follow_affiliate_link(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let context = click_context(&headers);
    let location = state.redirects.resolve(&slug, &context).await;
    let location = HeaderValue::from_str(&location).unwrap_or_else(|_| {
        tracing::warn!(casino_slug = %slug, "affiliate URL is not a valid header value");
        HeaderValue::from_static(FALLBACK_LOCATION)
    });
    (StatusCode::FOUND, [(header::LOCATION, location)])
}

/// Extracts the click metadata recorded with each redirect.
#[must_use]
pub fn click_context(headers: &HeaderMap) -> ClickContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    ClickContext {
        referrer: header(header::REFERER.as_str()),
        country: header("x-vercel-ip-country").or_else(|| header("cf-ipcountry")),
        user_agent: header(header::USER_AGENT.as_str()),
    }
}

/// Redirect routes. Rate limiting is layered on by the caller.
pub fn routes() -> Router<AppState> {
    Router::new().route("/go/{slug}", get(follow_affiliate_link))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;
    use crate::test_support::{get, send, test_app};

    fn store() -> FakeStore {
        FakeStore::new().with_param(
            "affiliateUrl",
            "slug",
            "lucky",
            json!({"affiliateUrl": "https://partner.example/?ref=guide"}),
        )
    }

    #[tokio::test]
    async fn known_casino_redirects_to_affiliate_url() {
        let app = test_app(store(), &[]);
        let response = send(&app, get("/go/lucky")).await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(
            response.header(header::LOCATION),
            Some("https://partner.example/?ref=guide")
        );
    }

    #[tokio::test]
    async fn unknown_casino_redirects_home() {
        let app = test_app(store(), &[]);
        let response = send(&app, get("/go/missing")).await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.header(header::LOCATION), Some("/"));
    }

    #[tokio::test]
    async fn store_failure_redirects_home() {
        let app = test_app(FakeStore::failing(), &[]);
        let response = send(&app, get("/go/lucky")).await;
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.header(header::LOCATION), Some("/"));
    }

    #[tokio::test]
    async fn limit_applies_per_client_address() {
        let app = test_app(store(), &[("RATE_LIMIT_MAX_REQUESTS", "2")]);
        let from = |ip: &'static str| {
            let Ok(request) = Request::get("/go/lucky")
                .header("x-forwarded-for", ip)
                .body(Body::empty())
            else {
                panic!("request should build");
            };
            request
        };

        for _ in 0..2 {
            assert_eq!(send(&app, from("203.0.113.9")).await.status, StatusCode::FOUND);
        }
        let limited = send(&app, from("203.0.113.9")).await;
        assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            limited.json(),
            json!({"error": "Too many requests. Please try again later."})
        );
        assert!(limited.header(header::RETRY_AFTER).is_some());

        assert_eq!(send(&app, from("198.51.100.4")).await.status, StatusCode::FOUND);
    }

    #[tokio::test]
    async fn limiter_ignores_other_routes() {
        let app = test_app(FakeStore::new(), &[("RATE_LIMIT_MAX_REQUESTS", "1")]);
        for _ in 0..3 {
            let response = send(&app, get("/api/newsletter")).await;
            assert_eq!(response.status, StatusCode::OK);
        }
    }

    #[test]
    fn country_prefers_vercel_header() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ipcountry", HeaderValue::from_static("DE"));
        assert_eq!(click_context(&headers).country.as_deref(), Some("DE"));
        headers.insert("x-vercel-ip-country", HeaderValue::from_static("MT"));
        assert_eq!(click_context(&headers).country.as_deref(), Some("MT"));
        assert_eq!(click_context(&headers).referrer, None);
    }
}
