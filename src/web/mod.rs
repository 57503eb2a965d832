//! Server-rendered HTML pages.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /casinos`, `/casinos/{slug}` - Casino index and detail
//! - `GET /bonuses`, `/bonuses/{slug}` - Bonus index and detail
//! - `GET /countries`, `/countries/{code}` - Country guides
//! - `GET /payment-methods`, `/payment-methods/{slug}` - Payment methods
//! - `GET /blog`, `/blog/{slug}` - Articles
//! - `GET /reviews/{slug}` - Casino review
//! - `GET /compare`, `/favorites` - Browser-local tools
//! - `GET /about`, `/contact`, `/privacy`, `/terms`, `/responsible-gambling`
//! - `GET /sitemap.xml`, `/robots.txt`
//! - anything else - page-builder page by slug, or 404
//!
//! Successful renders are cached by request URI in the shared
//! [`PageCache`](crate::service::PageCache).

pub mod error;
pub mod params;
mod pages;
pub mod render;

use std::future::Future;

use axum::Router;
use axum::http::{HeaderMap, HeaderValue, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::app_state::AppState;
pub use error::PageError;

/// `Content-Type` of rendered pages.
pub const HTML: &str = "text/html; charset=utf-8";

/// `Content-Type` of the sitemap.
pub const XML: &str = "application/xml; charset=utf-8";

/// HTML page routes. Mount after the API routes; the fallback catches
/// everything else.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home::home_page))
        .route("/casinos", get(pages::casinos::casino_index))
        .route("/casinos/{slug}", get(pages::casinos::casino_detail))
        .route("/bonuses", get(pages::bonuses::bonus_index))
        .route("/bonuses/{slug}", get(pages::bonuses::bonus_detail))
        .route("/countries", get(pages::countries::country_index))
        .route("/countries/{code}", get(pages::countries::country_detail))
        .route("/payment-methods", get(pages::payment_methods::payment_method_index))
        .route("/payment-methods/{slug}", get(pages::payment_methods::payment_method_detail))
        .route("/blog", get(pages::blog::blog_index))
        .route("/blog/{slug}", get(pages::blog::blog_post))
        .route("/reviews/{slug}", get(pages::reviews::review_page))
        .route("/compare", get(pages::tools::compare_page))
        .route("/favorites", get(pages::tools::favorites_page))
        .route("/about", get(pages::info::about_page))
        .route("/contact", get(pages::info::contact_page))
        .route("/privacy", get(pages::info::privacy_page))
        .route("/terms", get(pages::info::terms_page))
        .route("/responsible-gambling", get(pages::info::responsible_gambling_page))
        .route("/sitemap.xml", get(pages::sitemap::sitemap_xml))
        .route("/robots.txt", get(pages::sitemap::robots_txt))
        .fallback(pages::generic::page_builder_page)
}

/// Cache key for a request: percent-decoded path plus raw query string,
/// so keys line up with the slug paths revalidation invalidates.
fn cache_key(uri: &Uri) -> String {
    let path = urlencoding::decode(uri.path()).unwrap_or_else(|_| uri.path().into());
    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.into_owned(),
    }
}

/// Serves `uri` from the page cache, rendering and storing it on a miss.
///
/// `render` is only polled on a miss. Errors are returned as-is and
/// never cached, and neither is a render whose path was revalidated while
/// it ran.
pub(crate) async fn serve_cached<F>(
    state: &AppState,
    uri: &Uri,
    content_type: &'static str,
    render: F,
) -> Result<Response, PageError>
where
    F: Future<Output = Result<String, PageError>>,
{
    let key = cache_key(uri);
    if let Some(page) = state.page_cache.get(&key).await {
        tracing::debug!(uri = %key, cached_at = %page.cached_at, "page cache hit");
        return Ok(build_response(state, page.body, page.content_type));
    }

    let generation = state.page_cache.generation(&key);
    let body = render.await?;
    let stored = state
        .page_cache
        .insert_unless_invalidated(key.clone(), body.clone(), content_type, generation)
        .await;
    tracing::debug!(uri = %key, stored, "page rendered");
    Ok(build_response(state, body, content_type))
}

/// Wraps a body with content type, security and cache headers.
fn build_response(state: &AppState, body: String, content_type: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    let ttl = state.config.page_cache_ttl.as_secs();
    let cache_value = format!("public, max-age=0, s-maxage={ttl}, stale-while-revalidate={ttl}");
    if let Ok(val) = HeaderValue::from_str(&cache_value) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    (headers, body).into_response()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::content::ContentStore;
    use crate::content::testing::{FakeStore, GatedStore};
    use crate::test_support::{get, post_json, send, test_config, test_state};

    fn casino_store() -> FakeStore {
        FakeStore::new().with_param(
            r#"_type == "casino" && slug.current == $slug"#,
            "slug",
            "lucky",
            json!({
                "_id": "c1",
                "name": "Lucky Star",
                "slug": {"current": "lucky"},
                "rating": 4.6,
                "description": "A <great> casino",
                "licenses": ["MGA"]
            }),
        )
    }

    #[test]
    fn cache_key_keeps_query() {
        let uri: Uri = "/casinos?page=2".parse().unwrap_or_default();
        assert_eq!(cache_key(&uri), "/casinos?page=2");
        let uri: Uri = "/blog".parse().unwrap_or_default();
        assert_eq!(cache_key(&uri), "/blog");
        let uri: Uri = "/gu%C3%ADas?page=2".parse().unwrap_or_default();
        assert_eq!(cache_key(&uri), "/guías?page=2");
    }

    #[tokio::test]
    async fn rendered_pages_are_cached_and_evicted() {
        let state = test_state(casino_store(), &[("REVALIDATION_SECRET", "s3cret")]);
        let app = crate::build_app(state.clone());

        let first = send(&app, get("/casinos/lucky")).await;
        assert_eq!(first.status, StatusCode::OK);
        assert!(first.body.contains("Lucky Star"));
        assert!(first.body.contains("A &lt;great&gt; casino"));
        assert!(state.page_cache.get("/casinos/lucky").await.is_some());
        assert_eq!(first.header(header::X_FRAME_OPTIONS), Some("DENY"));
        assert!(
            first
                .header(header::CACHE_CONTROL)
                .is_some_and(|v| v.contains("s-maxage=3600"))
        );

        let second = send(&app, get("/casinos/lucky")).await;
        assert_eq!(second.body, first.body);

        let hook = send(
            &app,
            post_json(
                "/api/revalidate?secret=s3cret",
                r#"{"_type":"casino","slug":{"current":"lucky"}}"#,
            ),
        )
        .await;
        assert_eq!(hook.status, StatusCode::OK);
        assert!(state.page_cache.get("/casinos/lucky").await.is_none());
    }

    #[tokio::test]
    async fn render_overtaken_by_revalidation_is_not_cached() {
        let store = Arc::new(GatedStore::new(casino_store()));
        let state = AppState::new(
            test_config(&[("REVALIDATION_SECRET", "s3cret")]),
            Arc::clone(&store) as Arc<dyn ContentStore>,
        );
        let app = crate::build_app(state.clone());

        let pending = tokio::spawn({
            let app = app.clone();
            async move { send(&app, get("/casinos/lucky")).await }
        });
        store.entered().await;

        let hook = send(
            &app,
            post_json(
                "/api/revalidate?secret=s3cret",
                r#"{"_type":"casino","slug":{"current":"lucky"}}"#,
            ),
        )
        .await;
        assert_eq!(hook.status, StatusCode::OK);

        store.open();
        let Ok(page) = pending.await else {
            panic!("render task should finish");
        };
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Lucky Star"));
        assert!(state.page_cache.get("/casinos/lucky").await.is_none());

        let fresh = send(&app, get("/casinos/lucky")).await;
        assert_eq!(fresh.status, StatusCode::OK);
        assert!(state.page_cache.get("/casinos/lucky").await.is_some());
    }

    #[tokio::test]
    async fn not_found_is_not_cached() {
        let state = test_state(FakeStore::new(), &[]);
        let app = crate::build_app(state.clone());

        let response = send(&app, get("/casinos/missing")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.contains("noindex"));
        assert!(state.page_cache.get("/casinos/missing").await.is_none());
    }
}
