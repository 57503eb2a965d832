//! Page-builder pages at arbitrary paths.

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::Response;
use maud::html;

use crate::app_state::AppState;
use crate::domain::PageBlock;
use crate::web::render::RenderContext;
use crate::web::render::blocks::{render_blocks, render_hero};
use crate::web::render::components::{PageMeta, page_shell};
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};

/// Fallback for every path without a dedicated route.
///
/// The percent-decoded path, without its surrounding slashes, is looked
/// up as a page slug. A leading hero block renders before the rest of the
/// content.
pub(crate) async fn page_builder_page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, PageError> {
    let slug = urlencoding::decode(uri.path())
        .map(|path| path.trim_matches('/').to_string())
        .unwrap_or_default();
    if method != Method::GET || slug.is_empty() {
        return Err(PageError::NotFound(uri.path().to_string()));
    }

    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let Some(page) = state.content.page_by_slug(&slug).await else {
            return Err(PageError::NotFound(format!("page {slug}")));
        };
        let blocks = state.content.hydrate_blocks(page.blocks.clone()).await;

        let path = format!("/{slug}");
        let title = page.meta_title().to_string();
        let description = page.meta_description().unwrap_or_default().to_string();
        let og_image = page
            .seo
            .as_ref()
            .and_then(|seo| seo.og_image.as_ref())
            .and_then(|img| ctx.image_url(img, 1200, 630));
        let meta = PageMeta::new(title.clone(), description.clone(), path.clone())
            .with_image(og_image)
            .with_no_index(page.no_index());
        let head = json_ld::scripts(&[
            json_ld::web_page(&ctx, &title, &description, &path),
            json_ld::breadcrumbs(&ctx, &[("Home", "/"), (page.title.as_str(), path.as_str())]),
        ]);

        let body = match blocks.split_first() {
            None => html! { h1 class="page-title" { (page.title) } },
            Some((PageBlock::Hero(hero), rest)) => html! {
                (render_hero(&ctx, hero))
                (render_blocks(&ctx, rest))
            },
            Some(_) => render_blocks(&ctx, &blocks),
        };
        Ok(page_shell(&ctx, &meta, head, body).into_string())
    })
    .await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::content::testing::FakeStore;
    use crate::test_support::{get, post_json, send, test_app};

    fn store() -> FakeStore {
        FakeStore::new()
            .with_param(
                r#"_type == "page""#,
                "slug",
                "guides/slots",
                json!({
                    "_id": "p1",
                    "title": "Slots Guide",
                    "slug": {"current": "guides/slots"},
                    "seo": {"metaTitle": "Best Slots", "noIndex": true},
                    "blocks": [
                        {"_type": "heroBlock", "_key": "h", "title": "Spin to Win"},
                        {"_type": "videoBlock", "_key": "v"},
                        {"_type": "infoBoxBlock", "_key": "i", "content": "Play responsibly", "variant": "warning"},
                        {"_type": "casinoListBlock", "_key": "l", "displayMode": "automatic", "filter": "top-rated", "limit": 2}
                    ]
                }),
            )
            .with(
                "[0...2]",
                json!([{"_id": "c1", "name": "Top Spin", "slug": {"current": "top-spin"}, "rating": 4.9}]),
            )
    }

    #[tokio::test]
    async fn nested_slug_renders_blocks() {
        let app = test_app(store(), &[]);
        let response = send(&app, get("/guides/slots")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("<title>Best Slots | Casino Guide</title>"));
        assert!(response.body.contains("<h1>Spin to Win</h1>"));
        assert!(response.body.contains("Play responsibly"));
        assert!(response.body.contains("Top Spin"));
        assert!(response.body.contains("noindex, nofollow"));
        assert!(!response.body.contains("videoBlock"));
    }

    #[tokio::test]
    async fn malformed_block_does_not_hide_the_page() {
        let store = FakeStore::new().with_param(
            r#"_type == "page""#,
            "slug",
            "odd",
            json!({
                "_id": "p2",
                "title": "Odd Page",
                "slug": {"current": "odd"},
                "blocks": [
                    {"_type": "infoBoxBlock", "_key": "i", "content": "Still here"},
                    {"_type": "comparisonTableBlock", "_key": "t", "columns": ["rtp"]},
                    {"_type": "faqBlock", "_key": "f", "items": "broken"}
                ]
            }),
        );
        let app = test_app(store, &[]);
        let response = send(&app, get("/odd")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Still here"));
    }

    #[tokio::test]
    async fn encoded_path_matches_decoded_slug() {
        let store = FakeStore::new().with_param(
            r#"_type == "page""#,
            "slug",
            "guías/tragamonedas",
            json!({
                "_id": "p3",
                "title": "Guía de tragamonedas",
                "slug": {"current": "guías/tragamonedas"}
            }),
        );
        let app = test_app(store, &[]);
        let response = send(&app, get("/gu%C3%ADas/tragamonedas")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Guía de tragamonedas"));
    }

    #[tokio::test]
    async fn unknown_path_is_html_404() {
        let app = test_app(FakeStore::new(), &[]);
        let response = send(&app, get("/no/such/page")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn non_get_requests_are_404() {
        let app = test_app(store(), &[]);
        let response = send(&app, post_json("/guides/slots", "{}")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
