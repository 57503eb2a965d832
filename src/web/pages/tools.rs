//! Compare and favorites pages.
//!
//! Both lists live in browser storage. The server renders the casinos
//! named in `?casinos=slug,slug` and otherwise an empty state tagged
//! with the storage key the browser list is kept under.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::Response;
use futures_util::future::join_all;
use maud::{Markup, html};
use serde::Deserialize;

use super::page_header;
use crate::app_state::AppState;
use crate::client_state::{COMPARE_KEY, FAVORITES_KEY, MAX_COMPARE};
use crate::domain::Casino;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, casino_card, logo, page_shell, rating, visit_button};
use crate::web::{HTML, PageError, serve_cached};

/// `?casinos=` on the tool pages.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToolParams {
    casinos: Option<String>,
}

impl ToolParams {
    /// Distinct non-empty slugs, in order, at most `limit`.
    fn slugs(&self, limit: usize) -> Vec<&str> {
        let mut slugs: Vec<&str> = Vec::new();
        for slug in self.casinos.as_deref().unwrap_or_default().split(',').map(str::trim) {
            if slugs.len() == limit {
                break;
            }
            if !slug.is_empty() && !slugs.contains(&slug) {
                slugs.push(slug);
            }
        }
        slugs
    }
}

async fn fetch_casinos(state: &AppState, slugs: &[&str]) -> Vec<Casino> {
    join_all(slugs.iter().map(|slug| state.content.casino_by_slug(slug)))
        .await
        .into_iter()
        .flatten()
        .collect()
}

fn empty_state(storage_key: &str, title: &str, message: &str) -> Markup {
    html! {
        div class="empty" data-storage-key=(storage_key) {
            h1 class="page-title" { (title) }
            p { (message) }
            p { a class="btn btn-accent" href="/casinos" { "Browse Casinos" } }
        }
    }
}

fn compare_table(ctx: &RenderContext<'_>, casinos: &[Casino]) -> Markup {
    let money = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |m| format!("${m}"));
    html! {
        div class="table-wrap" {
            table class="compare" data-storage-key=(COMPARE_KEY) {
                thead {
                    tr {
                        th { "Feature" }
                        @for casino in casinos {
                            th data-casino-id=(casino.id) {
                                div class="card-head" {
                                    (logo(ctx, casino.logo.as_ref(), &casino.name, 48))
                                    a href=(format!("/casinos/{}", casino.slug.as_str())) { (casino.name) }
                                }
                            }
                        }
                    }
                }
                tbody {
                    tr { td { "Rating" } @for c in casinos { td { (rating(c.rating)) } } }
                    tr { td { "Min Deposit" } @for c in casinos { td { (money(c.min_deposit)) } } }
                    tr { td { "Withdrawal Time" } @for c in casinos { td { (c.withdrawal_time.as_deref().unwrap_or("-")) } } }
                    tr { td { "Established" } @for c in casinos { td { (c.established.map_or_else(|| "-".to_string(), |y| y.to_string())) } } }
                    tr { td { "Featured" } @for c in casinos { td { (if c.is_featured() { "★" } else { "-" }) } } }
                    tr { td {} @for c in casinos { td { (visit_button(c.slug.as_str(), "Play Now")) } } }
                }
            }
        }
    }
}

/// `GET /compare`
pub(crate) async fn compare_page(
    State(state): State<AppState>,
    Query(params): Query<ToolParams>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let casinos = fetch_casinos(&state, &params.slugs(MAX_COMPARE)).await;
        let meta = PageMeta::new(
            "Compare Casinos",
            "Compare online casinos side by side: ratings, deposits, payout speed and more.",
            "/compare",
        )
        .with_no_index(true);
        let body = if casinos.is_empty() {
            empty_state(
                COMPARE_KEY,
                "No Casinos to Compare",
                "Add casinos to your comparison list to see them side by side.",
            )
        } else {
            let lead = format!("Comparing {} of up to {MAX_COMPARE} casinos.", casinos.len());
            html! {
                (page_header("Compare Casinos", Some(lead.as_str())))
                (compare_table(&ctx, &casinos))
            }
        };
        Ok(page_shell(&ctx, &meta, html! {}, body).into_string())
    })
    .await
}

/// `GET /favorites`
pub(crate) async fn favorites_page(
    State(state): State<AppState>,
    Query(params): Query<ToolParams>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let casinos = fetch_casinos(&state, &params.slugs(usize::MAX)).await;
        let meta = PageMeta::new("Your Favorites", "Casinos you have saved.", "/favorites")
            .with_no_index(true);
        let body = if casinos.is_empty() {
            empty_state(
                FAVORITES_KEY,
                "No Favorites Yet",
                "Save casinos you like and they will show up here.",
            )
        } else {
            let lead = format!("{} saved casinos.", casinos.len());
            html! {
                (page_header("Your Favorites", Some(lead.as_str())))
                div class="grid cols-3" data-storage-key=(FAVORITES_KEY) {
                    @for casino in &casinos {
                        (casino_card(&ctx, casino, None))
                    }
                }
            }
        };
        Ok(page_shell(&ctx, &meta, html! {}, body).into_string())
    })
    .await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;
    use crate::test_support::{get, send, test_app};

    #[test]
    fn slugs_are_distinct_and_capped() {
        let params = ToolParams {
            casinos: Some("a, b,,a,c,d,e".to_string()),
        };
        assert_eq!(params.slugs(MAX_COMPARE), vec!["a", "b", "c", "d"]);
        assert!(ToolParams::default().slugs(MAX_COMPARE).is_empty());
    }

    fn store() -> FakeStore {
        let casino = |slug: &str| {
            json!({"_id": slug, "name": format!("Casino {slug}"), "slug": {"current": slug}, "rating": 4.0})
        };
        FakeStore::new()
            .with_param(r#"_type == "casino" && slug.current == $slug"#, "slug", "a", casino("a"))
            .with_param(r#"_type == "casino" && slug.current == $slug"#, "slug", "b", casino("b"))
    }

    #[tokio::test]
    async fn compare_renders_requested_casinos() {
        let app = test_app(store(), &[]);
        let response = send(&app, get("/compare?casinos=a,b,missing")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Casino a"));
        assert!(response.body.contains("Casino b"));
        assert!(response.body.contains("Comparing 2 of up to 4 casinos."));
        assert!(response.body.contains("noindex"));
    }

    #[tokio::test]
    async fn empty_tools_carry_storage_keys() {
        let app = test_app(FakeStore::new(), &[]);
        let compare = send(&app, get("/compare")).await;
        assert!(compare.body.contains(r#"data-storage-key="casino-compare""#));
        let favorites = send(&app, get("/favorites")).await;
        assert!(favorites.body.contains(r#"data-storage-key="casino-favorites""#));
        assert!(favorites.body.contains("No Favorites Yet"));
    }
}
