//! Landing page.

use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, casino_card, page_shell};
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};
use crate::app_state::AppState;
use crate::content::{CasinoFilters, CasinoSort};

const FEATURED_ON_HOME: usize = 6;

const FEATURES: [(&str, &str, &str); 3] = [
    ("🔍", "Expert Reviews", "Every casino is tested by our team for games, payouts and support."),
    ("🎁", "Exclusive Bonuses", "Compare welcome offers, free spins and no-deposit deals in one place."),
    ("🛡️", "Licensed Only", "We only list casinos holding a licence from a recognised regulator."),
];

const STEPS: [(&str, &str); 3] = [
    ("Browse", "Filter casinos by rating, bonus or payment method."),
    ("Compare", "Put up to four casinos side by side."),
    ("Play", "Sign up through our link and claim your bonus."),
];

/// `GET /`
pub(crate) async fn home_page(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let page = state
            .content
            .casinos(CasinoFilters {
                featured: true,
                sort: CasinoSort::Rating,
                page: 1,
            })
            .await;
        let featured = page.casinos.get(..FEATURED_ON_HOME).unwrap_or(&page.casinos);

        let meta = PageMeta::new(
            ctx.site_name(),
            "Expert casino reviews, exclusive bonuses and trusted ratings to help you find the best online casinos.",
            "/",
        );
        let head = json_ld::scripts(&[json_ld::organization(&ctx), json_ld::website(&ctx)]);
        let body = html! {
            section class="hero" {
                div class="hero-body" {
                    p { span class="badge badge-success" { "Trusted by 10,000+ players" } }
                    h1 { "Find Your Perfect Online Casino" }
                    p {
                        "Expert reviews, exclusive bonuses, and trusted ratings to help you discover the best online casinos for real money gaming."
                    }
                    a class="btn btn-accent btn-lg" href="/casinos" { "View All Casinos" }
                    " "
                    a class="btn btn-secondary btn-lg" href="/bonuses" { "Browse Bonuses" }
                }
            }

            @if !featured.is_empty() {
                section class="section" {
                    h2 { "Top Rated Casinos" }
                    p class="lead" { "Hand-picked casinos with the best bonuses, fastest payouts, and highest player ratings." }
                    div class="grid cols-3" {
                        @for (index, casino) in featured.iter().enumerate() {
                            (casino_card(&ctx, casino, Some(index + 1)))
                        }
                    }
                    p class="cta centered" {
                        a class="btn btn-secondary" href="/casinos" { "View All Casinos →" }
                    }
                }
            }

            section class="section" {
                h2 { "Why Choose " (ctx.site_name()) "?" }
                div class="grid cols-3" {
                    @for (icon, title, text) in FEATURES {
                        div class="card" {
                            p { (icon) }
                            h3 { (title) }
                            p class="meta" { (text) }
                        }
                    }
                }
            }

            section class="section" {
                h2 { "How It Works" }
                div class="grid cols-3" {
                    @for (index, (title, text)) in STEPS.iter().enumerate() {
                        div class="card" {
                            span class="rank first" { (index + 1) }
                            h3 { (title) }
                            p class="meta" { (text) }
                        }
                    }
                }
            }
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
    use crate::test_support::{get, send, test_app};

    #[tokio::test]
    async fn home_lists_featured_casinos() {
        let store = FakeStore::new().with(
            "featured == true",
            json!({
                "casinos": [
                    {"_id": "a", "name": "Alpha", "slug": {"current": "alpha"}, "rating": 4.9, "featured": true},
                    {"_id": "b", "name": "Beta", "slug": {"current": "beta"}, "rating": 4.1, "featured": true}
                ],
                "total": 2
            }),
        );
        let app = test_app(store, &[]);
        let response = send(&app, get("/")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Top Rated Casinos"));
        assert!(response.body.contains(r#"href="/casinos/alpha""#));
        assert!(response.body.contains(r#""@type":"WebSite""#));
    }

    #[tokio::test]
    async fn home_renders_without_content() {
        let app = test_app(FakeStore::failing(), &[]);
        let response = send(&app, get("/")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(!response.body.contains("Top Rated Casinos"));
        assert!(response.body.contains("Please play responsibly."));
    }
}
