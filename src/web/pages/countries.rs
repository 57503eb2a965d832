//! Country guides.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use super::{breadcrumb_nav, page_header};
use crate::app_state::AppState;
use crate::domain::LegalStatus;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, badge, logo, page_shell};
use crate::web::render::formats::format_for;
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};

fn status_badge(status: Option<LegalStatus>) -> maud::Markup {
    let Some(status) = status else {
        return html! {};
    };
    let variant = match status {
        LegalStatus::Legal => "success",
        LegalStatus::Restricted | LegalStatus::Unregulated => "warning",
        LegalStatus::Prohibited => "danger",
    };
    badge(status.label(), variant)
}

/// `GET /countries`
pub(crate) async fn country_index(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let countries = state.content.countries().await;
        let meta = PageMeta::new(
            "Online Casinos by Country",
            "Find out where online gambling is legal and which casinos accept players from your country.",
            "/countries",
        );
        let body = html! {
            (page_header("Casinos by Country", Some("Legal status and recommended casinos for each country.")))
            @if countries.is_empty() {
                div class="empty" { p { "No countries found." } }
            } @else {
                div class="grid" {
                    @for country in &countries {
                        a class="card" href=(format!("/countries/{}", country.path_code())) {
                            div class="card-head" {
                                (logo(&ctx, country.flag.as_ref(), &country.name, 40))
                                div {
                                    h3 { (country.name) }
                                    (status_badge(country.legal_status))
                                }
                            }
                        }
                    }
                }
            }
        };
        Ok(page_shell(&ctx, &meta, html! {}, body).into_string())
    })
    .await
}

/// `GET /countries/{code}`
pub(crate) async fn country_detail(
    State(state): State<AppState>,
    Path(code): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let (country, casinos) = tokio::join!(
            state.content.country_by_code(&code),
            state.content.casinos_by_country(&code),
        );
        let Some(country) = country else {
            return Err(PageError::NotFound(format!("country {code}")));
        };

        let path = format!("/countries/{}", country.path_code());
        let title = format!("Online Casinos in {}", country.name);
        let description = country.overview.clone().unwrap_or_else(|| {
            format!("The best online casinos accepting players from {}.", country.name)
        });
        let meta = PageMeta::new(title.clone(), description, path.clone());
        let crumbs = [("Home", "/"), ("Countries", "/countries"), (country.name.as_str(), path.as_str())];

        let body = html! {
            (breadcrumb_nav(&crumbs))
            div class="card-head" {
                (logo(&ctx, country.flag.as_ref(), &country.name, 64))
                div {
                    h1 class="page-title" { (title) }
                    (status_badge(country.legal_status))
                }
            }
            @if let Some(overview) = country.overview.as_deref() {
                p class="lead" { (overview) }
            }
            section class="section" {
                h2 { "Casinos Accepting Players from " (country.name) }
                (format_for(state.config.site_format).casino_list(&ctx, &casinos, None))
            }
        };
        let head = json_ld::scripts(&[json_ld::breadcrumbs(&ctx, &crumbs)]);
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
    async fn detail_looks_up_upper_cased_code() {
        let store = FakeStore::new()
            .with_param(
                r#"_type == "country" && code == $code"#,
                "code",
                "DE",
                json!({"_id": "de", "name": "Germany", "code": "DE", "legalStatus": "restricted"}),
            )
            .with_param(
                "$countryCode in countries[]->code",
                "countryCode",
                "DE",
                json!([{"_id": "c1", "name": "Berlin Bets", "slug": {"current": "berlin"}}]),
            );
        let app = test_app(store, &[]);
        let response = send(&app, get("/countries/de")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Online Casinos in Germany"));
        assert!(response.body.contains("Restricted"));
        assert!(response.body.contains("Berlin Bets"));
        assert!(response.body.contains("https://example.com/countries/de"));
    }

    #[tokio::test]
    async fn index_links_lower_cased_codes() {
        let store = FakeStore::new().with(
            r#"_type == "country" && !(_id"#,
            json!([{"_id": "fr", "name": "France", "code": "FR"}]),
        );
        let app = test_app(store, &[]);
        let response = send(&app, get("/countries")).await;
        assert!(response.body.contains(r#"href="/countries/fr""#));
    }

    #[tokio::test]
    async fn unknown_country_is_404() {
        let app = test_app(FakeStore::new(), &[]);
        assert_eq!(send(&app, get("/countries/zz")).await.status, StatusCode::NOT_FOUND);
    }
}
