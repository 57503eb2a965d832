//! Payment method pages.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use super::{breadcrumb_nav, facts, page_header};
use crate::app_state::AppState;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, badge, logo, page_shell, truncate};
use crate::web::render::formats::format_for;
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};

/// `GET /payment-methods`
pub(crate) async fn payment_method_index(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let methods = state.content.payment_methods().await;
        let meta = PageMeta::new(
            "Casino Payment Methods",
            "Compare deposit and withdrawal options: cards, e-wallets, crypto and bank transfers.",
            "/payment-methods",
        );
        let body = html! {
            (page_header("Payment Methods", Some("Deposit and withdrawal options, with the casinos that accept them.")))
            @if methods.is_empty() {
                div class="empty" { p { "No payment methods found." } }
            } @else {
                div class="grid" {
                    @for method in &methods {
                        a class="card" href=(format!("/payment-methods/{}", method.slug.as_str())) {
                            div class="card-head" {
                                (logo(&ctx, method.logo.as_ref(), &method.name, 40))
                                div {
                                    h3 { (method.name) }
                                    @if let Some(kind) = method.payment_type {
                                        (badge(kind.label(), "default"))
                                    }
                                }
                            }
                            @if let Some(description) = method.description.as_deref() {
                                p class="meta" { (truncate(description, 120)) }
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

/// `GET /payment-methods/{slug}`
pub(crate) async fn payment_method_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let (method, casinos) = tokio::join!(
            state.content.payment_method_by_slug(&slug),
            state.content.casinos_by_payment_method(&slug),
        );
        let Some(method) = method else {
            return Err(PageError::NotFound(format!("payment method {slug}")));
        };

        let path = format!("/payment-methods/{slug}");
        let title = format!("Casinos Accepting {}", method.name);
        let description = method
            .description
            .clone()
            .unwrap_or_else(|| format!("Online casinos that accept {} deposits and withdrawals.", method.name));
        let meta = PageMeta::new(title.clone(), description, path.clone());
        let crumbs = [
            ("Home", "/"),
            ("Payment Methods", "/payment-methods"),
            (method.name.as_str(), path.as_str()),
        ];

        let body = html! {
            (breadcrumb_nav(&crumbs))
            div class="card-head" {
                (logo(&ctx, method.logo.as_ref(), &method.name, 64))
                h1 class="page-title" { (title) }
            }
            @if let Some(description) = method.description.as_deref() {
                p class="lead" { (description) }
            }
            (facts(&[
                ("Type", method.payment_type.map(|t| t.label().to_string())),
                ("Processing Time", method.processing_time.clone()),
                ("Fees", method.fees.clone()),
            ]))
            section class="section" {
                h2 { "Casinos Accepting " (method.name) }
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
    async fn detail_lists_accepting_casinos() {
        let store = FakeStore::new()
            .with_param(
                r#"_type == "paymentMethod" && slug.current == $slug"#,
                "slug",
                "paypal",
                json!({"_id": "p1", "name": "PayPal", "slug": {"current": "paypal"}, "type": "ewallet", "fees": "None"}),
            )
            .with_param(
                "$slug in paymentMethods[]->slug.current",
                "slug",
                "paypal",
                json!([{"_id": "c1", "name": "Pal Casino", "slug": {"current": "pal"}}]),
            );
        let app = test_app(store, &[]);
        let response = send(&app, get("/payment-methods/paypal")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Casinos Accepting PayPal"));
        assert!(response.body.contains("E-Wallet"));
        assert!(response.body.contains("Pal Casino"));
    }

    #[tokio::test]
    async fn unknown_method_is_404() {
        let app = test_app(FakeStore::new(), &[]);
        let response = send(&app, get("/payment-methods/cheque")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
