//! Bonus index and detail pages.

use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use super::{breadcrumb_nav, facts, page_header};
use crate::app_state::AppState;
use crate::web::params::ListParams;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, badge, logo, page_shell, visit_button};
use crate::web::render::formats::format_for;
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};

/// `GET /bonuses`
pub(crate) async fn bonus_index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let format = params.format(state.config.site_format);
        let bonuses = state.content.bonuses().await;

        let meta = PageMeta::new(
            "Casino Bonuses",
            "Compare the latest casino bonuses: welcome offers, free spins, reload and no-deposit deals.",
            "/bonuses",
        );
        let total = u32::try_from(bonuses.len()).ok();
        let body = html! {
            (page_header("Casino Bonuses", Some("Exclusive offers from the casinos we review.")))
            (format_for(format).bonus_list(&ctx, &bonuses, total))
        };
        Ok(page_shell(&ctx, &meta, html! {}, body).into_string())
    })
    .await
}

/// `GET /bonuses/{slug}`
pub(crate) async fn bonus_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let Some(bonus) = state.content.bonus_by_slug(&slug).await else {
            return Err(PageError::NotFound(format!("bonus {slug}")));
        };

        let path = format!("/bonuses/{slug}");
        let casino = bonus.casino.as_ref();
        let description = bonus.description.clone().unwrap_or_else(|| match casino {
            Some(c) => format!("{} at {}", bonus.title, c.name),
            None => bonus.title.clone(),
        });
        let meta = PageMeta::new(bonus.title.clone(), description, path.clone());
        let crumbs = [("Home", "/"), ("Bonuses", "/bonuses"), (bonus.title.as_str(), path.as_str())];
        let documents = [json_ld::bonus(&ctx, &bonus), json_ld::breadcrumbs(&ctx, &crumbs)];

        let body = html! {
            (breadcrumb_nav(&crumbs))
            article class="card" {
                div class="card-head" {
                    @if let Some(casino) = casino {
                        (logo(&ctx, casino.logo.as_ref(), &casino.name, 64))
                    }
                    div {
                        @if let Some(kind) = bonus.bonus_type {
                            (badge(kind.label(), "default"))
                        }
                        h1 class="page-title" { (bonus.title) }
                        @if let Some(casino) = casino {
                            p class="meta" {
                                "Offered by "
                                a href=(format!("/casinos/{}", casino.slug.as_str())) { (casino.name) }
                            }
                        }
                    }
                }
                @if let Some(value) = bonus.value.as_deref() {
                    p class="lead" { strong { (value) } }
                }
                (facts(&[
                    ("Wagering", bonus.wagering_requirement.map(|w| format!("{w}x"))),
                    ("Min Deposit", bonus.min_deposit.map(|m| format!("${m}"))),
                    ("Bonus Code", bonus.code.clone()),
                ]))
                @if let Some(description) = bonus.description.as_deref() {
                    p { (description) }
                }
                @if let Some(casino) = casino {
                    p { (visit_button(casino.slug.as_str(), "Claim Bonus")) }
                }
                @if let Some(terms) = bonus.terms.as_deref() {
                    section class="section" {
                        h2 { "Terms & Conditions" }
                        p class="meta" { (terms) }
                    }
                }
            }
        };
        Ok(page_shell(&ctx, &meta, json_ld::scripts(&documents), body).into_string())
    })
    .await
}
