//! Casino index and detail pages.

use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Response;
use maud::{Markup, html};

use super::{breadcrumb_nav, facts, page_header};
use crate::app_state::AppState;
use crate::config::SiteFormat;
use crate::content::CasinoSort;
use crate::domain::Casino;
use crate::web::params::ListParams;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, bonus_card, logo, page_shell, rating, visit_button};
use crate::web::render::formats::format_for;
use crate::web::render::json_ld;
use crate::web::render::pagination::pagination;
use crate::web::{HTML, PageError, serve_cached};

const SORTS: [(CasinoSort, &str); 3] = [
    (CasinoSort::Rating, "Top Rated"),
    (CasinoSort::Name, "A-Z"),
    (CasinoSort::Newest, "Newest"),
];

/// Link to the index with one parameter changed and the page reset.
fn filter_href(params: &ListParams, key: &'static str, value: Option<&str>) -> String {
    let mut pairs: Vec<(&str, String)> = params
        .query_pairs()
        .into_iter()
        .filter(|(k, _)| *k != key)
        .collect();
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
    crate::web::render::pagination::page_href("/casinos", 1, &pairs)
}

fn filter_bar(params: &ListParams, format: SiteFormat) -> Markup {
    let sort = params.sort();
    let featured = params.featured_only();
    html! {
        div class="filters" {
            @for (option, label) in SORTS {
                a class=[(option == sort).then_some("active")]
                    href=(filter_href(params, "sort", Some(option.as_str()))) { (label) }
            }
            a class=[featured.then_some("active")]
                href=(filter_href(params, "featured", (!featured).then_some("true"))) { "Featured only" }
            @for option in [SiteFormat::Default, SiteFormat::Comparison] {
                a class=[(option == format).then_some("active")]
                    href=(filter_href(params, "format", Some(option.as_str()))) {
                    (if option == SiteFormat::Default { "Cards" } else { "Table" })
                }
            }
        }
    }
}

/// `GET /casinos`
pub(crate) async fn casino_index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let format = params.format(state.config.site_format);
        let result = state.content.casinos(params.casino_filters()).await;

        let meta = PageMeta::new(
            "Online Casinos",
            "Browse and compare the best online casinos. Find top-rated casinos with great bonuses, fast payouts, and excellent games.",
            "/casinos",
        );
        let body = html! {
            (page_header("Online Casinos", Some("Discover the best online casinos, reviewed and rated by our experts.")))
            (filter_bar(&params, format))
            (format_for(format).casino_list(&ctx, &result.casinos, Some(result.total)))
            (pagination("/casinos", result.page, result.total_pages, &params.query_pairs()))
        };
        Ok(page_shell(&ctx, &meta, html! {}, body).into_string())
    })
    .await
}

fn casino_facts(casino: &Casino) -> Markup {
    facts(&[
        ("Established", casino.established.map(|y| y.to_string())),
        ("Min Deposit", casino.min_deposit.map(|m| format!("${m}"))),
        ("Withdrawal Time", casino.withdrawal_time.clone()),
        (
            "Licenses",
            (!casino.licenses.is_empty()).then(|| casino.licenses.join(", ")),
        ),
    ])
}

/// `GET /casinos/{slug}`
pub(crate) async fn casino_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let Some(casino) = state.content.casino_by_slug(&slug).await else {
            return Err(PageError::NotFound(format!("casino {slug}")));
        };
        let (bonuses, review) = tokio::join!(
            state.content.bonuses_by_casino(&casino.id),
            state.content.review_by_casino_slug(&slug),
        );

        let path = format!("/casinos/{slug}");
        let description = casino
            .description
            .clone()
            .unwrap_or_else(|| format!("Discover {} - reviews, bonuses, and more.", casino.name));
        let meta = PageMeta::new(casino.name.clone(), description, path.clone())
            .with_image(casino.logo.as_ref().and_then(|l| ctx.image_url(l, 1200, 630)));

        let crumbs = [("Home", "/"), ("Casinos", "/casinos"), (casino.name.as_str(), path.as_str())];
        let mut documents = vec![json_ld::casino(&ctx, &casino)];
        documents.extend(json_ld::casino_review(&ctx, &casino));
        documents.push(json_ld::breadcrumbs(&ctx, &crumbs));

        let body = html! {
            (breadcrumb_nav(&crumbs))
            article class="card" data-casino-id=(casino.id) data-casino-slug=(slug) {
                div class="card-head" {
                    (logo(&ctx, casino.logo.as_ref(), &casino.name, 96))
                    div {
                        h1 class="page-title" { (casino.name) }
                        (rating(casino.rating))
                    }
                }
                @if let Some(description) = casino.description.as_deref() {
                    p class="lead" { (description) }
                }
                (casino_facts(&casino))
                p {
                    (visit_button(&slug, "Visit Casino"))
                    " "
                    a class="btn btn-secondary btn-sm" href=(format!("/compare?casinos={slug}")) { "Compare" }
                    @if let Some(review) = review.as_ref() {
                        " "
                        a class="btn btn-secondary btn-sm" href=(format!("/reviews/{}", review.slug.as_str())) { "Read Full Review" }
                    }
                }
            }

            @if !bonuses.is_empty() {
                section class="section" {
                    h2 { "Bonuses at " (casino.name) }
                    div class="grid cols-3" {
                        @for bonus in &bonuses {
                            (bonus_card(&ctx, bonus))
                        }
                    }
                }
            }
        };
        Ok(page_shell(&ctx, &meta, json_ld::scripts(&documents), body).into_string())
    })
    .await
}
