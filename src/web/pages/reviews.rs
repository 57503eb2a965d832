//! Casino review pages.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use super::breadcrumb_nav;
use crate::app_state::AppState;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, logo, page_shell, rating, visit_button};
use crate::web::render::json_ld;
use crate::web::render::portable_text;
use crate::web::{HTML, PageError, serve_cached};

/// `GET /reviews/{slug}`
pub(crate) async fn review_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let Some(review) = state.content.review_by_slug(&slug).await else {
            return Err(PageError::NotFound(format!("review {slug}")));
        };

        let path = format!("/reviews/{slug}");
        let seo = review.seo.as_ref();
        let title = seo
            .and_then(|s| s.meta_title.clone())
            .unwrap_or_else(|| review.headline.clone());
        let description = seo
            .and_then(|s| s.meta_description.clone())
            .or_else(|| review.verdict.clone())
            .unwrap_or_default();
        let no_index = seo.and_then(|s| s.no_index).unwrap_or(false);
        let og_image = seo
            .and_then(|s| s.og_image.as_ref())
            .and_then(|img| ctx.image_url(img, 1200, 630));
        let meta = PageMeta::new(title, description, path.clone())
            .article()
            .with_image(og_image)
            .with_no_index(no_index);

        let casino = review.casino.as_ref();
        let casino_name = casino.map_or("Casino", |c| c.name.as_str());
        let casino_path = casino.map(|c| format!("/casinos/{}", c.slug.as_str()));
        let mut crumbs = vec![("Home", "/"), ("Casinos", "/casinos")];
        if let Some(casino_path) = casino_path.as_deref() {
            crumbs.push((casino_name, casino_path));
        }
        crumbs.push(("Review", path.as_str()));

        let mut documents = Vec::new();
        documents.extend(json_ld::review(&ctx, &review));
        documents.push(json_ld::breadcrumbs(&ctx, &crumbs));

        let categories = review
            .ratings
            .as_ref()
            .map(|r| r.categories())
            .unwrap_or_default();

        let body = html! {
            (breadcrumb_nav(&crumbs))
            article {
                div class="card-head" {
                    @if let Some(casino) = casino {
                        (logo(&ctx, casino.logo.as_ref(), &casino.name, 64))
                    }
                    h1 class="page-title" { (review.headline) }
                }
                p class="meta" {
                    @if let Some(author) = review.author.as_deref() {
                        "By " (author)
                    }
                    @if let Some(tested) = review.last_tested.as_deref() {
                        " · Last tested " (tested)
                    }
                }

                @if !categories.is_empty() {
                    section class="section" {
                        h2 { "Our Ratings" }
                        dl class="facts" {
                            @for (label, score) in &categories {
                                div {
                                    dt { (label) }
                                    dd { (rating(Some(*score))) }
                                }
                            }
                        }
                    }
                }

                @if let Some(verdict) = review.verdict.as_deref() {
                    aside class="info-box success" {
                        h3 { "Verdict" }
                        p { (verdict) }
                    }
                }

                @if !review.pros.is_empty() || !review.cons.is_empty() {
                    section class="section pros-cons" {
                        div class="card pros" {
                            h3 { "Pros" }
                            ul { @for pro in &review.pros { li { (pro) } } }
                        }
                        div class="card cons" {
                            h3 { "Cons" }
                            ul { @for con in &review.cons { li { (con) } } }
                        }
                    }
                }

                (portable_text::render(&ctx, &review.body))

                @if let Some(casino) = casino {
                    p class="cta centered" {
                        (visit_button(casino.slug.as_str(), &format!("Visit {}", casino.name)))
                    }
                }
            }
        };
        Ok(page_shell(&ctx, &meta, json_ld::scripts(&documents), body).into_string())
    })
    .await
}
