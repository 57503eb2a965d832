//! Blog index and article pages.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use maud::html;

use super::{breadcrumb_nav, page_header};
use crate::app_state::AppState;
use crate::domain::BlogPost;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, page_shell, truncate};
use crate::web::render::json_ld;
use crate::web::render::portable_text;
use crate::web::{HTML, PageError, serve_cached};

fn published_on(post: &BlogPost) -> Option<String> {
    post.published_at.map(|at| at.format("%B %-d, %Y").to_string())
}

/// `GET /blog`
pub(crate) async fn blog_index(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let posts = state.content.blog_posts().await;
        let meta = PageMeta::new(
            "Casino Blog",
            "News, strategy guides and bonus tips from our casino experts.",
            "/blog",
        );
        let body = html! {
            (page_header("Casino Blog", Some("News, guides and tips from our editorial team.")))
            @if posts.is_empty() {
                div class="empty" { p { "No articles yet." } }
            } @else {
                div class="grid cols-3" {
                    @for post in &posts {
                        article class="card" {
                            @if let Some(url) = post.cover_image.as_ref().and_then(|img| ctx.image_url(img, 600, 340)) {
                                img src=(url) alt=(post.title) width="600" height="340" loading="lazy";
                            }
                            h3 { a href=(format!("/blog/{}", post.slug.as_str())) { (post.title) } }
                            @if let Some(date) = published_on(post) {
                                p class="meta" { (date) }
                            }
                            @if let Some(excerpt) = post.excerpt.as_deref() {
                                p class="meta" { (truncate(excerpt, 160)) }
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

/// `GET /blog/{slug}`
pub(crate) async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_cached(&state, &uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let Some(post) = state.content.blog_post_by_slug(&slug).await else {
            return Err(PageError::NotFound(format!("blog post {slug}")));
        };

        let path = format!("/blog/{slug}");
        let cover = post.cover_image.as_ref().and_then(|img| ctx.image_url(img, 1200, 630));
        let meta = PageMeta::new(
            post.title.clone(),
            post.excerpt.clone().unwrap_or_default(),
            path.clone(),
        )
        .article()
        .with_image(cover.clone());
        let crumbs = [("Home", "/"), ("Blog", "/blog"), (post.title.as_str(), path.as_str())];

        let body = html! {
            (breadcrumb_nav(&crumbs))
            article {
                h1 class="page-title" { (post.title) }
                p class="meta" {
                    @if let Some(author) = post.author.as_deref() {
                        "By " (author)
                    }
                    @if let Some(date) = published_on(&post) {
                        @if post.author.is_some() { " · " }
                        time datetime=(post.published_at.map(|at| at.to_rfc3339()).unwrap_or_default()) { (date) }
                    }
                }
                @if let Some(url) = cover.as_deref() {
                    img src=(url) alt=(post.title) width="1200" height="630";
                }
                (portable_text::render(&ctx, &post.body))
            }
        };
        let head = json_ld::scripts(&[json_ld::breadcrumbs(&ctx, &crumbs)]);
        Ok(page_shell(&ctx, &meta, head, body).into_string())
    })
    .await
}
