//! `sitemap.xml` and `robots.txt`.

use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use maud::{PreEscaped, html};

use crate::app_state::AppState;
use crate::domain::DocumentType;
use crate::web::render::RenderContext;
use crate::web::{PageError, XML, serve_cached};

/// `(path, change frequency, priority)` for fixed routes.
const STATIC_ROUTES: [(&str, &str, &str); 13] = [
    ("/", "daily", "1.0"),
    ("/casinos", "daily", "0.9"),
    ("/bonuses", "daily", "0.9"),
    ("/countries", "weekly", "0.8"),
    ("/payment-methods", "weekly", "0.8"),
    ("/blog", "daily", "0.8"),
    ("/compare", "weekly", "0.5"),
    ("/favorites", "weekly", "0.5"),
    ("/contact", "monthly", "0.4"),
    ("/about", "monthly", "0.4"),
    ("/privacy", "monthly", "0.3"),
    ("/terms", "monthly", "0.3"),
    ("/responsible-gambling", "monthly", "0.4"),
];

/// URL prefix, change frequency and priority for each document type.
const fn document_route(doc_type: DocumentType) -> (&'static str, &'static str, &'static str) {
    match doc_type {
        DocumentType::Casino => ("/casinos/", "weekly", "0.8"),
        DocumentType::Bonus => ("/bonuses/", "weekly", "0.7"),
        DocumentType::Country => ("/countries/", "monthly", "0.6"),
        DocumentType::PaymentMethod => ("/payment-methods/", "monthly", "0.6"),
        DocumentType::BlogPost => ("/blog/", "monthly", "0.6"),
        DocumentType::Page => ("/", "weekly", "0.7"),
        DocumentType::Review => ("/reviews/", "monthly", "0.7"),
    }
}

struct SitemapUrl {
    loc: String,
    last_modified: DateTime<Utc>,
    change_frequency: &'static str,
    priority: &'static str,
}

/// `GET /sitemap.xml`
pub(crate) async fn sitemap_xml(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_cached(&state, &uri, XML, async {
        let ctx = RenderContext::new(&state.config);
        let now = Utc::now();
        let content = &state.content;
        let per_type = join_all(
            DocumentType::ALL
                .into_iter()
                .map(|doc_type| async move { (doc_type, content.sitemap_slugs(doc_type).await) }),
        )
        .await;

        let mut urls: Vec<SitemapUrl> = STATIC_ROUTES
            .into_iter()
            .map(|(path, change_frequency, priority)| SitemapUrl {
                loc: ctx.absolute(path),
                last_modified: now,
                change_frequency,
                priority,
            })
            .collect();
        for (doc_type, entries) in per_type {
            let (prefix, change_frequency, priority) = document_route(doc_type);
            urls.extend(entries.into_iter().map(|entry| SitemapUrl {
                loc: ctx.absolute(&format!("{prefix}{}", entry.slug)),
                last_modified: entry.updated_at.unwrap_or(now),
                change_frequency,
                priority,
            }));
        }
        tracing::debug!(urls = urls.len(), "sitemap generated");

        let markup = html! {
            (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
            urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
                @for url in &urls {
                    url {
                        loc { (url.loc) }
                        lastmod { (url.last_modified.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)) }
                        changefreq { (url.change_frequency) }
                        priority { (url.priority) }
                    }
                }
            }
        };
        Ok(markup.into_string())
    })
    .await
}

/// `GET /robots.txt`
pub(crate) async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = RenderContext::new(&state.config);
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!(
            "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /go/\n\nSitemap: {}\n",
            ctx.absolute("/sitemap.xml")
        ),
    )
}
