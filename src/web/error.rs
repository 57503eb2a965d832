//! Error type for HTML routes.
//!
//! Errors render as a standalone HTML page rather than JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, PreEscaped, html};

use super::render::components::PAGE_CSS;

/// HTML route error.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No published document matches the request.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::NotFound(what) => {
                tracing::debug!(resource = %what, "page not found");
                (
                    StatusCode::NOT_FOUND,
                    "Page Not Found",
                    "The page you are looking for does not exist or has been moved.",
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(PAGE_CSS)) }
                }
                body {
                    main {
                        div class="container empty" {
                            h1 class="page-title" { "404" }
                            h2 { (title) }
                            p { (message) }
                            p {
                                a class="btn btn-accent" href="/" { "Go Home" }
                                " "
                                a class="btn btn-secondary" href="/casinos" { "Browse Casinos" }
                            }
                        }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
