//! # casino-guide
//!
//! Server-rendered casino review and affiliate site backed by a headless
//! content store.
//!
//! Every page is rendered on request from content-store documents, kept in
//! an in-process page cache, and evicted when the store calls the
//! revalidation webhook. A small JSON API handles forms, webhooks and
//! affiliate redirects.
//!
//! ## Architecture
//!
//! ```text
//! Browsers, content-store webhooks
//!     │
//!     ├── HTML pages (web/)        ── PageCache (service/)
//!     ├── JSON API, /go (api/)     ── RateLimiter (domain/)
//!     │
//!     ├── RedirectService, RevalidationService (service/)
//!     │
//!     ├── ContentQueries (content/)
//!     └── ContentStore ── SanityClient (HTTP)
//! ```
//!
//! [`client_state`] holds the visitor-local favorites, comparison and
//! consent containers backing the browser-side tools.

pub mod api;
pub mod app_state;
pub mod client_state;
pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod service;
pub mod web;

#[cfg(test)]
#[allow(clippy::panic)]
mod test_support;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Assembles the complete application: JSON API, HTML pages, tracing and
/// CORS layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router(&state))
        .merge(web::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
