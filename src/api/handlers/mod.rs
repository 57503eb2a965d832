//! JSON endpoint handlers organized by resource.

pub mod contact;
pub mod newsletter;
pub mod redirect;
pub mod revalidate;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the `/api/*` routes. The redirect routes are mounted
/// separately so the rate limiter wraps only them.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(contact::routes())
        .merge(newsletter::routes())
        .merge(revalidate::routes())
        .merge(system::routes())
}
