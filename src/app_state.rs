//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{ContentQueries, ContentStore};
use crate::domain::{FixedWindowLimiter, InMemorySubscribers, RateLimiter, SubscriberStore};
use crate::service::{PageCache, RedirectService, RevalidationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Site configuration.
    pub config: Arc<SiteConfig>,
    /// Typed content fetchers.
    pub content: ContentQueries,
    /// Gate for the `/go/*` route family.
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Newsletter subscribers.
    pub subscribers: Arc<dyn SubscriberStore>,
    /// Rendered page cache.
    pub page_cache: PageCache,
    /// Affiliate redirect resolution.
    pub redirects: RedirectService,
    /// Webhook-driven cache invalidation.
    pub revalidation: RevalidationService,
}

impl AppState {
    /// Wires the default in-process collaborators around a content store.
    #[must_use]
    pub fn new(config: SiteConfig, store: Arc<dyn ContentStore>) -> Self {
        let content = ContentQueries::new(store);
        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        ));
        let page_cache = PageCache::new(config.page_cache_capacity, config.page_cache_ttl);
        let revalidation =
            RevalidationService::new(page_cache.clone(), config.revalidation_secret.clone());

        tracing::info!(
            cache_capacity = config.page_cache_capacity,
            cache_ttl_secs = config.page_cache_ttl.as_secs(),
            rate_limit = config.rate_limit_max_requests,
            rate_window_ms = config.rate_limit_window.as_millis(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            redirects: RedirectService::new(content.clone()),
            content,
            rate_limiter,
            subscribers: Arc::new(InMemorySubscribers::new()),
            page_cache,
            revalidation,
        }
    }
}
