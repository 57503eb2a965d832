//! Webhook-driven page invalidation.
//!
//! The content store calls the webhook after a document is published. The
//! document type (and slug, when present) decides which rendered paths are
//! stale; every variant of those paths is dropped from the [`PageCache`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::page_cache::PageCache;
use crate::domain::DocumentType;
use crate::error::SiteError;

/// Webhook payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RevalidationRequest {
    /// Document type of the changed document.
    #[serde(rename = "_type")]
    pub doc_type: String,
    /// Document id.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Document slug, when it has one.
    #[serde(default)]
    pub slug: Option<SlugPayload>,
}

/// `{ "current": "..." }` slug wrapper.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SlugPayload {
    /// Slug value.
    #[serde(default)]
    pub current: Option<String>,
}

impl RevalidationRequest {
    /// Non-empty slug, if any.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_ref()
            .and_then(|s| s.current.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Result of a successful revalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevalidationOutcome {
    /// Paths that were invalidated.
    pub paths: Vec<String>,
    /// Total cached variants dropped.
    pub evicted: usize,
    /// When the revalidation ran.
    pub timestamp: DateTime<Utc>,
}

/// Paths affected by a change to a document of `doc_type`.
#[must_use]
pub fn affected_paths(doc_type: &str, slug: Option<&str>) -> Vec<String> {
    let with_slug = |prefix: &str| slug.map(|s| format!("{prefix}/{s}"));
    let Some(kind) = DocumentType::from_type_name(doc_type) else {
        return vec!["/".to_string()];
    };
    let mut paths: Vec<String> = match kind {
        DocumentType::Casino => vec!["/casinos".into(), "/".into()],
        DocumentType::Bonus => vec!["/bonuses".into()],
        DocumentType::Country => vec!["/countries".into()],
        DocumentType::PaymentMethod => vec!["/payment-methods".into()],
        DocumentType::BlogPost => vec!["/blog".into()],
        DocumentType::Page => Vec::new(),
        DocumentType::Review => match slug {
            Some(_) => Vec::new(),
            None => vec!["/".into()],
        },
    };
    let slug_path = match kind {
        DocumentType::Casino => with_slug("/casinos"),
        DocumentType::Bonus => with_slug("/bonuses"),
        DocumentType::Country => with_slug("/countries"),
        DocumentType::PaymentMethod => with_slug("/payment-methods"),
        DocumentType::BlogPost => with_slug("/blog"),
        DocumentType::Page => with_slug(""),
        DocumentType::Review => with_slug("/reviews"),
    };
    paths.extend(slug_path);
    if kind == DocumentType::Page {
        paths.push("/sitemap.xml".into());
    }
    paths
}

/// Verifies webhook calls and invalidates cached pages.
#[derive(Debug, Clone)]
pub struct RevalidationService {
    cache: PageCache,
    secret: Option<String>,
}

impl RevalidationService {
    /// Creates the service. With no secret every call is rejected.
    #[must_use]
    pub fn new(cache: PageCache, secret: Option<String>) -> Self {
        Self { cache, secret }
    }

    /// Checks the caller-supplied secret.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidSecret`] when no secret is configured or
    /// the values differ.
    pub fn verify_secret(&self, supplied: Option<&str>) -> Result<(), SiteError> {
        match (self.secret.as_deref(), supplied) {
            (Some(expected), Some(given)) if constant_time_eq(expected, given) => Ok(()),
            _ => Err(SiteError::InvalidSecret),
        }
    }

    /// Invalidates every path affected by `request`.
    pub async fn revalidate(&self, request: &RevalidationRequest) -> RevalidationOutcome {
        let paths = affected_paths(&request.doc_type, request.slug());
        let mut evicted = 0;
        for path in &paths {
            evicted += self.cache.invalidate_path(path).await;
        }
        tracing::info!(
            doc_type = %request.doc_type,
            id = request.id.as_deref().unwrap_or(""),
            paths = ?paths,
            evicted,
            "revalidated paths"
        );
        RevalidationOutcome {
            paths,
            evicted,
            timestamp: Utc::now(),
        }
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn paths(doc_type: &str, slug: Option<&str>) -> Vec<String> {
        affected_paths(doc_type, slug)
    }

    #[test]
    fn dispatch_table() {
        assert_eq!(paths("casino", Some("foo")), ["/casinos", "/", "/casinos/foo"]);
        assert_eq!(paths("casino", None), ["/casinos", "/"]);
        assert_eq!(paths("bonus", Some("b")), ["/bonuses", "/bonuses/b"]);
        assert_eq!(paths("country", Some("de")), ["/countries", "/countries/de"]);
        assert_eq!(
            paths("paymentMethod", Some("visa")),
            ["/payment-methods", "/payment-methods/visa"]
        );
        assert_eq!(paths("blogPost", None), ["/blog"]);
        assert_eq!(paths("page", Some("about")), ["/about", "/sitemap.xml"]);
        assert_eq!(paths("review", Some("r")), ["/reviews/r"]);
        assert_eq!(paths("review", None), ["/"]);
        assert_eq!(paths("sanity.imageAsset", Some("x")), ["/"]);
    }

    #[test]
    fn secret_checks() {
        let cache = PageCache::new(10, Duration::from_secs(60));
        let service = RevalidationService::new(cache.clone(), Some("s3cret".to_string()));
        assert!(service.verify_secret(Some("s3cret")).is_ok());
        assert!(service.verify_secret(Some("wrong")).is_err());
        assert!(service.verify_secret(None).is_err());

        let unconfigured = RevalidationService::new(cache, None);
        assert!(unconfigured.verify_secret(Some("")).is_err());
    }

    #[tokio::test]
    async fn revalidation_evicts_cached_pages() {
        let cache = PageCache::new(10, Duration::from_secs(60));
        cache.insert("/about", "x".to_string(), "text/html").await;
        cache.insert("/sitemap.xml", "y".to_string(), "application/xml").await;
        cache.insert("/blog", "z".to_string(), "text/html").await;
        let service = RevalidationService::new(cache.clone(), Some("k".to_string()));

        let request = RevalidationRequest {
            doc_type: "page".to_string(),
            id: Some("p1".to_string()),
            slug: Some(SlugPayload {
                current: Some("about".to_string()),
            }),
        };
        let outcome = service.revalidate(&request).await;
        assert_eq!(outcome.paths, ["/about", "/sitemap.xml"]);
        assert_eq!(outcome.evicted, 2);
        assert!(cache.get("/blog").await.is_some());
    }
}
