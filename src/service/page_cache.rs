//! In-process cache of rendered pages.
//!
//! Keys are request URIs (path plus query string), so one path may have
//! several cached variants. Invalidation works on paths and drops every
//! variant.
//!
//! Each invalidated path carries a generation counter. A render records the
//! generation before it starts and is only stored if the path was not
//! invalidated in the meantime.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use moka::future::Cache;

/// A rendered response body.
#[derive(Debug, Clone)]
pub struct CachedPage {
    /// Response body.
    pub body: String,
    /// `Content-Type` header value.
    pub content_type: &'static str,
    /// When the page was rendered.
    pub cached_at: DateTime<Utc>,
}

/// Shared rendered-page cache. Cloning shares the underlying storage.
#[derive(Clone)]
pub struct PageCache {
    inner: Cache<String, CachedPage>,
    generations: Arc<DashMap<String, u64>>,
}

impl fmt::Debug for PageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCache")
            .field("entries", &self.inner.entry_count())
            .field("invalidated_paths", &self.generations.len())
            .finish()
    }
}

impl PageCache {
    /// Creates a cache holding at most `capacity` pages for `ttl` each.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            generations: Arc::new(DashMap::new()),
        }
    }

    /// Cached page for a request URI.
    pub async fn get(&self, uri: &str) -> Option<CachedPage> {
        self.inner.get(uri).await
    }

    /// Stores a rendered page.
    pub async fn insert(&self, uri: impl Into<String>, body: String, content_type: &'static str) {
        let page = CachedPage {
            body,
            content_type,
            cached_at: Utc::now(),
        };
        self.inner.insert(uri.into(), page).await;
    }

    /// Invalidation generation of the path of `uri`. Pass it to
    /// [`PageCache::insert_unless_invalidated`] after rendering.
    #[must_use]
    pub fn generation(&self, uri: &str) -> u64 {
        self.generations
            .get(path_of(uri))
            .map_or(0, |generation| *generation)
    }

    /// Stores a page rendered when the path was at `generation`.
    ///
    /// Returns `false`, leaving the cache untouched, when the path was
    /// invalidated after `generation` was read.
    pub async fn insert_unless_invalidated(
        &self,
        uri: impl Into<String>,
        body: String,
        content_type: &'static str,
        generation: u64,
    ) -> bool {
        let uri = uri.into();
        if self.generation(&uri) != generation {
            return false;
        }
        self.insert(uri.clone(), body, content_type).await;
        // An invalidation may have landed between the check and the insert.
        if self.generation(&uri) != generation {
            self.inner.invalidate(&uri).await;
            return false;
        }
        true
    }

    /// Drops every cached variant of `path`. Returns how many were dropped.
    ///
    /// Renders of `path` already in flight will not be stored.
    pub async fn invalidate_path(&self, path: &str) -> usize {
        *self.generations.entry(path.to_string()).or_insert(0) += 1;
        let keys: Vec<String> = self
            .inner
            .iter()
            .filter(|(key, _)| path_of(key) == path)
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        for key in &keys {
            self.inner.invalidate(key).await;
        }
        keys.len()
    }

    /// Number of cached pages (approximate until pending tasks run).
    pub async fn len(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Returns `true` when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn path_of(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(path, _)| path)
}
