//! Typed fetchers over a [`ContentStore`].
//!
//! Fetchers are grouped by document type, one file per type, all as
//! methods on [`ContentQueries`]. They never fail: transport and decode
//! errors are logged and mapped to an empty result.

mod blog;
mod bonus;
mod casino;
mod country;
mod page;
mod payment_method;
mod review;
mod sitemap;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::query::{PUBLISHED, Query};
use super::store::{ContentError, ContentStore};
use crate::domain::Slug;

#[derive(Debug, Deserialize)]
struct SlugOnly {
    #[serde(default)]
    slug: Option<Slug>,
}

/// Typed, failure-absorbing access to site content.
#[derive(Debug, Clone)]
pub struct ContentQueries {
    store: Arc<dyn ContentStore>,
}

impl ContentQueries {
    /// Wraps a content store.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Raw reachability probe. Returns `true` when the store answered.
    pub async fn ping(&self) -> bool {
        let query = Query::new(r#"*[_type == "casino"][0]._id"#);
        match self.store.fetch(&query).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "content store health probe failed");
                false
            }
        }
    }

    /// Non-empty slugs of every published document of `doc_type`.
    async fn slugs_of(&self, doc_type: &str) -> Vec<String> {
        let query = Query::new(format!(
            r#"*[_type == "{doc_type}" && {PUBLISHED}] {{ slug }}"#
        ));
        self.fetch_list::<SlugOnly>(&format!("{doc_type}_slugs"), query)
            .await
            .into_iter()
            .filter_map(|s| s.slug.map(|slug| slug.current))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Runs `query` and decodes the result.
    async fn fetch_as<T: DeserializeOwned>(&self, query: &Query) -> Result<T, ContentError> {
        let value = self.store.fetch(query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Single-document fetch; `None` on miss or failure.
    async fn fetch_one<T: DeserializeOwned>(&self, operation: &str, query: Query) -> Option<T> {
        match self.fetch_as::<Option<T>>(&query).await {
            Ok(found) => found,
            Err(err) => {
                tracing::error!(operation, error = %err, "content query failed");
                None
            }
        }
    }

    /// List fetch; empty on failure.
    async fn fetch_list<T: DeserializeOwned>(&self, operation: &str, query: Query) -> Vec<T> {
        match self.fetch_as::<Option<Vec<T>>>(&query).await {
            Ok(items) => items.unwrap_or_default(),
            Err(err) => {
                tracing::error!(operation, error = %err, "content query failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;

    #[tokio::test]
    async fn ping_reports_store_reachability() {
        let up = ContentQueries::new(Arc::new(FakeStore::new().with("casino", json!("c1"))));
        let down = ContentQueries::new(Arc::new(FakeStore::failing()));
        assert!(up.ping().await);
        assert!(!down.ping().await);
    }
}
