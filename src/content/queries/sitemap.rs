//! Sitemap source data.

use super::ContentQueries;
use crate::content::query::{PUBLISHED, Query, SitemapEntry};
use crate::domain::DocumentType;

impl ContentQueries {
    /// URL segment and last-modified time for every published document
    /// of `doc_type`. Countries use their lower-cased code.
    pub async fn sitemap_slugs(&self, doc_type: DocumentType) -> Vec<SitemapEntry> {
        let segment = match doc_type {
            DocumentType::Country => "code",
            _ => "slug.current",
        };
        let query = Query::new(format!(
            r#"*[_type == "{doc_type}" && {PUBLISHED} && defined({segment})] {{ "slug": {segment}, "updatedAt": _updatedAt }}"#
        ));
        let entries: Vec<SitemapEntry> = self.fetch_list("sitemap_slugs", query).await;
        entries
            .into_iter()
            .filter(|e| !e.slug.is_empty())
            .map(|mut e| {
                if doc_type == DocumentType::Country {
                    e.slug = e.slug.to_lowercase();
                }
                e
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;

    #[tokio::test]
    async fn country_codes_are_lower_cased() {
        let store = FakeStore::new().with(
            r#"_type == "country""#,
            json!([
                {"slug": "DE", "updatedAt": "2024-05-01T10:00:00Z"},
                {"slug": "", "updatedAt": null}
            ]),
        );
        let queries = ContentQueries::new(Arc::new(store));
        let entries = queries.sitemap_slugs(DocumentType::Country).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(|e| e.slug.as_str()), Some("de"));
        assert!(entries.first().is_some_and(|e| e.updated_at.is_some()));
    }
}
