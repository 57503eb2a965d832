//! Generic CMS page assembled from blocks.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::block::PageBlock;
use super::common::{Seo, Slug, nullable};

/// A page-builder document served under `/{slug}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Page title.
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// URL slug; may contain `/` for nested pages.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Ordered content blocks.
    #[serde(default, deserialize_with = "nullable")]
    pub blocks: Vec<PageBlock>,
    /// SEO overrides.
    #[serde(default)]
    pub seo: Option<Seo>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Title to use in `<title>`: the SEO override or the page title.
    #[must_use]
    pub fn meta_title(&self) -> &str {
        self.seo
            .as_ref()
            .and_then(|seo| seo.meta_title.as_deref())
            .unwrap_or(&self.title)
    }

    /// Meta description, when set.
    #[must_use]
    pub fn meta_description(&self) -> Option<&str> {
        self.seo.as_ref().and_then(|seo| seo.meta_description.as_deref())
    }

    /// Whether search engines should skip this page.
    #[must_use]
    pub fn no_index(&self) -> bool {
        self.seo.as_ref().and_then(|seo| seo.no_index).unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn seo_overrides_title() {
        let json = r#"{
            "_id": "p1",
            "title": "About",
            "slug": {"current": "about"},
            "blocks": null,
            "seo": {"metaTitle": "About us", "noIndex": true}
        }"#;
        let Ok(page) = serde_json::from_str::<Page>(json) else {
            panic!("page should deserialize");
        };
        assert_eq!(page.meta_title(), "About us");
        assert!(page.no_index());
        assert!(page.blocks.is_empty());
    }
}
