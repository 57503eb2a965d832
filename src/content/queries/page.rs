//! Page-builder fetchers.

use futures_util::future::join_all;

use super::ContentQueries;
use super::casino::CASINO_FIELDS;
use crate::content::query::{PUBLISHED, Query};
use crate::domain::{Page, PageBlock};
use crate::domain::block::DisplayMode;

fn page_projection() -> String {
    format!(
        r#"_id, _type, title, slug,
  blocks[] {{
    _key, _type,
    _type == "richTextBlock" => {{ content }},
    _type == "ctaBlock" => {{ text, url, variant, size, centered }},
    _type == "infoBoxBlock" => {{ title, content, variant }},
    _type == "prosConsBlock" => {{ title, pros, cons }},
    _type == "heroBlock" => {{ title, subtitle, image, imagePosition, cta, overlay }},
    _type == "faqBlock" => {{ title, items[] {{ _key, question, answer }} }},
    _type == "casinoListBlock" => {{
      title, subtitle, displayMode, filter, limit, columns, showViewAllLink,
      manualCasinos[]-> {{ {CASINO_FIELDS} }}
    }},
    _type == "comparisonTableBlock" => {{
      title, columns, highlightWinner,
      casinos[]-> {{ {CASINO_FIELDS} }}
    }}
  }},
  seo {{ metaTitle, metaDescription, ogImage, noIndex }},
  publishedAt"#
    )
}

impl ContentQueries {
    /// A published page by slug (which may contain `/`).
    pub async fn page_by_slug(&self, slug: &str) -> Option<Page> {
        let query = Query::new(format!(
            r#"*[_type == "page" && slug.current == $slug && {PUBLISHED}][0] {{ {} }}"#,
            page_projection()
        ))
        .param("slug", slug);
        self.fetch_one("page_by_slug", query).await
    }

    /// Slugs of every published page.
    pub async fn page_slugs(&self) -> Vec<String> {
        self.slugs_of("page").await
    }

    /// Resolves casino-list blocks that need a store query.
    ///
    /// Resolved lists come back in manual mode with their casinos filled
    /// in; all other blocks pass through unchanged. Lookups run
    /// concurrently.
    pub async fn hydrate_blocks(&self, blocks: Vec<PageBlock>) -> Vec<PageBlock> {
        join_all(blocks.into_iter().map(|block| async move {
            match block {
                PageBlock::CasinoList(mut list) if list.needs_query() => {
                    list.manual_casinos = self
                        .casinos_for_block(list.filter, list.effective_limit())
                        .await;
                    list.display_mode = DisplayMode::Manual;
                    PageBlock::CasinoList(list)
                }
                other => other,
            }
        }))
        .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;
    use crate::domain::block::{CasinoListBlock, CasinoListFilter, RichTextBlock};

    #[tokio::test]
    async fn page_with_blocks_decodes() {
        let store = FakeStore::new().with_param(
            r#"_type == "page""#,
            "slug",
            "about",
            json!({
                "_id": "p1",
                "title": "About",
                "slug": {"current": "about"},
                "blocks": [
                    {"_key": "a", "_type": "heroBlock", "title": "Hi"},
                    {"_key": "b", "_type": "mysteryBlock"}
                ],
                "seo": null
            }),
        );
        let queries = ContentQueries::new(Arc::new(store));
        let Some(page) = queries.page_by_slug("about").await else {
            panic!("page should be found");
        };
        assert_eq!(page.blocks.len(), 2);
        assert!(matches!(page.blocks.get(1), Some(PageBlock::Unknown { .. })));
        assert!(queries.page_by_slug("missing").await.is_none());
    }

    #[tokio::test]
    async fn hydration_fills_automatic_lists_only() {
        let store = FakeStore::new().with(
            "[0...2]",
            json!([
                {"_id": "c1", "name": "A", "slug": {"current": "a"}},
                {"_id": "c2", "name": "B", "slug": {"current": "b"}}
            ]),
        );
        let queries = ContentQueries::new(Arc::new(store));
        let blocks = vec![
            PageBlock::RichText(RichTextBlock::default()),
            PageBlock::CasinoList(CasinoListBlock {
                filter: CasinoListFilter::TopRated,
                limit: Some(2),
                ..CasinoListBlock::default()
            }),
        ];
        let hydrated = queries.hydrate_blocks(blocks).await;
        assert!(matches!(hydrated.first(), Some(PageBlock::RichText(_))));
        let Some(PageBlock::CasinoList(list)) = hydrated.get(1) else {
            panic!("expected casino list");
        };
        assert_eq!(list.display_mode, DisplayMode::Manual);
        assert_eq!(list.manual_casinos.len(), 2);
    }
}
