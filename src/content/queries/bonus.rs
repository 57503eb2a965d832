//! Bonus fetchers.

use super::ContentQueries;
use super::casino::CASINO_REF_FIELDS;
use crate::content::query::{PUBLISHED, Query};
use crate::domain::Bonus;

fn bonus_fields() -> String {
    format!(
        "_id, _type, title, slug, casino->{{ {CASINO_REF_FIELDS} }}, type, value, \
         wageringRequirement, minDeposit, code, description, terms, featured, publishedAt"
    )
}

impl ContentQueries {
    /// Every published bonus, featured first, then newest.
    pub async fn bonuses(&self) -> Vec<Bonus> {
        let query = Query::new(format!(
            r#"*[_type == "bonus" && {PUBLISHED}] | order(featured desc, publishedAt desc) {{ {} }}"#,
            bonus_fields()
        ));
        self.fetch_list("bonuses", query).await
    }

    /// A published bonus by slug.
    pub async fn bonus_by_slug(&self, slug: &str) -> Option<Bonus> {
        let query = Query::new(format!(
            r#"*[_type == "bonus" && slug.current == $slug && {PUBLISHED}][0] {{ {} }}"#,
            bonus_fields()
        ))
        .param("slug", slug);
        self.fetch_one("bonus_by_slug", query).await
    }

    /// Slugs of every published bonus.
    pub async fn bonus_slugs(&self) -> Vec<String> {
        self.slugs_of("bonus").await
    }

    /// Bonuses offered by one casino, featured first.
    pub async fn bonuses_by_casino(&self, casino_id: &str) -> Vec<Bonus> {
        let query = Query::new(format!(
            r#"*[_type == "bonus" && casino._ref == $casinoId && {PUBLISHED}] | order(featured desc) {{ {} }}"#,
            bonus_fields()
        ))
        .param("casinoId", casino_id);
        self.fetch_list("bonuses_by_casino", query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;

    #[tokio::test]
    async fn bonuses_for_casino_are_bound_by_id() {
        let store = FakeStore::new().with_param(
            "casino._ref == $casinoId",
            "casinoId",
            "c1",
            json!([{"_id": "b1", "title": "Welcome", "slug": {"current": "w"}, "type": "welcome"}]),
        );
        let queries = ContentQueries::new(Arc::new(store));
        assert_eq!(queries.bonuses_by_casino("c1").await.len(), 1);
        assert!(queries.bonuses_by_casino("c2").await.is_empty());
    }
}
