//! Casino fetchers.

use serde::Deserialize;

use super::ContentQueries;
use crate::content::query::{CasinoFilters, CasinoPage, PUBLISHED, Query, total_pages};
use crate::content::store::ContentError;
use crate::domain::Casino;
use crate::domain::block::CasinoListFilter;

/// Projection shared by every casino query.
pub(crate) const CASINO_FIELDS: &str = "_id, _type, name, slug, logo, description, rating, \
     established, minDeposit, withdrawalTime, licenses, affiliateUrl, featured, publishedAt";

/// Projection for casinos embedded in bonuses and reviews.
pub(crate) const CASINO_REF_FIELDS: &str = "_id, name, slug, logo, rating, affiliateUrl";

#[derive(Debug, Deserialize)]
struct ListingResult {
    #[serde(default, deserialize_with = "crate::domain::common::nullable")]
    casinos: Vec<Casino>,
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AffiliateResult {
    #[serde(default)]
    affiliate_url: Option<String>,
}


impl ContentQueries {
    /// One page of casinos with totals, fetched as a single batched query.
    pub async fn casinos(&self, filters: CasinoFilters) -> CasinoPage {
        let mut conditions = vec![r#"_type == "casino""#, PUBLISHED];
        if filters.featured {
            conditions.push("featured == true");
        }
        let filter = conditions.join(" && ");
        let (start, end) = filters.window();
        let query = Query::new(format!(
            r#"{{
  "casinos": *[{filter}] | order({order}) [{start}...{end}] {{ {CASINO_FIELDS} }},
  "total": count(*[{filter}])
}}"#,
            order = filters.sort.order_clause(),
        ));

        match self.fetch_as::<ListingResult>(&query).await {
            Ok(result) => CasinoPage {
                casinos: result.casinos,
                total: result.total,
                page: filters.page(),
                total_pages: total_pages(result.total),
            },
            Err(err) => {
                tracing::error!(operation = "casinos", error = %err, "content query failed");
                CasinoPage::empty()
            }
        }
    }

    /// A published casino by slug.
    pub async fn casino_by_slug(&self, slug: &str) -> Option<Casino> {
        let query = Query::new(format!(
            r#"*[_type == "casino" && slug.current == $slug && {PUBLISHED}][0] {{ {CASINO_FIELDS} }}"#
        ))
        .param("slug", slug);
        self.fetch_one("casino_by_slug", query).await
    }

    /// Slugs of every published casino.
    pub async fn casino_slugs(&self) -> Vec<String> {
        self.slugs_of("casino").await
    }

    /// Casinos accepting players from a country, best rated first.
    pub async fn casinos_by_country(&self, code: &str) -> Vec<Casino> {
        let query = Query::new(format!(
            r#"*[_type == "casino" && {PUBLISHED} && $countryCode in countries[]->code] | order(rating desc) {{ {CASINO_FIELDS} }}"#
        ))
        .param("countryCode", code.to_uppercase());
        self.fetch_list("casinos_by_country", query).await
    }

    /// Casinos accepting a payment method, best rated first.
    pub async fn casinos_by_payment_method(&self, slug: &str) -> Vec<Casino> {
        let query = Query::new(format!(
            r#"*[_type == "casino" && {PUBLISHED} && $slug in paymentMethods[]->slug.current] | order(rating desc) {{ {CASINO_FIELDS} }}"#
        ))
        .param("slug", slug);
        self.fetch_list("casinos_by_payment_method", query).await
    }

    /// Casinos for an automatic casino-list block.
    pub async fn casinos_for_block(&self, filter: CasinoListFilter, limit: u32) -> Vec<Casino> {
        let order = match filter {
            CasinoListFilter::All => "name asc",
            CasinoListFilter::Featured | CasinoListFilter::TopRated => "rating desc",
            CasinoListFilter::Newest => "publishedAt desc",
        };
        let featured = if filter == CasinoListFilter::Featured {
            " && featured == true"
        } else {
            ""
        };
        let query = Query::new(format!(
            r#"*[_type == "casino" && {PUBLISHED}{featured}] | order({order}) [0...{limit}] {{ {CASINO_FIELDS} }}"#
        ));
        self.fetch_list("casinos_for_block", query).await
    }

    /// Affiliate URL for a casino slug.
    ///
    /// Unlike the other fetchers this one reports failures, so the
    /// redirect can log them with the click context.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when the store cannot be queried.
    pub async fn affiliate_url(&self, slug: &str) -> Result<Option<String>, ContentError> {
        let query = Query::new(r#"*[_type == "casino" && slug.current == $slug][0]{ affiliateUrl }"#)
            .param("slug", slug);
        let found: Option<AffiliateResult> = self.fetch_as(&query).await?;
        Ok(found
            .and_then(|r| r.affiliate_url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::content::query::CasinoSort;
    use crate::content::testing::FakeStore;

    use super::*;

    fn casino_json(id: &str, rating: f64) -> serde_json::Value {
        json!({"_id": id, "_type": "casino", "name": id, "slug": {"current": id}, "rating": rating})
    }

    #[tokio::test]
    async fn listing_maps_batched_result() {
        let store = Arc::new(FakeStore::new().with(
            "\"total\"",
            json!({"casinos": [casino_json("a", 4.0), casino_json("b", 3.0)], "total": 14}),
        ));
        let queries = ContentQueries::new(Arc::<FakeStore>::clone(&store));
        let page = queries
            .casinos(CasinoFilters {
                featured: true,
                sort: CasinoSort::Name,
                page: 2,
            })
            .await;
        assert_eq!(page.casinos.len(), 2);
        assert_eq!(page.total, 14);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);

        let seen = store.seen();
        let Some(query) = seen.first() else {
            panic!("query should be recorded");
        };
        assert!(query.groq().contains("featured == true"));
        assert!(query.groq().contains("order(name asc) [12...24]"));
        assert!(query.groq().contains(PUBLISHED));
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let queries = ContentQueries::new(Arc::new(FakeStore::failing()));
        assert_eq!(queries.casinos(CasinoFilters::default()).await, CasinoPage::empty());
        assert!(queries.casino_by_slug("x").await.is_none());
        assert!(queries.casino_slugs().await.is_empty());
        assert!(queries.casinos_by_country("de").await.is_empty());
        assert!(queries.affiliate_url("x").await.is_err());
    }

    #[tokio::test]
    async fn country_code_is_upper_cased() {
        let store = Arc::new(FakeStore::new().with_param(
            "countries[]->code",
            "countryCode",
            "DE",
            json!([casino_json("a", 4.0)]),
        ));
        let queries = ContentQueries::new(Arc::<FakeStore>::clone(&store));
        assert_eq!(queries.casinos_by_country("de").await.len(), 1);
    }

    #[tokio::test]
    async fn affiliate_url_blank_is_none() {
        let store = FakeStore::new()
            .with_param("affiliateUrl", "slug", "blank", json!({"affiliateUrl": "  "}))
            .with_param(
                "affiliateUrl",
                "slug",
                "lucky",
                json!({"affiliateUrl": "https://example-casino.test/ref=abc"}),
            );
        let queries = ContentQueries::new(Arc::new(store));
        let Ok(blank) = queries.affiliate_url("blank").await else {
            panic!("fetch should succeed");
        };
        assert!(blank.is_none());
        let Ok(found) = queries.affiliate_url("lucky").await else {
            panic!("fetch should succeed");
        };
        assert_eq!(found.as_deref(), Some("https://example-casino.test/ref=abc"));
        let Ok(missing) = queries.affiliate_url("nope").await else {
            panic!("fetch should succeed");
        };
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn block_filter_controls_query() {
        let store = Arc::new(FakeStore::new());
        let queries = ContentQueries::new(Arc::<FakeStore>::clone(&store));
        let _ = queries.casinos_for_block(CasinoListFilter::Featured, 4).await;
        let seen = store.seen();
        let Some(query) = seen.first() else {
            panic!("query should be recorded");
        };
        assert!(query.groq().contains("featured == true"));
        assert!(query.groq().contains("order(rating desc) [0...4]"));
    }
}
