//! Review fetchers.
//!
//! Reviews are queried without the draft filter.

use super::ContentQueries;
use super::casino::CASINO_REF_FIELDS;
use crate::content::query::Query;
use crate::domain::Review;

fn review_fields() -> String {
    format!(
        r#"_id, slug, headline, body, author, verdict, lastTested, ratings, pros, cons, publishedAt, seo, "casino": casino->{{ {CASINO_REF_FIELDS} }}"#
    )
}

impl ContentQueries {
    /// Every review attached to a casino, newest first.
    pub async fn reviews(&self) -> Vec<Review> {
        let query = Query::new(format!(
            r#"*[_type == "review" && defined(casino)] | order(publishedAt desc) {{ {} }}"#,
            review_fields()
        ));
        self.fetch_list("reviews", query).await
    }

    /// A review by slug.
    pub async fn review_by_slug(&self, slug: &str) -> Option<Review> {
        let query = Query::new(format!(
            r#"*[_type == "review" && slug.current == $slug][0] {{ {} }}"#,
            review_fields()
        ))
        .param("slug", slug);
        self.fetch_one("review_by_slug", query).await
    }

    /// The review of a casino, looked up by the casino's slug.
    pub async fn review_by_casino_slug(&self, casino_slug: &str) -> Option<Review> {
        let query = Query::new(format!(
            r#"*[_type == "review" && casino->slug.current == $casinoSlug][0] {{ {} }}"#,
            review_fields()
        ))
        .param("casinoSlug", casino_slug);
        self.fetch_one("review_by_casino_slug", query).await
    }

    /// Slugs of every review that has one.
    pub async fn review_slugs(&self) -> Vec<String> {
        let query = Query::new(r#"*[_type == "review" && defined(slug.current)].slug.current"#);
        self.fetch_list::<Option<String>>("review_slugs", query)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
