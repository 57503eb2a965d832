//! Blog post fetchers.

use super::ContentQueries;
use crate::content::query::{PUBLISHED, Query};
use crate::domain::BlogPost;

impl ContentQueries {
    /// Every published post, newest first, without bodies.
    pub async fn blog_posts(&self) -> Vec<BlogPost> {
        let query = Query::new(format!(
            r#"*[_type == "blogPost" && {PUBLISHED}] | order(publishedAt desc) {{ _id, _type, title, slug, excerpt, coverImage, author, publishedAt }}"#
        ));
        self.fetch_list("blog_posts", query).await
    }

    /// A published post by slug, with body.
    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let query = Query::new(format!(
            r#"*[_type == "blogPost" && slug.current == $slug && {PUBLISHED}][0] {{ _id, _type, title, slug, excerpt, body, coverImage, author, publishedAt }}"#
        ))
        .param("slug", slug);
        self.fetch_one("blog_post_by_slug", query).await
    }

    /// Slugs of every published post.
    pub async fn blog_post_slugs(&self) -> Vec<String> {
        self.slugs_of("blogPost").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::content::testing::FakeStore;

    #[tokio::test]
    async fn listing_omits_body() {
        let store = Arc::new(FakeStore::new().with(
            "blogPost",
            json!([{"_id": "p1", "title": "Hello", "slug": {"current": "hello"}}]),
        ));
        let queries = ContentQueries::new(Arc::<FakeStore>::clone(&store));
        assert_eq!(queries.blog_posts().await.len(), 1);
        assert!(store.seen().iter().all(|q| !q.groq().contains("body")));
    }
}
