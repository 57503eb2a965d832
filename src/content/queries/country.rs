//! Country fetchers.

use serde::Deserialize;

use super::ContentQueries;
use crate::content::query::{PUBLISHED, Query};
use crate::domain::Country;

const COUNTRY_FIELDS: &str = "_id, _type, name, code, flag, legalStatus, overview";

#[derive(Debug, Deserialize)]
struct CodeOnly {
    #[serde(default)]
    code: Option<String>,
}

impl ContentQueries {
    /// Every published country, alphabetical.
    pub async fn countries(&self) -> Vec<Country> {
        let query = Query::new(format!(
            r#"*[_type == "country" && {PUBLISHED}] | order(name asc) {{ {COUNTRY_FIELDS} }}"#
        ));
        self.fetch_list("countries", query).await
    }

    /// A published country by ISO code (any case).
    pub async fn country_by_code(&self, code: &str) -> Option<Country> {
        let query = Query::new(format!(
            r#"*[_type == "country" && code == $code && {PUBLISHED}][0] {{ {COUNTRY_FIELDS} }}"#
        ))
        .param("code", code.to_uppercase());
        self.fetch_one("country_by_code", query).await
    }

    /// Codes of every published country, as stored.
    pub async fn country_codes(&self) -> Vec<String> {
        let query = Query::new(format!(r#"*[_type == "country" && {PUBLISHED}] {{ code }}"#));
        self.fetch_list::<CodeOnly>("country_codes", query)
            .await
            .into_iter()
            .filter_map(|c| c.code)
            .filter(|c| !c.is_empty())
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
    async fn lookup_upper_cases_code() {
        let store = FakeStore::new().with_param(
            "code == $code",
            "code",
            "GB",
            json!({"_id": "c1", "name": "United Kingdom", "code": "GB", "legalStatus": "legal"}),
        );
        let queries = ContentQueries::new(Arc::new(store));
        let country = queries.country_by_code("gb").await;
        assert_eq!(country.map(|c| c.name), Some("United Kingdom".to_string()));
    }

    #[tokio::test]
    async fn codes_skip_missing_values() {
        let store = FakeStore::new().with("{ code }", json!([{"code": "DE"}, {"code": null}, {}]));
        let queries = ContentQueries::new(Arc::new(store));
        assert_eq!(queries.country_codes().await, vec!["DE".to_string()]);
    }
}
