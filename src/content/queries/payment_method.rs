//! Payment method fetchers.

use super::ContentQueries;
use crate::content::query::{PUBLISHED, Query};
use crate::domain::PaymentMethod;

const PAYMENT_METHOD_FIELDS: &str =
    "_id, _type, name, slug, logo, type, description, processingTime, fees";

impl ContentQueries {
    /// Every published payment method, alphabetical.
    pub async fn payment_methods(&self) -> Vec<PaymentMethod> {
        let query = Query::new(format!(
            r#"*[_type == "paymentMethod" && {PUBLISHED}] | order(name asc) {{ {PAYMENT_METHOD_FIELDS} }}"#
        ));
        self.fetch_list("payment_methods", query).await
    }

    /// A published payment method by slug.
    pub async fn payment_method_by_slug(&self, slug: &str) -> Option<PaymentMethod> {
        let query = Query::new(format!(
            r#"*[_type == "paymentMethod" && slug.current == $slug && {PUBLISHED}][0] {{ {PAYMENT_METHOD_FIELDS} }}"#
        ))
        .param("slug", slug);
        self.fetch_one("payment_method_by_slug", query).await
    }

    /// Slugs of every published payment method.
    pub async fn payment_method_slugs(&self) -> Vec<String> {
        self.slugs_of("paymentMethod").await
    }
}
