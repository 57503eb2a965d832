//! Listing query parameters.

use serde::Deserialize;

use super::render::formats::resolve_format;
use crate::config::SiteFormat;
use crate::content::{CasinoFilters, CasinoSort};

/// `?sort=&featured=&page=&format=` on listing pages.
///
/// Every field is kept as a raw string so malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// `rating`, `name` or `newest`.
    pub sort: Option<String>,
    /// `true` restricts to featured casinos.
    pub featured: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// `default` or `comparison`.
    pub format: Option<String>,
}

impl ListParams {
    /// Requested sort order.
    #[must_use]
    pub fn sort(&self) -> CasinoSort {
        CasinoSort::parse(self.sort.as_deref())
    }

    /// Whether only featured entries were requested.
    #[must_use]
    pub fn featured_only(&self) -> bool {
        self.featured.as_deref() == Some("true")
    }

    /// Requested page, at least 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    /// List presentation, falling back to `site_default`.
    #[must_use]
    pub fn format(&self, site_default: SiteFormat) -> SiteFormat {
        resolve_format(self.format.as_deref(), site_default)
    }

    /// Casino query filters.
    #[must_use]
    pub fn casino_filters(&self) -> CasinoFilters {
        CasinoFilters {
            featured: self.featured_only(),
            sort: self.sort(),
            page: self.page(),
        }
    }

    /// Parameters to carry over into pagination links.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort", sort.to_string()));
        }
        if self.featured_only() {
            pairs.push(("featured", "true".to_string()));
        }
        if let Some(format) = self.format.as_deref().filter(|f| !f.is_empty()) {
            pairs.push(("format", format.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>, featured: Option<&str>, page: Option<&str>) -> ListParams {
        ListParams {
            sort: sort.map(str::to_string),
            featured: featured.map(str::to_string),
            page: page.map(str::to_string),
            format: None,
        }
    }

    #[test]
    fn malformed_values_fall_back() {
        let p = params(Some("popular"), Some("yes"), Some("abc"));
        assert_eq!(p.casino_filters(), CasinoFilters::default());
        assert_eq!(params(None, None, Some("0")).page(), 1);
    }

    #[test]
    fn filters_from_valid_values() {
        let p = params(Some("name"), Some("true"), Some("3"));
        let filters = p.casino_filters();
        assert!(filters.featured);
        assert_eq!(filters.sort, CasinoSort::Name);
        assert_eq!(filters.page, 3);
        assert_eq!(
            p.query_pairs(),
            vec![("sort", "name".to_string()), ("featured", "true".to_string())]
        );
    }
}
