//! GROQ query values and listing parameters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::Casino;

/// Casinos per listing page.
pub const PER_PAGE: u32 = 12;

/// Excludes unpublished drafts.
pub const PUBLISHED: &str = r#"!(_id in path("drafts.**"))"#;

/// A GROQ query with named parameters (`$name` in the query text).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    groq: String,
    params: BTreeMap<String, Value>,
}

impl Query {
    /// Creates a query without parameters.
    pub fn new(groq: impl Into<String>) -> Self {
        Self {
            groq: groq.into(),
            params: BTreeMap::new(),
        }
    }

    /// Binds `$name` to `value`.
    #[must_use]
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Query text.
    #[must_use]
    pub fn groq(&self) -> &str {
        &self.groq
    }

    /// Bound parameters, by name without the `$`.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }
}

/// Sort order for casino listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CasinoSort {
    /// Best rated first, then by name.
    #[default]
    Rating,
    /// Alphabetical.
    Name,
    /// Most recently published first.
    Newest,
}

impl CasinoSort {
    /// Parses a `sort` query value; unknown values fall back to rating.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("name") => Self::Name,
            Some("newest") => Self::Newest,
            _ => Self::Rating,
        }
    }

    /// GROQ `order(...)` clause.
    #[must_use]
    pub const fn order_clause(self) -> &'static str {
        match self {
            Self::Rating => "rating desc, name asc",
            Self::Name => "name asc",
            Self::Newest => "publishedAt desc",
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Name => "name",
            Self::Newest => "newest",
        }
    }
}

/// Casino listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasinoFilters {
    /// Only featured casinos.
    pub featured: bool,
    /// Sort order.
    pub sort: CasinoSort,
    /// 1-based page number.
    pub page: u32,
}

impl Default for CasinoFilters {
    fn default() -> Self {
        Self {
            featured: false,
            sort: CasinoSort::Rating,
            page: 1,
        }
    }
}

impl CasinoFilters {
    /// Page number clamped to at least 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Half-open slice `[start, end)` for the requested page.
    #[must_use]
    pub fn window(&self) -> (u32, u32) {
        let start = (self.page() - 1).saturating_mul(PER_PAGE);
        (start, start.saturating_add(PER_PAGE))
    }
}

/// One page of casinos plus totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CasinoPage {
    /// Casinos on this page.
    pub casinos: Vec<Casino>,
    /// Total matching casinos.
    pub total: u32,
    /// Current page.
    pub page: u32,
    /// Number of pages.
    pub total_pages: u32,
}

impl CasinoPage {
    /// Result used when the store is unreachable.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            casinos: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
        }
    }
}

/// Number of pages needed for `total` items.
#[must_use]
pub const fn total_pages(total: u32) -> u32 {
    total.div_ceil(PER_PAGE)
}

/// Slug and last-modified time for sitemap generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// URL segment (slug or lower-cased country code).
    #[serde(default, deserialize_with = "crate::domain::common::nullable")]
    pub slug: String,
    /// Last modification.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
