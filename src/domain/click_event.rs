//! Outbound affiliate click record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Referrer value recorded when the request carries no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// Placeholder for missing header values.
pub const UNKNOWN: &str = "unknown";

/// One affiliate click. Written to the log only, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    /// Unique id for this click.
    pub click_id: Uuid,
    /// Slug of the casino the visitor was sent to.
    pub casino_slug: String,
    /// When the click happened.
    pub timestamp: DateTime<Utc>,
    /// Full referrer URL, or `direct`.
    pub referrer: String,
    /// Path of the referring page on this site, `/` when unknown.
    pub page: String,
    /// Two-letter country from edge headers, or `unknown`.
    pub country: String,
    /// Browser user agent, or `unknown`.
    pub user_agent: String,
}

impl ClickEvent {
    /// Builds a click from raw request data, filling in the fallbacks.
    #[must_use]
    pub fn new(
        casino_slug: impl Into<String>,
        referrer: Option<&str>,
        country: Option<&str>,
        user_agent: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let referrer = non_empty(referrer).unwrap_or(DIRECT_REFERRER).to_string();
        let page = referrer_path(&referrer);
        Self {
            click_id: Uuid::new_v4(),
            casino_slug: casino_slug.into(),
            timestamp,
            page,
            referrer,
            country: non_empty(country).unwrap_or(UNKNOWN).to_string(),
            user_agent: non_empty(user_agent).unwrap_or(UNKNOWN).to_string(),
        }
    }

    /// RFC 3339 timestamp with millisecond precision.
    #[must_use]
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Path component of a referrer URL; `/` for `direct` or unparseable input.
#[must_use]
pub fn referrer_path(referrer: &str) -> String {
    if referrer == DIRECT_REFERRER {
        return "/".to_string();
    }
    url::Url::parse(referrer).map_or_else(|_| "/".to_string(), |url| url.path().to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
