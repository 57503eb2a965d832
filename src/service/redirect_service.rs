//! Affiliate redirect resolution and click logging.
//!
//! Each outbound click produces exactly one log record: `CLICK` with the
//! full [`ClickEvent`] when the casino has an affiliate URL, `CLICK_ERROR`
//! otherwise. Resolution never fails; the fallback destination is `/`.

use chrono::{SecondsFormat, Utc};

use crate::content::ContentQueries;
use crate::domain::ClickEvent;

/// Destination used when no affiliate URL can be resolved.
pub const FALLBACK_LOCATION: &str = "/";

/// Request metadata recorded with a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickContext {
    /// `Referer` header.
    pub referrer: Option<String>,
    /// Country from edge headers.
    pub country: Option<String>,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
}

/// Resolves affiliate links and records clicks.
#[derive(Debug, Clone)]
pub struct RedirectService {
    content: ContentQueries,
}

impl RedirectService {
    /// Creates the service over the given content queries.
    #[must_use]
    pub fn new(content: ContentQueries) -> Self {
        Self { content }
    }

    /// Returns the redirect target for `slug` and logs the click.
    pub async fn resolve(&self, slug: &str, context: &ClickContext) -> String {
        let url = match self.content.affiliate_url(slug).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                log_click_error(slug, "no affiliate URL for casino");
                return FALLBACK_LOCATION.to_string();
            }
            Err(err) => {
                log_click_error(slug, &err.to_string());
                return FALLBACK_LOCATION.to_string();
            }
        };

        let click = ClickEvent::new(
            slug,
            context.referrer.as_deref(),
            context.country.as_deref(),
            context.user_agent.as_deref(),
            Utc::now(),
        );
        tracing::info!(
            target: "clicks",
            event = "CLICK",
            click_id = %click.click_id,
            casino_slug = %click.casino_slug,
            timestamp = %click.timestamp_rfc3339(),
            referrer = %click.referrer,
            page = %click.page,
            country = %click.country,
            user_agent = %click.user_agent,
            "affiliate click"
        );
        url
    }
}

fn log_click_error(slug: &str, error: &str) {
    tracing::error!(
        target: "clicks",
        event = "CLICK_ERROR",
        casino_slug = %slug,
        error = %error,
        timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "affiliate click could not be resolved"
    );
}
