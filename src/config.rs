//! Site configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing goes through a key lookup
//! function so tests can feed a map instead of mutating the process
//! environment.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

/// Site-wide default presentation for casino and bonus lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteFormat {
    /// Card grid.
    #[default]
    Default,
    /// Dense comparison table.
    Comparison,
}

impl SiteFormat {
    /// Parses `default` or `comparison` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "comparison" => Some(Self::Comparison),
            _ => None,
        }
    }

    /// Query-string value for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Comparison => "comparison",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Connection settings for the content store.
#[derive(Debug, Clone)]
pub struct ContentStoreConfig {
    /// Project identifier.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// API version date, e.g. `2024-01-01`.
    pub api_version: String,
    /// Query the edge cache instead of the live API.
    pub use_cdn: bool,
    /// Read token for private datasets.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Error raised when a configuration value is present but malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a socket address.
    #[error("LISTEN_ADDR is not a valid socket address: {0}")]
    ListenAddr(#[from] AddrParseError),

    /// `SITE_FORMAT` is neither `default` nor `comparison`.
    #[error("SITE_FORMAT must be `default` or `comparison`, got `{0}`")]
    SiteFormat(String),
}

/// Top-level site configuration.
///
/// Loaded once at startup via [`SiteConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Public base URL without a trailing slash.
    pub site_url: String,

    /// Site name used in titles and structured data.
    pub site_name: String,

    /// Default list presentation.
    pub site_format: SiteFormat,

    /// Shared secret for the revalidation webhook. `None` rejects every call.
    pub revalidation_secret: Option<String>,

    /// Content store connection.
    pub content: ContentStoreConfig,

    /// Requests admitted per client per window on `/go/*`.
    pub rate_limit_max_requests: u32,

    /// Rate-limit window length.
    pub rate_limit_window: Duration,

    /// Interval between sweeps of expired rate-limit entries (zero disables).
    pub rate_limit_sweep_interval: Duration,

    /// Lifetime of a cached rendered page.
    pub page_cache_ttl: Duration,

    /// Maximum number of cached pages.
    pub page_cache_capacity: u64,

    /// Log output format.
    pub log_format: LogFormat,
}

impl SiteConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults when a variable is missing or, for numeric and
    /// boolean settings, unparseable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LISTEN_ADDR` or `SITE_FORMAT` is set to
    /// an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let string = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = string("LISTEN_ADDR", "0.0.0.0:3000").parse()?;

        let site_url = string("SITE_URL", "https://example.com")
            .trim_end_matches('/')
            .to_string();
        let site_name = string("SITE_NAME", "Casino Guide");
        let site_format = match get("SITE_FORMAT") {
            Some(raw) => SiteFormat::parse(&raw).ok_or(ConfigError::SiteFormat(raw))?,
            None => SiteFormat::Default,
        };

        let content = ContentStoreConfig {
            project_id: string("SANITY_PROJECT_ID", "your-project-id"),
            dataset: string("SANITY_DATASET", "production"),
            api_version: string("SANITY_API_VERSION", "2024-01-01"),
            use_cdn: parse_bool(get("SANITY_USE_CDN"), true),
            token: get("SANITY_API_TOKEN"),
            timeout: Duration::from_secs(parse(get("CONTENT_TIMEOUT_SECS"), 10)),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("json" | "JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            site_url,
            site_name,
            site_format,
            revalidation_secret: get("REVALIDATION_SECRET"),
            content,
            rate_limit_max_requests: parse(get("RATE_LIMIT_MAX_REQUESTS"), 60),
            rate_limit_window: Duration::from_millis(parse(get("RATE_LIMIT_WINDOW_MS"), 60_000)),
            rate_limit_sweep_interval: Duration::from_secs(parse(
                get("RATE_LIMIT_SWEEP_SECS"),
                300,
            )),
            page_cache_ttl: Duration::from_secs(parse(get("PAGE_CACHE_TTL_SECS"), 3600)),
            page_cache_capacity: parse(get("PAGE_CACHE_CAPACITY"), 10_000),
            log_format,
        })
    }
}

/// Parses a value as `T`, returning `default` on missing or invalid input.
fn parse<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(config) = load(&[]) else {
            panic!("empty environment should load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.site_format, SiteFormat::Default);
        assert!(config.revalidation_secret.is_none());
        assert!(config.content.use_cdn);
        assert_eq!(config.content.dataset, "production");
        assert_eq!(config.rate_limit_max_requests, 60);
        assert_eq!(config.rate_limit_window, Duration::from_millis(60_000));
        assert_eq!(config.page_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = load(&[
            ("SITE_URL", "https://casinos.test/"),
            ("SITE_FORMAT", "Comparison"),
            ("REVALIDATION_SECRET", "s3cret"),
            ("SANITY_USE_CDN", "false"),
            ("RATE_LIMIT_MAX_REQUESTS", "5"),
            ("LOG_FORMAT", "json"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(config.site_url, "https://casinos.test");
        assert_eq!(config.site_format, SiteFormat::Comparison);
        assert_eq!(config.revalidation_secret.as_deref(), Some("s3cret"));
        assert!(!config.content.use_cdn);
        assert_eq!(config.rate_limit_max_requests, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn empty_secret_counts_as_unset() {
        let Ok(config) = load(&[("REVALIDATION_SECRET", "  ")]) else {
            panic!("config should load");
        };
        assert!(config.revalidation_secret.is_none());
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let Ok(config) = load(&[("RATE_LIMIT_WINDOW_MS", "soon")]) else {
            panic!("config should load");
        };
        assert_eq!(config.rate_limit_window, Duration::from_millis(60_000));
    }

    #[test]
    fn invalid_listen_addr_is_an_error() {
        assert!(matches!(
            load(&[("LISTEN_ADDR", "nowhere")]),
            Err(ConfigError::ListenAddr(_))
        ));
        assert!(matches!(
            load(&[("SITE_FORMAT", "tiles")]),
            Err(ConfigError::SiteFormat(_))
        ));
    }
}
