//! HTTP client for a Sanity-compatible query API.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::query::Query;
use super::store::{ContentError, ContentStore};
use crate::config::ContentStoreConfig;

/// Longest GET URL sent before switching to a POST body.
const MAX_GET_URL_LEN: usize = 8_000;

/// Longest error body kept in [`ContentError::Status`].
const MAX_ERROR_BODY_LEN: usize = 512;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    params: &'a BTreeMap<String, Value>,
}

/// [`ContentStore`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl SanityClient {
    /// Builds a client for the configured project and dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Url`] if the project id or dataset produce an
    /// invalid URL, or [`ContentError::Transport`] if the HTTP client cannot
    /// be built.
    pub fn new(config: &ContentStoreConfig) -> Result<Self, ContentError> {
        let host = if config.use_cdn && config.token.is_none() {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        let version = config.api_version.trim_start_matches('v');
        let endpoint = Url::parse(&format!(
            "https://{project}.{host}/v{version}/data/query/{dataset}",
            project = config.project_id,
            dataset = config.dataset,
        ))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            token: config.token.clone(),
        })
    }

    /// Query endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GET URL for `query`: the text in `query`, each parameter as a
    /// JSON-encoded `$name` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Decode`] if a parameter cannot be encoded.
    pub fn query_url(&self, query: &Query) -> Result<Url, ContentError> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query.groq());
            for (name, value) in query.params() {
                pairs.append_pair(&format!("${name}"), &serde_json::to_string(value)?);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        let url = self.query_url(query)?;
        let mut request = if url.as_str().len() <= MAX_GET_URL_LEN {
            self.http.get(url)
        } else {
            self.http.post(self.endpoint.clone()).json(&QueryBody {
                query: query.groq(),
                params: query.params(),
            })
        };
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY_LEN {
                let cut = (0..=MAX_ERROR_BODY_LEN)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(use_cdn: bool, token: Option<&str>) -> ContentStoreConfig {
        ContentStoreConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn,
            token: token.map(str::to_string),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn cdn_host_without_token() {
        let Ok(client) = SanityClient::new(&config(true, None)) else {
            panic!("client should build");
        };
        assert_eq!(
            client.endpoint().as_str(),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn live_host_with_token() {
        let Ok(client) = SanityClient::new(&config(true, Some("tok"))) else {
            panic!("client should build");
        };
        assert_eq!(client.endpoint().host_str(), Some("abc123.api.sanity.io"));
    }

    #[test]
    fn params_are_json_encoded() {
        let Ok(client) = SanityClient::new(&config(false, None)) else {
            panic!("client should build");
        };
        let query = Query::new("*[slug.current == $slug][0]").param("slug", "lucky");
        let Ok(url) = client.query_url(&query) else {
            panic!("url should build");
        };
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "*[slug.current == $slug][0]".to_string()),
                ("$slug".to_string(), "\"lucky\"".to_string()),
            ]
        );
    }
}
