//! JSON-over-HTTP fetcher with forwarding-prefix support and bounded retry.

mod proxy;

use std::time::Duration;

use reqwest::{Client, Url};
use showcase_core::AppConfig;

use crate::error::FetchError;
use crate::retry::{retry_with_backoff, RetryPolicy};

pub use proxy::proxied_url;

/// Fetches JSON documents over HTTP GET.
///
/// Every request bypasses caches and, when a forwarding prefix is configured,
/// is routed through it. HTTP 429 responses are retried according to the
/// fetcher's rate-limit policy; everything else fails fast unless the caller
/// asks for [`JsonFetcher::fetch_json_with_retry`].
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
    proxy_prefix: Option<String>,
    rate_limit: RetryPolicy,
}

impl JsonFetcher {
    /// Creates a fetcher with the given timeout, `User-Agent`, forwarding
    /// prefix, and HTTP 429 retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        proxy_prefix: Option<String>,
        rate_limit: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            proxy_prefix: proxy_prefix.filter(|p| !p.trim().is_empty()),
            rate_limit,
        })
    }

    /// Builds a fetcher from the `SHOWCASE_*` settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.proxy_prefix.clone(),
            RetryPolicy::rate_limited(config.rate_limit_max_retries, config.rate_limit_delay_ms),
        )
    }

    /// The URL actually requested for `target`, after applying the prefix.
    #[must_use]
    pub fn request_url(&self, target: &str) -> String {
        match &self.proxy_prefix {
            Some(prefix) => proxied_url(prefix, target),
            None => target.to_owned(),
        }
    }

    /// GETs `url` and parses the body as JSON, retrying HTTP 429 responses.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] when no response was received.
    /// - [`FetchError::Http`] for a non-2xx status (429 only after the
    ///   rate-limit policy is exhausted).
    /// - [`FetchError::Parse`] when the body is not valid JSON.
    /// - [`FetchError::InvalidUrl`] when the (prefixed) URL does not parse.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        retry_with_backoff(&self.rate_limit, FetchError::is_rate_limited, || {
            self.fetch_once(url)
        })
        .await
    }

    /// GETs `url`, retrying any failure according to `policy`.
    ///
    /// Each attempt is a single request; the rate-limit policy is not layered
    /// on top, so `policy.max_attempts` is the exact request ceiling.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt once `policy` is exhausted.
    pub async fn fetch_json_with_retry(
        &self,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<serde_json::Value, FetchError> {
        retry_with_backoff(policy, |_| true, || self.fetch_once(url)).await
    }

    async fn fetch_once(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let request_url = self.request_url(url);
        let parsed = Url::parse(&request_url).map_err(|e| FetchError::InvalidUrl {
            url: request_url.clone(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_owned(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            context: url.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
