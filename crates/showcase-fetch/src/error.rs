use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record: {reason}")]
    Validation { reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// `true` for HTTP 429 responses.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Http { status: 429, .. })
    }
}
