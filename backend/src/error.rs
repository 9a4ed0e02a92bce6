use thiserror::Error;

/// Failure classification for one upstream attempt. The rotation executor
/// advances past the retryable variants and ends the request on anything else.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no API credentials configured")]
    NoCredentials,

    /// Upstream reported the key's request budget as spent (HTTP 403).
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Upstream throttled the key (HTTP 429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("all {0} credentials exhausted")]
    CredentialsExhausted(usize),

    /// Anything else: malformed query, invalid key, transport failure. Trying
    /// another credential would not help.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl SearchError {
    /// True when the next credential in line may still succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::QuotaExceeded(_) | SearchError::RateLimited(_)
        )
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Upstream(err.to_string())
    }
}
