use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use crate::models::{
    QueryResponse, RepositoryQuery, SaveRequest, SaveResponse, SearchRequest, SearchResponse,
    SearchResultItem,
};
use crate::retry::{with_retry, RetryConfig};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ApiError {
    /// True when the underlying failure was the per-attempt timeout firing.
    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Timeout => true,
            ApiError::NetworkError(err) => err.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the search backend's three endpoints.
///
/// Only the search call goes through the retry wrapper; save and repository
/// queries are single-shot, matching how the product behaves.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl BackendClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// For a backend running somewhere other than the default local address
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        // Marks requests as scripted, the way the browser client did.
        headers.insert(
            "X-Requested-With",
            reqwest::header::HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("searchdeck/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        }
    }

    /// Create client with custom retry configuration
    pub fn with_retry_config(base_url: String, retry_config: RetryConfig) -> Self {
        let mut client = Self::with_base_url(base_url);
        client.retry_config = retry_config;
        client
    }

    /// Run a keyword search, retrying on transport failures and timeouts.
    ///
    /// A non-2xx response never retries: the closure resolves it as `Ok` and
    /// we reject it only after the retry loop is done. Body-level failure
    /// (`status != "success"`) is not an error at this layer at all; the
    /// caller decides what to do with the message.
    pub async fn search(&self, keyword: &str) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        let body = SearchRequest { keyword };

        let response = with_retry(&self.retry_config, || async {
            let request = self.client.post(&url).json(&body);
            match timeout(self.retry_config.attempt_timeout, request.send()).await {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(err)) => Err(ApiError::NetworkError(err)),
                Err(_) => Err(ApiError::Timeout),
            }
        })
        .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        debug!("Search for {:?} completed", keyword);
        let parsed: SearchResponse = response.json().await?;
        Ok(parsed)
    }

    /// Persist a selection of search results tagged with their keyword.
    pub async fn save_data(
        &self,
        results: &[SearchResultItem],
        keyword: &str,
    ) -> Result<SaveResponse> {
        let url = format!("{}/save_data", self.base_url);
        let body = SaveRequest { results, keyword };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let parsed: SaveResponse = response.json().await?;
        Ok(parsed)
    }

    /// Fetch saved records matching the (all-optional) filter.
    pub async fn get_repository_data(&self, query: &RepositoryQuery) -> Result<QueryResponse> {
        let url = format!("{}/get_repository_data", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(parsed)
    }
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::with_base_url("http://example.com/".into());
        assert_eq!(client.base_url, "http://example.com");
    }

    #[test]
    fn test_timeout_detection() {
        assert!(ApiError::Timeout.is_timeout());
        assert!(!ApiError::RequestFailed("Status 500".into()).is_timeout());
    }
}
