use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;
use crate::table::FeedTable;

/// HTTP client for the remote CSV feed.
///
/// Performs a single GET per load — transient failures surface as
/// [`FeedError`] and the caller decides how to degrade. The feed is a
/// low-churn report, so there is deliberately no retry here.
pub struct FeedClient {
    client: Client,
    feed_url: String,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(feed_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            feed_url: feed_url.to_owned(),
        })
    }

    #[must_use]
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetches and parses the CSV feed.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] — network or TLS failure.
    /// - [`FeedError::UnexpectedStatus`] — any non-2xx response.
    /// - [`FeedError::Malformed`] — response body is not valid CSV.
    /// - [`FeedError::MissingHeader`] — body parsed but has no header row.
    pub async fn fetch(&self) -> Result<FeedTable, FeedError> {
        let response = self
            .client
            .get(&self.feed_url)
            .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.feed_url.clone(),
            });
        }

        let body = response.text().await?;
        let table = FeedTable::parse(&body).map_err(|e| FeedError::Malformed {
            url: self.feed_url.clone(),
            source: e,
        })?;

        if table.headers().is_empty() {
            return Err(FeedError::MissingHeader {
                url: self.feed_url.clone(),
            });
        }

        tracing::debug!(
            url = %self.feed_url,
            columns = table.headers().len(),
            rows = table.len(),
            "feed fetched"
        );

        Ok(table)
    }
}
