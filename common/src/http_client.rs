use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, instrument, warn};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
const BASE_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Exponential backoff before retry number `attempt + 1`, capped at `MAX_BACKOFF`.
fn backoff_for(attempt: u32) -> Duration {
    let millis = 2_u64
        .saturating_pow(attempt)
        .saturating_mul(BASE_BACKOFF_MS);
    Duration::from_millis(millis).min(MAX_BACKOFF)
}

/// HTTP client with retry logic and timeout
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, max_retries: u32) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            max_retries,
            timeout,
        })
    }

    pub fn with_defaults() -> Result<Self, AppError> {
        Self::new(DEFAULT_TIMEOUT_SECS, DEFAULT_MAX_RETRIES)
    }

    /// Fetch JSON from URL with retry and exponential backoff
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &Url) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.fetch_with_timeout(url).await {
                Ok(response) => {
                    info!(url = %url, attempt = attempt.saturating_add(1), "Request successful");
                    return Ok(response);
                }
                Err(e) if !e.is_retryable() => {
                    warn!(url = %url, error = %e, "Request failed, not retrying");
                    return Err(e);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let backoff = backoff_for(attempt);
                        warn!(
                            url = %url,
                            attempt = attempt.saturating_add(1),
                            backoff_ms = backoff.as_millis(),
                            "Request failed, retrying with exponential backoff"
                        );
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        error!(
            url = %url,
            attempts = self.max_retries.saturating_add(1),
            "All retry attempts exhausted"
        );
        Err(last_error.unwrap_or_else(|| AppError::internal("Unknown error after retries")))
    }

    async fn fetch_with_timeout<T>(&self, url: &Url) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::time::timeout(self.timeout, self.client.get(url.clone()).send())
            .await
            .map_err(|_| AppError::timeout(format!("Request to {} timed out", url)))?
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::timeout(format!("Request to {} timed out", url))
                } else {
                    AppError::NetworkError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(
                status.as_u16(),
                format!("HTTP error: {}", status),
            ));
        }

        let text = response.text().await.map_err(AppError::NetworkError)?;
        let json: T = serde_json::from_str(&text)?;

        Ok(json)
    }
}
