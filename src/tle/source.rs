use crate::core::error::TransferError;
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("overhead-gps/", env!("CARGO_PKG_VERSION"));

/// Somewhere a TLE file can be fetched from.
#[async_trait]
pub trait TleSource: Send + Sync {
    fn location(&self) -> &str;
    async fn fetch(&self) -> Result<String, TransferError>;
}

pub struct HttpTleSource {
    url: String,
    timeout: Duration,
}

impl HttpTleSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn request_error(&self, source: reqwest::Error) -> TransferError {
        TransferError::Request {
            url: self.url.clone(),
            source,
        }
    }
}

#[async_trait]
impl TleSource for HttpTleSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, TransferError> {
        tracing::info!(url = %self.url, "Downloading updated TLE data");

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| self.request_error(e))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            return Err(TransferError::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }

        response.text().await.map_err(|e| self.request_error(e))
    }
}
