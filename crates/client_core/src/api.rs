use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::FetchError,
    protocol::{ExhibitorOrdersResponse, SystemStatus},
};
use url::Url;

/// Remote order-tracking backend.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn fetch_orders(&self, exhibitor_name: &str)
        -> Result<ExhibitorOrdersResponse, FetchError>;
    async fn fetch_system_status(&self) -> Result<SystemStatus, FetchError>;
}

pub struct HttpOrderApi {
    http: Client,
    api_base: String,
}

impl HttpOrderApi {
    pub fn new(api_base: impl Into<String>, request_timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(http, api_base))
    }

    pub fn with_client(http: Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// Builds `{api_base}/{segments...}`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.api_base)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn fetch_orders(
        &self,
        exhibitor_name: &str,
    ) -> Result<ExhibitorOrdersResponse, FetchError> {
        let url = self.endpoint(&["orders", "exhibitor", exhibitor_name])?;
        self.get_json(url).await
    }

    async fn fetch_system_status(&self) -> Result<SystemStatus, FetchError> {
        let url = self.endpoint(&["abacus-status"])?;
        self.get_json(url).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
