//! Plain HTTP fetcher for provider-hosted images

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use super::provider_trait::{ImageFetcher, ProviderError};

#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to fetch image: {}", status.as_u16()),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}
