//! API client for the Brandmark server
//!
//! Thin wrapper over the three generation endpoints plus health.

use bytes::Bytes;
use models::{
    BrandData, ErrorResponse, GenerateLogoRequest, GenerateLogoResponse, GeneratePromptsResponse,
    GeneratedLogo, HealthResponse,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Shown when a logo request fails without a usable server message.
pub const LOGO_FAILED_FALLBACK: &str = "Failed to generate logo";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a JSON `{"error": ...}` body.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Could not reach server: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Text stored on the session when a logo request fails.
    pub fn logo_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            _ => LOGO_FAILED_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn generate_prompts(&self, brand: &BrandData) -> Result<Vec<String>, ClientError> {
        tracing::debug!("POST /api/generate-prompts for '{}'", brand.name);
        let resp = self
            .client
            .post(format!("{}/api/generate-prompts", self.base_url))
            .json(brand)
            .send()
            .await?;
        let body: GeneratePromptsResponse = read_json(resp).await?;
        Ok(body.prompts)
    }

    pub async fn generate_logo(
        &self,
        request: &GenerateLogoRequest,
    ) -> Result<GenerateLogoResponse, ClientError> {
        tracing::debug!("POST /api/generate-logo: {}", request.prompt);
        let resp = self
            .client
            .post(format!("{}/api/generate-logo", self.base_url))
            .json(request)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Proxy URL the server streams `image_url` back from.
    pub fn download_url(&self, image_url: &str, filename: &str) -> String {
        format!(
            "{}/api/download-logo?url={}&filename={}",
            self.base_url,
            urlencoding::encode(image_url),
            urlencoding::encode(filename)
        )
    }

    pub async fn download(&self, image_url: &str, filename: &str) -> Result<Bytes, ClientError> {
        let url = self.download_url(image_url, filename);
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.bytes().await?)
    }

    pub async fn download_logo(&self, logo: &GeneratedLogo) -> Result<Bytes, ClientError> {
        self.download(&logo.image_url, &logo.download_filename()).await
    }
}

async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &text))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(check_status(resp).await?.json().await?)
}

/// Uses the server's `error` text when the body carries one.
pub fn error_from_body(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) if !error.is_empty() => ClientError::Server {
            status,
            message: error,
        },
        _ => ClientError::Status(status),
    }
}
