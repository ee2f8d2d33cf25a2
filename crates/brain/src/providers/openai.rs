//! OpenAI provider implementation (chat completions and image generations)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider_trait::{
    ChatMessage, ChatProvider, ChatRequest, GeneratedImage, ImageProvider, ImageRequest,
    LOGO_IMAGE_SIZE, MessageRole, ProviderError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_some() {
            tracing::info!("OpenAI provider initialized with API key");
        } else {
            tracing::warn!("OpenAI provider created without API key - generation requests will fail");
        }

        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a compatible proxy or gateway instead of api.openai.com
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth_header(&self) -> Result<String, ProviderError> {
        self.api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k))
            .ok_or_else(|| ProviderError::AuthError("No OpenAI API key configured".to_string()))
    }

    fn message_to_openai(msg: &ChatMessage) -> serde_json::Value {
        let role = match msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        serde_json::json!({ "role": role, "content": msg.content })
    }

    fn chat_payload(request: &ChatRequest) -> serde_json::Value {
        let messages: Vec<serde_json::Value> =
            request.messages.iter().map(Self::message_to_openai).collect();

        serde_json::json!({
            "model": request.config.model,
            "temperature": request.config.temperature,
            "max_tokens": request.config.max_tokens,
            "messages": messages
        })
    }

    /// Pull the assistant text out of a chat completion body.
    fn parse_chat_response(json: &serde_json::Value) -> Result<String, ProviderError> {
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(ProviderError::EmptyResponse(
                "No response from OpenAI".to_string(),
            ));
        }
        Ok(content)
    }

    /// Classify a non-success response body.
    fn parse_error(status: u16, body: &str) -> ProviderError {
        let lower = body.to_lowercase();
        if lower.contains("content_policy_violation") {
            return ProviderError::ContentPolicy(body.to_string());
        }
        if status == 429 || lower.contains("rate_limit") {
            return ProviderError::RateLimited {
                retry_after_ms: None,
            };
        }
        if status == 401 {
            return ProviderError::AuthError(format!("Invalid API key: {}", body));
        }
        ProviderError::ApiError {
            status,
            message: body.to_string(),
        }
    }

    async fn post_json(
        &self,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<reqwest::Response, ProviderError> {
        let auth_header = self.auth_header()?;

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &body));
        }
        Ok(response)
    }
}

#[derive(Debug, Serialize)]
struct OpenAIImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
    quality: &'static str,
    style: &'static str,
}

impl<'a> From<&'a ImageRequest> for OpenAIImageRequest<'a> {
    fn from(request: &'a ImageRequest) -> Self {
        Self {
            model: &request.model,
            prompt: &request.prompt,
            n: request.count,
            size: LOGO_IMAGE_SIZE,
            quality: request.quality.as_str(),
            style: request.style.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIImageResponse {
    #[serde(default)]
    data: Vec<OpenAIImageData>,
}

#[derive(Debug, Deserialize)]
struct OpenAIImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

impl From<OpenAIImageResponse> for GeneratedImage {
    fn from(response: OpenAIImageResponse) -> Self {
        response
            .data
            .into_iter()
            .next()
            .map(|d| GeneratedImage {
                url: d.url,
                revised_prompt: d.revised_prompt,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let payload = Self::chat_payload(&request);

        tracing::debug!(
            "[OpenAI] Sending chat request: model={}, messages={}",
            request.config.model,
            request.messages.len()
        );

        let response = self.post_json("/chat/completions", &payload).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::parse_chat_response(&json)
    }
}

#[async_trait]
impl ImageProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI Images"
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, ProviderError> {
        let body = OpenAIImageRequest::from(&request);

        tracing::debug!(
            "[OpenAI] Sending image request: model={}, size={}, quality={}, style={}",
            body.model,
            body.size,
            body.quality,
            body.style
        );

        let response = self.post_json("/images/generations", &body).await?;
        let parsed: OpenAIImageResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed.into())
    }
}
