use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use brain::{ImageRequest, ProviderError};
use models::{GenerateLogoRequest, GenerateLogoResponse};

use crate::{error::ApiError, state::AppState};

pub const CONTENT_POLICY_MESSAGE: &str =
    "The prompt was rejected by OpenAI's content policy. Please try a different concept.";
pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait a moment before generating another logo.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate logo. Please try again.";

const DEFAULT_BRAND_NAME: &str = "Brand";

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-logo", post(generate_logo))
}

/// Wraps a concept in the styling constraints every logo request carries.
pub fn styled_prompt(concept: &str) -> String {
    format!(
        "Professional logo design: {}. Clean, simple, scalable vector-style design suitable for business use. White or transparent background. High contrast. Minimalist and modern aesthetic.",
        concept
    )
}

fn map_provider_error(err: ProviderError) -> ApiError {
    tracing::error!("Error generating logo: {}", err);
    match err {
        ProviderError::ContentPolicy(_) => {
            ApiError::ContentPolicy(CONTENT_POLICY_MESSAGE.to_string())
        }
        ProviderError::RateLimited { .. } => {
            ApiError::TooManyRequests(RATE_LIMIT_MESSAGE.to_string())
        }
        other => {
            // Gateways in front of the provider sometimes only surface the error code in text.
            let text = other.to_string();
            if text.contains("content_policy_violation") {
                ApiError::ContentPolicy(CONTENT_POLICY_MESSAGE.to_string())
            } else if text.contains("rate_limit") {
                ApiError::TooManyRequests(RATE_LIMIT_MESSAGE.to_string())
            } else {
                ApiError::InternalError(GENERATION_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// Turn one concept prompt into a single 1024x1024 logo image.
pub async fn generate_logo(
    State(state): State<AppState>,
    payload: Result<Json<GenerateLogoRequest>, JsonRejection>,
) -> Result<Json<GenerateLogoResponse>, ApiError> {
    let Json(request) = payload?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    let enhanced = styled_prompt(&request.prompt);
    tracing::info!("Generating logo with prompt: {}", enhanced);

    let image = state
        .images()
        .generate_image(
            ImageRequest::single(state.config().image_model.clone(), enhanced.clone())
                .with_quality(state.config().image_quality)
                .with_style(state.config().image_style),
        )
        .await
        .map_err(map_provider_error)?;

    if let Some(revised) = &image.revised_prompt {
        tracing::debug!("Provider revised logo prompt to: {}", revised);
    }

    let image_url = image.url.filter(|url| !url.is_empty()).ok_or_else(|| {
        tracing::error!(
            "Error generating logo: no image URL returned from {}",
            state.images().name()
        );
        ApiError::InternalError(GENERATION_FAILED_MESSAGE.to_string())
    })?;

    let brand_name = request
        .brand_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string());

    Ok(Json(GenerateLogoResponse {
        image_url,
        prompt: enhanced,
        original_prompt: request.prompt,
        brand_name,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use brain::{GeneratedImage, ImageQuality, ImageStyle};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::{routes::app, test_utils::*};

    const IMAGE_URL: &str =
        "https://oaidalleapiprodscus.blob.core.windows.net/private/img-abc.png?sig=1";

    async fn post_logo(
        images: std::sync::Arc<FakeImages>,
        body: serde_json::Value,
    ) -> axum::response::Response {
        let (chat, _, fetcher) = idle_fakes();
        app(test_state(chat, images, fetcher))
            .oneshot(json_post("/api/generate-logo", body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected() {
        for prompt in ["", "   ", "\n\t"] {
            let images = FakeImages::returning_url(IMAGE_URL);
            let response = post_logo(images.clone(), json!({ "prompt": prompt })).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Prompt is required" })
            );
            assert_eq!(images.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_generates_logo_and_echoes_original_prompt() {
        let images = FakeImages::returning_url(IMAGE_URL);
        let prompt = "  A rocket mark, ascending  ";
        let response = post_logo(
            images.clone(),
            json!({ "prompt": prompt, "brandName": "Acme" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["imageUrl"], IMAGE_URL);
        assert_eq!(json["originalPrompt"], prompt);
        assert_eq!(json["prompt"], styled_prompt(prompt));
        assert_eq!(json["brandName"], "Acme");

        let sent = images.last_request().unwrap();
        assert_eq!(sent.prompt, styled_prompt(prompt));
        assert_eq!(sent.model, "dall-e-3");
        assert_eq!(sent.count, 1);
        assert_eq!(sent.quality, ImageQuality::Standard);
        assert_eq!(sent.style, ImageStyle::Vivid);
    }

    #[tokio::test]
    async fn test_configured_quality_and_style_are_sent() {
        let (chat, _, fetcher) = idle_fakes();
        let images = FakeImages::returning_url(IMAGE_URL);
        let config = crate::ServerConfig {
            image_quality: ImageQuality::Hd,
            image_style: ImageStyle::Natural,
            ..Default::default()
        };
        let state = AppState::with_providers(config, chat, images.clone(), fetcher);

        let response = app(state)
            .oneshot(json_post("/api/generate-logo", json!({ "prompt": "A rocket mark" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let sent = images.last_request().unwrap();
        assert_eq!(sent.quality, ImageQuality::Hd);
        assert_eq!(sent.style, ImageStyle::Natural);
    }

    #[tokio::test]
    async fn test_brand_name_defaults() {
        let images = FakeImages::returning_url(IMAGE_URL);
        let response = post_logo(images, json!({ "prompt": "A rocket mark" })).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["brandName"], "Brand");
    }

    #[tokio::test]
    async fn test_missing_image_url_is_failure() {
        let images = FakeImages::new(|_| Ok(GeneratedImage::default()));
        let response = post_logo(images, json!({ "prompt": "A rocket mark" })).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().starts_with("Failed to generate logo"));
    }

    #[tokio::test]
    async fn test_content_policy_maps_to_bad_request() {
        let images = FakeImages::new(|_| {
            Err(ProviderError::ContentPolicy("content_policy_violation".into()))
        });
        let response = post_logo(images, json!({ "prompt": "Something rejected" })).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": CONTENT_POLICY_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let images = FakeImages::new(|_| {
            Err(ProviderError::RateLimited {
                retry_after_ms: None,
            })
        });
        let response = post_logo(images, json!({ "prompt": "A rocket mark" })).await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(response).await, json!({ "error": RATE_LIMIT_MESSAGE }));
    }

    #[tokio::test]
    async fn test_error_text_is_still_classified() {
        let images = FakeImages::new(|_| {
            Err(ProviderError::ApiError {
                status: 502,
                message: "upstream said rate_limit_exceeded".into(),
            })
        });
        let response = post_logo(images, json!({ "prompt": "A rocket mark" })).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let images = FakeImages::new(|_| {
            Err(ProviderError::RequestFailed("connection reset".into()))
        });
        let response = post_logo(images, json!({ "prompt": "A rocket mark" })).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": GENERATION_FAILED_MESSAGE })
        );
    }
}
