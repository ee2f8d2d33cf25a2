use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use brain::ProviderError;
use models::{BrandData, GeneratePromptsResponse};

use crate::{
    concepts::{concept_request, parse_prompts},
    error::ApiError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-prompts", post(generate_prompts))
}

fn map_provider_error(err: ProviderError) -> ApiError {
    tracing::error!("Error generating prompts: {}", err);
    if err.is_auth() {
        ApiError::NotConfigured("OpenAI API key not configured".to_string())
    } else {
        ApiError::InternalError("Failed to generate logo concepts".to_string())
    }
}

/// Ask the text model for 3-4 logo concept prompts describing the brand.
pub async fn generate_prompts(
    State(state): State<AppState>,
    payload: Result<Json<BrandData>, JsonRejection>,
) -> Result<Json<GeneratePromptsResponse>, ApiError> {
    let Json(brand) = payload?;

    if !brand.has_basic_info() {
        return Err(ApiError::BadRequest(
            "Brand name and description are required".to_string(),
        ));
    }

    let request = concept_request(&brand, &state.config().text_model);
    tracing::debug!(
        "Requesting logo concepts for '{}' from {}",
        brand.name,
        state.chat().name()
    );

    let reply = state
        .chat()
        .chat(request)
        .await
        .map_err(map_provider_error)?;

    let prompts = parse_prompts(&reply);
    tracing::info!("Generated {} logo concepts for '{}'", prompts.len(), brand.name);

    Ok(Json(GeneratePromptsResponse { prompts }))
}
