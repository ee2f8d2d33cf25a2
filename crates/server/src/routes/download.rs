use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use models::{DEFAULT_DOWNLOAD_FILENAME, DownloadLogoQuery};

use crate::{error::ApiError, state::AppState};

/// Blob storage host the image provider serves generated images from. The
/// proxy refuses anything else so it cannot be used as an open relay.
pub const ALLOWED_IMAGE_HOST: &str = "oaidalleapiprodscus.blob.core.windows.net";

pub fn router() -> Router<AppState> {
    Router::new().route("/download-logo", get(download_logo))
}

pub fn is_allowed_image_url(url: &str) -> bool {
    url.contains(ALLOWED_IMAGE_HOST)
}

/// Names that can sit inside a quoted `Content-Disposition` parameter as-is.
pub fn is_safe_filename(name: &str) -> bool {
    !name
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_control())
}

/// Re-serve a provider-hosted image with headers that make browsers save it.
pub async fn download_logo(
    State(state): State<AppState>,
    Query(query): Query<DownloadLogoQuery>,
) -> Result<Response, ApiError> {
    let url = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Image URL is required".to_string()))?;

    if !is_allowed_image_url(&url) {
        tracing::warn!("Refusing to proxy image from untrusted URL: {}", url);
        return Err(ApiError::BadRequest("Invalid image URL".to_string()));
    }

    let filename = query
        .filename
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_FILENAME.to_string());
    if !is_safe_filename(&filename) {
        return Err(ApiError::BadRequest("Invalid filename".to_string()));
    }
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|_| ApiError::BadRequest("Invalid filename".to_string()))?;

    let bytes = state.fetcher().fetch(&url).await.map_err(|e| {
        tracing::error!("Error downloading logo: {}", e);
        ApiError::InternalError("Failed to download logo".to_string())
    })?;

    tracing::debug!("Proxying {} bytes as {}", bytes.len(), filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(bytes.len())),
        ],
        bytes,
    )
        .into_response())
}
