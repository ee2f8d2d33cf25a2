use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Filename used by the download proxy when the caller does not pick one.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "logo.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerateLogoRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub brand_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerateLogoResponse {
    pub image_url: String,
    /// The styled prompt actually sent to the image provider.
    pub prompt: String,
    /// The concept text exactly as the client sent it.
    pub original_prompt: String,
    pub brand_name: String,
}

/// A logo held in the client session, tagged with a locally generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneratedLogo {
    pub image_url: String,
    pub prompt: String,
    pub original_prompt: String,
    pub brand_name: String,
    pub id: String,
}

impl From<GenerateLogoResponse> for GeneratedLogo {
    fn from(response: GenerateLogoResponse) -> Self {
        Self {
            image_url: response.image_url,
            prompt: response.prompt,
            original_prompt: response.original_prompt,
            brand_name: response.brand_name,
            id: Uuid::new_v4().simple().to_string(),
        }
    }
}

impl GeneratedLogo {
    /// `acme-rockets-logo-<id>.png`
    pub fn download_filename(&self) -> String {
        download_filename(&self.brand_name, &self.id)
    }
}

/// Lower-cases the brand name and collapses whitespace runs into dashes.
pub fn download_filename(brand_name: &str, logo_id: &str) -> String {
    let mut slug = String::with_capacity(brand_name.len());
    let mut in_whitespace = false;
    for c in brand_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    format!("{}-logo-{}.png", slug, logo_id)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DownloadLogoQuery {
    #[ts(optional)]
    pub url: Option<String>,
    #[ts(optional)]
    pub filename: Option<String>,
}
