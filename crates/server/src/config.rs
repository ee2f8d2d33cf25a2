//! Server configuration, read once from the process environment at startup.

use brain::{ImageQuality, ImageStyle, UnknownImageOption};
use strip_ansi_escapes::strip;
use thiserror::Error;

pub const DEFAULT_TEXT_MODEL: &str = "gpt-4";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port value '{0}'")]
    InvalidPort(String),
    #[error(transparent)]
    InvalidImageOption(#[from] UnknownImageOption),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    /// 0 lets the OS pick a free port.
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_quality: ImageQuality,
    pub image_style: ImageStyle,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            openai_api_key: None,
            openai_base_url: brain::providers::DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_quality: ImageQuality::Standard,
            image_style: ImageStyle::Vivid,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("BACKEND_PORT").or_else(|| non_empty("PORT")) {
            Some(raw) => parse_port(&raw)?,
            None => {
                tracing::info!("No PORT environment variable set, using port 0 for auto-assignment");
                defaults.port
            }
        };

        let image_quality = match non_empty("BRANDMARK_IMAGE_QUALITY") {
            Some(raw) => raw.parse()?,
            None => defaults.image_quality,
        };
        let image_style = match non_empty("BRANDMARK_IMAGE_STYLE") {
            Some(raw) => raw.parse()?,
            None => defaults.image_style,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            text_model: non_empty("BRANDMARK_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: non_empty("BRANDMARK_IMAGE_MODEL").unwrap_or(defaults.image_model),
            image_quality,
            image_style,
        })
    }
}

/// Ports sometimes arrive wrapped in terminal colour codes from dev tooling.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let cleaned = String::from_utf8_lossy(&strip(raw.as_bytes())).to_string();
    cleaned
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(cleaned.trim().to_string()))
}
