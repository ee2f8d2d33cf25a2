//! Provider abstraction layer
//!
//! Routes depend on these traits only, so the OpenAI clients can be swapped
//! for fakes in tests or for a compatible gateway in deployment.

mod fetch;
mod openai;
mod provider_trait;

pub use fetch::HttpImageFetcher;
pub use openai::{DEFAULT_BASE_URL, OpenAIProvider};
pub use provider_trait::{
    ChatConfig, ChatMessage, ChatProvider, ChatRequest, GeneratedImage, ImageFetcher,
    ImageProvider, ImageQuality, ImageRequest, ImageStyle, LOGO_IMAGE_SIZE, MessageRole, ProviderError,
    UnknownImageOption,
};
