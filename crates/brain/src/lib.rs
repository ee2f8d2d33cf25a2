//! Clients for the hosted text and image generation services Brandmark relies on.

pub mod providers;

pub use providers::{
    ChatConfig, ChatMessage, ChatProvider, ChatRequest, GeneratedImage, HttpImageFetcher,
    ImageFetcher, ImageProvider, ImageQuality, ImageRequest, ImageStyle, MessageRole,
    OpenAIProvider, ProviderError, UnknownImageOption,
};
