use std::sync::Arc;

use brain::{ChatProvider, HttpImageFetcher, ImageFetcher, ImageProvider, OpenAIProvider};

use crate::config::ServerConfig;

/// Shared, read-only handles every route works with.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    chat: Arc<dyn ChatProvider>,
    images: Arc<dyn ImageProvider>,
    fetcher: Arc<dyn ImageFetcher>,
}

impl AppState {
    /// Wire the OpenAI clients described by `config`.
    pub fn new(config: ServerConfig) -> Self {
        let openai = Arc::new(
            OpenAIProvider::new(config.openai_api_key.clone())
                .with_base_url(config.openai_base_url.clone()),
        );
        Self::with_providers(
            config,
            openai.clone(),
            openai,
            Arc::new(HttpImageFetcher::new()),
        )
    }

    pub fn with_providers(
        config: ServerConfig,
        chat: Arc<dyn ChatProvider>,
        images: Arc<dyn ImageProvider>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chat,
            images,
            fetcher,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn chat(&self) -> &dyn ChatProvider {
        self.chat.as_ref()
    }

    pub fn images(&self) -> &dyn ImageProvider {
        self.images.as_ref()
    }

    pub fn fetcher(&self) -> &dyn ImageFetcher {
        self.fetcher.as_ref()
    }
}
