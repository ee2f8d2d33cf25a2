use anyhow::Error as AnyhowError;
use server::{AppState, ServerConfig, config::ConfigError, routes};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Debug, Error)]
pub enum BrandmarkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

#[tokio::main]
async fn main() -> Result<(), BrandmarkError> {
    // Load environment variables from `.env` if present so local development picks up API keys
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},brain={level},models={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string)
        .map_err(|e| AnyhowError::msg(format!("Failed to create tracing filter: {}", e)))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Using text model {} and image model {} ({}, {})",
        config.text_model,
        config.image_model,
        config.image_quality.as_str(),
        config.image_style.as_str()
    );
    let bind_addr = format!("{}:{}", config.host, config.port);
    let host = config.host.clone();

    let state = AppState::new(config);
    if !state.chat().is_configured() {
        tracing::warn!(
            "OPENAI_API_KEY not set - concept and logo generation will answer with configuration errors"
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_port = listener.local_addr()?.port();
    tracing::info!("Server running on http://{}:{}", host, actual_port);

    let app_router = routes::router(state);
    axum::serve(listener, app_router).await?;
    Ok(())
}
