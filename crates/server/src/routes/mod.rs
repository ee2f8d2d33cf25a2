use axum::{
    Router, middleware,
    routing::{IntoMakeService, get},
};
use tower_http::cors::CorsLayer;

use crate::{middleware::request_id_middleware, state::AppState};

pub mod download;
pub mod health;
pub mod logos;
pub mod prompts;

/// Every route under `/api`, before state is attached.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(prompts::router())
        .merge(logos::router())
        .merge(download::router())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn router(state: AppState) -> IntoMakeService<Router> {
    app(state).into_make_service()
}
