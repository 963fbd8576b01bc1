use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sarthi_backend::QueryBackend;
use sarthi_core::config::{SarthiConfig, PROXY_ROUTE};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
///
/// Holds nothing mutable: every proxy request is independent.
pub struct AppState {
    pub config: SarthiConfig,
    pub backend: Arc<dyn QueryBackend>,
}

impl AppState {
    pub fn new(config: SarthiConfig, backend: Arc<dyn QueryBackend>) -> Self {
        Self { config, backend }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::ui::ui_handler))
        .route("/health", get(crate::http::health::health_handler))
        .route(PROXY_ROUTE, post(crate::http::chat::chat_handler))
        // Queries of any length are forwarded; the backend decides what is too long.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
