use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route(
            "/api/save-preset",
            post(handler::save_preset).fallback(handler::method_not_allowed),
        )
        .route("/presets/:file", get(handler::read_preset))
        .route("/v1/health", get(handler::health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    if config.permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
