// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, status_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/status", get(status_handler))
        .route("/chat", post(chat_handler));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// The full application: API routes, optional static front end, CORS.
pub fn app(state: SharedState, static_dir: Option<&Path>) -> Router {
    let router = match static_dir {
        Some(dir) => create_router().fallback_service(ServeDir::new(dir)),
        None => create_router(),
    };
    router.with_state(state).layer(CorsLayer::very_permissive())
}
