//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{call_tool, health_check, list_tools, tool_prompt};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/prompt", get(tool_prompt))
        .route("/api/tools/{name}", post(call_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
