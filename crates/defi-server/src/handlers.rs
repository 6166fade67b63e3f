//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use agent_core::{ToolCall, ToolResult, ToolSchema};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tools: usize,
    pub node_url: String,
    pub explorer_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub id: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        tools: state.tools.len(),
        node_url: state.config.node_url.clone(),
        explorer_url: state.config.explorer_url.clone(),
    })
}

/// Schemas for every registered tool
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Advisor system prompt followed by the markdown tool listing
pub async fn tool_prompt(State(state): State<AppState>) -> String {
    format!(
        "{}\n\n{}",
        iota_defi::DEFI_ADVISOR_PROMPT,
        state.tools.generate_prompt_section()
    )
}

/// Run one tool call.
///
/// Query failures are still `200 OK`: the envelope's `success` flag carries
/// the outcome. Only an unknown tool name maps to `404`.
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<ToolCallRequest>,
) -> (StatusCode, Json<ToolResult>) {
    let call = ToolCall {
        name,
        arguments: payload.arguments,
        id: Some(payload.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string())),
    };

    let status = if state.tools.get(&call.name).is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    tracing::info!(tool = %call.name, id = ?call.id, "Tool call");
    let result = state.tools.dispatch(&call).await;
    tracing::debug!(tool = %call.name, success = result.success, "Tool call finished");

    (status, Json(result))
}
