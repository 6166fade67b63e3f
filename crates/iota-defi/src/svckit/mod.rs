//! Service Kit - Agent Tools
//!
//! One `agent_core::Tool` per DeFi query. Tools decode loosely typed
//! arguments, call the query service, and wrap the outcome in a
//! `ToolResult` envelope. No error escapes a tool as `Err`.

mod lending_pools;
mod market_data;
mod recommendations;
mod risk_assessment;
mod user_portfolio;

pub use lending_pools::LendingPoolsTool;
pub use market_data::MarketDataTool;
pub use recommendations::RecommendationsTool;
pub use risk_assessment::RiskAssessmentTool;
pub use user_portfolio::UserPortfolioTool;

use std::sync::Arc;

use agent_core::{ToolRegistry, ToolResult};
use serde::Serialize;

use crate::error::{DefiError, Result};
use crate::service::DefiQueries;

/// Register all five DeFi tools against one query service
pub fn register_all(registry: &mut ToolRegistry, service: &Arc<dyn DefiQueries>) {
    registry.register(MarketDataTool::new(service.clone()));
    registry.register(LendingPoolsTool::new(service.clone()));
    registry.register(RiskAssessmentTool::new(service.clone()));
    registry.register(UserPortfolioTool::new(service.clone()));
    registry.register(RecommendationsTool::new(service.clone()));
}

/// Build the envelope for a query outcome.
///
/// `context` names the operation (e.g. "getting market data") and prefixes
/// faults that are not the caller's doing.
fn respond<T: Serialize>(
    tool: &str,
    context: &str,
    outcome: Result<T>,
    summary: impl FnOnce(&T) -> String,
) -> ToolResult {
    let failure = |e: DefiError| {
        let message = match e {
            DefiError::Serialization(_) => format!("error {context}: {e}"),
            other => other.to_string(),
        };
        tracing::warn!(tool, %message, "DeFi query failed");
        ToolResult::failure(tool, message)
    };

    match outcome {
        Ok(value) => match serde_json::to_value(&value) {
            Ok(data) => ToolResult::success(tool, summary(&value)).with_data(data),
            Err(e) => failure(e.into()),
        },
        Err(e) => failure(e),
    }
}
