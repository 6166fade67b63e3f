//! User Portfolio Tool
//!
//! Wallet balances, lending and borrowing positions, and their USD valuation.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::args;
use crate::portfolio::HealthFactor;
use crate::service::DefiQueries;

pub struct UserPortfolioTool {
    service: Arc<dyn DefiQueries>,
}

impl UserPortfolioTool {
    pub const NAME: &'static str = "get_user_portfolio";

    pub fn new(service: Arc<dyn DefiQueries>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for UserPortfolioTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get a user's DeFi portfolio: wallet balances, lending and borrowing \
                          positions, total values and health factor."
                .into(),
            parameters: vec![
                ParameterSchema::new("user_id", "string", "User ID to get the portfolio for")
                    .required(),
            ],
            category: Some("portfolio".into()),
            has_side_effects: false,
        }
    }

    /// Missing and empty ids are reported by the query itself.
    fn validate(&self, _call: &ToolCall) -> CoreResult<()> {
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let outcome = args::text(call.argument("user_id"), "user_id")
            .and_then(|user_id| self.service.user_portfolio(user_id.unwrap_or_default()));

        Ok(super::respond(Self::NAME, "getting user portfolio", outcome, |report| {
            let m = &report.metrics;
            let health = match m.health_factor {
                HealthFactor::Finite(v) => v.to_string(),
                HealthFactor::Unbounded => "unbounded (no debt)".into(),
            };
            format!(
                "Net position ${} (wallet ${}, lending ${}, borrowing ${}), health factor {}",
                m.net_position_usd,
                m.total_wallet_value_usd,
                m.total_lending_value_usd,
                m.total_borrowing_value_usd,
                health
            )
        }))
    }
}
