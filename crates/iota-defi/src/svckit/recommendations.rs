//! Investment Recommendations Tool
//!
//! Personalized allocation, strategies and opportunities for an investor
//! profile, plus portfolio-specific advice when the user is known.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::args;
use crate::error::{DefiError, Result};
use crate::model::{InvestmentHorizon, RiskTolerance};
use crate::service::DefiQueries;
use crate::strategy::Recommendations;

pub struct RecommendationsTool {
    service: Arc<dyn DefiQueries>,
}

impl RecommendationsTool {
    pub const NAME: &'static str = "get_ai_investment_recommendations";

    pub fn new(service: Arc<dyn DefiQueries>) -> Self {
        Self { service }
    }

    fn recommend(&self, call: &ToolCall) -> Result<Recommendations> {
        let risk_tolerance: RiskTolerance =
            required_enum(call, "risk_tolerance", RiskTolerance::NAMES)?;
        let investment_horizon: InvestmentHorizon =
            required_enum(call, "investment_horizon", InvestmentHorizon::NAMES)?;
        let user_id = args::text(call.argument("user_id"), "user_id")?;

        self.service
            .investment_recommendations(risk_tolerance, investment_horizon, user_id)
    }
}

/// A missing value fails the same way as an unknown one
fn required_enum<T>(
    call: &ToolCall,
    parameter: &'static str,
    allowed: &'static [&'static str],
) -> Result<T>
where
    T: std::str::FromStr<Err = DefiError>,
{
    call.str_argument(parameter)
        .ok_or(DefiError::InvalidEnum { parameter, allowed })?
        .parse()
}

#[async_trait]
impl Tool for RecommendationsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get investment recommendations for a risk tolerance and horizon: asset \
                          allocation, strategies and specific opportunities. With a known \
                          user_id, also rebalancing and risk-management advice."
                .into(),
            parameters: vec![
                ParameterSchema::new("risk_tolerance", "string", "Investor risk tolerance")
                    .required()
                    .with_enum(RiskTolerance::NAMES.iter().copied()),
                ParameterSchema::new("investment_horizon", "string", "Investment time horizon")
                    .required()
                    .with_enum(InvestmentHorizon::NAMES.iter().copied()),
                ParameterSchema::new(
                    "user_id",
                    "string",
                    "User ID for portfolio-specific advice (optional)",
                ),
            ],
            category: Some("advice".into()),
            has_side_effects: false,
        }
    }

    /// Enum checks happen in `recommend` so missing and invalid values
    /// share one message.
    fn validate(&self, _call: &ToolCall) -> CoreResult<()> {
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        Ok(super::respond(
            Self::NAME,
            "generating investment recommendations",
            self.recommend(call),
            |recs| {
                let a = &recs.asset_allocation;
                format!(
                    "Allocate {}% stablecoins / {}% IOTA / {}% other crypto; {} strategies, {} opportunities",
                    a.stablecoins,
                    a.iota,
                    a.other_crypto,
                    recs.strategies.len(),
                    recs.specific_opportunities.len()
                )
            },
        ))
    }
}
