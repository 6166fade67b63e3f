//! Portfolio Advice
//!
//! Rebalancing and risk-management suggestions for a loaded portfolio.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{RiskTolerance, UserPortfolio};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceAction {
    pub action: String,
    pub description: String,
    pub reasoning: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancingAdvice {
    pub summary: String,
    pub actions: Vec<AdviceAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAction {
    pub priority: Priority,
    #[serde(flatten)]
    pub advice: AdviceAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskManagementAdvice {
    pub current_health: String,
    pub recommendations: Vec<RiskAction>,
}

fn action(action: &str, description: impl Into<String>, reasoning: &str) -> AdviceAction {
    AdviceAction {
        action: action.into(),
        description: description.into(),
        reasoning: reasoning.into(),
    }
}

pub fn rebalancing(portfolio: &UserPortfolio, risk: RiskTolerance) -> RebalancingAdvice {
    let mut actions = Vec::new();

    if portfolio.held("IOTA") > dec!(5000) && risk == RiskTolerance::Conservative {
        actions.push(action(
            "Reduce IOTA exposure",
            "Consider converting 20% of your IOTA holdings to stablecoins to reduce volatility risk",
            "Your current IOTA allocation exceeds the recommended amount for your risk profile",
        ));
    }

    if portfolio.lending_positions.len() < 2 {
        actions.push(action(
            "Diversify lending positions",
            "Spread your deposits across multiple lending pools to reduce platform-specific risk",
            "Diversification can help protect against pool-specific issues or smart contract vulnerabilities",
        ));
    }

    RebalancingAdvice {
        summary: "Your portfolio may benefit from rebalancing to better align with your risk profile."
            .into(),
        actions,
    }
}

pub fn risk_management(portfolio: &UserPortfolio, market_volatility: f64) -> RiskManagementAdvice {
    let mut recommendations = Vec::new();

    let thin_collateral = portfolio.borrowing_positions.iter().filter(|p| {
        p.collateral
            .as_ref()
            .is_some_and(|c| c.ratio < dec!(180))
    });
    for position in thin_collateral {
        recommendations.push(RiskAction {
            priority: Priority::High,
            advice: action(
                "Increase collateral",
                format!(
                    "Add more collateral to your {} borrowing position to reduce liquidation risk",
                    position.asset
                ),
                "Current market volatility increases the risk of liquidation for positions with lower collateral ratios",
            ),
        });
    }

    if market_volatility > 0.4 {
        recommendations.push(RiskAction {
            priority: Priority::Medium,
            advice: action(
                "Set up stop-loss strategies",
                "Configure automated protection for your more volatile assets",
                "Current market conditions suggest increased volatility may continue",
            ),
        });
    }

    recommendations.push(RiskAction {
        priority: Priority::Low,
        advice: action(
            "Review lending pool utilization",
            "Monitor the utilization rates of pools where you have deposits",
            "High utilization rates may indicate increased risk of liquidity issues",
        ),
    });

    RiskManagementAdvice {
        current_health: if market_volatility < 0.5 { "Good" } else { "Requires Attention" }.into(),
        recommendations,
    }
}
