//! Investment Strategies
//!
//! Heuristic recommendations built from an investor profile, the market
//! snapshot and, optionally, the investor's current portfolio.

mod advice;
mod allocation;
mod playbook;

pub use advice::{
    AdviceAction, Priority, RebalancingAdvice, RiskAction, RiskManagementAdvice,
};
pub use allocation::{AssetAllocation, allocate};
pub use playbook::{Opportunity, OpportunityKind, Strategy};

use serde::{Deserialize, Serialize};

use crate::model::{InvestmentHorizon, RiskTolerance, UserPortfolio};
use crate::snapshot::MarketSnapshot;

/// Advice tied to the investor's own holdings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAdvice {
    pub rebalancing: RebalancingAdvice,
    pub risk_management: RiskManagementAdvice,
}

/// Complete recommendation set
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub asset_allocation: AssetAllocation,
    pub strategies: Vec<Strategy>,
    pub specific_opportunities: Vec<Opportunity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_specific: Option<PortfolioAdvice>,
}

pub fn recommend(
    market: &MarketSnapshot,
    risk: RiskTolerance,
    horizon: InvestmentHorizon,
    portfolio: Option<&UserPortfolio>,
) -> Recommendations {
    let volatility = market.risk_metrics.market_volatility;

    Recommendations {
        asset_allocation: allocate(risk, horizon, volatility),
        strategies: playbook::strategies(risk, horizon, volatility),
        specific_opportunities: playbook::opportunities(risk, horizon, |id| market.pool(id)),
        portfolio_specific: portfolio.map(|p| PortfolioAdvice {
            rebalancing: advice::rebalancing(p, risk),
            risk_management: advice::risk_management(p, volatility),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_without_portfolio() {
        let market = MarketSnapshot::demo();
        let recs = recommend(&market, RiskTolerance::Moderate, InvestmentHorizon::Medium, None);

        assert_eq!(recs.asset_allocation.total(), 100);
        assert_eq!(recs.strategies.len(), 3);
        assert_eq!(recs.specific_opportunities.len(), 3);
        assert!(recs.portfolio_specific.is_none());

        let json = serde_json::to_value(&recs).unwrap();
        assert!(json.get("portfolio_specific").is_none());
    }

    #[test]
    fn test_recommend_with_portfolio() {
        let market = MarketSnapshot::demo();
        let recs = recommend(
            &market,
            RiskTolerance::Conservative,
            InvestmentHorizon::Medium,
            market.portfolio("user_123"),
        );

        let advice = recs.portfolio_specific.unwrap();
        assert_eq!(advice.rebalancing.actions.len(), 2);
        assert_eq!(advice.risk_management.current_health, "Good");
    }
}
