//! Strategy Playbook
//!
//! Named strategies and concrete yield opportunities matched to an
//! investor profile and current market conditions.

use serde::{Deserialize, Serialize};

use crate::model::{InvestmentHorizon, LendingPool, RiskTolerance};

/// Pools offered as opportunities, with the lowest risk tolerance each suits
const POOL_RISK_TAGS: &[(&str, RiskTolerance)] = &[
    ("pool_1", RiskTolerance::Conservative),
    ("pool_2", RiskTolerance::Aggressive),
];

/// Pool ID treated as the low-risk deposit
const LOW_RISK_POOL: &str = "pool_1";

/// Leverage is only suggested below this volatility
const LEVERAGE_VOLATILITY_CEILING: f64 = 0.7;

/// Hedging is suggested above this volatility
const HEDGING_VOLATILITY_FLOOR: f64 = 0.6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub description: String,
}

impl Strategy {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    Lending,
    Staking,
    YieldFarming,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub name: String,
    pub description: String,
    pub expected_return: String,
    pub risk_level: String,
}

pub fn strategies(
    risk: RiskTolerance,
    horizon: InvestmentHorizon,
    market_volatility: f64,
) -> Vec<Strategy> {
    let mut picks = vec![Strategy::new(
        "Diversification",
        "Spread investments across multiple assets to reduce risk",
    )];

    match risk {
        RiskTolerance::Conservative => {
            picks.push(Strategy::new(
                "Stable Yield Farming",
                "Focus on stable assets and lower-risk lending pools with consistent returns",
            ));
            if horizon != InvestmentHorizon::Short {
                picks.push(Strategy::new(
                    "Dollar-Cost Averaging",
                    "Gradually invest in IOTA over time to reduce impact of volatility",
                ));
            }
        }
        RiskTolerance::Moderate => {
            picks.push(Strategy::new(
                "Balanced Approach",
                "Combine stable yields with some higher-risk positions for growth potential",
            ));
            picks.push(Strategy::new(
                "Strategic Rebalancing",
                "Periodically adjust portfolio allocations to maintain desired risk level",
            ));
        }
        RiskTolerance::Aggressive => {
            picks.push(Strategy::new(
                "Growth Focus",
                "Target higher yields through more volatile assets and lending opportunities",
            ));
            if market_volatility < LEVERAGE_VOLATILITY_CEILING {
                picks.push(Strategy::new(
                    "Strategic Leverage",
                    "Use carefully managed leverage positions for amplified returns",
                ));
            }
        }
    }

    if market_volatility > HEDGING_VOLATILITY_FLOOR {
        picks.push(Strategy::new(
            "Volatility Hedging",
            "Increase stablecoin allocation and use hedging strategies during high volatility",
        ));
    }

    picks
}

/// `find_pool` resolves tagged pool IDs; tags with no pool are skipped.
pub fn opportunities<'a>(
    risk: RiskTolerance,
    horizon: InvestmentHorizon,
    find_pool: impl Fn(&str) -> Option<&'a LendingPool>,
) -> Vec<Opportunity> {
    let mut offers = Vec::new();

    for &(pool_id, tag) in POOL_RISK_TAGS {
        let suitable = risk != RiskTolerance::Conservative || tag == RiskTolerance::Conservative;
        if !suitable {
            continue;
        }

        let Some(pool) = find_pool(pool_id) else {
            tracing::warn!(pool_id, "Tagged lending pool missing from snapshot");
            continue;
        };

        offers.push(Opportunity {
            kind: OpportunityKind::Lending,
            name: format!("{} Deposit", pool.name),
            description: format!("Deposit assets in {} for {}% APY", pool.name, pool.apy),
            expected_return: format!("{}%", pool.apy),
            risk_level: if pool.id == LOW_RISK_POOL { "Low" } else { "Medium-High" }.into(),
        });
    }

    if risk != RiskTolerance::Conservative {
        offers.push(Opportunity {
            kind: OpportunityKind::Staking,
            name: "IOTA Staking".into(),
            description: "Stake IOTA tokens to earn rewards and support network security".into(),
            expected_return: "5-7%".into(),
            risk_level: "Medium".into(),
        });
    }

    if risk == RiskTolerance::Aggressive && horizon != InvestmentHorizon::Short {
        offers.push(Opportunity {
            kind: OpportunityKind::YieldFarming,
            name: "IOTA-BTC LP Farming".into(),
            description: "Provide liquidity to IOTA-BTC pair for trading fees and rewards".into(),
            expected_return: "12-15%".into(),
            risk_level: "High".into(),
        });
    }

    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MarketSnapshot;

    fn names(picks: &[Strategy]) -> Vec<&str> {
        picks.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_conservative_strategies() {
        assert_eq!(
            names(&strategies(RiskTolerance::Conservative, InvestmentHorizon::Short, 0.42)),
            vec!["Diversification", "Stable Yield Farming"]
        );
        assert_eq!(
            names(&strategies(RiskTolerance::Conservative, InvestmentHorizon::Long, 0.42)),
            vec!["Diversification", "Stable Yield Farming", "Dollar-Cost Averaging"]
        );
    }

    #[test]
    fn test_volatility_gates() {
        assert_eq!(
            names(&strategies(RiskTolerance::Aggressive, InvestmentHorizon::Medium, 0.65)),
            vec!["Diversification", "Growth Focus", "Strategic Leverage", "Volatility Hedging"]
        );
        assert_eq!(
            names(&strategies(RiskTolerance::Aggressive, InvestmentHorizon::Medium, 0.7)),
            vec!["Diversification", "Growth Focus", "Volatility Hedging"]
        );
        assert_eq!(
            names(&strategies(RiskTolerance::Moderate, InvestmentHorizon::Medium, 0.6)),
            vec!["Diversification", "Balanced Approach", "Strategic Rebalancing"]
        );
    }

    #[test]
    fn test_conservative_only_gets_stable_pool() {
        let market = MarketSnapshot::demo();
        let offers = opportunities(RiskTolerance::Conservative, InvestmentHorizon::Long, |id| {
            market.pool(id)
        });

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].name, "IOTA Stable Pool Deposit");
        assert_eq!(offers[0].expected_return, "4.52%");
        assert_eq!(offers[0].risk_level, "Low");
        assert_eq!(offers[0].description, "Deposit assets in IOTA Stable Pool for 4.52% APY");
    }

    #[test]
    fn test_lp_farming_requires_aggressive_and_longer_horizon() {
        let market = MarketSnapshot::demo();
        let find = |id: &str| market.pool(id);

        let short = opportunities(RiskTolerance::Aggressive, InvestmentHorizon::Short, find);
        assert!(short.iter().all(|o| o.name != "IOTA-BTC LP Farming"));
        assert_eq!(short.len(), 3);

        let medium = opportunities(RiskTolerance::Aggressive, InvestmentHorizon::Medium, find);
        let farming = medium.iter().find(|o| o.name == "IOTA-BTC LP Farming").unwrap();
        assert_eq!(farming.kind, OpportunityKind::YieldFarming);
        assert_eq!(farming.risk_level, "High");

        let moderate = opportunities(RiskTolerance::Moderate, InvestmentHorizon::Long, find);
        assert_eq!(moderate.len(), 3);
        assert_eq!(moderate[1].risk_level, "Medium-High");
        assert_eq!(moderate[2].kind, OpportunityKind::Staking);
    }

    #[test]
    fn test_missing_pools_are_skipped() {
        let offers = opportunities(RiskTolerance::Moderate, InvestmentHorizon::Medium, |_| None);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].name, "IOTA Staking");
    }

    #[test]
    fn test_opportunity_type_key() {
        let offers = opportunities(RiskTolerance::Aggressive, InvestmentHorizon::Long, |_| None);
        let json = serde_json::to_value(&offers[1]).unwrap();
        assert_eq!(json["type"], "yield_farming");
    }
}
