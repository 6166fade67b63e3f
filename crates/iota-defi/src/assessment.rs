//! Risk Assessment
//!
//! Turns the global risk metrics, or a single pool's utilization and
//! collateral figures, into qualitative ratings and advice.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

use crate::model::{LendingPool, RiskMetrics};

/// Three-step qualitative scale shared by every rating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Moderate,
    High,
}

impl Level {
    /// low below 0.3, moderate below 0.7, high otherwise
    pub fn of_risk_scalar(value: f64) -> Self {
        if value < 0.3 {
            Self::Low
        } else if value < 0.7 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// low below 60%, moderate below 80%, high otherwise
    pub fn of_utilization(rate: Decimal) -> Self {
        if rate < dec!(60) {
            Self::Low
        } else if rate < dec!(80) {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Collateral safety: high above 180%, moderate above 140%, low otherwise
    pub fn of_collateral_ratio(ratio: Decimal) -> Self {
        if ratio > dec!(180) {
            Self::High
        } else if ratio > dec!(140) {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol health rating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthRating {
    Excellent,
    Good,
    Concerning,
}

impl HealthRating {
    pub fn of(protocol_health: f64) -> Self {
        if protocol_health > 0.8 {
            Self::Excellent
        } else if protocol_health > 0.5 {
            Self::Good
        } else {
            Self::Concerning
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Concerning => "concerning",
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-market assessment
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketAssessment {
    pub metrics: RiskMetrics,
    pub volatility: Level,
    pub liquidation_risk: Level,
    pub protocol_health: HealthRating,
    pub assessment: String,
    pub recommendations: Vec<String>,
}

/// Single-pool assessment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolAssessment {
    pub pool: LendingPool,
    pub utilization_risk: Level,
    pub collateral_safety: Level,
    pub assessment: String,
    pub recommendations: Vec<String>,
}

/// Either shape returned by `get_risk_assessment`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RiskAssessment {
    Market(MarketAssessment),
    Pool(PoolAssessment),
}

impl RiskAssessment {
    pub fn summary(&self) -> &str {
        match self {
            Self::Market(m) => &m.assessment,
            Self::Pool(p) => &p.assessment,
        }
    }
}

pub fn assess_market(metrics: RiskMetrics) -> MarketAssessment {
    let volatility = Level::of_risk_scalar(metrics.market_volatility);
    let liquidation_risk = Level::of_risk_scalar(metrics.liquidation_risk);
    let protocol_health = HealthRating::of(metrics.protocol_health);

    MarketAssessment {
        metrics,
        volatility,
        liquidation_risk,
        protocol_health,
        assessment: format!(
            "The current market presents {volatility} volatility with {liquidation_risk} \
             liquidation risk. Overall protocol health is {protocol_health}."
        ),
        recommendations: vec![
            "Maintain appropriate collateralization ratios above 150%".into(),
            "Diversify lending positions across multiple pools".into(),
            "Consider hedging strategies in high volatility periods".into(),
        ],
    }
}

pub fn assess_pool(pool: &LendingPool) -> PoolAssessment {
    let utilization_risk = Level::of_utilization(pool.utilization_rate);
    let collateral_safety = Level::of_collateral_ratio(pool.collateral_ratio);
    let busy = pool.utilization_rate > dec!(80);

    let recommendations = if busy {
        vec![
            "Consider depositing more assets to earn higher yields".into(),
            "Maintain higher collateral ratios due to high utilization".into(),
        ]
    } else {
        vec![
            "This pool has capacity for more deposits".into(),
            "Standard collateral ratios are likely sufficient".into(),
        ]
    };

    PoolAssessment {
        assessment: format!(
            "Pool '{}' has {utilization_risk} utilization risk and {collateral_safety} collateral safety.",
            pool.name
        ),
        pool: pool.clone(),
        utilization_risk,
        collateral_safety,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MarketSnapshot;

    #[test]
    fn test_demo_market_buckets() {
        let assessment = assess_market(MarketSnapshot::demo().risk_metrics);

        assert_eq!(assessment.volatility, Level::Moderate);
        assert_eq!(assessment.liquidation_risk, Level::Moderate);
        assert_eq!(assessment.protocol_health, HealthRating::Excellent);
        assert_eq!(
            assessment.assessment,
            "The current market presents moderate volatility with moderate liquidation risk. \
             Overall protocol health is excellent."
        );
        assert_eq!(assessment.recommendations.len(), 3);
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(Level::of_risk_scalar(0.29), Level::Low);
        assert_eq!(Level::of_risk_scalar(0.3), Level::Moderate);
        assert_eq!(Level::of_risk_scalar(0.7), Level::High);

        assert_eq!(HealthRating::of(0.8), HealthRating::Good);
        assert_eq!(HealthRating::of(0.5), HealthRating::Concerning);

        assert_eq!(Level::of_utilization(dec!(60)), Level::Moderate);
        assert_eq!(Level::of_utilization(dec!(80)), Level::High);

        assert_eq!(Level::of_collateral_ratio(dec!(180)), Level::Moderate);
        assert_eq!(Level::of_collateral_ratio(dec!(140)), Level::Low);
    }

    #[test]
    fn test_pool_assessments() {
        let snapshot = MarketSnapshot::demo();

        let stable = assess_pool(snapshot.pool("pool_1").unwrap());
        assert_eq!(stable.utilization_risk, Level::Moderate);
        assert_eq!(stable.collateral_safety, Level::Moderate);
        assert_eq!(
            stable.assessment,
            "Pool 'IOTA Stable Pool' has moderate utilization risk and moderate collateral safety."
        );
        assert_eq!(stable.recommendations[0], "This pool has capacity for more deposits");

        let high_yield = assess_pool(snapshot.pool("pool_2").unwrap());
        assert_eq!(high_yield.utilization_risk, Level::High);
        assert_eq!(high_yield.collateral_safety, Level::High);
        assert_eq!(
            high_yield.recommendations[1],
            "Maintain higher collateral ratios due to high utilization"
        );
    }
}
