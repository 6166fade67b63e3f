//! Asset Allocation
//!
//! Splits capital across stablecoins, IOTA and other crypto from the
//! investor's risk tolerance and horizon, shifted toward stablecoins as
//! market volatility rises.

use serde::{Deserialize, Serialize};

use crate::model::{InvestmentHorizon, RiskTolerance};

/// Whole-percent split that always sums to 100
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub stablecoins: i64,
    #[serde(rename = "IOTA")]
    pub iota: i64,
    pub other_crypto: i64,
}

impl AssetAllocation {
    const fn from_shares([stablecoins, iota, other_crypto]: [i64; 3]) -> Self {
        Self {
            stablecoins,
            iota,
            other_crypto,
        }
    }

    pub const fn total(&self) -> i64 {
        self.stablecoins + self.iota + self.other_crypto
    }
}

/// Category order for every table below: stablecoins, IOTA, other crypto
const fn base_shares(risk: RiskTolerance) -> [f64; 3] {
    match risk {
        RiskTolerance::Conservative => [60.0, 30.0, 10.0],
        RiskTolerance::Moderate => [40.0, 40.0, 20.0],
        RiskTolerance::Aggressive => [20.0, 50.0, 30.0],
    }
}

const fn horizon_shift(horizon: InvestmentHorizon) -> [f64; 3] {
    match horizon {
        InvestmentHorizon::Short => [10.0, -5.0, -5.0],
        InvestmentHorizon::Medium => [0.0, 0.0, 0.0],
        InvestmentHorizon::Long => [-10.0, 5.0, 5.0],
    }
}

fn volatility_shift(market_volatility: f64) -> [f64; 3] {
    let factor = market_volatility * 10.0;
    [factor, -factor / 2.0, -factor / 2.0]
}

/// Compute the allocation. Rounding is half-to-even throughout.
#[allow(clippy::cast_possible_truncation)]
pub fn allocate(
    risk: RiskTolerance,
    horizon: InvestmentHorizon,
    market_volatility: f64,
) -> AssetAllocation {
    let base = base_shares(risk);
    let by_horizon = horizon_shift(horizon);
    let by_volatility = volatility_shift(market_volatility);

    let mut shares = [0_i64; 3];
    for (i, share) in shares.iter_mut().enumerate() {
        let adjusted = base[i] + by_horizon[i] + by_volatility[i];
        *share = adjusted.clamp(0.0, 100.0).round_ties_even() as i64;
    }

    AssetAllocation::from_shares(normalize(shares))
}

/// Rescale whole-percent shares to sum to 100. Any rounding residual goes to
/// the largest share, the first one on ties.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn normalize(mut shares: [i64; 3]) -> [i64; 3] {
    let total: i64 = shares.iter().sum();
    if total == 100 || total <= 0 {
        return shares;
    }

    let scale = 100.0 / total as f64;
    for share in &mut shares {
        *share = (*share as f64 * scale).round_ties_even() as i64;
    }

    let residual = 100 - shares.iter().sum::<i64>();
    if residual != 0 {
        let mut largest = 0;
        for i in 1..shares.len() {
            if shares[i] > shares[largest] {
                largest = i;
            }
        }
        shares[largest] += residual;
    }

    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(a: AssetAllocation) -> [i64; 3] {
        [a.stablecoins, a.iota, a.other_crypto]
    }

    #[test]
    fn test_conservative_medium_at_demo_volatility() {
        let allocation = allocate(RiskTolerance::Conservative, InvestmentHorizon::Medium, 0.42);
        // 64.2 / 27.9 / 7.9 before rounding
        assert_eq!(split(allocation), [64, 28, 8]);
        assert_eq!(allocation.total(), 100);
    }

    #[test]
    fn test_other_profiles_at_demo_volatility() {
        assert_eq!(
            split(allocate(RiskTolerance::Aggressive, InvestmentHorizon::Long, 0.42)),
            [14, 53, 33]
        );
        assert_eq!(
            split(allocate(RiskTolerance::Moderate, InvestmentHorizon::Short, 0.42)),
            [54, 33, 13]
        );
    }

    #[test]
    fn test_half_shares_round_to_even_then_rescale() {
        // 65 / 27.5 / 7.5 rounds to 65 / 28 / 8 = 101, rescaled back to 100
        let allocation = allocate(RiskTolerance::Conservative, InvestmentHorizon::Medium, 0.5);
        assert_eq!(split(allocation), [64, 28, 8]);
    }

    #[test]
    fn test_normalize_assigns_residual_to_largest() {
        // 110 scales to 45 / 27 / 27 = 99, the missing point goes to the largest
        assert_eq!(normalize([50, 30, 30]), [46, 27, 27]);
        // Ties go to the first category
        assert_eq!(normalize([40, 40, 30]), [37, 36, 27]);
        assert_eq!(normalize([60, 30, 10]), [60, 30, 10]);
    }

    #[test]
    fn test_extreme_volatility_is_clamped() {
        let allocation = allocate(RiskTolerance::Conservative, InvestmentHorizon::Short, 10.0);
        assert_eq!(split(allocation), [100, 0, 0]);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(allocate(
            RiskTolerance::Moderate,
            InvestmentHorizon::Medium,
            0.0,
        ))
        .unwrap();
        assert_eq!(json, serde_json::json!({"stablecoins": 40, "IOTA": 40, "other_crypto": 20}));
    }
}
