//! Market Snapshot
//!
//! The immutable market and portfolio data every query reads from.
//! Built once, then shared read-only behind an `Arc`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{
    Asset, BorrowingPosition, Collateral, LendingPool, LendingPosition, RiskMetrics,
    UserPortfolio,
};

/// Point-in-time market data and user portfolios
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Asset quotes in display order
    pub assets: Vec<Asset>,

    /// Lending pools in display order
    pub lending_pools: Vec<LendingPool>,

    pub risk_metrics: RiskMetrics,

    /// Portfolios keyed by user id
    #[serde(default)]
    pub portfolios: HashMap<String, UserPortfolio>,
}

impl MarketSnapshot {
    pub fn new(risk_metrics: RiskMetrics) -> Self {
        Self {
            assets: Vec::new(),
            lending_pools: Vec::new(),
            risk_metrics,
            portfolios: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    #[must_use]
    pub fn with_pool(mut self, pool: LendingPool) -> Self {
        self.lending_pools.push(pool);
        self
    }

    #[must_use]
    pub fn with_portfolio(mut self, user_id: impl Into<String>, portfolio: UserPortfolio) -> Self {
        self.portfolios.insert(user_id.into(), portfolio);
        self
    }

    /// USD price for `symbol`; unknown symbols price at zero
    pub fn price_of(&self, symbol: &str) -> Decimal {
        match self.assets.iter().find(|a| a.symbol == symbol) {
            Some(asset) => asset.price_usd,
            None => {
                tracing::debug!(symbol, "No quote for symbol, pricing at zero");
                Decimal::ZERO
            }
        }
    }

    pub fn pool(&self, pool_id: &str) -> Option<&LendingPool> {
        self.lending_pools.iter().find(|p| p.id == pool_id)
    }

    pub fn portfolio(&self, user_id: &str) -> Option<&UserPortfolio> {
        self.portfolios.get(user_id)
    }

    /// Demo IOTA testnet market with a single sample user (`user_123`)
    pub fn demo() -> Self {
        Self::new(RiskMetrics {
            market_volatility: 0.42,
            liquidation_risk: 0.31,
            protocol_health: 0.89,
        })
        .with_asset(
            Asset::new("IOTA", dec!(0.1452))
                .with_change(dec!(2.34))
                .with_market_cap(dec!(403_782_401)),
        )
        .with_asset(
            Asset::new("BTC", dec!(63245.78))
                .with_change(dec!(-1.23))
                .with_market_cap(dec!(1_234_567_890_123)),
        )
        .with_asset(
            Asset::new("ETH", dec!(3071.45))
                .with_change(dec!(0.87))
                .with_market_cap(dec!(369_123_456_789)),
        )
        .with_pool(LendingPool {
            id: "pool_1".into(),
            name: "IOTA Stable Pool".into(),
            total_deposits: dec!(2_500_000),
            apy: dec!(4.52),
            utilization_rate: dec!(68.3),
            collateral_ratio: dec!(150),
            assets: vec!["IOTA".into(), "USDT".into(), "USDC".into()],
        })
        .with_pool(LendingPool {
            id: "pool_2".into(),
            name: "IOTA High Yield".into(),
            total_deposits: dec!(1_200_000),
            apy: dec!(8.76),
            utilization_rate: dec!(82.1),
            collateral_ratio: dec!(200),
            assets: vec!["IOTA".into(), "BTC".into(), "ETH".into()],
        })
        .with_portfolio("user_123", demo_portfolio())
    }
}

fn demo_portfolio() -> UserPortfolio {
    UserPortfolio {
        wallet_balance: [("IOTA".to_string(), dec!(10000)), ("USDT".to_string(), dec!(5000))]
            .into_iter()
            .collect(),
        lending_positions: vec![LendingPosition {
            pool_id: "pool_1".into(),
            deposited: dec!(4000),
            asset: "IOTA".into(),
            apy: dec!(4.52),
            deposit_date: ymd(2023, 10, 15),
        }],
        borrowing_positions: vec![BorrowingPosition {
            pool_id: "pool_2".into(),
            borrowed: dec!(2000),
            asset: "USDT".into(),
            apr: dec!(5.67),
            borrow_date: ymd(2023, 11, 1),
            collateral: Some(Collateral {
                asset: "IOTA".into(),
                amount: dec!(6000),
                ratio: dec!(175),
            }),
        }],
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_snapshot() {
        let snapshot = MarketSnapshot::demo();

        let symbols: Vec<_> = snapshot.assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["IOTA", "BTC", "ETH"]);
        assert_eq!(snapshot.lending_pools.len(), 2);
        assert!(snapshot.portfolio("user_123").is_some());
        assert_eq!(
            snapshot.portfolio("user_123").unwrap().lending_positions[0].deposit_date,
            NaiveDate::from_ymd_opt(2023, 10, 15).unwrap()
        );
    }

    #[test]
    fn test_price_lookup_defaults_to_zero() {
        let snapshot = MarketSnapshot::demo();
        assert_eq!(snapshot.price_of("IOTA"), dec!(0.1452));
        assert_eq!(snapshot.price_of("USDT"), Decimal::ZERO);
    }

    #[test]
    fn test_pool_lookup() {
        let snapshot = MarketSnapshot::demo();
        assert_eq!(snapshot.pool("pool_2").map(|p| p.apy), Some(dec!(8.76)));
        assert!(snapshot.pool("pool_9").is_none());
    }
}
