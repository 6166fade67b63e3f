//! Portfolio valuation
//!
//! Prices a user's wallet and positions against the snapshot quotes.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{DefiError, Result};
use crate::model::UserPortfolio;
use crate::snapshot::MarketSnapshot;

/// Collateral coverage of outstanding debt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthFactor {
    Finite(Decimal),
    /// No outstanding debt
    Unbounded,
}

impl HealthFactor {
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Unbounded => None,
        }
    }
}

impl Serialize for HealthFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Finite(v) => rust_decimal::serde::float::serialize(v, serializer),
            Self::Unbounded => serializer.serialize_str("Infinity"),
        }
    }
}

/// Aggregated USD figures, rounded to cents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioMetrics {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_wallet_value_usd: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_lending_value_usd: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_borrowing_value_usd: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_collateral_value_usd: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub net_position_usd: Decimal,
    pub health_factor: HealthFactor,
}

impl PortfolioMetrics {
    /// Value `portfolio` at snapshot prices. Unknown symbols contribute zero.
    ///
    /// Fails with [`DefiError::ValuationOverflow`] when a total leaves the
    /// `Decimal` range.
    pub fn compute(portfolio: &UserPortfolio, market: &MarketSnapshot) -> Result<Self> {
        let wallet = total(
            portfolio
                .wallet_balance
                .iter()
                .map(|(symbol, amount)| (*amount, market.price_of(symbol))),
        )?;

        let lending = total(
            portfolio
                .lending_positions
                .iter()
                .map(|p| (p.deposited, market.price_of(&p.asset))),
        )?;

        let borrowing = total(
            portfolio
                .borrowing_positions
                .iter()
                .map(|p| (p.borrowed, market.price_of(&p.asset))),
        )?;

        let collateral = total(
            portfolio
                .borrowing_positions
                .iter()
                .filter_map(|p| p.collateral.as_ref())
                .map(|c| (c.amount, market.price_of(&c.asset))),
        )?;

        let health_factor = if borrowing > Decimal::ZERO {
            let ratio = collateral
                .checked_div(borrowing)
                .ok_or(DefiError::ValuationOverflow)?;
            HealthFactor::Finite(cents(ratio))
        } else {
            HealthFactor::Unbounded
        };

        let net = wallet
            .checked_add(lending)
            .and_then(|v| v.checked_sub(borrowing))
            .ok_or(DefiError::ValuationOverflow)?;

        Ok(Self {
            total_wallet_value_usd: cents(wallet),
            total_lending_value_usd: cents(lending),
            total_borrowing_value_usd: cents(borrowing),
            total_collateral_value_usd: cents(collateral),
            net_position_usd: cents(net),
            health_factor,
        })
    }
}

/// Sum of `amount * price` over `holdings`
fn total(holdings: impl IntoIterator<Item = (Decimal, Decimal)>) -> Result<Decimal> {
    holdings
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, (amount, price)| {
            amount
                .checked_mul(price)
                .and_then(|value| sum.checked_add(value))
                .ok_or(DefiError::ValuationOverflow)
        })
}

/// A portfolio with its computed metrics attached
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortfolioReport {
    #[serde(flatten)]
    pub portfolio: UserPortfolio,
    pub metrics: PortfolioMetrics,
}

/// Two decimal places, ties to even
fn cents(value: Decimal) -> Decimal {
    value.round_dp(2)
}
