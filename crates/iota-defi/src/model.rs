//! Domain Models
//!
//! Market and portfolio types for the IOTA DeFi snapshot.
//! Uses `rust_decimal` for all monetary values, rates and ratios. They go out
//! as JSON numbers and are read back from numbers or numeric text.
//! Risk scalars on the 0-1 scale stay `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DefiError;

/// A market asset quote
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol (e.g., "IOTA", "BTC")
    pub symbol: String,

    /// Current price in USD
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price_usd: Decimal,

    /// 24-hour price change percentage
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub change_24h: Decimal,

    /// Market capitalization in USD
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub market_cap_usd: Decimal,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, price_usd: Decimal) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            price_usd,
            change_24h: Decimal::ZERO,
            market_cap_usd: Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn with_change(mut self, change_24h: Decimal) -> Self {
        self.change_24h = change_24h;
        self
    }

    #[must_use]
    pub const fn with_market_cap(mut self, market_cap_usd: Decimal) -> Self {
        self.market_cap_usd = market_cap_usd;
        self
    }
}

/// A lending pool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingPool {
    /// Unique pool identifier
    pub id: String,

    pub name: String,

    /// Total deposits in USD
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_deposits: Decimal,

    /// Annual percentage yield paid to depositors
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub apy: Decimal,

    /// Share of deposits currently borrowed out, 0-100
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub utilization_rate: Decimal,

    /// Required collateral as a percentage of the borrowed value
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub collateral_ratio: Decimal,

    /// Supported asset symbols
    pub assets: Vec<String>,
}

impl LendingPool {
    /// Whether the pool supports at least one of `symbols`
    pub fn supports_any(&self, symbols: &[String]) -> bool {
        symbols.iter().any(|s| self.assets.contains(s))
    }
}

/// Global market risk indicators, each on a 0-1 scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub market_volatility: f64,
    pub liquidation_risk: f64,
    pub protocol_health: f64,
}

/// Held amount per asset symbol
pub type WalletBalance = BTreeMap<String, Decimal>;

fn wallet_as_numbers<S: Serializer>(
    wallet: &WalletBalance,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    struct Amount<'a>(&'a Decimal);

    impl Serialize for Amount<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            rust_decimal::serde::float::serialize(self.0, serializer)
        }
    }

    serializer.collect_map(wallet.iter().map(|(symbol, amount)| (symbol, Amount(amount))))
}

/// A deposit into a lending pool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingPosition {
    pub pool_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub deposited: Decimal,
    pub asset: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub apy: Decimal,
    pub deposit_date: NaiveDate,
}

/// Collateral locked against a borrowing position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collateral {
    pub asset: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,

    /// Collateral value over borrowed value, in percent
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub ratio: Decimal,
}

/// A loan taken from a lending pool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowingPosition {
    pub pool_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub borrowed: Decimal,
    pub asset: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub apr: Decimal,
    pub borrow_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<Collateral>,
}

/// A user's wallet and open DeFi positions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPortfolio {
    #[serde(serialize_with = "wallet_as_numbers")]
    pub wallet_balance: WalletBalance,
    pub lending_positions: Vec<LendingPosition>,
    pub borrowing_positions: Vec<BorrowingPosition>,
}

impl UserPortfolio {
    /// Wallet amount held for `symbol`, zero when absent
    pub fn held(&self, symbol: &str) -> Decimal {
        self.wallet_balance.get(symbol).copied().unwrap_or_default()
    }
}

/// Investor risk appetite
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub const NAMES: &'static [&'static str] = &["conservative", "moderate", "aggressive"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = DefiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(DefiError::InvalidEnum {
                parameter: "risk_tolerance",
                allowed: Self::NAMES,
            }),
        }
    }
}

/// How long the investor intends to stay invested
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentHorizon {
    Short,
    Medium,
    Long,
}

impl InvestmentHorizon {
    pub const NAMES: &'static [&'static str] = &["short", "medium", "long"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for InvestmentHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentHorizon {
    type Err = DefiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(DefiError::InvalidEnum {
                parameter: "investment_horizon",
                allowed: Self::NAMES,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pool_supports_any() {
        let pool = LendingPool {
            id: "p".into(),
            name: "P".into(),
            total_deposits: dec!(1),
            apy: dec!(1),
            utilization_rate: dec!(50),
            collateral_ratio: dec!(150),
            assets: vec!["IOTA".into(), "BTC".into()],
        };

        assert!(pool.supports_any(&["ETH".into(), "BTC".into()]));
        assert!(!pool.supports_any(&["ETH".into()]));
        assert!(!pool.supports_any(&[]));
    }

    #[test]
    fn test_money_serializes_as_numbers() {
        let json = serde_json::to_value(Asset::new("iota", dec!(0.1452)).with_change(dec!(2.34)))
            .unwrap();
        assert_eq!(json["symbol"], "IOTA");
        assert_eq!(json["price_usd"], serde_json::json!(0.1452));
        assert_eq!(json["change_24h"], serde_json::json!(2.34));

        let portfolio = UserPortfolio {
            wallet_balance: [("BTC".to_string(), dec!(0.5))].into_iter().collect(),
            ..UserPortfolio::default()
        };
        let json = serde_json::to_value(portfolio).unwrap();
        assert_eq!(json["wallet_balance"]["BTC"], serde_json::json!(0.5));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("moderate".parse::<RiskTolerance>().ok(), Some(RiskTolerance::Moderate));
        assert_eq!("long".parse::<InvestmentHorizon>().ok(), Some(InvestmentHorizon::Long));

        let err = "yolo".parse::<RiskTolerance>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid risk_tolerance. must be one of: conservative, moderate, aggressive"
        );
        // Matching is exact, as in the tool schema enums
        assert!("Short".parse::<InvestmentHorizon>().is_err());
    }

    #[test]
    fn test_borrowing_without_collateral_deserializes() {
        let json = r#"{
            "pool_id": "pool_2",
            "borrowed": "10",
            "asset": "BTC",
            "apr": "3.1",
            "borrow_date": "2024-01-02"
        }"#;
        let position: BorrowingPosition = serde_json::from_str(json).unwrap();
        assert!(position.collateral.is_none());
        assert_eq!(position.borrow_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
