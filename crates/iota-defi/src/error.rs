//! Error Types for IOTA DeFi queries

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DefiError>;

#[derive(Error, Debug)]
pub enum DefiError {
    /// A textual argument could not be decoded
    #[error("invalid format for {0} parameter")]
    MalformedInput(&'static str),

    #[error("no data found for assets: {0:?}")]
    NoMarketData(Vec<String>),

    /// Filters that were applied, already rendered as `key=value`
    #[error("no lending pools found with filters: {}", .0.join(", "))]
    NoLendingPools(Vec<String>),

    #[error("lending pool with id '{0}' not found")]
    PoolNotFound(String),

    #[error("user id is required")]
    MissingUserId,

    #[error("no portfolio found for user id: {0}")]
    PortfolioNotFound(String),

    #[error("invalid {parameter}. must be one of: {}", .allowed.join(", "))]
    InvalidEnum {
        parameter: &'static str,
        allowed: &'static [&'static str],
    },

    /// A valuation total left the `Decimal` range
    #[error("arithmetic overflow valuing portfolio")]
    ValuationOverflow,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DefiError {
    /// Lookup misses, including filters that matched nothing
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoMarketData(_)
                | Self::NoLendingPools(_)
                | Self::PoolNotFound(_)
                | Self::PortfolioNotFound(_)
        )
    }

    /// Caller-side mistakes in the supplied arguments
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::MissingUserId | Self::InvalidEnum { .. }
        )
    }
}
