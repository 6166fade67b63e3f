//! # iota-defi
//!
//! IOTA DeFi market data, portfolio valuation and investment heuristics,
//! exposed to AI agents as tools.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  svckit (agent tools)        decode args → query → envelope   │
//! ├───────────────────────────────────────────────────────────────┤
//! │  DefiQueries / DefiQueryService                               │
//! │    market_data · lending_pools · risk_assessment              │
//! │    user_portfolio · investment_recommendations                │
//! ├──────────────┬──────────────┬─────────────────────────────────┤
//! │  assessment  │  portfolio   │  strategy                       │
//! │  (ratings)   │  (valuation) │  (allocation, playbook, advice) │
//! ├──────────────┴──────────────┴─────────────────────────────────┤
//! │  MarketSnapshot (immutable, shared via Arc)                   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All data is a static snapshot. Nothing here talks to an IOTA node; the
//! configured endpoints are passed through as context only.

pub mod args;
pub mod assessment;
pub mod config;
pub mod error;
pub mod model;
pub mod portfolio;
pub mod service;
pub mod snapshot;
pub mod strategy;
pub mod svckit;

pub use config::DefiConfig;
pub use error::{DefiError, Result};
pub use model::{
    Asset, BorrowingPosition, Collateral, InvestmentHorizon, LendingPool, LendingPosition,
    RiskMetrics, RiskTolerance, UserPortfolio, WalletBalance,
};
pub use portfolio::{HealthFactor, PortfolioMetrics, PortfolioReport};
pub use service::{DefiQueries, DefiQueryService};
pub use snapshot::MarketSnapshot;
pub use strategy::Recommendations;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        LendingPoolsTool, MarketDataTool, RecommendationsTool, RiskAssessmentTool,
        UserPortfolioTool, register_all,
    };
}

/// System prompt for the DeFi advisor agent
pub const DEFI_ADVISOR_PROMPT: &str = r#"You are a DeFi assistant for the IOTA ecosystem. You help users understand market conditions, lending pools and their own positions, and you give cautious, well-explained investment guidance.

## How to Answer

1. Ground every number in a tool result. Never invent prices, APYs or balances.
2. For questions about prices, use `get_market_data`.
3. For lending opportunities, use `get_lending_pools`, filtering by `min_apy` or `assets` when the user gives constraints.
4. Before recommending a pool, run `get_risk_assessment` with its `pool_id`.
5. For a user's positions, use `get_user_portfolio` and explain the health factor.
6. For investment advice, ask for risk tolerance (conservative, moderate, aggressive) and horizon (short, medium, long), then use `get_ai_investment_recommendations`, passing `user_id` when known.

## Risk Communication

Always explain:
- Liquidation risk on borrowing positions and what the health factor means
- That APYs change and are not guaranteed
- Why diversification across pools reduces pool-specific risk

## Tools Available

- `get_market_data` - Asset prices, market caps and 24h changes
- `get_lending_pools` - Lending pools with APY, utilization and supported assets
- `get_risk_assessment` - Market-wide or per-pool risk evaluation
- `get_user_portfolio` - Balances, positions and portfolio metrics
- `get_ai_investment_recommendations` - Allocation, strategies and opportunities

Market data here is a demo snapshot, not a live feed. Say so if the user asks about real-time prices."#;
