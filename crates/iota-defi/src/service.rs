//! DeFi Query Service
//!
//! The five typed queries agents can run against a market snapshot.
//! Every query is a pure read: calling one twice with the same input gives
//! the same answer.

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::assessment::{self, RiskAssessment};
use crate::config::DefiConfig;
use crate::error::{DefiError, Result};
use crate::model::{Asset, InvestmentHorizon, LendingPool, RiskTolerance};
use crate::portfolio::{PortfolioMetrics, PortfolioReport};
use crate::snapshot::MarketSnapshot;
use crate::strategy::{self, Recommendations};

/// Query interface (Strategy pattern)
///
/// Tools depend on this trait rather than on a concrete data source.
pub trait DefiQueries: Send + Sync {
    /// Quotes for `assets` in snapshot order; all quotes when `assets` is empty
    fn market_data(&self, assets: &[String]) -> Result<Vec<Asset>>;

    /// Pools paying at least `min_apy` and supporting any of `assets`
    fn lending_pools(
        &self,
        min_apy: Option<Decimal>,
        assets: &[String],
    ) -> Result<Vec<LendingPool>>;

    /// Market-wide assessment, or one pool's when `pool_id` is given
    fn risk_assessment(&self, pool_id: Option<&str>) -> Result<RiskAssessment>;

    /// A user's portfolio with valuation metrics attached
    fn user_portfolio(&self, user_id: &str) -> Result<PortfolioReport>;

    /// Allocation, strategies and opportunities for an investor profile.
    /// An unknown `user_id` is ignored rather than rejected.
    fn investment_recommendations(
        &self,
        risk_tolerance: RiskTolerance,
        investment_horizon: InvestmentHorizon,
        user_id: Option<&str>,
    ) -> Result<Recommendations>;

    /// Network endpoints this service was configured with
    fn config(&self) -> &DefiConfig;
}

/// Snapshot-backed implementation of [`DefiQueries`]
pub struct DefiQueryService {
    snapshot: Arc<MarketSnapshot>,
    config: DefiConfig,
}

impl DefiQueryService {
    pub const fn new(snapshot: Arc<MarketSnapshot>, config: DefiConfig) -> Self {
        Self { snapshot, config }
    }

    /// Demo snapshot with default testnet endpoints
    pub fn demo() -> Self {
        Self::new(Arc::new(MarketSnapshot::demo()), DefiConfig::default())
    }

    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }
}

impl DefiQueries for DefiQueryService {
    fn market_data(&self, assets: &[String]) -> Result<Vec<Asset>> {
        tracing::debug!(?assets, "Market data query");

        if assets.is_empty() {
            return Ok(self.snapshot.assets.clone());
        }

        let found: Vec<Asset> = self
            .snapshot
            .assets
            .iter()
            .filter(|a| assets.contains(&a.symbol))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(DefiError::NoMarketData(assets.to_vec()));
        }

        Ok(found)
    }

    fn lending_pools(
        &self,
        min_apy: Option<Decimal>,
        assets: &[String],
    ) -> Result<Vec<LendingPool>> {
        tracing::debug!(?min_apy, ?assets, "Lending pool query");

        let pools: Vec<LendingPool> = self
            .snapshot
            .lending_pools
            .iter()
            .filter(|p| min_apy.is_none_or(|min| p.apy >= min))
            .filter(|p| assets.is_empty() || p.supports_any(assets))
            .cloned()
            .collect();

        if pools.is_empty() {
            let mut filters = Vec::new();
            if let Some(min) = min_apy {
                filters.push(format!("min_apy={min}"));
            }
            if !assets.is_empty() {
                filters.push(format!("assets={assets:?}"));
            }
            return Err(DefiError::NoLendingPools(filters));
        }

        Ok(pools)
    }

    fn risk_assessment(&self, pool_id: Option<&str>) -> Result<RiskAssessment> {
        tracing::debug!(?pool_id, "Risk assessment query");

        match pool_id.filter(|id| !id.is_empty()) {
            None => Ok(RiskAssessment::Market(assessment::assess_market(
                self.snapshot.risk_metrics,
            ))),
            Some(id) => {
                let pool = self
                    .snapshot
                    .pool(id)
                    .ok_or_else(|| DefiError::PoolNotFound(id.to_string()))?;
                Ok(RiskAssessment::Pool(assessment::assess_pool(pool)))
            }
        }
    }

    fn user_portfolio(&self, user_id: &str) -> Result<PortfolioReport> {
        tracing::debug!(user_id, "Portfolio query");

        if user_id.is_empty() {
            return Err(DefiError::MissingUserId);
        }

        let portfolio = self
            .snapshot
            .portfolio(user_id)
            .ok_or_else(|| DefiError::PortfolioNotFound(user_id.to_string()))?;

        let metrics = PortfolioMetrics::compute(portfolio, &self.snapshot)?;

        Ok(PortfolioReport {
            portfolio: portfolio.clone(),
            metrics,
        })
    }

    fn investment_recommendations(
        &self,
        risk_tolerance: RiskTolerance,
        investment_horizon: InvestmentHorizon,
        user_id: Option<&str>,
    ) -> Result<Recommendations> {
        tracing::debug!(
            %risk_tolerance,
            %investment_horizon,
            ?user_id,
            "Recommendation query"
        );

        let portfolio = user_id
            .filter(|id| !id.is_empty())
            .and_then(|id| self.snapshot.portfolio(id));

        if portfolio.is_none() && user_id.is_some_and(|id| !id.is_empty()) {
            tracing::debug!(?user_id, "Unknown user, recommending without portfolio");
        }

        Ok(strategy::recommend(
            &self.snapshot,
            risk_tolerance,
            investment_horizon,
            portfolio,
        ))
    }

    fn config(&self) -> &DefiConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_market_data_filters_in_stored_order() {
        let service = DefiQueryService::demo();

        let all = service.market_data(&[]).unwrap();
        assert_eq!(all.len(), 3);

        let picked = service.market_data(&symbols(&["ETH", "IOTA", "DOGE"])).unwrap();
        let picked: Vec<_> = picked.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(picked, vec!["IOTA", "ETH"]);
    }

    #[test]
    fn test_market_data_unknown_symbol() {
        let service = DefiQueryService::demo();
        let err = service.market_data(&symbols(&["ZZZ"])).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), r#"no data found for assets: ["ZZZ"]"#);
    }

    #[test]
    fn test_lending_pools_min_apy() {
        let service = DefiQueryService::demo();

        let pools = service.lending_pools(Some(dec!(5)), &[]).unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].apy, dec!(8.76));

        assert_eq!(service.lending_pools(None, &[]).unwrap().len(), 2);
        assert_eq!(service.lending_pools(Some(dec!(4.52)), &[]).unwrap().len(), 2);
    }

    #[test]
    fn test_lending_pools_asset_filter() {
        let service = DefiQueryService::demo();

        let pools = service.lending_pools(None, &symbols(&["USDC"])).unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, "pool_1");

        let err = service
            .lending_pools(Some(dec!(5)), &symbols(&["USDT"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"no lending pools found with filters: min_apy=5, assets=["USDT"]"#
        );

        let err = service.lending_pools(Some(dec!(20)), &[]).unwrap_err();
        assert_eq!(err.to_string(), "no lending pools found with filters: min_apy=20");
    }

    #[test]
    fn test_risk_assessment_variants() {
        let service = DefiQueryService::demo();

        assert!(matches!(
            service.risk_assessment(None).unwrap(),
            RiskAssessment::Market(_)
        ));
        assert!(matches!(
            service.risk_assessment(Some("")).unwrap(),
            RiskAssessment::Market(_)
        ));
        assert!(matches!(
            service.risk_assessment(Some("pool_2")).unwrap(),
            RiskAssessment::Pool(_)
        ));

        let err = service.risk_assessment(Some("pool_9")).unwrap_err();
        assert_eq!(err.to_string(), "lending pool with id 'pool_9' not found");
    }

    #[test]
    fn test_user_portfolio_errors() {
        let service = DefiQueryService::demo();

        assert_eq!(
            service.user_portfolio("").unwrap_err().to_string(),
            "user id is required"
        );
        assert_eq!(
            service.user_portfolio("unknown").unwrap_err().to_string(),
            "no portfolio found for user id: unknown"
        );
    }

    #[test]
    fn test_user_portfolio_is_a_copy_with_metrics() {
        let snapshot = MarketSnapshot::demo().with_asset(Asset::new("USDT", dec!(1.0)));
        let service = DefiQueryService::new(Arc::new(snapshot), DefiConfig::default());

        let report = service.user_portfolio("user_123").unwrap();
        assert_eq!(&report.portfolio, service.snapshot().portfolio("user_123").unwrap());
        assert_eq!(report.metrics.total_wallet_value_usd, dec!(6452.00));
        assert_eq!(report.metrics.total_collateral_value_usd, dec!(871.20));
    }

    #[test]
    fn test_recommendations_ignore_unknown_user() {
        let service = DefiQueryService::demo();

        let recs = service
            .investment_recommendations(
                RiskTolerance::Aggressive,
                InvestmentHorizon::Medium,
                Some("nobody"),
            )
            .unwrap();
        assert!(recs.portfolio_specific.is_none());

        let recs = service
            .investment_recommendations(
                RiskTolerance::Aggressive,
                InvestmentHorizon::Medium,
                Some("user_123"),
            )
            .unwrap();
        assert!(recs.portfolio_specific.is_some());
    }

    #[test]
    fn test_config_is_reported() {
        let config = DefiConfig {
            node_url: "http://localhost:9000".into(),
            explorer_url: "http://localhost:9001".into(),
        };
        let service = DefiQueryService::new(Arc::new(MarketSnapshot::demo()), config.clone());
        assert_eq!(service.config(), &config);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let service = DefiQueryService::demo();

        assert_eq!(service.market_data(&[]).unwrap(), service.market_data(&[]).unwrap());
        assert_eq!(
            service.risk_assessment(Some("pool_1")).unwrap(),
            service.risk_assessment(Some("pool_1")).unwrap()
        );
        assert_eq!(
            service.user_portfolio("user_123").unwrap(),
            service.user_portfolio("user_123").unwrap()
        );

        let ask = || {
            service
                .investment_recommendations(
                    RiskTolerance::Conservative,
                    InvestmentHorizon::Long,
                    Some("user_123"),
                )
                .unwrap()
        };
        assert_eq!(ask(), ask());
    }
}
