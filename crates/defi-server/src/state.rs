//! Application State

use std::sync::Arc;

use agent_core::ToolRegistry;
use iota_defi::{DefiConfig, DefiQueries, DefiQueryService, MarketSnapshot, tools};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tool registry with all available tools
    pub tools: Arc<ToolRegistry>,

    /// Network endpoints reported to clients
    pub config: DefiConfig,
}

impl AppState {
    /// Build the query service over `snapshot` and register every DeFi tool
    pub fn new(snapshot: MarketSnapshot, config: DefiConfig) -> Self {
        let service: Arc<dyn DefiQueries> =
            Arc::new(DefiQueryService::new(Arc::new(snapshot), config));

        let mut registry = ToolRegistry::new();
        tools::register_all(&mut registry, &service);

        Self {
            tools: Arc::new(registry),
            config: service.config().clone(),
        }
    }
}
