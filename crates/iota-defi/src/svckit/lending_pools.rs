//! Lending Pools Tool
//!
//! Lists lending pools, optionally filtered by minimum APY and asset.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::args;
use crate::service::DefiQueries;

pub struct LendingPoolsTool {
    service: Arc<dyn DefiQueries>,
}

impl LendingPoolsTool {
    pub const NAME: &'static str = "get_lending_pools";

    pub fn new(service: Arc<dyn DefiQueries>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for LendingPoolsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get available lending pools with their APY, utilization and supported \
                          assets. Use this to explore lending opportunities and current rates."
                .into(),
            parameters: vec![
                ParameterSchema::new(
                    "min_apy",
                    "number",
                    "Minimum APY (percent) to filter pools by",
                ),
                ParameterSchema::new(
                    "assets",
                    "array",
                    "Only return pools supporting at least one of these asset symbols",
                ),
            ],
            category: Some("lending".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let outcome = args::decimal(call.argument("min_apy"), "min_apy").and_then(|min_apy| {
            let assets = args::symbols(call.argument("assets"), "assets")?;
            self.service.lending_pools(min_apy, &assets)
        });

        Ok(super::respond(Self::NAME, "getting lending pools", outcome, |pools| {
            let listed: Vec<String> = pools
                .iter()
                .map(|p| format!("{} ({}% APY, {}% utilized)", p.name, p.apy, p.utilization_rate))
                .collect();
            format!("{} pool(s): {}", pools.len(), listed.join("; "))
        }))
    }
}
