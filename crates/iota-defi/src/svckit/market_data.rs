//! Market Data Tool
//!
//! Current price, 24h change and market cap for IOTA and other assets.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::args;
use crate::service::DefiQueries;

/// Tool for looking up asset quotes
pub struct MarketDataTool {
    service: Arc<dyn DefiQueries>,
}

impl MarketDataTool {
    pub const NAME: &'static str = "get_market_data";

    pub fn new(service: Arc<dyn DefiQueries>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for MarketDataTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get current market data for IOTA and other assets: latest price, \
                          market cap and 24h change."
                .into(),
            parameters: vec![ParameterSchema::new(
                "assets",
                "array",
                "Asset symbols to get data for (e.g., [\"IOTA\", \"BTC\"]). Empty returns all assets.",
            )],
            category: Some("market_data".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let outcome = args::symbols(call.argument("assets"), "assets")
            .and_then(|assets| self.service.market_data(&assets));

        Ok(super::respond(Self::NAME, "getting market data", outcome, |assets| {
            let quotes: Vec<String> = assets
                .iter()
                .map(|a| format!("{} ${} ({:+}% 24h)", a.symbol, a.price_usd, a.change_24h))
                .collect();
            quotes.join(", ")
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DefiQueryService;
    use serde_json::json;

    fn tool() -> MarketDataTool {
        MarketDataTool::new(Arc::new(DefiQueryService::demo()))
    }

    #[tokio::test]
    async fn test_all_assets() {
        let result = tool().execute(&ToolCall::new(MarketDataTool::NAME)).await.unwrap();

        assert!(result.success);
        assert_eq!(result.data.unwrap().as_array().unwrap().len(), 3);
        assert!(result.output.starts_with("IOTA $0.1452 (+2.34% 24h)"));
    }

    #[tokio::test]
    async fn test_textual_asset_list() {
        let call = ToolCall::new(MarketDataTool::NAME).with_argument("assets", json!(r#"["BTC"]"#));
        let result = tool().execute(&call).await.unwrap();

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data[0]["symbol"], "BTC");
        assert_eq!(data[0]["price_usd"], json!(63245.78));
    }

    #[tokio::test]
    async fn test_failures() {
        let bad = ToolCall::new(MarketDataTool::NAME).with_argument("assets", json!("[BTC"));
        let result = tool().execute(&bad).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.output, "invalid format for assets parameter");

        let unknown = ToolCall::new(MarketDataTool::NAME).with_argument("assets", json!(["ZZZ"]));
        let result = tool().execute(&unknown).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.output, r#"no data found for assets: ["ZZZ"]"#);
    }
}
