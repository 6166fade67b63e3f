//! Risk Assessment Tool
//!
//! Qualitative risk evaluation for the whole market or one lending pool.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::args;
use crate::service::DefiQueries;

pub struct RiskAssessmentTool {
    service: Arc<dyn DefiQueries>,
}

impl RiskAssessmentTool {
    pub const NAME: &'static str = "get_risk_assessment";

    pub fn new(service: Arc<dyn DefiQueries>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for RiskAssessmentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get a risk assessment for the overall market, or for a specific lending \
                          pool when pool_id is given."
                .into(),
            parameters: vec![ParameterSchema::new(
                "pool_id",
                "string",
                "ID of the lending pool to assess (e.g., 'pool_1'). Omit for a market-wide view.",
            )],
            category: Some("analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let outcome = args::text(call.argument("pool_id"), "pool_id")
            .and_then(|pool_id| self.service.risk_assessment(pool_id));

        Ok(super::respond(
            Self::NAME,
            "getting risk assessment",
            outcome,
            |assessment| assessment.summary().to_string(),
        ))
    }
}
