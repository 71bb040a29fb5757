// ABOUTME: Training load tools over the performance management chart.
// ABOUTME: Implements get_fitness_data for a date range and get_current_fitness for today.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Local;
use peaks_core::constants::tools::{GET_CURRENT_FITNESS, GET_FITNESS_DATA};
use serde_json::Value;
use tracing::info;

use crate::errors::{AppError, AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Tool returning daily CTL/ATL/TSB over a date range
pub struct GetFitnessDataTool;

#[async_trait]
impl McpTool for GetFitnessDataTool {
    fn name(&self) -> &'static str {
        GET_FITNESS_DATA
    }

    fn description(&self) -> &'static str {
        "Get fitness metrics (CTL, ATL, TSB) for a date range"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "startDate".to_owned(),
            PropertySchema::scalar("string", "Start date in YYYY-MM-DD format"),
        );
        properties.insert(
            "endDate".to_owned(),
            PropertySchema::scalar("string", "End date in YYYY-MM-DD format"),
        );
        JsonSchema::object(properties, &["startDate", "endDate"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY
            | ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args = ToolArgs::new(GET_FITNESS_DATA, &args);
        let start = args.required_date("startDate")?;
        let end = args.required_date("endDate")?;
        if end < start {
            return Err(ToolError::invalid_parameter(
                GET_FITNESS_DATA,
                "endDate",
                "must not be before startDate",
            )
            .into());
        }

        let athlete_id = ctx.identity.get_athlete_id().await?;
        let days = ctx.provider.get_fitness_data(athlete_id, start, end).await?;
        info!(
            days = days.len(),
            "Fetched training load from {start} to {end}"
        );
        Ok(ToolResult::from_serializable(&days)?)
    }
}

/// Tool returning today's CTL/ATL/TSB
pub struct GetCurrentFitnessTool;

#[async_trait]
impl McpTool for GetCurrentFitnessTool {
    fn name(&self) -> &'static str {
        GET_CURRENT_FITNESS
    }

    fn description(&self) -> &'static str {
        "Get current fitness metrics (CTL, ATL, TSB) for today"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(HashMap::new(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY
            | ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let today = Local::now().date_naive();
        let athlete_id = ctx.identity.get_athlete_id().await?;

        let current = ctx
            .provider
            .get_fitness_data(athlete_id, today, today)
            .await?
            .pop()
            .ok_or_else(|| AppError::unavailable(format!("No fitness data available for {today}")))?;
        Ok(ToolResult::from_serializable(&current)?)
    }
}

/// Create all fitness tools for registration
#[must_use]
pub fn create_fitness_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetFitnessDataTool), Box::new(GetCurrentFitnessTool)]
}
