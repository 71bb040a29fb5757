// ABOUTME: Workout summary and details tools.
// ABOUTME: Implements get_workout and get_workout_details for the resolved athlete.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use peaks_core::constants::tools::{GET_WORKOUT, GET_WORKOUT_DETAILS};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

fn workout_id_schema() -> JsonSchema {
    let mut properties = HashMap::new();
    properties.insert(
        "workoutId".to_owned(),
        PropertySchema::scalar("integer", "The workout ID"),
    );
    JsonSchema::object(properties, &["workoutId"])
}

/// Tool returning one workout summary
pub struct GetWorkoutTool;

#[async_trait]
impl McpTool for GetWorkoutTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Get a single workout summary (title, date, duration, TSS, average power)"
    }

    fn input_schema(&self) -> JsonSchema {
        workout_id_schema()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY
            | ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = ToolArgs::new(GET_WORKOUT, &args).required_u64("workoutId")?;
        let athlete_id = ctx.identity.get_athlete_id().await?;
        let workout = ctx.provider.get_workout(athlete_id, workout_id).await?;
        Ok(ToolResult::from_serializable(&workout)?)
    }
}

/// Tool returning the full details payload of a workout
pub struct GetWorkoutDetailsTool;

#[async_trait]
impl McpTool for GetWorkoutDetailsTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT_DETAILS
    }

    fn description(&self) -> &'static str {
        "Get detailed workout data including metrics, intervals, laps, and zones"
    }

    fn input_schema(&self) -> JsonSchema {
        workout_id_schema()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY
            | ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = ToolArgs::new(GET_WORKOUT_DETAILS, &args).required_u64("workoutId")?;
        let athlete_id = ctx.identity.get_athlete_id().await?;
        let details = ctx.provider.get_workout_details(athlete_id, workout_id).await?;
        debug!(workout.id = workout_id, "Fetched workout details");
        Ok(ToolResult::ok(details))
    }
}

/// Create all workout tools for registration
#[must_use]
pub fn create_workout_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetWorkoutTool), Box::new(GetWorkoutDetailsTool)]
}
