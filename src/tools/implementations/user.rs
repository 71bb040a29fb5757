// ABOUTME: Account identity tools backed by the cached identity resolver.
// ABOUTME: Implements get_user and get_athlete_id.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use peaks_core::constants::tools::{GET_ATHLETE_ID, GET_USER};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

fn no_arguments() -> JsonSchema {
    JsonSchema {
        schema_type: "object".to_owned(),
        properties: None,
        required: None,
    }
}

/// Tool returning the account profile
pub struct GetUserTool;

#[async_trait]
impl McpTool for GetUserTool {
    fn name(&self) -> &'static str {
        GET_USER
    }

    fn description(&self) -> &'static str {
        "Get the TrainingPeaks account profile (name, email, athlete id, timezone)"
    }

    fn input_schema(&self) -> JsonSchema {
        no_arguments()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let identity = ctx.identity.get_identity().await?;
        debug!(user.id = identity.id, "Returning account profile");
        Ok(ToolResult::from_serializable(&identity)?)
    }
}

/// Tool returning only the athlete id
pub struct GetAthleteIdTool;

#[async_trait]
impl McpTool for GetAthleteIdTool {
    fn name(&self) -> &'static str {
        GET_ATHLETE_ID
    }

    fn description(&self) -> &'static str {
        "Get the athlete id used to address workouts"
    }

    fn input_schema(&self) -> JsonSchema {
        no_arguments()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let athlete_id = ctx.identity.get_athlete_id().await?;
        Ok(ToolResult::ok(json!({ "athleteId": athlete_id })))
    }
}

/// Create all account tools for registration
#[must_use]
pub fn create_account_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetUserTool), Box::new(GetAthleteIdTool)]
}
