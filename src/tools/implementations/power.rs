// ABOUTME: Best power tool computing peak rolling-average power from a workout recording.
// ABOUTME: Implements get_best_power over the decoded FIT record power series.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Best Power Tool
//!
//! Downloads the workout's device file, decodes its `record` messages into a
//! one-sample-per-second power series and reports the best average power for
//! each requested duration, shortest first.
//!
//! A recording is rejected when it is missing, has no `record` messages, or
//! has no sample above zero watts.

use std::collections::HashMap;

use async_trait::async_trait;
use peaks_core::constants::analysis::DURATION_EXCEEDS_RECORDING;
use peaks_core::constants::tools::GET_BEST_POWER;
use peaks_intelligence::{PowerSeries, WindowResult};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::{AppError, AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::recording::decode_recording;
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// One requested duration in the report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPowerEntry {
    /// Window outcome
    #[serde(flatten)]
    pub window: WindowResult,
    /// Set when the duration is longer than the recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl From<WindowResult> for BestPowerEntry {
    fn from(window: WindowResult) -> Self {
        Self {
            error: (!window.is_reachable()).then_some(DURATION_EXCEEDS_RECORDING),
            window,
        }
    }
}

/// Output of `get_best_power`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPowerReport {
    /// Workout the recording belongs to
    pub workout_id: u64,
    /// Workout day as reported by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_date: Option<String>,
    /// Workout title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_title: Option<String>,
    /// Number of power samples (seconds) in the recording
    pub total_records: usize,
    /// Best windows, ascending by duration
    pub results: Vec<BestPowerEntry>,
}

/// Check the series carries usable power and build the per-duration entries
///
/// # Errors
///
/// Returns `ResourceUnavailable` for an empty series or one with no power above zero
pub fn best_power_entries(series: &PowerSeries, durations: &[u32]) -> AppResult<Vec<BestPowerEntry>> {
    if series.is_empty() {
        return Err(AppError::unavailable("No record data found in FIT file"));
    }
    if !series.has_signal() {
        return Err(AppError::unavailable("No power data found in workout records"));
    }

    Ok(series
        .best_power_report(durations)
        .into_iter()
        .map(BestPowerEntry::from)
        .collect())
}

fn parse_durations(args: &ToolArgs<'_>) -> Result<Vec<u32>, ToolError> {
    args.required_u64_list("durations")?
        .into_iter()
        .map(|duration| {
            u32::try_from(duration)
                .ok()
                .filter(|&seconds| seconds > 0)
                .ok_or_else(|| {
                    ToolError::invalid_parameter(
                        GET_BEST_POWER,
                        "durations",
                        "each duration must be a positive number of seconds",
                    )
                })
        })
        .collect()
}

/// Tool computing best power for target durations
pub struct GetBestPowerTool;

#[async_trait]
impl McpTool for GetBestPowerTool {
    fn name(&self) -> &'static str {
        GET_BEST_POWER
    }

    fn description(&self) -> &'static str {
        "Get the best average power for target durations (e.g. 5s, 1min, 20min) from a workout's recorded power data"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "workoutId".to_owned(),
            PropertySchema::scalar("integer", "The workout ID"),
        );
        properties.insert(
            "durations".to_owned(),
            PropertySchema::array_of(
                "integer",
                "Target durations in seconds to compute best power for",
            ),
        );
        JsonSchema {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: Some(vec!["workoutId".to_owned(), "durations".to_owned()]),
        }
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_IDENTITY
            | ToolCapabilities::REQUIRES_PROVIDER
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::ANALYTICS
            | ToolCapabilities::DECODES_RECORDINGS
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let view = ToolArgs::new(GET_BEST_POWER, &args);
        let workout_id = view.required_u64("workoutId")?;
        let durations = parse_durations(&view)?;

        let athlete_id = ctx.identity.get_athlete_id().await?;
        let workout = ctx.provider.get_workout(athlete_id, workout_id).await?;
        let bytes = ctx
            .provider
            .download_activity_file(athlete_id, workout_id)
            .await?
            .ok_or_else(|| {
                AppError::unavailable(format!(
                    "No activity file available for workout {workout_id}"
                ))
            })?;

        let recording = decode_recording(&bytes)?;
        let results = best_power_entries(&recording.power_series, &durations)?;

        info!(
            workout.id = workout_id,
            records = recording.record_count,
            durations = results.len(),
            "Computed best power"
        );

        let report = BestPowerReport {
            workout_id,
            workout_date: workout.workout_day,
            workout_title: workout.title,
            total_records: recording.record_count,
            results,
        };
        Ok(ToolResult::from_serializable(&report)?)
    }
}

/// Create all power tools for registration
#[must_use]
pub fn create_power_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetBestPowerTool)]
}
