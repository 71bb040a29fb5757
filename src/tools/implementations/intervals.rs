// ABOUTME: Interval comparison tool aligning laps across several workouts.
// ABOUTME: Implements compare_intervals by fetching lap details concurrently and comparing them.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use peaks_core::constants::tools::COMPARE_INTERVALS;
use peaks_intelligence::{compare, AlignmentMode, FilterCriteria};
use serde_json::Value;
use tracing::info;

use crate::details::fetch_workout_detail;
use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const ALIGNMENT_VALUES: &[&str] = &["filtered", "original"];

fn parse_alignment(args: &ToolArgs<'_>) -> Result<AlignmentMode, ToolError> {
    match args.optional_str("alignment")? {
        None | Some("filtered") => Ok(AlignmentMode::FilteredOrdinal),
        Some("original") => Ok(AlignmentMode::OriginalOrdinal),
        Some(other) => Err(ToolError::invalid_parameter(
            COMPARE_INTERVALS,
            "alignment",
            format!("unknown alignment '{other}', expected 'filtered' or 'original'"),
        )),
    }
}

/// Build the lap filter from tool arguments, falling back to `default_tolerance`
fn parse_criteria(args: &ToolArgs<'_>, default_tolerance: f64) -> Result<FilterCriteria, ToolError> {
    let mut criteria = FilterCriteria::default()
        .with_duration_tolerance(default_tolerance)
        .with_alignment(parse_alignment(args)?);

    if let Some(watts) = args.optional_f64("minPower")? {
        criteria = criteria.with_min_power(watts);
    }
    if let Some(seconds) = args.optional_f64("targetDuration")? {
        criteria = criteria.with_target_duration(seconds);
    }
    if let Some(tolerance) = args.optional_f64("durationTolerance")? {
        if tolerance < 0.0 {
            return Err(ToolError::invalid_parameter(
                COMPARE_INTERVALS,
                "durationTolerance",
                "must not be negative",
            ));
        }
        criteria = criteria.with_duration_tolerance(tolerance);
    }
    Ok(criteria)
}

/// Tool comparing laps across workouts
pub struct CompareIntervalsTool;

#[async_trait]
impl McpTool for CompareIntervalsTool {
    fn name(&self) -> &'static str {
        COMPARE_INTERVALS
    }

    fn description(&self) -> &'static str {
        "Compare laps/intervals across multiple workouts side by side, optionally filtered by minimum power and target duration"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "workoutIds".to_owned(),
            PropertySchema::array_of("integer", "Workout IDs to compare"),
        );
        properties.insert(
            "minPower".to_owned(),
            PropertySchema::scalar("number", "Only include laps with average power at or above this value (watts)"),
        );
        properties.insert(
            "targetDuration".to_owned(),
            PropertySchema::scalar("number", "Only include laps close to this duration (seconds)"),
        );
        properties.insert(
            "durationTolerance".to_owned(),
            PropertySchema::scalar("number", "Allowed deviation from targetDuration in seconds (default 2)"),
        );
        properties.insert(
            "alignment".to_owned(),
            PropertySchema::string_enum(
                ALIGNMENT_VALUES,
                "Pair laps by position after filtering ('filtered', default) or by original lap position ('original')",
            ),
        );
        JsonSchema {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: Some(vec!["workoutIds".to_owned()]),
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
        let view = ToolArgs::new(COMPARE_INTERVALS, &args);
        let workout_ids = view.required_u64_list("workoutIds")?;
        let criteria = parse_criteria(&view, ctx.analysis.default_duration_tolerance_secs)?;

        let details = try_join_all(workout_ids.iter().map(|&workout_id| {
            fetch_workout_detail(ctx.provider.as_ref(), &ctx.identity, workout_id)
        }))
        .await?;

        let comparison = compare(&details, &criteria);
        info!(
            workouts = details.len(),
            rows = comparison.lap_rows.len(),
            warnings = comparison.warnings.len(),
            "Compared intervals"
        );
        Ok(ToolResult::from_serializable(&comparison)?)
    }
}

/// Create all interval tools for registration
#[must_use]
pub fn create_interval_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(CompareIntervalsTool)]
}
