// ABOUTME: Personal record tools for power and pace peaks.
// ABOUTME: Implements get_peaks, get_all_peaks, get_workout_peaks, get_power_peaks, get_running_peaks.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Peaks
//!
//! A peak is a ranked personal record for one duration (power) or distance
//! (pace). Listing every type of a sport fans out one request per peak type,
//! a few at a time, and keeps the results grouped in peak type order.

use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use peaks_core::constants::peaks::MAX_CONCURRENT_PEAK_REQUESTS;
use peaks_core::constants::tools::{
    GET_ALL_PEAKS, GET_PEAKS, GET_POWER_PEAKS, GET_RUNNING_PEAKS, GET_WORKOUT_PEAKS,
};
use peaks_core::models::{
    is_peak_type, PeakRecord, PeakSport, POWER_PEAK_TYPES, SPEED_PEAK_TYPES,
};
use serde_json::Value;
use tracing::info;

use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::providers::DateRange;
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Date bounds and result cap shared by the listing tools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakFilter {
    /// Inclusive date bounds
    pub range: DateRange,
    /// Records kept per peak type
    pub limit: Option<usize>,
}

impl PeakFilter {
    /// Read `startDate`, `endDate` and `limit`
    ///
    /// # Errors
    ///
    /// Malformed dates, an end before the start, or a limit below 1
    pub fn from_args(args: &ToolArgs<'_>, tool: &'static str) -> Result<Self, ToolError> {
        let start = args.optional_date("startDate")?;
        let end = args.optional_date("endDate")?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ToolError::invalid_parameter(
                    tool,
                    "endDate",
                    "must not be before startDate",
                ));
            }
        }

        let limit = args
            .optional_positive_u64("limit")?
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(Self {
            range: DateRange { start, end },
            limit,
        })
    }

    fn apply(self, mut records: Vec<PeakRecord>) -> Vec<PeakRecord> {
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        records
    }
}

fn filter_properties() -> HashMap<String, PropertySchema> {
    let mut properties = HashMap::new();
    properties.insert(
        "startDate".to_owned(),
        PropertySchema::scalar("string", "Start date filter (YYYY-MM-DD)"),
    );
    properties.insert(
        "endDate".to_owned(),
        PropertySchema::scalar("string", "End date filter (YYYY-MM-DD)"),
    );
    properties.insert(
        "limit".to_owned(),
        PropertySchema::scalar("integer", "Maximum number of results per peak type"),
    );
    properties
}

fn sport_property() -> PropertySchema {
    PropertySchema::string_enum(&PeakSport::NAMES, "Sport type: Bike or Run")
}

fn parse_sport(args: &ToolArgs<'_>, tool: &'static str) -> Result<PeakSport, ToolError> {
    args.required_str("sport")?
        .parse()
        .map_err(|reason: String| ToolError::invalid_parameter(tool, "sport", reason))
}

const fn listing_capabilities() -> ToolCapabilities {
    ToolCapabilities::REQUIRES_IDENTITY
        .union(ToolCapabilities::REQUIRES_PROVIDER)
        .union(ToolCapabilities::READS_DATA)
}

/// Fetch every peak type of `sport`, grouped in peak type order
///
/// # Errors
///
/// The first identity or provider failure
pub async fn fetch_sport_peaks(
    ctx: &ToolExecutionContext,
    sport: PeakSport,
    filter: PeakFilter,
) -> AppResult<Vec<PeakRecord>> {
    let athlete_id = ctx.identity.get_athlete_id().await?;
    let provider = ctx.provider.as_ref();

    let requests: Vec<_> = sport
        .peak_types()
        .iter()
        .map(|&peak_type| provider.get_peaks(athlete_id, sport, peak_type, filter.range))
        .collect();
    let per_type: Vec<Vec<PeakRecord>> = stream::iter(requests)
        .buffered(MAX_CONCURRENT_PEAK_REQUESTS)
        .try_collect()
        .await?;

    let records: Vec<PeakRecord> = per_type
        .into_iter()
        .flat_map(|records| filter.apply(records))
        .collect();
    info!(
        sport = sport.as_str(),
        records = records.len(),
        "Fetched personal records"
    );
    Ok(records)
}

/// Tool returning records of one peak type
pub struct GetPeaksTool;

#[async_trait]
impl McpTool for GetPeaksTool {
    fn name(&self) -> &'static str {
        GET_PEAKS
    }

    fn description(&self) -> &'static str {
        "Get peaks/personal records for a specific sport and type"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = filter_properties();
        properties.insert("sport".to_owned(), sport_property());

        let types: Vec<&str> = POWER_PEAK_TYPES
            .iter()
            .chain(SPEED_PEAK_TYPES.iter())
            .copied()
            .collect();
        properties.insert(
            "type".to_owned(),
            PropertySchema::string_enum(&types, "Peak type (e.g., power5min, speed5K)"),
        );
        JsonSchema::object(properties, &["sport", "type"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        listing_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args = ToolArgs::new(GET_PEAKS, &args);
        let sport = parse_sport(&args, GET_PEAKS)?;
        let peak_type = args.required_str("type")?;
        if !is_peak_type(peak_type) {
            return Err(ToolError::invalid_parameter(
                GET_PEAKS,
                "type",
                format!("unknown peak type '{peak_type}'"),
            )
            .into());
        }
        let filter = PeakFilter::from_args(&args, GET_PEAKS)?;

        let athlete_id = ctx.identity.get_athlete_id().await?;
        let records = ctx
            .provider
            .get_peaks(athlete_id, sport, peak_type, filter.range)
            .await?;
        Ok(ToolResult::from_serializable(&filter.apply(records))?)
    }
}

/// Tool returning records of every peak type for a sport
pub struct GetAllPeaksTool;

#[async_trait]
impl McpTool for GetAllPeaksTool {
    fn name(&self) -> &'static str {
        GET_ALL_PEAKS
    }

    fn description(&self) -> &'static str {
        "Get all peaks/personal records for a sport"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = filter_properties();
        properties.insert("sport".to_owned(), sport_property());
        JsonSchema::object(properties, &["sport"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        listing_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args = ToolArgs::new(GET_ALL_PEAKS, &args);
        let sport = parse_sport(&args, GET_ALL_PEAKS)?;
        let filter = PeakFilter::from_args(&args, GET_ALL_PEAKS)?;

        let records = fetch_sport_peaks(ctx, sport, filter).await?;
        Ok(ToolResult::from_serializable(&records)?)
    }
}

/// Sport-specific shortcut over [`fetch_sport_peaks`]
pub struct SportPeaksTool {
    name: &'static str,
    description: &'static str,
    sport: PeakSport,
}

impl SportPeaksTool {
    /// Cycling power records
    #[must_use]
    pub const fn power() -> Self {
        Self {
            name: GET_POWER_PEAKS,
            description: "Get cycling power peaks (convenience method for bike power PRs)",
            sport: PeakSport::Bike,
        }
    }

    /// Running pace records
    #[must_use]
    pub const fn running() -> Self {
        Self {
            name: GET_RUNNING_PEAKS,
            description: "Get running pace peaks (convenience method for running PRs)",
            sport: PeakSport::Run,
        }
    }
}

#[async_trait]
impl McpTool for SportPeaksTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(filter_properties(), &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        listing_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let filter = PeakFilter::from_args(&ToolArgs::new(self.name, &args), self.name)?;
        let records = fetch_sport_peaks(ctx, self.sport, filter).await?;
        Ok(ToolResult::from_serializable(&records)?)
    }
}

/// Tool returning the records set during one workout
pub struct GetWorkoutPeaksTool;

#[async_trait]
impl McpTool for GetWorkoutPeaksTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT_PEAKS
    }

    fn description(&self) -> &'static str {
        "Get peaks/PRs achieved in a specific workout"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "workoutId".to_owned(),
            PropertySchema::scalar("integer", "The workout ID"),
        );
        JsonSchema::object(properties, &["workoutId"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        listing_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = ToolArgs::new(GET_WORKOUT_PEAKS, &args).required_u64("workoutId")?;
        let athlete_id = ctx.identity.get_athlete_id().await?;
        let peaks = ctx.provider.get_workout_peaks(athlete_id, workout_id).await?;
        Ok(ToolResult::from_serializable(&peaks)?)
    }
}

/// Create all peaks tools for registration
#[must_use]
pub fn create_peaks_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GetPeaksTool),
        Box::new(GetAllPeaksTool),
        Box::new(GetWorkoutPeaksTool),
        Box::new(SportPeaksTool::power()),
        Box::new(SportPeaksTool::running()),
    ]
}
