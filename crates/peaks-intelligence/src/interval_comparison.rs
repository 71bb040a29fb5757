// ABOUTME: Cross-workout lap comparison with filtering, ordinal alignment, and summaries
// ABOUTME: Pure function over already-fetched WorkoutDetail records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Interval Comparison
//!
//! Compares laps across several workouts in three steps:
//!
//! 1. **Filter** each workout's laps on minimum average power and on a target
//!    duration with tolerance.
//! 2. **Align** the survivors into rows by ordinal, one entry per workout per
//!    row, padding workouts that have no lap at that ordinal.
//! 3. **Summarize** each workout over its surviving laps.
//!
//! With [`AlignmentMode::FilteredOrdinal`] survivors are renumbered `1..=k`
//! within each workout, so when filters drop different laps per workout a row
//! can pair laps that were at different positions in their recordings.
//! [`AlignmentMode::OriginalOrdinal`] keeps each survivor at its recorded
//! position instead.
//!
//! Missing data never fails a comparison: it shows up as absent fields,
//! `null` summary values, or a warning.

use peaks_core::constants::analysis::{DEFAULT_DURATION_TOLERANCE_SECS, UNTITLED_WORKOUT};
use peaks_core::models::{Lap, WorkoutDetail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How surviving laps are paired across workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentMode {
    /// Renumber survivors per workout, then pair by new ordinal
    #[default]
    #[serde(rename = "filtered")]
    FilteredOrdinal,
    /// Pair survivors by their position in the original lap list
    #[serde(rename = "original")]
    OriginalOrdinal,
}

/// Lap filter applied independently to every workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Keep only laps whose average power is at least this many watts
    pub min_power: Option<f64>,
    /// Keep only laps whose duration is near this many seconds
    pub target_duration: Option<f64>,
    /// Allowed deviation from `target_duration`, in seconds
    #[serde(default = "default_duration_tolerance")]
    pub duration_tolerance: f64,
    /// Row pairing strategy
    #[serde(default)]
    pub alignment: AlignmentMode,
}

const fn default_duration_tolerance() -> f64 {
    DEFAULT_DURATION_TOLERANCE_SECS
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_power: None,
            target_duration: None,
            duration_tolerance: DEFAULT_DURATION_TOLERANCE_SECS,
            alignment: AlignmentMode::FilteredOrdinal,
        }
    }
}

impl FilterCriteria {
    /// Set the minimum average power
    #[must_use]
    pub const fn with_min_power(mut self, watts: f64) -> Self {
        self.min_power = Some(watts);
        self
    }

    /// Set the target lap duration
    #[must_use]
    pub const fn with_target_duration(mut self, seconds: f64) -> Self {
        self.target_duration = Some(seconds);
        self
    }

    /// Set the duration tolerance
    #[must_use]
    pub const fn with_duration_tolerance(mut self, seconds: f64) -> Self {
        self.duration_tolerance = seconds;
        self
    }

    /// Set the alignment mode
    #[must_use]
    pub const fn with_alignment(mut self, alignment: AlignmentMode) -> Self {
        self.alignment = alignment;
        self
    }

    /// Whether a lap passes both the power and the duration filter
    ///
    /// A lap without the metric a filter needs fails that filter.
    #[must_use]
    pub fn matches(&self, lap: &Lap) -> bool {
        let power_ok = self.min_power.map_or(true, |min| {
            lap.average_power.is_some_and(|power| power >= min)
        });
        let duration_ok = self.target_duration.map_or(true, |target| {
            lap.duration_seconds
                .is_some_and(|duration| (duration - target).abs() <= self.duration_tolerance)
        });
        power_ok && duration_ok
    }
}

/// One workout's entry in a [`LapRow`]
///
/// Power and duration are omitted when the workout has no lap at this ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapValue {
    /// Workout the entry belongs to
    pub workout_id: u64,
    /// Workout title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Workout date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Average power of the lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_power: Option<f64>,
    /// Maximum power of the lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power: Option<f64>,
    /// Lap duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl LapValue {
    fn for_workout(workout: &WorkoutDetail, lap: Option<&Lap>) -> Self {
        Self {
            workout_id: workout.workout_id,
            title: workout.title.clone(),
            date: workout.date.clone(),
            avg_power: lap.and_then(|lap| lap.average_power),
            max_power: lap.and_then(|lap| lap.max_power),
            duration: lap.and_then(|lap| lap.duration_seconds),
        }
    }

    /// Whether a lap populated this entry
    #[must_use]
    pub const fn has_lap_data(&self) -> bool {
        self.avg_power.is_some() || self.max_power.is_some() || self.duration.is_some()
    }
}

/// Laps sharing one ordinal, one entry per compared workout in request order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRow {
    /// 1-based ordinal
    pub lap_number: usize,
    /// Entries in workout request order
    pub values: Vec<LapValue>,
}

/// Statistics over one workout's surviving laps
///
/// Power statistics are `null` when no surviving lap reports average power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    /// Workout identifier
    pub workout_id: u64,
    /// Workout title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Workout date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Number of laps that survived filtering
    pub lap_count: usize,
    /// Rounded mean of the laps' average power
    pub avg_power: Option<u32>,
    /// Lowest lap average power
    pub min_power: Option<f64>,
    /// Highest lap average power
    pub max_power: Option<f64>,
    /// `max_power - min_power`
    pub power_range: Option<f64>,
    /// Sum of lap durations in seconds
    pub total_duration: f64,
}

/// Output of [`compare`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Aligned rows, ordinal ascending
    pub lap_rows: Vec<LapRow>,
    /// One summary per workout in request order
    pub summaries: Vec<WorkoutSummary>,
    /// Human-readable notes about workouts without laps
    pub warnings: Vec<String>,
}

/// Surviving laps of one workout, indexed by 0-based row
type Survivors<'a> = Vec<Option<&'a Lap>>;

fn select_laps<'a>(workout: &'a WorkoutDetail, criteria: &FilterCriteria) -> Survivors<'a> {
    match criteria.alignment {
        AlignmentMode::FilteredOrdinal => workout
            .laps
            .iter()
            .filter(|lap| criteria.matches(lap))
            .map(Some)
            .collect(),
        AlignmentMode::OriginalOrdinal => {
            let mut positions: Survivors<'a> = workout
                .laps
                .iter()
                .map(|lap| criteria.matches(lap).then_some(lap))
                .collect();
            // Trailing filtered-out positions would only add empty rows
            while matches!(positions.last(), Some(None)) {
                positions.pop();
            }
            positions
        }
    }
}

fn summarize(workout: &WorkoutDetail, survivors: &Survivors<'_>) -> WorkoutSummary {
    let laps: Vec<&Lap> = survivors.iter().flatten().copied().collect();
    let powers: Vec<f64> = laps.iter().filter_map(|lap| lap.average_power).collect();

    let (avg_power, min_power, max_power) = if powers.is_empty() {
        (None, None, None)
    } else {
        let mean = powers.iter().sum::<f64>() / powers.len() as f64;
        let min = powers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = powers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (Some(mean.round() as u32), Some(min), Some(max))
    };

    WorkoutSummary {
        workout_id: workout.workout_id,
        title: workout.title.clone(),
        date: workout.date.clone(),
        lap_count: laps.len(),
        avg_power,
        min_power,
        max_power,
        power_range: min_power.zip(max_power).map(|(min, max)| max - min),
        total_duration: laps.iter().filter_map(|lap| lap.duration_seconds).sum(),
    }
}

/// Compare laps across workouts
///
/// Output rows, summaries, and warnings follow the order of `workouts`. A
/// warning is emitted for every workout whose unfiltered lap list is empty.
#[must_use]
pub fn compare(workouts: &[WorkoutDetail], criteria: &FilterCriteria) -> ComparisonResult {
    let selected: Vec<Survivors<'_>> = workouts
        .iter()
        .map(|workout| select_laps(workout, criteria))
        .collect();

    let max_laps = selected.iter().map(Vec::len).max().unwrap_or(0);

    let lap_rows = (0..max_laps)
        .map(|row| LapRow {
            lap_number: row + 1,
            values: workouts
                .iter()
                .zip(&selected)
                .map(|(workout, survivors)| {
                    LapValue::for_workout(workout, survivors.get(row).copied().flatten())
                })
                .collect(),
        })
        .collect();

    let summaries = workouts
        .iter()
        .zip(&selected)
        .map(|(workout, survivors)| summarize(workout, survivors))
        .collect();

    let warnings = workouts
        .iter()
        .filter(|workout| workout.laps.is_empty())
        .map(|workout| {
            format!(
                "Workout {} ({}) has no laps",
                workout.workout_id,
                workout.title.as_deref().unwrap_or(UNTITLED_WORKOUT)
            )
        })
        .collect();

    debug!(
        workouts = workouts.len(),
        rows = max_laps,
        alignment = ?criteria.alignment,
        "Compared workout intervals"
    );

    ComparisonResult {
        lap_rows,
        summaries,
        warnings,
    }
}
