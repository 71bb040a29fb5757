// ABOUTME: Workout summary, workout detail, and lap models
// ABOUTME: WorkoutInfo, WorkoutDetail and Lap definitions with camelCase serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Workout summary as returned by the workouts endpoint
///
/// Only the fields the tools surface are modeled; unknown fields in the API
/// payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInfo {
    /// Workout identifier
    pub workout_id: u64,
    /// Owning athlete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete_id: Option<u64>,
    /// Workout title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Calendar day of the workout (`YYYY-MM-DDT00:00:00`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_day: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Total time in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    /// Actual training stress score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tss_actual: Option<f64>,
    /// Average power in watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_average: Option<f64>,
}

/// A recorded contiguous segment of a workout with aggregate metrics
///
/// Any metric may be absent when the recording device did not report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    /// Elapsed time of the lap in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Average power in watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_power: Option<f64>,
    /// Maximum power in watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power: Option<f64>,
}

impl Lap {
    /// Create a lap with no metrics
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration_seconds: None,
            average_power: None,
            max_power: None,
        }
    }

    /// Set the lap duration
    #[must_use]
    pub const fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Set the average power
    #[must_use]
    pub const fn with_average_power(mut self, watts: f64) -> Self {
        self.average_power = Some(watts);
        self
    }

    /// Set the maximum power
    #[must_use]
    pub const fn with_max_power(mut self, watts: f64) -> Self {
        self.max_power = Some(watts);
        self
    }
}

/// A workout with its ordered laps, as consumed by interval comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDetail {
    /// Workout identifier
    pub workout_id: u64,
    /// Workout title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Workout date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Laps in recording order
    #[serde(default)]
    pub laps: Vec<Lap>,
}

impl WorkoutDetail {
    /// Create a workout detail with no title, date, or laps
    #[must_use]
    pub const fn new(workout_id: u64) -> Self {
        Self {
            workout_id,
            title: None,
            date: None,
            laps: Vec::new(),
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the date
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Replace the laps
    #[must_use]
    pub fn with_laps(mut self, laps: Vec<Lap>) -> Self {
        self.laps = laps;
        self
    }
}
