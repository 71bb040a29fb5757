// ABOUTME: Personal record (peak) models for power and pace bests
// ABOUTME: PeakSport with its peak types, PeakRecord, and per-workout WorkoutPeaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Power peak types tracked for cycling
pub const POWER_PEAK_TYPES: [&str; 12] = [
    "power5sec",
    "power10sec",
    "power20sec",
    "power30sec",
    "power1min",
    "power2min",
    "power5min",
    "power10min",
    "power20min",
    "power30min",
    "power60min",
    "power90min",
];

/// Pace peak types tracked for running
pub const SPEED_PEAK_TYPES: [&str; 14] = [
    "speed400m",
    "speed800m",
    "speed1K",
    "speed1mi",
    "speed2K",
    "speed5K",
    "speed10K",
    "speed15K",
    "speed20K",
    "speedHM",
    "speed25K",
    "speed30K",
    "speedM",
    "speed50K",
];

/// Sport a personal record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeakSport {
    /// Cycling, power peaks
    Bike,
    /// Running, pace peaks
    Run,
}

impl PeakSport {
    /// All accepted sport names
    pub const NAMES: [&'static str; 2] = ["Bike", "Run"];

    /// Path segment used by the personal record endpoints
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "Bike",
            Self::Run => "Run",
        }
    }

    /// Peak types recorded for this sport
    #[must_use]
    pub const fn peak_types(self) -> &'static [&'static str] {
        match self {
            Self::Bike => &POWER_PEAK_TYPES,
            Self::Run => &SPEED_PEAK_TYPES,
        }
    }
}

impl fmt::Display for PeakSport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeakSport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bike" => Ok(Self::Bike),
            "Run" => Ok(Self::Run),
            other => Err(format!(
                "unknown sport '{other}', expected one of {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Whether `name` is a known power or pace peak type
#[must_use]
pub fn is_peak_type(name: &str) -> bool {
    POWER_PEAK_TYPES.contains(&name) || SPEED_PEAK_TYPES.contains(&name)
}

/// One ranked personal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakRecord {
    /// Peak type, e.g. `power5min`
    #[serde(rename = "type")]
    pub peak_type: String,
    /// Watts for power peaks, metres per second for pace peaks
    pub value: f64,
    /// Workout the record was set in
    pub workout_id: u64,
    /// Day of that workout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_date: Option<String>,
    /// Title of that workout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_title: Option<String>,
    /// 1 is the all-time best within the queried range
    pub rank: u32,
    /// Event name, when the workout was a race
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

/// Records set during one workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPeaks {
    /// Workout identifier
    pub workout_id: u64,
    /// Number of records set
    #[serde(default)]
    pub personal_record_count: u32,
    /// The records themselves
    #[serde(default)]
    pub personal_records: Vec<PeakRecord>,
}
