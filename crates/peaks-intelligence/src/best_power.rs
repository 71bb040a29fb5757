// ABOUTME: Best rolling-average power extraction over a per-second power series
// ABOUTME: O(n) add-one/drop-one window scan with earliest-window tie-breaking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Best Power
//!
//! For a target duration `d`, the best power is the highest mean over every
//! contiguous window of exactly `d` samples. Samples are one per second, so a
//! window of `d` samples covers `d` seconds of riding.
//!
//! ## Rounding
//!
//! Averages are rounded half away from zero (`f64::round`). Power is never
//! negative, so this is the same as rounding half up: a window summing to 5
//! over 2 seconds reports 3 watts.
//!
//! ## Tie-breaking
//!
//! Only a strictly greater window sum replaces the current best, so when
//! several windows share the maximum the earliest one is reported.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-second power readings for one workout recording
///
/// The series is gap-free: index is the offset in seconds and a missing
/// reading is stored as zero rather than skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerSeries {
    samples: Vec<u32>,
}

impl PowerSeries {
    /// Build a series from optional readings, treating `None` as zero watts
    pub fn from_readings<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = Option<u32>>,
    {
        Self {
            samples: readings
                .into_iter()
                .map(|reading| reading.unwrap_or(0))
                .collect(),
        }
    }

    /// Number of samples (seconds) in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether any sample carries power above zero
    #[must_use]
    pub fn has_signal(&self) -> bool {
        self.samples.iter().any(|&watts| watts > 0)
    }

    /// Raw samples in offset order
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.samples
    }

    /// Best window for a single duration
    #[must_use]
    pub fn best_window(&self, duration_seconds: u32) -> WindowResult {
        compute_best_window(&self.samples, duration_seconds)
    }

    /// Best windows for a set of durations, ascending by duration
    #[must_use]
    pub fn best_power_report(&self, durations: &[u32]) -> Vec<WindowResult> {
        get_best_power_report(&self.samples, durations)
    }
}

impl From<Vec<u32>> for PowerSeries {
    fn from(samples: Vec<u32>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Option<u32>> for PowerSeries {
    fn from_iter<T: IntoIterator<Item = Option<u32>>>(iter: T) -> Self {
        Self::from_readings(iter)
    }
}

/// Best average power found for one target duration
///
/// Both `best_average_power` and `start_offset_seconds` are `None` (serialized
/// as `null`) when the duration is longer than the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowResult {
    /// Target window length in seconds
    pub duration_seconds: u32,
    /// Highest rounded mean power over any window of that length
    pub best_average_power: Option<u32>,
    /// Offset of the first sample of the winning window
    pub start_offset_seconds: Option<usize>,
}

impl WindowResult {
    /// Result for a duration the recording cannot cover
    #[must_use]
    pub const fn unreachable(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            best_average_power: None,
            start_offset_seconds: None,
        }
    }

    /// Whether the duration fit inside the recording
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.best_average_power.is_some()
    }
}

/// Compute the best rolling-average power for one duration
///
/// Runs a single pass with a running window sum: each step adds the sample
/// entering the window and drops the one leaving it. A zero duration, or one
/// longer than the series, yields [`WindowResult::unreachable`].
#[must_use]
pub fn compute_best_window(series: &[u32], duration_seconds: u32) -> WindowResult {
    let window = duration_seconds as usize;
    if window == 0 || window > series.len() {
        return WindowResult::unreachable(duration_seconds);
    }

    let mut window_sum: u64 = series[..window].iter().map(|&watts| u64::from(watts)).sum();
    let mut best_sum = window_sum;
    let mut best_start = 0;

    for end in window..series.len() {
        window_sum += u64::from(series[end]);
        window_sum -= u64::from(series[end - window]);
        if window_sum > best_sum {
            best_sum = window_sum;
            best_start = end - window + 1;
        }
    }

    let average = (best_sum as f64 / f64::from(duration_seconds)).round() as u32;

    WindowResult {
        duration_seconds,
        best_average_power: Some(average),
        start_offset_seconds: Some(best_start),
    }
}

/// Compute best windows for a set of durations
///
/// The result is sorted ascending by duration whatever the input order, and a
/// duration requested more than once appears once.
#[must_use]
pub fn get_best_power_report(series: &[u32], durations: &[u32]) -> Vec<WindowResult> {
    let unique: Vec<u32> = durations
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    debug!(
        samples = series.len(),
        durations = unique.len(),
        "Computing best power report"
    );

    unique
        .par_iter()
        .map(|&duration| compute_best_window(series, duration))
        .collect()
}
