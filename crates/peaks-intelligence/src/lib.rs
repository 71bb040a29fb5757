// ABOUTME: Workout analytics engine for the Peaks MCP server
// ABOUTME: Pure, synchronous algorithms over already-fetched workout data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Peaks Intelligence
//!
//! Analytics over data that has already been fetched and decoded. Nothing in
//! this crate performs I/O or holds shared mutable state, so every function is
//! safe to call from any number of concurrent tasks.
//!
//! - [`best_power`]: maximum rolling-average power per target duration
//! - [`interval_comparison`]: lap filtering, ordinal alignment, and per-workout summaries

/// Best rolling-average power over a per-second power series
pub mod best_power;

/// Cross-workout lap filtering, alignment, and summary statistics
pub mod interval_comparison;

pub use best_power::{compute_best_window, get_best_power_report, PowerSeries, WindowResult};
pub use interval_comparison::{
    compare, AlignmentMode, ComparisonResult, FilterCriteria, LapRow, LapValue, WorkoutSummary,
};
