// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Each submodule corresponds to a tool category with feature flag support.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `user` - account identity (`get_user`, `get_athlete_id`)
//! - `workouts` - workout summaries and detail metrics (`get_workout`, `get_workout_details`)
//! - `fitness` - training load (`get_fitness_data`, `get_current_fitness`)
//! - `peaks` - personal records (`get_peaks`, `get_all_peaks`, `get_workout_peaks`,
//!   `get_power_peaks`, `get_running_peaks`)
//! - `power` - best rolling power from recordings (`get_best_power`)
//! - `intervals` - lap comparison across workouts (`compare_intervals`)
//! - `datetime` - current date formatting (`get_current_date`)

#[cfg(feature = "tools-account")]
pub mod user;

#[cfg(feature = "tools-workouts")]
pub mod workouts;

#[cfg(feature = "tools-fitness")]
pub mod fitness;

#[cfg(feature = "tools-peaks")]
pub mod peaks;

#[cfg(feature = "tools-analytics")]
pub mod power;

#[cfg(feature = "tools-analytics")]
pub mod intervals;

#[cfg(feature = "tools-utility")]
pub mod datetime;
