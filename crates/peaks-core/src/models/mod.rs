// ABOUTME: Core data models shared by the analytics crate and the MCP server
// ABOUTME: Re-exports workout, lap, identity, training load, and personal record models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Explicit records for the data that crosses the collaborator boundary.
//! Provider payloads are validated and mapped into these types where they
//! enter the system; the analytics functions only ever read them.
//!
//! - `WorkoutInfo`: summary of a single workout as reported by the API
//! - `WorkoutDetail` / `Lap`: the lap data consumed by interval comparison
//! - `UserIdentity`: the resolved account profile
//! - `FitnessMetrics`: daily training load (CTL/ATL/TSB)
//! - `PeakRecord` / `WorkoutPeaks`: ranked personal records

mod fitness;
mod peaks;
mod user;
mod workout;

pub use fitness::FitnessMetrics;
pub use peaks::{
    is_peak_type, PeakRecord, PeakSport, WorkoutPeaks, POWER_PEAK_TYPES, SPEED_PEAK_TYPES,
};
pub use user::UserIdentity;
pub use workout::{Lap, WorkoutDetail, WorkoutInfo};
