// ABOUTME: Workout data provider integrations for the Peaks MCP server
// ABOUTME: Defines the data-access trait and the TrainingPeaks HTTP implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data access collaborators
//!
//! Tools never talk HTTP directly. They go through [`WorkoutDataProvider`],
//! which keeps them testable against an in-memory implementation.

/// Provider trait and identity fetcher bridge
pub mod core;

/// TrainingPeaks REST API client
pub mod trainingpeaks;

pub use self::core::{DateRange, WorkoutDataProvider};
pub use trainingpeaks::TrainingPeaksProvider;
