// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Protocol, tool identifier, service, and analysis default constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Runtime-configurable values live in
//! the server crate's `config` module.

/// Protocol constants for MCP and JSON-RPC
pub mod protocol {
    /// JSON-RPC version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";
    /// MCP protocol revision we speak
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
}

/// Service identification
pub mod service_names {
    /// Name reported in MCP `initialize` and structured logs
    pub const PEAKS_MCP_SERVER: &str = "peaks-mcp-server";
    /// Upstream API name used in error messages
    pub const TRAININGPEAKS_API: &str = "TrainingPeaks";
}

/// MCP tool identifiers
pub mod tools {
    /// Current user profile
    pub const GET_USER: &str = "get_user";
    /// Athlete id of the current user
    pub const GET_ATHLETE_ID: &str = "get_athlete_id";
    /// Single workout summary
    pub const GET_WORKOUT: &str = "get_workout";
    /// Full workout details payload
    pub const GET_WORKOUT_DETAILS: &str = "get_workout_details";
    /// Training load over a date range
    pub const GET_FITNESS_DATA: &str = "get_fitness_data";
    /// Today's training load
    pub const GET_CURRENT_FITNESS: &str = "get_current_fitness";
    /// Records of one peak type
    pub const GET_PEAKS: &str = "get_peaks";
    /// Records of every peak type for a sport
    pub const GET_ALL_PEAKS: &str = "get_all_peaks";
    /// Records set in one workout
    pub const GET_WORKOUT_PEAKS: &str = "get_workout_peaks";
    /// Cycling power records
    pub const GET_POWER_PEAKS: &str = "get_power_peaks";
    /// Running pace records
    pub const GET_RUNNING_PEAKS: &str = "get_running_peaks";
    /// Best average power for target durations
    pub const GET_BEST_POWER: &str = "get_best_power";
    /// Lap comparison across workouts
    pub const COMPARE_INTERVALS: &str = "compare_intervals";
    /// Today's date in several formats
    pub const GET_CURRENT_DATE: &str = "get_current_date";
}

/// Defaults for the analytics core
pub mod analysis {
    /// Seconds a lap may deviate from the target duration and still match
    pub const DEFAULT_DURATION_TOLERANCE_SECS: f64 = 2.0;
    /// Placeholder used in warnings for workouts without a title
    pub const UNTITLED_WORKOUT: &str = "Untitled";
    /// Reported next to an unreachable best-power duration
    pub const DURATION_EXCEEDS_RECORDING: &str = "Duration exceeds recording length";
}

/// Performance management chart parameters
pub mod fitness {
    /// Days in the acute (fatigue) load average
    pub const ATL_CONSTANT_DAYS: u32 = 7;
    /// Days in the chronic (fitness) load average
    pub const CTL_CONSTANT_DAYS: u32 = 42;
}

/// Personal record queries
pub mod peaks {
    /// Peak types fetched at once when listing every type of a sport
    pub const MAX_CONCURRENT_PEAK_REQUESTS: usize = 4;
}
