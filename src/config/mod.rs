// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for the TrainingPeaks API and analysis defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Peaks MCP server
//!
//! All settings come from environment variables; there is no config file.

/// Environment and server configuration
pub mod environment;

pub use environment::{AnalysisConfig, Environment, ServerConfig, TrainingPeaksApiConfig};
