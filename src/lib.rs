// ABOUTME: Main library entry point for the Peaks MCP server
// ABOUTME: TrainingPeaks workout access and power analytics exposed as MCP tools over stdio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Peaks MCP Server
//!
//! A Model Context Protocol (MCP) server that lets an AI assistant read a
//! TrainingPeaks athlete's workouts and analyze their recorded power.
//!
//! ## Features
//!
//! - **Best power**: peak rolling-average power for arbitrary durations
//! - **Interval comparison**: laps lined up across workouts with filters and summaries
//! - **Training load and records**: daily CTL/ATL/TSB and power or pace personal records
//! - **Single-flight identity**: the account profile is fetched once and shared
//! - **MCP protocol**: line-delimited JSON-RPC 2.0 on stdin/stdout
//!
//! ## Architecture
//!
//! - **Providers**: `WorkoutDataProvider` and its TrainingPeaks HTTP implementation
//! - **Recording**: FIT decoding into a power series and laps
//! - **Tools**: `McpTool` implementations and the `ToolRegistry`
//! - **MCP**: request processing and the stdio transport
//! - **Config**: environment-only `ServerConfig`
//!
//! The analytics themselves live in the `peaks-intelligence` crate and the
//! shared errors, models, and constants in `peaks-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use peaks_mcp_server::config::environment::ServerConfig;
//! use peaks_mcp_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Workout detail assembly for lap comparison
pub mod details;

/// Unified error handling
pub mod errors;

/// Cached single-flight account identity
pub mod identity;

/// JSON-RPC 2.0 message types
pub mod jsonrpc;

/// Structured logging to stderr
pub mod logging;

/// Model Context Protocol server
pub mod mcp;

/// Workout data providers
pub mod providers;

/// FIT recording decoding
pub mod recording;

/// MCP tools and registry
pub mod tools;
