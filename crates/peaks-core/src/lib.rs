// ABOUTME: Core types and constants for the Peaks workout analytics MCP server
// ABOUTME: Foundation crate with error handling, workout and identity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Peaks Core
//!
//! Foundation crate providing shared types and constants for the Peaks MCP
//! server. Both the analytics crate and the server crate depend on it, so it
//! is kept free of I/O and async runtimes.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ToolError`
//! - **models**: Workout, lap, and account identity records
//! - **constants**: Protocol, service, and analysis defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`WorkoutDetail`, `Lap`, `UserIdentity`, ...)
pub mod models;
