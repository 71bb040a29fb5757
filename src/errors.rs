// ABOUTME: Re-export of the unified error types from peaks-core
// ABOUTME: Lets server modules import AppError and friends through crate::errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `peaks-core` so the analytics crate can share them.
//! This module re-exports them under the server crate's `errors` path.

pub use peaks_core::errors::{AppError, AppResult, ErrorCode, ErrorContext, ToolError};
