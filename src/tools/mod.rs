// ABOUTME: MCP tool layer with the tool trait, registry, execution context, and implementations
// ABOUTME: Tools are registered once at startup and executed by name from tools/call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! - [`traits`]: `McpTool` and `ToolCapabilities`
//! - [`registry`]: name to tool lookup and schema listing
//! - [`context`]: shared handles passed to every execution
//! - [`arguments`]: typed extraction of JSON arguments
//! - [`implementations`]: the tools themselves, grouped by category

/// Typed argument extraction helpers
pub mod arguments;
/// Execution context handed to tools
pub mod context;
/// Tool implementations by category
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool result type
pub mod result;
/// Tool trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
