// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! Every tool provides metadata (name, description, input schema), a set of
//! capability flags, and an async `execute`.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and logging
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs the resolved account identity
        const REQUIRES_IDENTITY = 0b0000_0001;
        /// Tool calls the upstream workout API
        const REQUIRES_PROVIDER = 0b0000_0010;
        /// Tool reads data
        const READS_DATA = 0b0000_0100;
        /// Tool performs analytics over fetched data
        const ANALYTICS = 0b0000_1000;
        /// Tool downloads and decodes device recordings
        const DECODES_RECORDINGS = 0b0001_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool calls the upstream API
    #[must_use]
    pub const fn requires_provider(self) -> bool {
        self.contains(Self::REQUIRES_PROVIDER)
    }

    /// Check if tool performs analytics
    #[must_use]
    pub const fn is_analytics(self) -> bool {
        self.contains(Self::ANALYTICS)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| name)
            .collect();

        if names.is_empty() {
            "none".to_owned()
        } else {
            names.join(", ").to_lowercase()
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are `Send + Sync` so the registry can share them across tasks, and
/// `name()` returns `&'static str` so lookups never allocate.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used in `tools/call` (e.g., `get_best_power`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned from `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for invalid arguments or upstream and decoding failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
