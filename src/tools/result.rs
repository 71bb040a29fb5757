// ABOUTME: Defines ToolResult, the structured value returned by tool execution.
// ABOUTME: Bridges tool output to the MCP tools/call content format.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use serde_json::Value;

use crate::mcp::schema::ToolResponse;

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Create a result from a serializable value
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value cannot be converted to JSON
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Render as a `tools/call` response with pretty-printed JSON text
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        let text = match self.content {
            Value::String(text) => text,
            other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
        };
        ToolResponse::text(text, self.is_error)
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}
