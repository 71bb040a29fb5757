// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Tool schemas, initialize handshake payloads, and tools/call content blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP Protocol Schema Definitions
//!
//! Typed payloads for the parts of the Model Context Protocol this server
//! speaks, so responses are built from structs rather than ad-hoc JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Description shown to the client
    pub description: String,
    /// JSON Schema of the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `"object"` for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required argument names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema with the given properties, `required` listed by name
    #[must_use]
    pub fn object(properties: HashMap<String, PropertySchema>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: (!required.is_empty())
                .then(|| required.iter().map(|&name| name.to_owned()).collect()),
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Property description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element schema for arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    /// Allowed values for string enums
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    /// Scalar property of the given type
    #[must_use]
    pub fn scalar(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
            items: None,
            enum_values: None,
        }
    }

    /// Array property with elements of the given type
    #[must_use]
    pub fn array_of(item_type: &str, description: &str) -> Self {
        Self {
            property_type: "array".to_owned(),
            description: Some(description.to_owned()),
            items: Some(Box::new(Self {
                property_type: item_type.to_owned(),
                description: None,
                items: None,
                enum_values: None,
            })),
            enum_values: None,
        }
    }

    /// String property restricted to the given values
    #[must_use]
    pub fn string_enum(values: &[&str], description: &str) -> Self {
        Self {
            property_type: "string".to_owned(),
            description: Some(description.to_owned()),
            items: None,
            enum_values: Some(values.iter().map(|&v| v.to_owned()).collect()),
        }
    }
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool to execute
    pub name: String,
    /// Arguments object, absent means `{}`
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result of a `tools/call` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Content blocks
    pub content: Vec<Content>,
    /// Whether the tool failed
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Single text block response
    #[must_use]
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error,
        }
    }
}

/// Content types for MCP messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text block
    #[serde(rename = "text")]
    Text {
        /// Text payload
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server emits `notifications/tools/list_changed`
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Complete MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated protocol revision
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identification
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Supported capabilities
    pub capabilities: ServerCapabilities,
    /// Usage hint for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Create a new initialize response with current server configuration
    #[must_use]
    pub fn new(protocol_version: String, server_name: String, server_version: String) -> Self {
        Self {
            protocol_version,
            server_info: ServerInfo {
                name: server_name,
                version: server_version,
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some(
                "This server exposes TrainingPeaks workouts and power analytics. Use `get_workout` for a summary, `get_best_power` for peak power over target durations, and `compare_intervals` to line up laps across workouts.".into(),
            ),
        }
    }
}
