// ABOUTME: MCP protocol message handlers for core protocol operations
// ABOUTME: Handles initialize, ping, and tools/list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Protocol Handlers
//!
//! Stateless handlers for the protocol methods that never touch the
//! TrainingPeaks API.

use peaks_core::constants::protocol::MCP_PROTOCOL_VERSION;
use peaks_core::constants::service_names::PEAKS_MCP_SERVER;
use serde_json::{json, Value};
use tracing::debug;

use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::schema::InitializeResponse;
use crate::tools::registry::ToolRegistry;

/// Server version reported in `initialize`
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP protocol handlers
pub struct ProtocolHandler;

impl ProtocolHandler {
    /// Handle initialize request
    #[must_use]
    pub fn handle_initialize(request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling initialize request");
        let init_response = InitializeResponse::new(
            MCP_PROTOCOL_VERSION.to_owned(),
            PEAKS_MCP_SERVER.to_owned(),
            SERVER_VERSION.to_owned(),
        );

        match serde_json::to_value(&init_response) {
            Ok(result) => JsonRpcResponse::success(request.id.clone(), result),
            Err(_) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                "Internal error",
            ),
        }
    }

    /// Handle ping request
    #[must_use]
    pub fn handle_ping(request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), json!({}))
    }

    /// Handle tools list request
    #[must_use]
    pub fn handle_tools_list(request: &JsonRpcRequest, registry: &ToolRegistry) -> JsonRpcResponse {
        debug!("Handling tools/list request");
        let tools = registry.all_schemas();
        match serde_json::to_value(&tools) {
            Ok(tools) => JsonRpcResponse::success(request.id.clone(), json!({ "tools": tools })),
            Err(_) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                "Internal error",
            ),
        }
    }

    /// Handle a method this server does not implement
    #[must_use]
    pub fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )
    }

    /// Response for a request whose params could not be used
    #[must_use]
    pub fn invalid_params(id: Option<Value>, message: impl Into<String>) -> JsonRpcResponse {
        JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, message)
    }
}
