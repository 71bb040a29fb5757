// ABOUTME: MCP request processing: validation, method routing, and tool execution
// ABOUTME: Turns tool failures into isError results and protocol failures into JSON-RPC errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use peaks_core::constants::protocol::JSONRPC_VERSION;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::logging::AppLogger;
use crate::mcp::protocol::ProtocolHandler;
use crate::mcp::schema::{ToolCall, ToolResponse};
use crate::tools::context::ToolExecutionContext;
use crate::tools::registry::ToolRegistry;

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    registry: Arc<ToolRegistry>,
    context: ToolExecutionContext,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(registry: Arc<ToolRegistry>, context: ToolExecutionContext) -> Self {
        Self { registry, context }
    }

    /// Tools available to this processor
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw line from the transport
    ///
    /// Unparseable JSON yields a `-32700` response with a `null` id; a JSON
    /// value that is not a request yields `-32600`.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        let id = message.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Malformed JSON-RPC request: {}", e);
                Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    "Invalid Request",
                ))
            }
        }
    }

    /// Handle an MCP request and return a response
    ///
    /// Notifications and requests without an id get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        debug!(method = %request.method, id = ?request.id, "Processing MCP request");

        if request.method.starts_with("notifications/") {
            debug!("Received notification: {}", request.method);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = match Self::validate_request(&request) {
            Ok(()) => self.process_request(&request).await,
            Err(e) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_REQUEST,
                e.message,
            ),
        };

        Self::log_completion("request", start_time);
        request.id.is_some().then_some(response)
    }

    async fn process_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => ProtocolHandler::handle_initialize(request),
            "ping" => ProtocolHandler::handle_ping(request),
            "tools/list" => ProtocolHandler::handle_tools_list(request, &self.registry),
            "tools/call" => self.handle_tools_call(request).await,
            _ => ProtocolHandler::handle_unknown_method(request),
        }
    }

    /// Validate MCP request format and required fields
    fn validate_request(request: &JsonRpcRequest) -> AppResult<()> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(AppError::invalid_input(format!(
                "Invalid JSON-RPC version: got '{}', expected '{}'",
                request.jsonrpc, JSONRPC_VERSION
            )));
        }

        if request.method.is_empty() {
            return Err(AppError::invalid_input("Missing method"));
        }

        Ok(())
    }

    /// Handle tools/call request
    ///
    /// Protocol problems (missing params, unknown tool) are JSON-RPC errors;
    /// anything the tool itself reports comes back as an `isError` result.
    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params.clone() else {
            return ProtocolHandler::invalid_params(
                request.id.clone(),
                "Missing parameters for tools/call",
            );
        };
        let call: ToolCall = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                return ProtocolHandler::invalid_params(
                    request.id.clone(),
                    format!("Invalid tools/call parameters: {e}"),
                );
            }
        };
        if !self.registry.contains(&call.name) {
            return ProtocolHandler::invalid_params(
                request.id.clone(),
                format!("Unknown tool: {}", call.name),
            );
        }

        let arguments = call.arguments.unwrap_or_else(|| json!({}));
        let context = match &request.id {
            Some(id) => self.context.clone().with_request_id(id.clone()),
            None => self.context.clone(),
        };

        let start_time = Instant::now();
        let outcome = self.registry.execute(&call.name, arguments, &context).await;
        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

        let tool_response = match outcome {
            Ok(result) => {
                AppLogger::log_mcp_tool_call(&call.name, !result.is_error, duration_ms);
                result.into_response()
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                AppLogger::log_mcp_tool_call(&call.name, false, duration_ms);
                ToolResponse::text(e.message, true)
            }
        };

        match serde_json::to_value(&tool_response) {
            Ok(result) => JsonRpcResponse::success(request.id.clone(), result),
            Err(e) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                format!("Internal error: {e}"),
            ),
        }
    }

    fn log_completion(kind: &str, start_time: Instant) {
        debug!(
            duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            "MCP {} completed", kind
        );
    }
}
