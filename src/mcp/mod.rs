// ABOUTME: Model Context Protocol (MCP) implementation for AI assistant integration
// ABOUTME: Protocol handlers, request processing, tool schemas, and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod mcp_request_processor;
pub mod protocol;
pub mod schema;
pub mod transport;

pub use mcp_request_processor::McpRequestProcessor;
pub use transport::StdioTransport;
