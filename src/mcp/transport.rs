// ABOUTME: Line-delimited JSON-RPC transport over stdin/stdout
// ABOUTME: Dispatches each message concurrently and serializes writes through a shared writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Stdio Transport
//!
//! One JSON-RPC message per line. Requests are handled on their own tasks, so
//! responses can be written out of order; clients correlate them by `id`.
//! stdout carries nothing but protocol messages.

use std::sync::Arc;

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::errors::AppResult;
use crate::jsonrpc::JsonRpcResponse;
use crate::mcp::mcp_request_processor::McpRequestProcessor;

/// Stdio transport for MCP communication
pub struct StdioTransport {
    processor: Arc<McpRequestProcessor>,
}

impl StdioTransport {
    /// Create a transport serving `processor`
    #[must_use]
    pub const fn new(processor: Arc<McpRequestProcessor>) -> Self {
        Self { processor }
    }

    /// Serve stdin/stdout until stdin closes
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(io::stdin()), io::stdout()).await
    }

    /// Serve any line-oriented reader and writer until the reader is exhausted
    ///
    /// Waits for every in-flight request before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading a line fails
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let writer = Arc::new(Mutex::new(writer));
        let mut lines = reader.lines();
        let mut in_flight = JoinSet::new();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let processor = Arc::clone(&self.processor);
            let writer = Arc::clone(&writer);
            in_flight.spawn(async move {
                if let Some(response) = processor.handle_message(&line).await {
                    Self::write_response(&writer, &response).await;
                }
            });

            // Reap finished tasks so the set does not grow with the session
            while let Some(joined) = in_flight.try_join_next() {
                if let Err(e) = joined {
                    error!("MCP request task failed: {}", e);
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!("MCP request task failed: {}", e);
            }
        }
        info!("stdin closed, MCP stdio transport stopping");
        Ok(())
    }

    async fn write_response<W>(writer: &Mutex<W>, response: &JsonRpcResponse)
    where
        W: AsyncWrite + Unpin,
    {
        let payload = match serde_json::to_string(response) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize MCP response: {}", e);
                return;
            }
        };

        let mut writer = writer.lock().await;
        let written = async {
            writer.write_all(payload.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await
        }
        .await;
        if let Err(e) = written {
            warn!("Failed to write MCP response: {}", e);
        }
    }
}
