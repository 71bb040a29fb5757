// ABOUTME: Stdio MCP server binary exposing TrainingPeaks workout analytics as tools
// ABOUTME: Loads configuration from the environment, wires the provider and tools, and serves stdin/stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Peaks MCP Server Binary
//!
//! Intended to be launched by an MCP client. Configuration comes from the
//! environment (`TRAININGPEAKS_ACCESS_TOKEN` is required); logs go to stderr.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use peaks_mcp_server::{
    config::environment::ServerConfig,
    logging::{LogFormat, LoggingConfig},
    mcp::{McpRequestProcessor, StdioTransport},
    providers::{TrainingPeaksProvider, WorkoutDataProvider},
    tools::{ToolExecutionContext, ToolRegistry},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "peaks-mcp-server")]
#[command(about = "Peaks MCP Server - TrainingPeaks workout analytics over MCP stdio")]
pub struct Args {
    /// Override the TrainingPeaks API base URL
    #[arg(long)]
    api_base_url: Option<String>,

    /// Log output format: json, pretty, or compact
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging_config = LoggingConfig::from_env();
    if let Some(format) = &args.log_format {
        logging_config = logging_config.with_format(LogFormat::from_str_or_default(format));
    }
    logging_config.init()?;

    let mut config = ServerConfig::from_env().inspect_err(|e| {
        error!("Configuration error: {}", e);
    })?;
    if let Some(base_url) = &args.api_base_url {
        config = config.with_api_base_url(base_url);
        config.validate()?;
    }

    info!("Starting Peaks MCP Server");
    info!("{}", config.summary());

    let provider: Arc<dyn WorkoutDataProvider> =
        Arc::new(TrainingPeaksProvider::new(config.trainingpeaks.clone()));
    let context = ToolExecutionContext::new(provider).with_analysis(config.analysis);
    let registry = Arc::new(ToolRegistry::with_builtin_tools());
    info!("Tools available: {}", registry.tool_names().join(", "));

    let processor = Arc::new(McpRequestProcessor::new(registry, context));
    if let Err(e) = StdioTransport::new(processor).run().await {
        error!("Stdio transport failed: {}", e);
        return Err(e.into());
    }

    info!("Peaks MCP Server stopped");
    Ok(())
}
