// ABOUTME: Defines ToolExecutionContext which gives tools the provider, identity resolver, and defaults.
// ABOUTME: One context is built at startup and shared by every tool call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::AnalysisConfig;
use crate::identity::IdentityResolver;
use crate::providers::WorkoutDataProvider;

/// Context provided to every tool execution.
///
/// Cloning is cheap: the provider and resolver are behind `Arc`, so clones
/// share the same identity cache.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Workout data access
    pub provider: Arc<dyn WorkoutDataProvider>,
    /// Cached account identity
    pub identity: Arc<IdentityResolver>,
    /// Analysis defaults from configuration
    pub analysis: AnalysisConfig,
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
}

impl ToolExecutionContext {
    /// Create a context whose identity resolver fetches through `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn WorkoutDataProvider>) -> Self {
        let identity = Arc::new(IdentityResolver::new(Arc::clone(&provider)));
        Self::with_identity(provider, identity)
    }

    /// Create a context with an existing resolver
    #[must_use]
    pub fn with_identity(
        provider: Arc<dyn WorkoutDataProvider>,
        identity: Arc<IdentityResolver>,
    ) -> Self {
        Self {
            provider,
            identity,
            analysis: AnalysisConfig::default(),
            request_id: None,
        }
    }

    /// Set analysis defaults
    #[must_use]
    pub const fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("provider", &self.provider.name())
            .field("analysis", &self.analysis)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
