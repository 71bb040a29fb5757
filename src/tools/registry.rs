// ABOUTME: Central registry for MCP tools with lookup, schema listing, and execution.
// ABOUTME: Built-in tool categories are registered according to Cargo feature flags.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Built once at startup and then used immutably; tools are `Arc`-wrapped so
//! lookups can hand them to concurrent requests.
//!
//! ```
//! use peaks_mcp_server::tools::registry::ToolRegistry;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register_builtin_tools();
//! assert!(registry.contains("get_current_date"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Central registry for MCP tools.
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Tool categories for organization
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Registry with every built-in tool enabled by feature flags
    #[must_use]
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_tools();
        registry
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        true
    }

    /// Register a tool and categorize it
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) {
        let name = tool.name().to_owned();
        if self.register(tool) {
            self.categories
                .entry(category.to_owned())
                .or_default()
                .push(name);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tool names in a category
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Sorted names of the tools whose capabilities satisfy `predicate`
    #[must_use]
    pub fn tool_names_where(&self, predicate: impl Fn(ToolCapabilities) -> bool) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tools
            .values()
            .filter(|tool| predicate(tool.capabilities()))
            .map(|tool| tool.name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Schemas for `tools/list`, sorted by name so the listing is stable
    #[must_use]
    pub fn all_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its execution fails
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        tool.execute(args, context).await
    }

    /// Register all built-in tools based on feature flags
    pub fn register_builtin_tools(&mut self) {
        #[cfg(feature = "tools-account")]
        {
            use super::implementations::user::create_account_tools;
            self.register_category("account", create_account_tools());
        }

        #[cfg(feature = "tools-workouts")]
        {
            use super::implementations::workouts::create_workout_tools;
            self.register_category("workouts", create_workout_tools());
        }

        #[cfg(feature = "tools-fitness")]
        {
            use super::implementations::fitness::create_fitness_tools;
            self.register_category("fitness", create_fitness_tools());
        }

        #[cfg(feature = "tools-peaks")]
        {
            use super::implementations::peaks::create_peaks_tools;
            self.register_category("peaks", create_peaks_tools());
        }

        #[cfg(feature = "tools-analytics")]
        {
            use super::implementations::intervals::create_interval_tools;
            use super::implementations::power::create_power_tools;
            self.register_category("analytics", create_power_tools());
            self.register_category("analytics", create_interval_tools());
        }

        #[cfg(feature = "tools-utility")]
        {
            use super::implementations::datetime::create_datetime_tools;
            self.register_category("utility", create_datetime_tools());
        }

        info!(
            analytics = self.tool_names_where(ToolCapabilities::is_analytics).len(),
            offline = self.tool_names_where(|caps| !caps.requires_provider()).len(),
            "Registered {} built-in tools",
            self.len()
        );
    }

    fn register_category(&mut self, category: &str, tools: Vec<Box<dyn McpTool>>) {
        debug!(
            "Registering {category} tools (registry has {} tools)",
            self.tools.len()
        );
        for tool in tools {
            self.register_with_category(Arc::from(tool), category);
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tool_names())
            .finish_non_exhaustive()
    }
}
