// ABOUTME: Current date tool with fixed regional layouts and a placeholder-based custom layout.
// ABOUTME: Implements get_current_date using the server's local clock.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use peaks_core::constants::tools::GET_CURRENT_DATE;
use serde_json::{json, Value};

use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::arguments::ToolArgs;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const DEFAULT_CUSTOM_FORMAT: &str = "YYYY-MM-DD";

/// Output layout for `get_current_date`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `MM/DD/YYYY`
    Us,
    /// `DD/MM/YYYY`
    Eu,
    /// Caller-supplied pattern with `YYYY`, `MM` and `DD` placeholders
    Custom,
}

impl DateFormat {
    const NAMES: &'static [&'static str] = &["iso", "us", "eu", "custom"];
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iso" => Ok(Self::Iso),
            "us" => Ok(Self::Us),
            "eu" => Ok(Self::Eu),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown format '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Render `date` in the requested layout
///
/// Each custom placeholder is substituted once, first occurrence only.
#[must_use]
pub fn format_date(date: NaiveDate, format: DateFormat, custom: Option<&str>) -> String {
    let year = date.year();
    let month = date.month();
    let day = date.day();

    match format {
        DateFormat::Iso => format!("{year:04}-{month:02}-{day:02}"),
        DateFormat::Us => format!("{month:02}/{day:02}/{year:04}"),
        DateFormat::Eu => format!("{day:02}/{month:02}/{year:04}"),
        DateFormat::Custom => custom
            .unwrap_or(DEFAULT_CUSTOM_FORMAT)
            .replacen("YYYY", &year.to_string(), 1)
            .replacen("MM", &format!("{month:02}"), 1)
            .replacen("DD", &format!("{day:02}"), 1),
    }
}

/// Tool returning today's date
pub struct GetCurrentDateTool;

#[async_trait]
impl McpTool for GetCurrentDateTool {
    fn name(&self) -> &'static str {
        GET_CURRENT_DATE
    }

    fn description(&self) -> &'static str {
        "Get the current date in ISO, US, EU, or a custom format"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "format".to_owned(),
            PropertySchema::string_enum(DateFormat::NAMES, "Output format (default: iso)"),
        );
        properties.insert(
            "customFormat".to_owned(),
            PropertySchema::scalar(
                "string",
                "Custom format string using YYYY, MM, DD placeholders",
            ),
        );
        JsonSchema {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: None,
        }
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::empty()
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let view = ToolArgs::new(GET_CURRENT_DATE, &args);
        let format = view
            .optional_str("format")?
            .map(DateFormat::from_str)
            .transpose()
            .map_err(|reason| ToolError::invalid_parameter(GET_CURRENT_DATE, "format", reason))?
            .unwrap_or_default();
        let custom = view.optional_str("customFormat")?;

        let today = Local::now().date_naive();
        Ok(ToolResult::ok(json!({ "date": format_date(today, format, custom) })))
    }
}

/// Create all datetime tools for registration
#[must_use]
pub fn create_datetime_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(GetCurrentDateTool)]
}
