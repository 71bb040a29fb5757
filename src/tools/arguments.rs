// ABOUTME: Typed extraction of tool arguments from the JSON arguments object
// ABOUTME: Produces ToolError values naming the tool and parameter on bad input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::ToolError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Borrowed view over a tool's arguments object
#[derive(Debug, Clone, Copy)]
pub struct ToolArgs<'a> {
    tool: &'static str,
    args: &'a Value,
}

impl<'a> ToolArgs<'a> {
    /// Wrap the arguments passed to `tool`
    #[must_use]
    pub const fn new(tool: &'static str, args: &'a Value) -> Self {
        Self { tool, args }
    }

    /// Present and not `null`
    fn field(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|value| !value.is_null())
    }

    fn invalid(&self, name: &str, reason: &str) -> ToolError {
        ToolError::invalid_parameter(self.tool, name, reason)
    }

    /// Required non-negative integer
    ///
    /// # Errors
    ///
    /// Missing, or not a non-negative integer
    pub fn required_u64(&self, name: &str) -> Result<u64, ToolError> {
        let value = self
            .field(name)
            .ok_or_else(|| ToolError::missing_parameter(self.tool, name))?;
        value
            .as_u64()
            .ok_or_else(|| self.invalid(name, "must be a non-negative integer"))
    }

    /// Required non-empty array of non-negative integers
    ///
    /// # Errors
    ///
    /// Missing, not an array, empty, or holding a non-integer element
    pub fn required_u64_list(&self, name: &str) -> Result<Vec<u64>, ToolError> {
        let items = self
            .field(name)
            .ok_or_else(|| ToolError::missing_parameter(self.tool, name))?
            .as_array()
            .ok_or_else(|| self.invalid(name, "must be an array of integers"))?;

        if items.is_empty() {
            return Err(self.invalid(name, "must contain at least one value"));
        }

        items
            .iter()
            .map(|item| {
                item.as_u64()
                    .ok_or_else(|| self.invalid(name, "must contain only non-negative integers"))
            })
            .collect()
    }

    /// Optional finite number
    ///
    /// # Errors
    ///
    /// Present but not a finite number
    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>, ToolError> {
        self.field(name)
            .map(|value| {
                value
                    .as_f64()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| self.invalid(name, "must be a number"))
            })
            .transpose()
    }

    /// Optional positive integer
    ///
    /// # Errors
    ///
    /// Present but not an integer of at least 1
    pub fn optional_positive_u64(&self, name: &str) -> Result<Option<u64>, ToolError> {
        self.field(name)
            .map(|value| {
                value
                    .as_u64()
                    .filter(|number| *number > 0)
                    .ok_or_else(|| self.invalid(name, "must be a positive integer"))
            })
            .transpose()
    }

    /// Required string
    ///
    /// # Errors
    ///
    /// Missing, or not a string
    pub fn required_str(&self, name: &str) -> Result<&'a str, ToolError> {
        self.optional_str(name)?
            .ok_or_else(|| ToolError::missing_parameter(self.tool, name))
    }

    /// Required `YYYY-MM-DD` date
    ///
    /// # Errors
    ///
    /// Missing, or not a valid calendar date
    pub fn required_date(&self, name: &str) -> Result<NaiveDate, ToolError> {
        self.optional_date(name)?
            .ok_or_else(|| ToolError::missing_parameter(self.tool, name))
    }

    /// Optional `YYYY-MM-DD` date
    ///
    /// # Errors
    ///
    /// Present but not a valid calendar date
    pub fn optional_date(&self, name: &str) -> Result<Option<NaiveDate>, ToolError> {
        self.optional_str(name)?
            .map(|text| {
                NaiveDate::parse_from_str(text, DATE_FORMAT)
                    .map_err(|_| self.invalid(name, "must be a date in YYYY-MM-DD format"))
            })
            .transpose()
    }

    /// Optional string
    ///
    /// # Errors
    ///
    /// Present but not a string
    pub fn optional_str(&self, name: &str) -> Result<Option<&'a str>, ToolError> {
        self.field(name)
            .map(|value| value.as_str().ok_or_else(|| self.invalid(name, "must be a string")))
            .transpose()
    }
}
