// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses TrainingPeaks API credentials, timeouts, and analysis defaults from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `TRAININGPEAKS_ACCESS_TOKEN` | required |
//! | `TRAININGPEAKS_API_BASE_URL` | `https://tpapi.trainingpeaks.com` |
//! | `TRAININGPEAKS_HTTP_TIMEOUT_SECS` | `30` |
//! | `ENVIRONMENT` | `development` |
//! | `DEFAULT_DURATION_TOLERANCE_SECS` | `2` |

use std::env;
use std::fmt;
use std::str::FromStr;

use peaks_core::constants::analysis::DEFAULT_DURATION_TOLERANCE_SECS;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Bearer token for the TrainingPeaks API
pub const ACCESS_TOKEN_VAR: &str = "TRAININGPEAKS_ACCESS_TOKEN";
/// API base URL override
pub const API_BASE_URL_VAR: &str = "TRAININGPEAKS_API_BASE_URL";
/// HTTP request timeout in seconds
pub const HTTP_TIMEOUT_VAR: &str = "TRAININGPEAKS_HTTP_TIMEOUT_SECS";
/// Deployment environment
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
/// Default lap duration tolerance for interval comparison
pub const DURATION_TOLERANCE_VAR: &str = "DEFAULT_DURATION_TOLERANCE_SECS";

/// Production TrainingPeaks API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://tpapi.trainingpeaks.com";
/// Default HTTP timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment type for logging and diagnostics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Connection settings for the TrainingPeaks API
#[derive(Clone, Serialize, Deserialize)]
pub struct TrainingPeaksApiConfig {
    /// Bearer token sent on every request
    pub access_token: String,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for TrainingPeaksApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingPeaksApiConfig")
            .field("access_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Defaults applied by the analysis tools
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Lap duration tolerance used when `compare_intervals` gets none
    pub default_duration_tolerance_secs: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_duration_tolerance_secs: DEFAULT_DURATION_TOLERANCE_SECS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// TrainingPeaks API connection
    pub trainingpeaks: TrainingPeaksApiConfig,
    /// Analysis defaults
    pub analysis: AnalysisConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the access token is unset or blank, and
    /// `ConfigInvalid` when a numeric setting does not parse or is negative.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let access_token = env::var(ACCESS_TOKEN_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!("{ACCESS_TOKEN_VAR} must be set"),
                )
            })?;

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(ENVIRONMENT_VAR, "development")),
            trainingpeaks: TrainingPeaksApiConfig {
                access_token,
                base_url: normalize_base_url(&env_var_or(API_BASE_URL_VAR, DEFAULT_API_BASE_URL)),
                timeout_secs: parse_env(HTTP_TIMEOUT_VAR, DEFAULT_HTTP_TIMEOUT_SECS)?,
            },
            analysis: AnalysisConfig {
                default_duration_tolerance_secs: parse_env(
                    DURATION_TOLERANCE_VAR,
                    DEFAULT_DURATION_TOLERANCE_SECS,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build a configuration for a token and base URL, with default settings
    #[must_use]
    pub fn new(access_token: impl Into<String>, base_url: &str) -> Self {
        Self {
            environment: Environment::default(),
            trainingpeaks: TrainingPeaksApiConfig {
                access_token: access_token.into(),
                base_url: normalize_base_url(base_url),
                timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            },
            analysis: AnalysisConfig::default(),
        }
    }

    /// Override the API base URL (used by the `--api-base-url` flag)
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        self.trainingpeaks.base_url = normalize_base_url(base_url);
        self
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero timeout, a negative tolerance, or a
    /// base URL that is not http(s)
    pub fn validate(&self) -> AppResult<()> {
        if self.trainingpeaks.timeout_secs == 0 {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{HTTP_TIMEOUT_VAR} must be greater than zero"),
            ));
        }

        let tolerance = self.analysis.default_duration_tolerance_secs;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{DURATION_TOLERANCE_VAR} must be a non-negative number"),
            ));
        }

        let base_url = &self.trainingpeaks.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{API_BASE_URL_VAR} must be an http(s) URL, got '{base_url}'"),
            ));
        }

        if self.environment.is_production() && base_url.starts_with("http://") {
            warn!("Production environment is using a plain-HTTP API base URL");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Peaks MCP Server Configuration:\n\
             - Environment: {}\n\
             - API Base URL: {}\n\
             - Access Token: {}\n\
             - HTTP Timeout: {}s\n\
             - Default Duration Tolerance: {}s",
            self.environment,
            self.trainingpeaks.base_url,
            if self.trainingpeaks.access_token.is_empty() {
                "Missing"
            } else {
                "Configured"
            },
            self.trainingpeaks.timeout_secs,
            self.analysis.default_duration_tolerance_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an optional environment variable, falling back to `default` when unset
fn parse_env<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Invalid {key} value: '{raw}'"),
            )
        }),
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}
