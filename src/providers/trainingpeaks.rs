// ABOUTME: TrainingPeaks REST API provider for account, workout, and device file access
// ABOUTME: Maps raw API payloads into core models and HTTP failures into AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # TrainingPeaks Provider
//!
//! Endpoints used:
//!
//! - `GET /users/v3/user`
//! - `GET /fitness/v6/athletes/{athlete}/workouts/{workout}`
//! - `GET /fitness/v6/athletes/{athlete}/workouts/{workout}/details`
//! - `GET /fitness/v6/athletes/{athlete}/workouts/{workout}/rawfiledata/{file}`
//! - `POST /fitness/v1/athletes/{athlete}/reporting/performancedata/{start}/{end}`
//! - `GET /personalrecord/v2/athletes/{athlete}/{sport}?prType=..`
//! - `GET /personalrecord/v2/athletes/{athlete}/workouts/{workout}`
//!
//! Device files whose name ends in `.gz` are stored compressed and are
//! gunzipped before being handed back.

use std::io::Read;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use peaks_core::constants::fitness::{ATL_CONSTANT_DAYS, CTL_CONSTANT_DAYS};
use peaks_core::constants::service_names::TRAININGPEAKS_API;
use peaks_core::models::{
    FitnessMetrics, PeakRecord, PeakSport, UserIdentity, WorkoutInfo, WorkoutPeaks,
};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::core::{DateRange, WorkoutDataProvider};
use crate::config::TrainingPeaksApiConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Envelope returned by `GET /users/v3/user`
#[derive(Debug, Deserialize)]
struct UserApiResponse {
    user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    user_id: u64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    birthday: Option<String>,
    gender: Option<String>,
    country: Option<String>,
    time_zone: Option<String>,
    settings: Option<RawUserSettings>,
    #[serde(default)]
    athletes: Vec<RawAthlete>,
}

#[derive(Debug, Deserialize)]
struct RawUserSettings {
    account: Option<RawAccountSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccountSettings {
    is_premium: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAthlete {
    athlete_id: u64,
}

impl From<RawUser> for UserIdentity {
    fn from(raw: RawUser) -> Self {
        let athlete_id = raw
            .athletes
            .first()
            .map_or(raw.user_id, |athlete| athlete.athlete_id);

        Self {
            id: raw.user_id,
            athlete_id,
            email: raw.email,
            first_name: raw.first_name,
            last_name: raw.last_name,
            date_of_birth: raw.birthday,
            gender: raw.gender,
            country_code: raw.country,
            timezone: raw.time_zone,
            is_premium: raw
                .settings
                .and_then(|settings| settings.account)
                .and_then(|account| account.is_premium),
        }
    }
}

/// Subset of the workout details payload that lists attached device files
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutDetailsResponse {
    #[serde(default)]
    workout_device_file_infos: Vec<DeviceFileInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceFileInfo {
    #[serde(deserialize_with = "string_or_number")]
    file_id: String,
    #[serde(default)]
    file_name: String,
}

/// File ids arrive as strings from some endpoints and numbers from others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Body of the performance data report request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceDataRequest {
    atl_constant: u32,
    atl_start: u32,
    ctl_constant: u32,
    ctl_start: u32,
    workout_types: Vec<String>,
}

impl Default for PerformanceDataRequest {
    fn default() -> Self {
        Self {
            atl_constant: ATL_CONSTANT_DAYS,
            atl_start: 0,
            ctl_constant: CTL_CONSTANT_DAYS,
            ctl_start: 0,
            workout_types: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerformanceData {
    workout_day: String,
    tss_actual: Option<f64>,
    ctl: Option<f64>,
    atl: Option<f64>,
    tsb: Option<f64>,
}

impl From<RawPerformanceData> for FitnessMetrics {
    fn from(raw: RawPerformanceData) -> Self {
        let date = raw
            .workout_day
            .split('T')
            .next()
            .unwrap_or_default()
            .to_owned();

        Self {
            date,
            daily_tss: raw.tss_actual,
            ctl: raw.ctl,
            atl: raw.atl,
            tsb: raw.tsb,
        }
        .with_derived_balance()
    }
}

/// `2024-01-31` becomes `2024-01-31T00:00:00`, the form the record endpoints filter on
fn day_start(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

/// HTTP client for the TrainingPeaks API
pub struct TrainingPeaksProvider {
    client: Client,
    config: TrainingPeaksApiConfig,
}

impl TrainingPeaksProvider {
    /// Create a provider from API settings
    #[must_use]
    pub fn new(config: TrainingPeaksApiConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url, endpoint.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        debug!("TrainingPeaks API request: {endpoint}");

        let started = Instant::now();
        let response = request
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("{TRAININGPEAKS_API}: failed to send request: {e}"),
                )
                .with_source(e)
            })?;

        let status = response.status();
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_provider_call(endpoint, status.as_u16(), duration_ms);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::handle_api_error(status, endpoint, &text));
        }

        Ok(response)
    }

    async fn api_request<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(endpoint));
        Self::parse_json(self.send(request, endpoint).await?).await
    }

    async fn parse_json<T>(response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        response.json().await.map_err(|e| {
            AppError::external_service(
                TRAININGPEAKS_API,
                format!("Failed to parse API response: {e}"),
            )
        })
    }

    async fn api_request_raw(&self, endpoint: &str) -> AppResult<Vec<u8>> {
        let request = self.client.get(self.url(endpoint));
        let bytes = self.send(request, endpoint).await?.bytes().await.map_err(|e| {
            AppError::external_service(TRAININGPEAKS_API, format!("Failed to read body: {e}"))
        })?;
        Ok(bytes.to_vec())
    }

    /// Map a non-success status to an error code
    fn handle_api_error(status: StatusCode, endpoint: &str, text: &str) -> AppError {
        error!(
            "TrainingPeaks API request failed - status: {status}, endpoint: {endpoint}, body_length: {} bytes",
            text.len()
        );

        let code = match status.as_u16() {
            401 | 403 => ErrorCode::ExternalAuthFailed,
            404 => ErrorCode::ResourceNotFound,
            429 => ErrorCode::ExternalRateLimited,
            _ => ErrorCode::ExternalServiceError,
        };

        AppError::new(
            code,
            format!("{TRAININGPEAKS_API} API request failed with status {status}: {text}"),
        )
        .with_resource_id(endpoint)
    }
}

#[async_trait]
impl WorkoutDataProvider for TrainingPeaksProvider {
    fn name(&self) -> &'static str {
        TRAININGPEAKS_API
    }

    async fn fetch_user_profile(&self) -> AppResult<UserIdentity> {
        let response: UserApiResponse = self.api_request("/users/v3/user").await?;
        let raw = response.user.ok_or_else(|| {
            AppError::external_service(TRAININGPEAKS_API, "Invalid response from user API")
        })?;

        let identity = UserIdentity::from(raw);
        info!(
            user.id = identity.id,
            athlete.id = identity.athlete_id,
            "Resolved TrainingPeaks account"
        );
        Ok(identity)
    }

    async fn get_workout(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutInfo> {
        self.api_request(&format!(
            "/fitness/v6/athletes/{athlete_id}/workouts/{workout_id}"
        ))
        .await
    }

    async fn download_activity_file(
        &self,
        athlete_id: u64,
        workout_id: u64,
    ) -> AppResult<Option<Vec<u8>>> {
        let base = format!("/fitness/v6/athletes/{athlete_id}/workouts/{workout_id}");
        let details: WorkoutDetailsResponse = self.api_request(&format!("{base}/details")).await?;

        let Some(file) = details.workout_device_file_infos.into_iter().next() else {
            debug!(workout.id = workout_id, "Workout has no device file");
            return Ok(None);
        };

        let bytes = self
            .api_request_raw(&format!("{base}/rawfiledata/{}", file.file_id))
            .await?;

        if file.file_name.ends_with(".gz") {
            return gunzip(&bytes).map(Some);
        }
        Ok(Some(bytes))
    }

    async fn get_workout_details(&self, athlete_id: u64, workout_id: u64) -> AppResult<Value> {
        self.api_request(&format!(
            "/fitness/v6/athletes/{athlete_id}/workouts/{workout_id}/details"
        ))
        .await
    }

    async fn get_fitness_data(
        &self,
        athlete_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FitnessMetrics>> {
        let endpoint = format!(
            "/fitness/v1/athletes/{athlete_id}/reporting/performancedata/{}/{}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        let request = self
            .client
            .post(self.url(&endpoint))
            .json(&PerformanceDataRequest::default());

        let days: Vec<RawPerformanceData> =
            Self::parse_json(self.send(request, &endpoint).await?).await?;
        Ok(days.into_iter().map(FitnessMetrics::from).collect())
    }

    async fn get_peaks(
        &self,
        athlete_id: u64,
        sport: PeakSport,
        peak_type: &str,
        range: DateRange,
    ) -> AppResult<Vec<PeakRecord>> {
        let endpoint = format!("/personalrecord/v2/athletes/{athlete_id}/{sport}");

        let mut query = vec![("prType", peak_type.to_owned())];
        if let Some(start) = range.start {
            query.push(("startDate", day_start(start)));
        }
        if let Some(end) = range.end {
            query.push(("endDate", day_start(end)));
        }

        let request = self.client.get(self.url(&endpoint)).query(&query);
        Self::parse_json(self.send(request, &endpoint).await?).await
    }

    async fn get_workout_peaks(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutPeaks> {
        self.api_request(&format!(
            "/personalrecord/v2/athletes/{athlete_id}/workouts/{workout_id}?displayPeaksForBasic=true"
        ))
        .await
    }
}

/// Decompress a gzip payload
///
/// # Errors
///
/// Returns `InvalidFormat` when the bytes are not valid gzip
pub fn gunzip(bytes: &[u8]) -> AppResult<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut decoded)
        .map_err(|e| AppError::invalid_format(format!("Failed to decompress device file: {e}")))?;
    Ok(decoded)
}
