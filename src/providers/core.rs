// ABOUTME: Core provider trait for workout data access
// ABOUTME: Every provider doubles as an identity fetcher through a blanket impl
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Contract
//!
//! | Method | Returns |
//! |---|---|
//! | `fetch_user_profile` | the account profile mapped to [`UserIdentity`] |
//! | `get_workout` | the workout summary |
//! | `download_activity_file` | raw recording bytes, `None` when the workout has no device file |
//! | `get_workout_details` | the full details payload, passed through untouched |
//! | `get_fitness_data` | daily training load for an inclusive date range |
//! | `get_peaks` | ranked records of one peak type |
//! | `get_workout_peaks` | records set during one workout |
//!
//! Raw API payloads are mapped into the core models inside the provider, so
//! callers only ever see validated records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use peaks_core::models::{
    FitnessMetrics, PeakRecord, PeakSport, UserIdentity, WorkoutInfo, WorkoutPeaks,
};
use serde_json::Value;

use crate::errors::AppResult;
use crate::identity::IdentityFetcher;

/// Optional inclusive bounds for record queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day included
    pub start: Option<NaiveDate>,
    /// Last day included
    pub end: Option<NaiveDate>,
}

/// Data-access collaborator for a single fitness account
#[async_trait]
pub trait WorkoutDataProvider: Send + Sync {
    /// Provider name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Fetch the account profile, falling back to the user id when no
    /// athlete profile is linked
    async fn fetch_user_profile(&self) -> AppResult<UserIdentity>;

    /// Fetch a single workout summary
    async fn get_workout(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutInfo>;

    /// Download the recording attached to a workout, decompressed
    async fn download_activity_file(
        &self,
        athlete_id: u64,
        workout_id: u64,
    ) -> AppResult<Option<Vec<u8>>>;

    /// Fetch the workout details payload (metrics, intervals, laps, zones)
    async fn get_workout_details(&self, athlete_id: u64, workout_id: u64) -> AppResult<Value>;

    /// Fetch daily training load from `start` through `end`
    async fn get_fitness_data(
        &self,
        athlete_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FitnessMetrics>>;

    /// Fetch ranked records of one peak type
    async fn get_peaks(
        &self,
        athlete_id: u64,
        sport: PeakSport,
        peak_type: &str,
        range: DateRange,
    ) -> AppResult<Vec<PeakRecord>>;

    /// Fetch the records set during one workout
    async fn get_workout_peaks(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutPeaks>;
}

#[async_trait]
impl<P> IdentityFetcher for Arc<P>
where
    P: WorkoutDataProvider + ?Sized,
{
    async fn fetch_identity(&self) -> AppResult<UserIdentity> {
        self.fetch_user_profile().await
    }
}
