// ABOUTME: Assembles a WorkoutDetail from the workout summary and its recording laps
// ABOUTME: Bridges the provider and recording decoder to the interval comparison input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use peaks_core::models::{Lap, WorkoutDetail, WorkoutInfo};
use tracing::debug;

use crate::errors::AppResult;
use crate::identity::IdentityResolver;
use crate::providers::WorkoutDataProvider;
use crate::recording::decode_recording;

/// Fetch a workout and the laps of its attached recording
///
/// A workout without a device file yields an empty lap list rather than an
/// error, so interval comparison can report it as a warning.
///
/// # Errors
///
/// Returns identity, provider, or FIT decoding errors
pub async fn fetch_workout_detail(
    provider: &dyn WorkoutDataProvider,
    identity: &IdentityResolver,
    workout_id: u64,
) -> AppResult<WorkoutDetail> {
    let athlete_id = identity.get_athlete_id().await?;
    let info = provider.get_workout(athlete_id, workout_id).await?;

    let laps = match provider.download_activity_file(athlete_id, workout_id).await? {
        Some(bytes) => decode_recording(&bytes)?.laps,
        None => {
            debug!(workout.id = workout_id, "No recording attached, no laps");
            Vec::new()
        }
    };

    Ok(into_detail(info, workout_id, laps))
}

fn into_detail(info: WorkoutInfo, workout_id: u64, laps: Vec<Lap>) -> WorkoutDetail {
    WorkoutDetail {
        workout_id,
        title: info.title,
        date: info.workout_day,
        laps,
    }
}
