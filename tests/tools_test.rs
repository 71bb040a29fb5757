// ABOUTME: Integration tests for the built-in MCP tools over an in-memory provider
// ABOUTME: Exercises identity, workout, best power, interval comparison, and date tools end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::Ordering;

use anyhow::Result;
use chrono::Local;
use common::{
    fitness_day, peak, tool_fixture, workout, FitFileBuilder, MockProvider, TEST_ATHLETE_ID,
};
use peaks_core::models::{PeakSport, WorkoutPeaks};
use peaks_mcp_server::errors::ErrorCode;
use peaks_mcp_server::tools::ToolCapabilities;
use serde_json::json;

const RAMP: [u16; 10] = [100, 100, 100, 200, 300, 400, 300, 200, 100, 100];

#[test]
fn test_builtin_tools_registered() {
    let (_, _, registry) = tool_fixture(MockProvider::new());

    assert_eq!(
        registry.tool_names(),
        vec![
            "compare_intervals",
            "get_all_peaks",
            "get_athlete_id",
            "get_best_power",
            "get_current_date",
            "get_current_fitness",
            "get_fitness_data",
            "get_peaks",
            "get_power_peaks",
            "get_running_peaks",
            "get_user",
            "get_workout",
            "get_workout_details",
            "get_workout_peaks",
        ]
    );
    assert_eq!(
        registry.tools_in_category("analytics"),
        vec!["get_best_power", "compare_intervals"]
    );
    assert_eq!(
        registry.tools_in_category("fitness"),
        vec!["get_fitness_data", "get_current_fitness"]
    );
}

#[test]
fn test_tools_filtered_by_capability() {
    let (_, _, registry) = tool_fixture(MockProvider::new());

    assert_eq!(
        registry.tool_names_where(ToolCapabilities::is_analytics),
        vec!["compare_intervals", "get_best_power"]
    );
    assert_eq!(
        registry.tool_names_where(|caps| !caps.requires_provider()),
        vec!["get_athlete_id", "get_current_date", "get_user"]
    );
}

#[tokio::test]
async fn test_get_user_and_athlete_id_share_identity() -> Result<()> {
    let (provider, ctx, registry) = tool_fixture(MockProvider::new());

    let user = registry.execute("get_user", json!({}), &ctx).await?;
    assert_eq!(user.content["athleteId"], TEST_ATHLETE_ID);
    assert_eq!(user.content["firstName"], "Test");

    let athlete = registry.execute("get_athlete_id", json!({}), &ctx).await?;
    assert_eq!(athlete.content, json!({ "athleteId": TEST_ATHLETE_ID }));

    assert_eq!(provider.profile_fetch_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_get_workout_summary() -> Result<()> {
    let (_, ctx, registry) =
        tool_fixture(MockProvider::new().with_workout(workout(7, "Threshold", "2024-03-01")));

    let result = registry
        .execute("get_workout", json!({ "workoutId": 7 }), &ctx)
        .await?;
    assert!(!result.is_error);
    assert_eq!(result.content["workoutId"], 7);
    assert_eq!(result.content["title"], "Threshold");
    assert_eq!(result.content["workoutDay"], "2024-03-01");
    Ok(())
}

#[tokio::test]
async fn test_get_workout_requires_id() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(MockProvider::new());

    let error = registry
        .execute("get_workout", json!({}), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    Ok(())
}

#[tokio::test]
async fn test_best_power_from_recording() -> Result<()> {
    let file = FitFileBuilder::new().power(&RAMP).build();
    let (_, ctx, registry) = tool_fixture(
        MockProvider::new()
            .with_workout(workout(9, "Ramp", "2024-03-02"))
            .with_file(9, file),
    );

    let result = registry
        .execute(
            "get_best_power",
            json!({ "workoutId": 9, "durations": [20, 3, 1] }),
            &ctx,
        )
        .await?;

    assert_eq!(
        result.content,
        json!({
            "workoutId": 9,
            "workoutDate": "2024-03-02",
            "workoutTitle": "Ramp",
            "totalRecords": 10,
            "results": [
                {"durationSeconds": 1, "bestAveragePower": 400, "startOffsetSeconds": 5},
                {"durationSeconds": 3, "bestAveragePower": 333, "startOffsetSeconds": 4},
                {
                    "durationSeconds": 20,
                    "bestAveragePower": null,
                    "startOffsetSeconds": null,
                    "error": "Duration exceeds recording length"
                }
            ]
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_best_power_without_file() -> Result<()> {
    let (_, ctx, registry) =
        tool_fixture(MockProvider::new().with_workout(workout(3, "Commute", "2024-03-03")));

    let error = registry
        .execute("get_best_power", json!({ "workoutId": 3, "durations": [5] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.message, "No activity file available for workout 3");
    Ok(())
}

#[tokio::test]
async fn test_best_power_rejects_recordings_without_power() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(
        MockProvider::new()
            .with_workout(workout(4, "Run", "2024-03-04"))
            .with_file(4, FitFileBuilder::new().power(&[0, 0, 0, 0]).build())
            .with_workout(workout(5, "Empty", "2024-03-05"))
            .with_file(5, FitFileBuilder::new().build()),
    );

    let no_power = registry
        .execute("get_best_power", json!({ "workoutId": 4, "durations": [2] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(no_power.message, "No power data found in workout records");

    let no_records = registry
        .execute("get_best_power", json!({ "workoutId": 5, "durations": [2] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(no_records.message, "No record data found in FIT file");
    Ok(())
}

#[tokio::test]
async fn test_best_power_rejects_corrupt_file() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(
        MockProvider::new()
            .with_workout(workout(6, "Broken", "2024-03-06"))
            .with_file(6, b"not a fit file".to_vec()),
    );

    let error = registry
        .execute("get_best_power", json!({ "workoutId": 6, "durations": [2] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
    Ok(())
}

#[tokio::test]
async fn test_compare_intervals_filters_and_aligns() -> Result<()> {
    let first = FitFileBuilder::new()
        .power(&RAMP)
        .lap(300.0, 250, 300)
        .lap(60.0, 120, 150)
        .lap(301.0, 260, 320)
        .build();
    let second = FitFileBuilder::new()
        .power(&RAMP)
        .lap(299.0, 255, 310)
        .lap(300.0, 240, 290)
        .build();
    let (_, ctx, registry) = tool_fixture(
        MockProvider::new()
            .with_workout(workout(1, "Week 1", "2024-03-01"))
            .with_file(1, first)
            .with_workout(workout(2, "Week 2", "2024-03-08"))
            .with_file(2, second)
            .with_workout(workout(3, "Recovery", "2024-03-09")),
    );

    let result = registry
        .execute(
            "compare_intervals",
            json!({ "workoutIds": [1, 2, 3], "minPower": 200, "targetDuration": 300 }),
            &ctx,
        )
        .await?;
    let content = &result.content;

    let rows = content["lapRows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["lapNumber"], 2);
    assert_eq!(rows[1]["values"][0]["avgPower"], 260.0);
    assert_eq!(rows[1]["values"][1]["avgPower"], 240.0);
    assert!(rows[1]["values"][2].get("avgPower").is_none());

    let summary = &content["summaries"][0];
    assert_eq!(summary["lapCount"], 2);
    assert_eq!(summary["avgPower"], 255);
    assert_eq!(summary["powerRange"], 10.0);
    assert_eq!(summary["totalDuration"], 601.0);

    assert_eq!(content["summaries"][2]["lapCount"], 0);
    assert!(content["summaries"][2]["avgPower"].is_null());
    assert_eq!(
        content["warnings"],
        json!(["Workout 3 (Recovery) has no laps"])
    );
    Ok(())
}

#[tokio::test]
async fn test_compare_intervals_original_alignment() -> Result<()> {
    let first = FitFileBuilder::new()
        .power(&RAMP)
        .lap(300.0, 150, 200)
        .lap(300.0, 260, 320)
        .build();
    let second = FitFileBuilder::new()
        .power(&RAMP)
        .lap(300.0, 250, 300)
        .lap(300.0, 255, 310)
        .build();
    let (_, ctx, registry) = tool_fixture(
        MockProvider::new()
            .with_workout(workout(1, "A", "2024-03-01"))
            .with_file(1, first)
            .with_workout(workout(2, "B", "2024-03-08"))
            .with_file(2, second),
    );

    let result = registry
        .execute(
            "compare_intervals",
            json!({ "workoutIds": [1, 2], "minPower": 200, "alignment": "original" }),
            &ctx,
        )
        .await?;

    let rows = result.content["lapRows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0]["values"][0].get("avgPower").is_none());
    assert_eq!(rows[0]["values"][1]["avgPower"], 250.0);
    assert_eq!(rows[1]["values"][0]["avgPower"], 260.0);
    Ok(())
}

#[tokio::test]
async fn test_compare_intervals_propagates_first_failure() -> Result<()> {
    let (provider, ctx, registry) =
        tool_fixture(MockProvider::new().with_workout(workout(1, "A", "2024-03-01")));

    let error = registry
        .execute("compare_intervals", json!({ "workoutIds": [1, 404] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.message, "Workout 404 not found");
    assert!(provider.workout_fetches.load(Ordering::SeqCst) >= 1);
    Ok(())
}

#[tokio::test]
async fn test_compare_intervals_requires_workouts() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(MockProvider::new());

    let error = registry
        .execute("compare_intervals", json!({ "workoutIds": [] }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_current_date_formats() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(MockProvider::new());

    let iso = registry.execute("get_current_date", json!({}), &ctx).await?;
    let date = iso.content["date"].as_str().unwrap().to_owned();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "-");

    let custom = registry
        .execute(
            "get_current_date",
            json!({ "format": "custom", "customFormat": "YYYY" }),
            &ctx,
        )
        .await?;
    assert_eq!(custom.content["date"], &date[..4]);

    let error = registry
        .execute("get_current_date", json!({ "format": "julian" }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_get_workout_details_passthrough() -> Result<()> {
    let details = json!({ "workoutId": 7, "metrics": { "tssActual": 88.5 }, "laps": [] });
    let (_, ctx, registry) = tool_fixture(MockProvider::new().with_details(7, details.clone()));

    let result = registry
        .execute("get_workout_details", json!({ "workoutId": 7 }), &ctx)
        .await?;
    assert_eq!(result.content, details);

    let error = registry
        .execute("get_workout_details", json!({ "workoutId": 8 }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_fitness_data_over_range() -> Result<()> {
    let provider = MockProvider::new().with_fitness(vec![
        fitness_day("2024-01-01", 50.0, 60.0),
        fitness_day("2024-01-02", 51.0, 58.0),
        fitness_day("2024-01-03", 52.0, 55.0),
    ]);
    let (_, ctx, registry) = tool_fixture(provider);

    let result = registry
        .execute(
            "get_fitness_data",
            json!({ "startDate": "2024-01-02", "endDate": "2024-01-03" }),
            &ctx,
        )
        .await?;
    let days = result.content.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-02");
    assert_eq!(days[1]["tsb"], -3.0);
    Ok(())
}

#[tokio::test]
async fn test_fitness_data_rejects_bad_ranges() -> Result<()> {
    let (_, ctx, registry) = tool_fixture(MockProvider::new());

    let reversed = registry
        .execute(
            "get_fitness_data",
            json!({ "startDate": "2024-02-01", "endDate": "2024-01-01" }),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(reversed.code, ErrorCode::InvalidInput);
    assert!(reversed.message.contains("endDate"));

    let malformed = registry
        .execute(
            "get_fitness_data",
            json!({ "startDate": "01/02/2024", "endDate": "2024-01-03" }),
            &ctx,
        )
        .await
        .unwrap_err();
    assert_eq!(malformed.code, ErrorCode::InvalidInput);

    let missing = registry
        .execute("get_fitness_data", json!({ "startDate": "2024-01-01" }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::MissingRequiredField);
    Ok(())
}

#[tokio::test]
async fn test_current_fitness_uses_today() -> Result<()> {
    let today = Local::now().date_naive().to_string();
    let (_, ctx, registry) =
        tool_fixture(MockProvider::new().with_fitness(vec![fitness_day(&today, 70.0, 65.0)]));

    let result = registry
        .execute("get_current_fitness", json!({}), &ctx)
        .await?;
    assert_eq!(result.content["date"], today.as_str());
    assert_eq!(result.content["ctl"], 70.0);

    let (_, ctx, registry) = tool_fixture(MockProvider::new());
    let error = registry
        .execute("get_current_fitness", json!({}), &ctx)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceUnavailable);
    Ok(())
}

#[tokio::test]
async fn test_get_peaks_applies_limit() -> Result<()> {
    let provider = MockProvider::new().with_peaks(
        PeakSport::Bike,
        "power5min",
        vec![
            peak("power5min", 360.0, 1, 1),
            peak("power5min", 350.0, 2, 2),
            peak("power5min", 340.0, 3, 3),
        ],
    );
    let (_, ctx, registry) = tool_fixture(provider);

    let result = registry
        .execute(
            "get_peaks",
            json!({ "sport": "Bike", "type": "power5min", "limit": 2 }),
            &ctx,
        )
        .await?;
    let records = result.content.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "power5min");
    assert_eq!(records[1]["value"], 350.0);
    Ok(())
}

#[tokio::test]
async fn test_get_peaks_validates_sport_and_type() -> Result<()> {
    let (provider, ctx, registry) = tool_fixture(MockProvider::new());

    let sport = registry
        .execute("get_peaks", json!({ "sport": "Swim", "type": "power5min" }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(sport.code, ErrorCode::InvalidInput);
    assert!(sport.message.contains("sport"));

    let peak_type = registry
        .execute("get_peaks", json!({ "sport": "Run", "type": "power3min" }), &ctx)
        .await
        .unwrap_err();
    assert_eq!(peak_type.code, ErrorCode::InvalidInput);

    assert_eq!(provider.peak_fetch_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_power_peaks_cover_every_power_type() -> Result<()> {
    let provider = MockProvider::new()
        .with_peaks(
            PeakSport::Bike,
            "power20min",
            vec![peak("power20min", 280.0, 4, 1), peak("power20min", 270.0, 5, 2)],
        )
        .with_peaks(PeakSport::Bike, "power5sec", vec![peak("power5sec", 900.0, 6, 1)]);
    let (provider, ctx, registry) = tool_fixture(provider);

    let result = registry
        .execute("get_power_peaks", json!({ "limit": 1 }), &ctx)
        .await?;
    let records = result.content.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "power5sec");
    assert_eq!(records[1]["type"], "power20min");
    assert_eq!(records[1]["value"], 280.0);
    assert_eq!(provider.peak_fetch_count(), 12);
    Ok(())
}

#[tokio::test]
async fn test_running_and_all_peaks_agree() -> Result<()> {
    let provider = MockProvider::new()
        .with_peaks(PeakSport::Run, "speed5K", vec![peak("speed5K", 4.2, 9, 1)])
        .with_peaks(PeakSport::Run, "speedM", vec![peak("speedM", 3.6, 10, 1)]);
    let (provider, ctx, registry) = tool_fixture(provider);

    let running = registry
        .execute("get_running_peaks", json!({}), &ctx)
        .await?;
    let all = registry
        .execute("get_all_peaks", json!({ "sport": "Run" }), &ctx)
        .await?;
    assert_eq!(running.content, all.content);
    assert_eq!(running.content.as_array().unwrap().len(), 2);
    assert_eq!(provider.peak_fetch_count(), 28);
    Ok(())
}

#[tokio::test]
async fn test_workout_peaks() -> Result<()> {
    let provider = MockProvider::new().with_workout_peaks(WorkoutPeaks {
        workout_id: 7,
        personal_record_count: 1,
        personal_records: vec![peak("power1min", 520.0, 7, 1)],
    });
    let (_, ctx, registry) = tool_fixture(provider);

    let result = registry
        .execute("get_workout_peaks", json!({ "workoutId": 7 }), &ctx)
        .await?;
    assert_eq!(result.content["personalRecordCount"], 1);
    assert_eq!(result.content["personalRecords"][0]["type"], "power1min");

    let empty = registry
        .execute("get_workout_peaks", json!({ "workoutId": 8 }), &ctx)
        .await?;
    assert_eq!(empty.content["personalRecords"], json!([]));
    Ok(())
}
