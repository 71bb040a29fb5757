// ABOUTME: Shared test utilities for integration tests
// ABOUTME: In-memory workout provider, FIT file builder, and quiet logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `peaks_mcp_server`

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use peaks_core::models::{
    FitnessMetrics, PeakRecord, PeakSport, UserIdentity, WorkoutInfo, WorkoutPeaks,
};
use peaks_mcp_server::errors::{AppError, AppResult, ErrorCode};
use peaks_mcp_server::providers::{DateRange, WorkoutDataProvider};
use serde_json::Value;
use peaks_mcp_server::tools::{ToolExecutionContext, ToolRegistry};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const TEST_ATHLETE_ID: u64 = 5551;

/// Account used by the mock provider
pub fn test_identity() -> UserIdentity {
    UserIdentity {
        id: 42,
        athlete_id: TEST_ATHLETE_ID,
        email: "rider@example.com".to_owned(),
        first_name: "Test".to_owned(),
        last_name: "Rider".to_owned(),
        date_of_birth: None,
        gender: None,
        country_code: Some("NL".to_owned()),
        timezone: Some("Europe/Amsterdam".to_owned()),
        is_premium: Some(true),
    }
}

pub fn workout(workout_id: u64, title: &str, day: &str) -> WorkoutInfo {
    WorkoutInfo {
        workout_id,
        athlete_id: Some(TEST_ATHLETE_ID),
        title: Some(title.to_owned()),
        workout_day: Some(day.to_owned()),
        ..WorkoutInfo::default()
    }
}

pub fn peak(peak_type: &str, value: f64, workout_id: u64, rank: u32) -> PeakRecord {
    PeakRecord {
        peak_type: peak_type.to_owned(),
        value,
        workout_id,
        workout_date: None,
        workout_title: None,
        rank,
        event_name: None,
    }
}

pub fn fitness_day(date: &str, ctl: f64, atl: f64) -> FitnessMetrics {
    FitnessMetrics {
        date: date.to_owned(),
        daily_tss: Some(50.0),
        ctl: Some(ctl),
        atl: Some(atl),
        tsb: Some(ctl - atl),
    }
}

/// In-memory provider counting every call
#[derive(Default)]
pub struct MockProvider {
    workouts: HashMap<u64, WorkoutInfo>,
    files: HashMap<u64, Vec<u8>>,
    details: HashMap<u64, Value>,
    fitness: Vec<FitnessMetrics>,
    peaks: HashMap<(PeakSport, String), Vec<PeakRecord>>,
    workout_peaks: HashMap<u64, WorkoutPeaks>,
    pub peak_fetches: AtomicUsize,
    profile_delay: Option<Duration>,
    profile_failures: AtomicUsize,
    pub profile_fetches: AtomicUsize,
    pub workout_fetches: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workout(mut self, workout: WorkoutInfo) -> Self {
        self.workouts.insert(workout.workout_id, workout);
        self
    }

    pub fn with_file(mut self, workout_id: u64, bytes: Vec<u8>) -> Self {
        self.files.insert(workout_id, bytes);
        self
    }

    pub fn with_details(mut self, workout_id: u64, details: Value) -> Self {
        self.details.insert(workout_id, details);
        self
    }

    /// Daily loads, `YYYY-MM-DD` dates in ascending order
    pub fn with_fitness(mut self, days: Vec<FitnessMetrics>) -> Self {
        self.fitness = days;
        self
    }

    /// Records for one peak type, best first
    pub fn with_peaks(
        mut self,
        sport: PeakSport,
        peak_type: &str,
        records: Vec<PeakRecord>,
    ) -> Self {
        self.peaks.insert((sport, peak_type.to_owned()), records);
        self
    }

    pub fn with_workout_peaks(mut self, peaks: WorkoutPeaks) -> Self {
        self.workout_peaks.insert(peaks.workout_id, peaks);
        self
    }

    pub fn peak_fetch_count(&self) -> usize {
        self.peak_fetches.load(Ordering::SeqCst)
    }

    /// Slow down profile fetches so concurrent callers overlap
    pub const fn with_profile_delay(mut self, delay: Duration) -> Self {
        self.profile_delay = Some(delay);
        self
    }

    /// Fail the next `count` profile fetches
    pub fn with_profile_failures(self, count: usize) -> Self {
        self.profile_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn profile_fetch_count(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkoutDataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_user_profile(&self) -> AppResult<UserIdentity> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.profile_delay {
            tokio::time::sleep(delay).await;
        }
        let failing = self
            .profile_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "profile service down",
            ));
        }
        Ok(test_identity())
    }

    async fn get_workout(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutInfo> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        self.workout_fetches.fetch_add(1, Ordering::SeqCst);
        self.workouts
            .get(&workout_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))
    }

    async fn download_activity_file(
        &self,
        athlete_id: u64,
        workout_id: u64,
    ) -> AppResult<Option<Vec<u8>>> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        Ok(self.files.get(&workout_id).cloned())
    }

    async fn get_workout_details(&self, athlete_id: u64, workout_id: u64) -> AppResult<Value> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        self.details
            .get(&workout_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Workout {workout_id}")))
    }

    async fn get_fitness_data(
        &self,
        athlete_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<FitnessMetrics>> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        let (start, end) = (start.to_string(), end.to_string());
        Ok(self
            .fitness
            .iter()
            .filter(|day| day.date >= start && day.date <= end)
            .cloned()
            .collect())
    }

    async fn get_peaks(
        &self,
        athlete_id: u64,
        sport: PeakSport,
        peak_type: &str,
        _range: DateRange,
    ) -> AppResult<Vec<PeakRecord>> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        self.peak_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .peaks
            .get(&(sport, peak_type.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_workout_peaks(&self, athlete_id: u64, workout_id: u64) -> AppResult<WorkoutPeaks> {
        assert_eq!(athlete_id, TEST_ATHLETE_ID);
        Ok(self
            .workout_peaks
            .get(&workout_id)
            .cloned()
            .unwrap_or(WorkoutPeaks {
                workout_id,
                ..WorkoutPeaks::default()
            }))
    }
}

/// Context and registry over a mock provider
pub fn tool_fixture(provider: MockProvider) -> (Arc<MockProvider>, ToolExecutionContext, ToolRegistry) {
    init_test_logging();
    let provider = Arc::new(provider);
    let context = ToolExecutionContext::new(provider.clone());
    (provider, context, ToolRegistry::with_builtin_tools())
}

// ----------------------------------------------------------------------------
// FIT file builder
// ----------------------------------------------------------------------------

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

fn fit_crc(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |mut crc, &byte| {
        let mut tmp = CRC_TABLE[usize::from(crc & 0xF)];
        crc = (crc >> 4) & 0x0FFF;
        crc = crc ^ tmp ^ CRC_TABLE[usize::from(byte & 0xF)];
        tmp = CRC_TABLE[usize::from(crc & 0xF)];
        crc = (crc >> 4) & 0x0FFF;
        crc ^ tmp ^ CRC_TABLE[usize::from((byte >> 4) & 0xF)]
    })
}

const BASE_ENUM: u8 = 0x00;
const BASE_UINT16: u8 = 0x84;
const BASE_UINT32: u8 = 0x86;

const LOCAL_FILE_ID: u8 = 0;
const LOCAL_RECORD: u8 = 1;
const LOCAL_LAP: u8 = 2;

/// Minimal activity file: `file_id`, one `record` per power sample, then laps
#[derive(Debug, Default)]
pub struct FitFileBuilder {
    power: Vec<u16>,
    laps: Vec<(f64, u16, u16)>,
}

impl FitFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power(mut self, samples: &[u16]) -> Self {
        self.power.extend_from_slice(samples);
        self
    }

    /// Lap with elapsed seconds, average and max power
    pub fn lap(mut self, seconds: f64, avg_power: u16, max_power: u16) -> Self {
        self.laps.push((seconds, avg_power, max_power));
        self
    }

    fn definition(data: &mut Vec<u8>, local: u8, global: u16, fields: &[(u8, u8, u8)]) {
        data.push(0x40 | local);
        data.push(0);
        data.push(0);
        data.extend_from_slice(&global.to_le_bytes());
        data.push(u8::try_from(fields.len()).unwrap());
        for &(number, size, base_type) in fields {
            data.extend_from_slice(&[number, size, base_type]);
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::new();

        // file_id: type = activity, manufacturer = development
        Self::definition(
            &mut data,
            LOCAL_FILE_ID,
            0,
            &[(0, 1, BASE_ENUM), (1, 2, BASE_UINT16)],
        );
        data.push(LOCAL_FILE_ID);
        data.push(4);
        data.extend_from_slice(&255u16.to_le_bytes());

        // record.power
        Self::definition(&mut data, LOCAL_RECORD, 20, &[(7, 2, BASE_UINT16)]);
        for watts in &self.power {
            data.push(LOCAL_RECORD);
            data.extend_from_slice(&watts.to_le_bytes());
        }

        // lap.total_elapsed_time (ms), lap.avg_power, lap.max_power
        if !self.laps.is_empty() {
            Self::definition(
                &mut data,
                LOCAL_LAP,
                19,
                &[(7, 4, BASE_UINT32), (19, 2, BASE_UINT16), (20, 2, BASE_UINT16)],
            );
            for &(seconds, avg, max) in &self.laps {
                data.push(LOCAL_LAP);
                let millis = (seconds * 1000.0).round() as u32;
                data.extend_from_slice(&millis.to_le_bytes());
                data.extend_from_slice(&avg.to_le_bytes());
                data.extend_from_slice(&max.to_le_bytes());
            }
        }

        let mut file = Vec::with_capacity(data.len() + 16);
        file.push(14);
        file.push(0x10);
        file.extend_from_slice(&2132u16.to_le_bytes());
        file.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
        file.extend_from_slice(b".FIT");
        let header_crc = fit_crc(&file);
        file.extend_from_slice(&header_crc.to_le_bytes());
        file.extend_from_slice(&data);
        let file_crc = fit_crc(&file);
        file.extend_from_slice(&file_crc.to_le_bytes());
        file
    }
}
