// ABOUTME: FIT recording decoding into a per-second power series and lap list
// ABOUTME: Wraps fitparser and reduces its records to the numeric fields the analytics consume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recording Access
//!
//! Decoding happens in two steps. [`decode_messages`] turns FIT bytes into
//! [`RawMessage`]s holding only numeric fields, then
//! [`DecodedRecording::from_messages`] builds the power series and laps.
//!
//! - one power sample per `record` message, a missing `power` field counts as 0 W
//! - one [`Lap`] per `lap` message from `total_elapsed_time`, `avg_power`, `max_power`

use std::collections::HashMap;

use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use peaks_core::models::Lap;
use peaks_intelligence::PowerSeries;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Message kinds the analytics care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Per-sample `record` message
    Record,
    /// `lap` summary message
    Lap,
    /// Anything else (session, device info, events, ...)
    Other,
}

/// A decoded FIT message reduced to its numeric fields
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    /// Message kind
    pub kind: MessageKind,
    /// Numeric field values keyed by FIT profile field name
    pub fields: HashMap<String, f64>,
}

impl RawMessage {
    /// Build a message from `(name, value)` pairs
    pub fn new<'a>(kind: MessageKind, fields: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            kind,
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        }
    }

    fn field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    fn from_fit(record: &FitDataRecord) -> Self {
        let kind = match record.kind() {
            MesgNum::Record => MessageKind::Record,
            MesgNum::Lap => MessageKind::Lap,
            _ => MessageKind::Other,
        };

        let fields = if kind == MessageKind::Other {
            HashMap::new()
        } else {
            record
                .fields()
                .iter()
                .filter_map(|field| {
                    fit_value_to_f64(field.value()).map(|value| (field.name().to_owned(), value))
                })
                .collect()
        };

        Self { kind, fields }
    }
}

fn fit_value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float32(v) => Some(f64::from(*v)),
        Value::Float64(v) => Some(*v),
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => Some(f64::from(*v)),
        Value::SInt8(v) => Some(f64::from(*v)),
        Value::SInt16(v) => Some(f64::from(*v)),
        Value::UInt16(v) | Value::UInt16z(v) => Some(f64::from(*v)),
        Value::SInt32(v) => Some(f64::from(*v)),
        Value::UInt32(v) | Value::UInt32z(v) => Some(f64::from(*v)),
        Value::SInt64(v) => Some(*v as f64),
        Value::UInt64(v) | Value::UInt64z(v) => Some(*v as f64),
        _ => None,
    }
}

/// Power series and laps extracted from one recording
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRecording {
    /// One sample per `record` message, in file order
    pub power_series: PowerSeries,
    /// Laps in file order
    pub laps: Vec<Lap>,
    /// Number of `record` messages seen
    pub record_count: usize,
}

impl DecodedRecording {
    /// Reduce decoded messages to a power series and lap list
    #[must_use]
    pub fn from_messages(messages: &[RawMessage]) -> Self {
        let power_series: PowerSeries = messages
            .iter()
            .filter(|message| message.kind == MessageKind::Record)
            .map(|message| message.field("power").map(to_watts))
            .collect();

        let laps = messages
            .iter()
            .filter(|message| message.kind == MessageKind::Lap)
            .map(|message| Lap {
                duration_seconds: message.field("total_elapsed_time"),
                average_power: message.field("avg_power"),
                max_power: message.field("max_power"),
            })
            .collect();

        Self {
            record_count: power_series.len(),
            power_series,
            laps,
        }
    }
}

fn to_watts(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Decode FIT bytes into numeric messages
///
/// # Errors
///
/// Returns `InvalidFormat` when the bytes are not a readable FIT file
pub fn decode_messages(bytes: &[u8]) -> AppResult<Vec<RawMessage>> {
    let records = fitparser::from_bytes(bytes)
        .map_err(|e| AppError::invalid_format(format!("Failed to decode FIT file: {e}")))?;
    Ok(records.iter().map(RawMessage::from_fit).collect())
}

/// Decode a FIT recording into its power series and laps
///
/// # Errors
///
/// Returns `InvalidFormat` when the bytes are not a readable FIT file
pub fn decode_recording(bytes: &[u8]) -> AppResult<DecodedRecording> {
    let messages = decode_messages(bytes)?;
    let recording = DecodedRecording::from_messages(&messages);
    debug!(
        bytes = bytes.len(),
        messages = messages.len(),
        records = recording.record_count,
        laps = recording.laps.len(),
        "Decoded FIT recording"
    );
    Ok(recording)
}
