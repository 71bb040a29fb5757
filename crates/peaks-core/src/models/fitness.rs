// ABOUTME: Training load model for the performance management chart
// ABOUTME: FitnessMetrics carries one day's TSS, CTL, ATL and TSB values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Training load for a single day
///
/// CTL is chronic load (fitness), ATL acute load (fatigue), and TSB the
/// balance between them (form).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessMetrics {
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    /// Training stress completed that day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_tss: Option<f64>,
    /// Chronic training load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctl: Option<f64>,
    /// Acute training load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atl: Option<f64>,
    /// Training stress balance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsb: Option<f64>,
}

impl FitnessMetrics {
    /// Fill a missing TSB from `ctl - atl` when both loads are known
    #[must_use]
    pub fn with_derived_balance(mut self) -> Self {
        if self.tsb.is_none() {
            self.tsb = self.ctl.zip(self.atl).map(|(ctl, atl)| ctl - atl);
        }
        self
    }
}
