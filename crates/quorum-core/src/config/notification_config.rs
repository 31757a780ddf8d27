//! Notification planning configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACTIVITY_THRESHOLD, DEFAULT_ATTENDEE_THRESHOLD, DEFAULT_CUTOFF_TIME,
};

/// Thresholds applied when turning forecasts into recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Minimum activity probability at `cutoff_time`. Default: 0.30.
    pub activity_threshold: Option<f64>,
    /// Minimum per-person presence probability. Default: 0.30.
    pub attendee_threshold: Option<f64>,
    /// `"HH:MM"` target for the activity probability. Default: "23:59".
    pub cutoff_time: Option<String>,
}

impl NotificationConfig {
    pub fn effective_activity_threshold(&self) -> f64 {
        self.activity_threshold.unwrap_or(DEFAULT_ACTIVITY_THRESHOLD)
    }

    pub fn effective_attendee_threshold(&self) -> f64 {
        self.attendee_threshold.unwrap_or(DEFAULT_ATTENDEE_THRESHOLD)
    }

    pub fn effective_cutoff_time(&self) -> &str {
        self.cutoff_time.as_deref().unwrap_or(DEFAULT_CUTOFF_TIME)
    }
}
