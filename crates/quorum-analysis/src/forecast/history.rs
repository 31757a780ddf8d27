//! Timestamped activity history.

use chrono::{Datelike, NaiveDateTime, Weekday};
use quorum_core::time::format_timestamp;
use serde::{Deserialize, Serialize};

/// Whether a log marks the start or the end of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    Start,
    End,
}

/// One logged status change, in local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySample {
    pub label: StatusLabel,
    pub at: NaiveDateTime,
}

impl ActivitySample {
    pub fn new(label: StatusLabel, at: NaiveDateTime) -> Self {
        Self { label, at }
    }
}

/// All logged status changes of one activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityHistory {
    samples: Vec<ActivitySample>,
}

impl ActivityHistory {
    pub fn new(samples: Vec<ActivitySample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: ActivitySample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[ActivitySample] {
        &self.samples
    }

    /// Samples logged on `weekday`.
    pub fn for_weekday(&self, weekday: Weekday) -> ActivityHistory {
        self.samples
            .iter()
            .filter(|s| s.at.weekday() == weekday)
            .cloned()
            .collect()
    }

    /// Samples logged between `from` and `to`, both inclusive.
    pub fn within(&self, from: NaiveDateTime, to: NaiveDateTime) -> ActivityHistory {
        self.samples
            .iter()
            .filter(|s| s.at >= from && s.at <= to)
            .cloned()
            .collect()
    }

    /// `"HH:MM"` of every sample with `label`, in log order.
    pub fn times(&self, label: StatusLabel) -> Vec<String> {
        self.with_label(label)
            .map(|s| s.at.format("%H:%M").to_string())
            .collect()
    }

    /// `"YYYY-MM-DD HH:MM"` of every sample with `label`, in log order.
    pub fn timestamps(&self, label: StatusLabel) -> Vec<String> {
        self.with_label(label)
            .map(|s| format_timestamp(&s.at))
            .collect()
    }

    pub fn oldest(&self) -> Option<NaiveDateTime> {
        self.samples.iter().map(|s| s.at).min()
    }

    fn with_label(&self, label: StatusLabel) -> impl Iterator<Item = &ActivitySample> {
        self.samples.iter().filter(move |s| s.label == label)
    }
}

impl FromIterator<ActivitySample> for ActivityHistory {
    fn from_iter<I: IntoIterator<Item = ActivitySample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Calendar weeks from the oldest sample up to `now`, counting the partial
/// week. `0` for an empty history.
pub fn weeks_spanned(history: &ActivityHistory, now: NaiveDateTime) -> u32 {
    match history.oldest() {
        None => 0,
        Some(oldest) => {
            let days = (now - oldest).num_days().max(0);
            u32::try_from(days / 7).unwrap_or(u32::MAX - 1) + 1
        }
    }
}
