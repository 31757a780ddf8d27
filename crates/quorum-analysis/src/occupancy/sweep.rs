//! Joint-occupancy windows from per-person visit/departure predictions.

use std::collections::HashSet;

use quorum_core::constants::END_OF_DAY;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A `"HH:MM"` window on a single day. No wraparound past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Predicted visit and departure for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPrediction {
    pub person_id: i64,
    pub visit: String,
    pub departure: String,
}

impl PersonPrediction {
    pub fn new(person_id: i64, visit: impl Into<String>, departure: impl Into<String>) -> Self {
        Self {
            person_id,
            visit: visit.into(),
            departure: departure.into(),
        }
    }
}

/// Windows during which at least `min_count` of `members` are present.
///
/// Predictions for persons outside `members` are ignored. Events are ordered
/// by their `"HH:MM"` text with a stable sort, so simultaneous events keep
/// input order (a departure listed before an arrival at the same minute is
/// applied first). A window still open after the last event closes at
/// `"23:59"`.
pub fn find_overlapping_ranges(
    predictions: &[PersonPrediction],
    members: &HashSet<i64>,
    min_count: i64,
) -> Vec<TimeRange> {
    let mut events: Vec<(&str, i64)> = predictions
        .iter()
        .filter(|p| members.contains(&p.person_id))
        .flat_map(|p| [(p.visit.as_str(), 1), (p.departure.as_str(), -1)])
        .collect();
    events.sort_by(|a, b| a.0.cmp(b.0));

    let mut ranges = Vec::new();
    let mut current: i64 = 0;
    let mut open: Option<&str> = None;

    for (time, delta) in events {
        let prev = current;
        current += delta;

        if prev < min_count && current >= min_count {
            open = Some(time);
        } else if prev >= min_count && current < min_count {
            // Without a prior opening (min_count <= 0) there is nothing to close.
            if let Some(start) = open.take() {
                ranges.push(TimeRange::new(start, time));
            }
        }
    }

    if let Some(start) = open {
        ranges.push(TimeRange::new(start, END_OF_DAY));
    }

    debug!(
        predictions = predictions.len(),
        min_count,
        windows = ranges.len(),
        "occupancy sweep"
    );
    ranges
}
