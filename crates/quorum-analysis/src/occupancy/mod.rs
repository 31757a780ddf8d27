//! Occupancy windows and recommended ranges.
//!
//! - [`sweep`]: sweep-line over visit/departure events
//! - [`merge`]: pairing presence-service predictions, attendee filtering
//! - [`recommend`]: intersection with the activity range

pub mod merge;
pub mod recommend;
pub mod sweep;

pub use merge::{filter_by_threshold, merge_predictions, PersonProbability, PresenceEstimate};
pub use recommend::intersect;
pub use sweep::{find_overlapping_ranges, PersonPrediction, TimeRange};
