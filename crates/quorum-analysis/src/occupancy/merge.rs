//! Joining presence-service outputs into per-person predictions.

use serde::{Deserialize, Serialize};

use super::sweep::PersonPrediction;

/// One side (visit or departure) of a person's predicted presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEstimate {
    pub person_id: i64,
    /// `"HH:MM"`.
    pub time: String,
}

impl PresenceEstimate {
    pub fn new(person_id: i64, time: impl Into<String>) -> Self {
        Self {
            person_id,
            time: time.into(),
        }
    }
}

/// Probability that a person shows up on the day in question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProbability {
    pub person_id: i64,
    pub probability: f64,
}

/// Pair each visit with the first departure of the same person.
///
/// Visits without a matching departure are dropped; visit order is kept.
pub fn merge_predictions(
    visits: &[PresenceEstimate],
    departures: &[PresenceEstimate],
) -> Vec<PersonPrediction> {
    visits
        .iter()
        .filter_map(|v| {
            departures
                .iter()
                .find(|d| d.person_id == v.person_id)
                .map(|d| PersonPrediction::new(v.person_id, v.time.clone(), d.time.clone()))
        })
        .collect()
}

/// Persons whose probability is at least `threshold`, in input order.
pub fn filter_by_threshold(probabilities: &[PersonProbability], threshold: f64) -> Vec<i64> {
    probabilities
        .iter()
        .filter(|p| p.probability >= threshold)
        .map(|p| p.person_id)
        .collect()
}
