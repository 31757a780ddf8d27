//! Per-activity recommendation pipeline.
//!
//! For each activity:
//! 1. activity probability at the cutoff time must reach the activity threshold
//! 2. derive the activity's typical time range
//! 3. keep members whose presence probability reaches the attendee threshold
//! 4. pair their visit/departure predictions
//! 5. find windows where `min_quorum` members overlap
//! 6. intersect those windows with the activity range
//!
//! Any empty stage ends the pipeline with no recommendation.

use std::collections::HashSet;

use chrono::{NaiveDateTime, Weekday};
use quorum_core::config::{MixtureConfig, NotificationConfig, QuorumConfig};
use quorum_core::errors::EstimationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::activity::{activity_probability, activity_time_range};
use super::history::ActivityHistory;
use crate::estimators::PresenceEstimator;
use crate::occupancy::{
    filter_by_threshold, find_overlapping_ranges, intersect, merge_predictions, PersonPrediction,
    PersonProbability, PresenceEstimate, TimeRange,
};

/// One activity and everything known about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityContext {
    pub activity_id: u64,
    pub name: String,
    /// Members that must be present together.
    pub min_quorum: i64,
    /// Person ids registered for the activity.
    pub members: Vec<i64>,
    pub history: ActivityHistory,
}

/// Presence-service predictions for the target weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleForecast {
    pub weekday: Weekday,
    pub probabilities: Vec<PersonProbability>,
    pub visits: Vec<PresenceEstimate>,
    pub departures: Vec<PresenceEstimate>,
}

/// Recommended ranges for one activity and the people expected to attend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub activity_id: u64,
    pub activity_name: String,
    pub ranges: Vec<TimeRange>,
    pub attendees: Vec<PersonPrediction>,
}

/// Result of planning many activities: recommendations plus the errors of
/// activities that could not be evaluated.
#[derive(Debug, Clone, Default)]
pub struct PlanBatch {
    pub recommendations: Vec<Recommendation>,
    pub errors: Vec<(u64, EstimationError)>,
}

impl PlanBatch {
    /// True when every activity was evaluated.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the recommendation pipeline with fixed thresholds and mixture settings.
#[derive(Debug, Clone, Default)]
pub struct NotificationPlanner {
    notification: NotificationConfig,
    mixture: MixtureConfig,
}

impl NotificationPlanner {
    pub fn new(notification: NotificationConfig, mixture: MixtureConfig) -> Self {
        Self {
            notification,
            mixture,
        }
    }

    pub fn from_config(config: &QuorumConfig) -> Self {
        Self::new(config.notification.clone(), config.mixture.clone())
    }

    /// Plan one activity with its own estimator.
    pub fn plan(
        &self,
        activity: &ActivityContext,
        people: &PeopleForecast,
        now: NaiveDateTime,
    ) -> Result<Option<Recommendation>, EstimationError> {
        let mut estimator = self.estimator_for(activity.activity_id);
        self.plan_with(&mut estimator, activity, people, now)
    }

    /// Plan one activity with a caller-provided estimator.
    pub fn plan_with<R: Rng>(
        &self,
        estimator: &mut PresenceEstimator<R>,
        activity: &ActivityContext,
        people: &PeopleForecast,
        now: NaiveDateTime,
    ) -> Result<Option<Recommendation>, EstimationError> {
        let id = activity.activity_id;
        let history = activity.history.for_weekday(people.weekday);

        let probability = activity_probability(
            estimator,
            &history,
            self.notification.effective_cutoff_time(),
            now,
        )?;
        let threshold = self.notification.effective_activity_threshold();
        if probability < threshold {
            debug!(activity = id, probability, threshold, "activity unlikely, skipping");
            return Ok(None);
        }

        let activity_range = activity_time_range(estimator, &history, now);

        if activity.members.is_empty() {
            debug!(activity = id, "activity has no members");
            return Ok(None);
        }
        let members: HashSet<i64> = activity.members.iter().copied().collect();

        let member_probabilities: Vec<PersonProbability> = people
            .probabilities
            .iter()
            .filter(|p| members.contains(&p.person_id))
            .cloned()
            .collect();
        let attendees: HashSet<i64> = filter_by_threshold(
            &member_probabilities,
            self.notification.effective_attendee_threshold(),
        )
        .into_iter()
        .collect();
        if attendees.is_empty() {
            debug!(activity = id, "no likely attendees");
            return Ok(None);
        }

        let visits = only(&people.visits, &attendees);
        let departures = only(&people.departures, &attendees);
        let predictions = merge_predictions(&visits, &departures);

        let occupancy = find_overlapping_ranges(&predictions, &members, activity.min_quorum);
        if occupancy.is_empty() {
            debug!(activity = id, min_quorum = activity.min_quorum, "quorum never reached");
            return Ok(None);
        }

        let ranges = intersect(&activity_range, &occupancy);
        if ranges.is_empty() {
            debug!(
                activity = id,
                start = %activity_range.start,
                end = %activity_range.end,
                "occupancy outside activity range"
            );
            return Ok(None);
        }

        info!(activity = id, ranges = ranges.len(), attendees = predictions.len(), "recommendation ready");
        Ok(Some(Recommendation {
            activity_id: id,
            activity_name: activity.name.clone(),
            ranges,
            attendees: predictions,
        }))
    }

    /// Plan every activity in parallel.
    ///
    /// An activity that fails is recorded in [`PlanBatch::errors`]; the rest
    /// are unaffected. Output keeps input order.
    pub fn plan_all(
        &self,
        activities: &[ActivityContext],
        people: &PeopleForecast,
        now: NaiveDateTime,
    ) -> PlanBatch {
        let outcomes: Vec<(u64, Result<Option<Recommendation>, EstimationError>)> = activities
            .par_iter()
            .map(|activity| (activity.activity_id, self.plan(activity, people, now)))
            .collect();

        let mut batch = PlanBatch::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(Some(recommendation)) => batch.recommendations.push(recommendation),
                Ok(None) => {}
                Err(e) => batch.errors.push((id, e)),
            }
        }
        info!(
            activities = activities.len(),
            recommended = batch.recommendations.len(),
            failed = batch.errors.len(),
            "planning finished"
        );
        batch
    }

    /// Estimator for one activity, reproducible when a seed is configured.
    fn estimator_for(&self, activity_id: u64) -> PresenceEstimator<StdRng> {
        match self.mixture.seed {
            Some(seed) => {
                let rng = StdRng::seed_from_u64(seed ^ activity_id.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                PresenceEstimator::with_rng(self.mixture.clone(), rng)
            }
            None => PresenceEstimator::new(self.mixture.clone()),
        }
    }
}

fn only(estimates: &[PresenceEstimate], persons: &HashSet<i64>) -> Vec<PresenceEstimate> {
    estimates
        .iter()
        .filter(|e| persons.contains(&e.person_id))
        .cloned()
        .collect()
}
