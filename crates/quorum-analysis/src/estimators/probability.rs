//! Cumulative arrival probability.
//!
//! Each cluster is treated as a Normal centred on its component mean with
//! the cluster's sample standard deviation, weighted by the share of weeks
//! it accounts for (`|cluster| / weeks`). The weighted CDFs at the target
//! time are summed. The sum is not clamped: when every week contributed an
//! observation it reaches 1.0, and a mis-specified model may exceed it.

use std::collections::BTreeMap;

use quorum_core::errors::EstimationError;
use quorum_core::time::{minutes_to_time, parse_timestamp, time_to_minutes, Minutes};
use rand::rngs::StdRng;
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Normal};

use super::{parse_all, PresenceEstimator};
use crate::mixture::Cluster;

impl<R: Rng> PresenceEstimator<R> {
    /// Probability that the activity has started by `target`.
    ///
    /// `samples` are historical `"HH:MM"` observations for one weekday and
    /// `weeks` the number of calendar weeks they were gathered over. No
    /// samples yields `0.0`.
    pub fn probability_by<S: AsRef<str>>(
        &mut self,
        samples: &[S],
        target: &str,
        weeks: u32,
    ) -> Result<f64, EstimationError> {
        let minutes = parse_all(samples)?;
        let target = time_to_minutes(target)?;
        if weeks == 0 {
            return Err(EstimationError::InvalidWeeks { weeks });
        }
        let clusters = if minutes.len() > 1 {
            self.cluster(&minutes)
        } else {
            Vec::new()
        };
        probability_from_clusters(&minutes, &clusters, target, weeks)
    }

    /// Like [`probability_by`](Self::probability_by) over dated samples,
    /// counting at most one observation per calendar date.
    ///
    /// `timestamps` are `"YYYY-MM-DD HH:MM"`; the earliest time of each date
    /// is kept.
    pub fn probability_by_unique_date<S: AsRef<str>>(
        &mut self,
        timestamps: &[S],
        target: &str,
        weeks: u32,
    ) -> Result<f64, EstimationError> {
        let mut earliest = BTreeMap::new();
        for ts in timestamps {
            let at = parse_timestamp(ts.as_ref())?;
            earliest
                .entry(at.date())
                .and_modify(|t| {
                    if at.time() < *t {
                        *t = at.time();
                    }
                })
                .or_insert(at.time());
        }

        let samples: Vec<String> = earliest
            .values()
            .map(|t| minutes_to_time(minutes_of(t)))
            .collect();
        self.probability_by(&samples, target, weeks)
    }
}

/// [`PresenceEstimator::probability_by`] with a default, entropy-seeded estimator.
pub fn probability_of_presence_by<S: AsRef<str>>(
    samples: &[S],
    target: &str,
    weeks: u32,
) -> Result<f64, EstimationError> {
    PresenceEstimator::<StdRng>::default().probability_by(samples, target, weeks)
}

/// Probability by `target` given `minutes` already partitioned into `clusters`.
///
/// No samples yields `0.0`; a lone sample is a point mass worth one week and
/// ignores `clusters`.
pub(crate) fn probability_from_clusters(
    minutes: &[Minutes],
    clusters: &[Cluster],
    target: Minutes,
    weeks: u32,
) -> Result<f64, EstimationError> {
    if weeks == 0 {
        return Err(EstimationError::InvalidWeeks { weeks });
    }
    let weeks = f64::from(weeks);
    match minutes {
        [] => Ok(0.0),
        [only] => Ok(if target >= *only { 1.0 / weeks } else { 0.0 }),
        _ => {
            let target = f64::from(target);
            Ok(clusters
                .iter()
                .map(|c| cluster_contribution(c, target, weeks))
                .sum())
        }
    }
}

/// Mass one cluster contributes by `target`.
fn cluster_contribution(cluster: &Cluster, target: f64, weeks: f64) -> f64 {
    let share = cluster.len() as f64 / weeks;
    match cluster.members.as_slice() {
        [] => 0.0,
        [only] => {
            if target >= *only {
                1.0 / weeks
            } else {
                0.0
            }
        }
        [first, ..] => {
            let sd = cluster.std_dev();
            if sd == 0.0 {
                // Every member identical: a step at that value.
                if *first <= target {
                    share
                } else {
                    0.0
                }
            } else {
                match Normal::new(cluster.center, sd) {
                    Ok(dist) => dist.cdf(target) * share,
                    Err(_) => 0.0,
                }
            }
        }
    }
}

fn minutes_of(t: &chrono::NaiveTime) -> i32 {
    use chrono::Timelike;
    (t.hour() * 60 + t.minute()) as i32
}
