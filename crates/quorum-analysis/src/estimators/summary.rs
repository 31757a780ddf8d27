//! Per-weekday activity summary.

use chrono::Weekday;
use quorum_core::errors::EstimationError;
use quorum_core::time::{minutes_to_time, time_to_minutes};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::likely_time::likely_time_from_clusters;
use super::probability::probability_from_clusters;
use super::{parse_all, PresenceEstimator};

/// Estimates for one activity on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPrediction {
    pub weekday: Weekday,
    pub probability: f64,
    /// `"HH:MM"`, absent when there were no samples.
    pub most_likely_time: Option<String>,
    /// Clusters behind both `probability` and `most_likely_time`.
    pub cluster_count: usize,
    pub data_point_count: usize,
}

impl ActivityPrediction {
    /// Summary for a weekday with no observations.
    pub fn empty(weekday: Weekday) -> Self {
        Self {
            weekday,
            probability: 0.0,
            most_likely_time: None,
            cluster_count: 0,
            data_point_count: 0,
        }
    }
}

impl<R: Rng> PresenceEstimator<R> {
    /// Probability by `target`, most likely time and cluster count of
    /// `samples` observed on `weekday`, all from a single clustering.
    pub fn summarize<S: AsRef<str>>(
        &mut self,
        weekday: Weekday,
        samples: &[S],
        target: &str,
        weeks: u32,
    ) -> Result<ActivityPrediction, EstimationError> {
        let minutes = parse_all(samples)?;
        if minutes.is_empty() {
            return Ok(ActivityPrediction::empty(weekday));
        }
        let target = time_to_minutes(target)?;
        if weeks == 0 {
            return Err(EstimationError::InvalidWeeks { weeks });
        }

        // One fit feeds every figure in the summary.
        let clusters = self.cluster(&minutes);
        let probability = probability_from_clusters(&minutes, &clusters, target, weeks)?;
        let most_likely = likely_time_from_clusters(&minutes, &clusters)?;
        let cluster_count = clusters.len();

        Ok(ActivityPrediction {
            weekday,
            probability,
            most_likely_time: Some(minutes_to_time(most_likely)),
            cluster_count,
            data_point_count: minutes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_core::config::MixtureConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn estimator() -> PresenceEstimator<StdRng> {
        PresenceEstimator::with_rng(MixtureConfig::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_empty_summary() {
        let empty: [&str; 0] = [];
        let summary = estimator()
            .summarize(Weekday::Tue, &empty, "23:59", 3)
            .unwrap();
        assert_eq!(summary, ActivityPrediction::empty(Weekday::Tue));
    }

    #[test]
    fn test_single_sample_summary() {
        let summary = estimator()
            .summarize(Weekday::Fri, &["17:30"], "23:59", 2)
            .unwrap();
        assert_eq!(summary.most_likely_time.as_deref(), Some("17:30"));
        assert_eq!(summary.cluster_count, 1);
        assert_eq!(summary.data_point_count, 1);
        assert!((summary.probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weeks_with_samples_is_error() {
        let result = estimator().summarize(Weekday::Mon, &["09:00"], "23:59", 0);
        assert_eq!(result, Err(EstimationError::InvalidWeeks { weeks: 0 }));
    }

    #[test]
    fn test_summary_figures_share_one_clustering() {
        let samples = [
            "08:00", "08:03", "08:05", "08:09", "12:40", "17:55", "18:00", "18:04",
        ];
        let summary = estimator()
            .summarize(Weekday::Wed, &samples, "12:00", 8)
            .unwrap();

        // A fresh estimator with the same seed draws the same clustering.
        let minutes = parse_all(&samples).unwrap();
        let clusters = estimator().cluster(&minutes);
        let target = time_to_minutes("12:00").unwrap();

        assert_eq!(summary.cluster_count, clusters.len());
        assert_eq!(summary.data_point_count, 8);
        assert_eq!(
            summary.probability,
            probability_from_clusters(&minutes, &clusters, target, 8).unwrap()
        );
        assert_eq!(
            summary.most_likely_time,
            Some(minutes_to_time(
                likely_time_from_clusters(&minutes, &clusters).unwrap()
            ))
        );
    }
}
