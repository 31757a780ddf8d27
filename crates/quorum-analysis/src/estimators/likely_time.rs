//! Most likely occurrence time: the size-weighted mean of cluster centres.

use quorum_core::errors::EstimationError;
use quorum_core::time::Minutes;
use rand::rngs::StdRng;
use rand::Rng;

use super::{parse_all, PresenceEstimator};
use crate::mixture::Cluster;

impl<R: Rng> PresenceEstimator<R> {
    /// Most likely minute of day for `samples`, floored.
    ///
    /// `weeks` does not influence the result; it is accepted so both
    /// estimators share a call shape.
    pub fn most_likely_time<S: AsRef<str>>(
        &mut self,
        samples: &[S],
        _weeks: u32,
    ) -> Result<Minutes, EstimationError> {
        let minutes = parse_all(samples)?;
        let clusters = if minutes.len() > 1 {
            self.cluster(&minutes)
        } else {
            Vec::new()
        };
        likely_time_from_clusters(&minutes, &clusters)
    }
}

/// Size-weighted mean of the centres of `clusters`, floored.
///
/// No samples is `NoData`; a lone sample is returned unchanged and ignores
/// `clusters`.
pub(crate) fn likely_time_from_clusters(
    minutes: &[Minutes],
    clusters: &[Cluster],
) -> Result<Minutes, EstimationError> {
    match minutes {
        [] => Err(EstimationError::NoData),
        [only] => Ok(*only),
        _ => {
            let n = minutes.len() as f64;
            let (weighted, total_weight) = clusters
                .iter()
                .filter(|c| !c.is_empty())
                .fold((0.0, 0.0), |(sum, total), c| {
                    let weight = c.len() as f64 / n;
                    (sum + c.center * weight, total + weight)
                });
            if total_weight <= 0.0 {
                return Err(EstimationError::NoData);
            }
            Ok((weighted / total_weight).floor() as Minutes)
        }
    }
}

/// [`PresenceEstimator::most_likely_time`] with a default, entropy-seeded estimator.
pub fn most_likely_time<S: AsRef<str>>(samples: &[S], weeks: u32) -> Result<Minutes, EstimationError> {
    PresenceEstimator::<StdRng>::default().most_likely_time(samples, weeks)
}
