//! Presence estimators built on the mixture clustering.
//!
//! [`PresenceEstimator`] owns the mixture configuration and the random
//! source used for k-means++ seeding. Production code seeds from
//! `MixtureConfig::seed` or entropy; tests inject a fixed `StdRng`.

pub mod likely_time;
pub mod probability;
pub mod summary;

use quorum_core::config::MixtureConfig;
use quorum_core::errors::TimeError;
use quorum_core::time::{time_to_minutes, Minutes};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::mixture::{self, Cluster, ModelSelection};

pub use likely_time::most_likely_time;
pub use probability::probability_of_presence_by;
pub use summary::ActivityPrediction;

/// Estimator state for one computation (or a sequence of them).
#[derive(Debug, Clone)]
pub struct PresenceEstimator<R: Rng = StdRng> {
    config: MixtureConfig,
    rng: R,
}

impl PresenceEstimator<StdRng> {
    /// Seed from `config.seed`, or from entropy when unset.
    pub fn new(config: MixtureConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }
}

impl Default for PresenceEstimator<StdRng> {
    fn default() -> Self {
        Self::new(MixtureConfig::default())
    }
}

impl<R: Rng> PresenceEstimator<R> {
    /// Use a caller-provided random source.
    pub fn with_rng(config: MixtureConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &MixtureConfig {
        &self.config
    }

    /// Cluster minute samples with the lowest-BIC mixture.
    pub fn cluster(&mut self, samples: &[Minutes]) -> Vec<Cluster> {
        mixture::cluster(samples, &self.config, &mut self.rng)
    }

    /// Fit every candidate component count and return the selection.
    pub fn select(&mut self, samples: &[Minutes]) -> Option<ModelSelection> {
        let data: Vec<f64> = samples.iter().map(|&m| f64::from(m)).collect();
        mixture::select_model(&data, &self.config, &mut self.rng)
    }
}

/// Decode every `"HH:MM"` sample, failing on the first malformed one.
pub(crate) fn parse_all<S: AsRef<str>>(samples: &[S]) -> Result<Vec<Minutes>, TimeError> {
    samples.iter().map(|s| time_to_minutes(s.as_ref())).collect()
}
