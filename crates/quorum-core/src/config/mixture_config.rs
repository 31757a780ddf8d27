//! Gaussian mixture estimation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_COMPONENTS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, DEFAULT_VARIANCE_FLOOR,
};

/// Configuration for EM fitting and component-count selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MixtureConfig {
    /// Largest component count tried during selection. Default: 4.
    pub max_components: Option<usize>,
    /// EM iteration cap. Default: 100.
    pub max_iterations: Option<usize>,
    /// Convergence tolerance on |Δ log-likelihood|. Default: 1e-6.
    pub tolerance: Option<f64>,
    /// Variance floor for every component. Default: 1e-6.
    pub variance_floor: Option<f64>,
    /// Seed for k-means++ initialization. Unset means entropy-seeded.
    pub seed: Option<u64>,
}

impl MixtureConfig {
    /// Config with a fixed seed and defaults for everything else.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn effective_max_components(&self) -> usize {
        self.max_components.unwrap_or(DEFAULT_MAX_COMPONENTS)
    }

    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    pub fn effective_variance_floor(&self) -> f64 {
        self.variance_floor.unwrap_or(DEFAULT_VARIANCE_FLOOR)
    }
}
