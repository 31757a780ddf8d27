//! One-dimensional Gaussian mixture fit by Expectation-Maximization.
//!
//! Densities come from `statrs::distribution::Normal`. Every component keeps
//! a strictly positive variance (floored by `MixtureConfig::variance_floor`),
//! so the densities are always well defined.

use quorum_core::config::MixtureConfig;
use quorum_core::constants::{FALLBACK_VARIANCE, MIN_COMPONENT_MASS};
use rand::Rng;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;
use tracing::trace;

use super::seeding::kmeans_plus_plus;

/// A 1-D Gaussian mixture model.
///
/// Created per estimation, fit once, queried, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMixture {
    pub n_components: usize,
    pub means: Vec<f64>,
    pub variances: Vec<f64>,
    pub weights: Vec<f64>,
    max_iter: usize,
    tolerance: f64,
    variance_floor: f64,
    iterations: usize,
}

impl GaussianMixture {
    /// Create an unfitted mixture with `n_components` components.
    pub fn new(n_components: usize, config: &MixtureConfig) -> Self {
        Self {
            n_components,
            means: Vec::new(),
            variances: Vec::new(),
            weights: Vec::new(),
            max_iter: config.effective_max_iterations(),
            tolerance: config.effective_tolerance(),
            variance_floor: config.effective_variance_floor(),
            iterations: 0,
        }
    }

    /// EM iterations run by the last `fit`.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Fit the mixture to `data` with k-means++ seeding drawn from `rng`.
    ///
    /// Stops once the log-likelihood changes by less than the tolerance or
    /// the iteration cap is reached. Hitting the cap is not an error.
    pub fn fit<R: Rng + ?Sized>(&mut self, data: &[f64], rng: &mut R) {
        let n = data.len();
        let k = self.n_components;
        self.iterations = 0;

        self.means = kmeans_plus_plus(data, k, rng);

        let mut initial_variance = data.iter().variance();
        // NaN for fewer than two samples.
        if initial_variance.is_nan() || initial_variance < self.variance_floor {
            initial_variance = FALLBACK_VARIANCE;
        }
        self.variances = vec![initial_variance; k];
        self.weights = vec![1.0 / k as f64; k];

        if n == 0 || k == 0 {
            return;
        }

        // responsibilities[i][j]: posterior that sample i came from component j
        let mut responsibilities = vec![vec![0.0; k]; n];
        let mut prev_log_likelihood = f64::NEG_INFINITY;

        for iter in 0..self.max_iter {
            self.expectation(data, &mut responsibilities);
            self.maximization(data, &responsibilities);

            self.iterations = iter + 1;
            let log_likelihood = self.log_likelihood(data);
            if (log_likelihood - prev_log_likelihood).abs() < self.tolerance {
                break;
            }
            prev_log_likelihood = log_likelihood;
        }

        trace!(
            k,
            n,
            iterations = self.iterations,
            converged = self.iterations < self.max_iter,
            "EM finished"
        );
    }

    /// E-step: normalized responsibilities, uniform when every density underflows.
    fn expectation(&self, data: &[f64], responsibilities: &mut [Vec<f64>]) {
        let k = self.n_components;
        for (row, &x) in responsibilities.iter_mut().zip(data) {
            let mut total = 0.0;
            for (j, r) in row.iter_mut().enumerate() {
                *r = self.weighted_density(j, x);
                total += *r;
            }
            for r in row.iter_mut() {
                *r = if total > 0.0 { *r / total } else { 1.0 / k as f64 };
            }
        }
    }

    /// M-step: re-estimate weight, mean and variance of each component.
    ///
    /// Components with negligible responsibility mass keep their previous
    /// parameters.
    fn maximization(&mut self, data: &[f64], responsibilities: &[Vec<f64>]) {
        let n = data.len() as f64;
        for j in 0..self.n_components {
            let mut mass = 0.0;
            let mut mean_sum = 0.0;
            for (row, &x) in responsibilities.iter().zip(data) {
                mass += row[j];
                mean_sum += row[j] * x;
            }
            if mass <= MIN_COMPONENT_MASS {
                continue;
            }

            let mean = mean_sum / mass;
            let var_sum: f64 = responsibilities
                .iter()
                .zip(data)
                .map(|(row, &x)| row[j] * (x - mean) * (x - mean))
                .sum();

            self.means[j] = mean;
            self.variances[j] = (var_sum / mass).max(self.variance_floor);
            self.weights[j] = mass / n;
        }
    }

    /// `weight[j] * N(x | mean[j], variance[j])`.
    fn weighted_density(&self, j: usize, x: f64) -> f64 {
        self.weights[j] * density(x, self.means[j], self.variances[j])
    }

    /// Total log-likelihood of `data`. Samples with zero mixture density
    /// contribute nothing.
    pub fn log_likelihood(&self, data: &[f64]) -> f64 {
        data.iter()
            .map(|&x| {
                (0..self.n_components)
                    .map(|j| self.weighted_density(j, x))
                    .sum::<f64>()
            })
            .filter(|&p| p > 0.0)
            .map(f64::ln)
            .sum()
    }

    /// Most probable component for each sample.
    ///
    /// Ties keep the lowest component index; a sample whose every density
    /// underflows to zero is assigned to component 0.
    pub fn predict(&self, data: &[f64]) -> Vec<usize> {
        data.iter()
            .map(|&x| {
                let mut best = 0;
                let mut best_prob = 0.0;
                for j in 0..self.n_components {
                    let p = self.weighted_density(j, x);
                    if p > best_prob {
                        best_prob = p;
                        best = j;
                    }
                }
                best
            })
            .collect()
    }

    /// Bayesian Information Criterion: `-2 logL + (3k - 1) ln n`.
    ///
    /// `3k - 1` counts k means, k variances and k - 1 free weights.
    pub fn bic(&self, data: &[f64]) -> f64 {
        let n = data.len() as f64;
        let k = self.n_components as f64;
        let num_params = 3.0 * k - 1.0;
        -2.0 * self.log_likelihood(data) + num_params * n.ln()
    }
}

/// Normal density; zero when the parameters do not describe a distribution.
fn density(x: f64, mean: f64, variance: f64) -> f64 {
    match Normal::new(mean, variance.sqrt()) {
        Ok(dist) => dist.pdf(x),
        Err(_) => 0.0,
    }
}
