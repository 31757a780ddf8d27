//! Component-count selection by BIC and partitioning into clusters.

use quorum_core::config::MixtureConfig;
use quorum_core::time::Minutes;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use super::gaussian::GaussianMixture;

/// Samples assigned to one mixture component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Members in input order.
    pub members: Vec<f64>,
    /// Mean of the component the members were assigned to.
    pub center: f64,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sample standard deviation (n - 1). NaN for fewer than two members.
    pub fn std_dev(&self) -> f64 {
        self.members.iter().std_dev()
    }
}

/// Outcome of fitting every candidate component count.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    /// The lowest-BIC model.
    pub model: GaussianMixture,
    /// BIC per candidate, index 0 is k = 1.
    pub bic_scores: Vec<f64>,
}

impl ModelSelection {
    pub fn component_count(&self) -> usize {
        self.model.n_components
    }
}

/// Fit `k = 1..=min(max_components, n)` and keep the lowest BIC.
///
/// Ties keep the smaller `k`. Returns `None` for empty data.
pub fn select_model<R: Rng + ?Sized>(
    data: &[f64],
    config: &MixtureConfig,
    rng: &mut R,
) -> Option<ModelSelection> {
    let max_k = config.effective_max_components().min(data.len());

    let mut best: Option<GaussianMixture> = None;
    let mut best_bic = f64::INFINITY;
    let mut bic_scores = Vec::with_capacity(max_k);

    for k in 1..=max_k {
        let mut gmm = GaussianMixture::new(k, config);
        gmm.fit(data, rng);
        let bic = gmm.bic(data);
        bic_scores.push(bic);
        if best.is_none() || bic < best_bic {
            best_bic = bic;
            best = Some(gmm);
        }
    }

    let model = best?;
    debug!(
        n = data.len(),
        k = model.n_components,
        bic = best_bic,
        "selected mixture"
    );
    Some(ModelSelection { model, bic_scores })
}

/// Split `data` into one cluster per component by predicted label.
///
/// Components that win no sample yield empty clusters.
pub fn partition(data: &[f64], model: &GaussianMixture) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = model
        .means
        .iter()
        .map(|&center| Cluster {
            members: Vec::new(),
            center,
        })
        .collect();

    for (&x, label) in data.iter().zip(model.predict(data)) {
        clusters[label].members.push(x);
    }
    clusters
}

/// Cluster minute samples with the best mixture by BIC.
///
/// Empty input yields no clusters.
pub fn cluster<R: Rng + ?Sized>(
    samples: &[Minutes],
    config: &MixtureConfig,
    rng: &mut R,
) -> Vec<Cluster> {
    let data: Vec<f64> = samples.iter().map(|&m| f64::from(m)).collect();
    match select_model(&data, config, rng) {
        Some(selection) => partition(&data, &selection.model),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_input_yields_no_clusters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(cluster(&[], &MixtureConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_candidate_count_capped_by_sample_size() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = [600.0, 900.0];
        let selection = select_model(&data, &MixtureConfig::default(), &mut rng).unwrap();
        assert_eq!(selection.bic_scores.len(), 2);
    }

    #[test]
    fn test_candidate_count_capped_by_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = MixtureConfig {
            max_components: Some(2),
            ..Default::default()
        };
        let data: Vec<f64> = (0..20).map(|i| 400.0 + 30.0 * i as f64).collect();
        let selection = select_model(&data, &config, &mut rng).unwrap();
        assert_eq!(selection.bic_scores.len(), 2);
        assert!(selection.component_count() <= 2);
    }

    #[test]
    fn test_selected_model_has_lowest_bic() {
        let mut rng = StdRng::seed_from_u64(9);
        let data = [480.0, 481.0, 479.0, 482.0, 1080.0, 1079.0, 1081.0, 1082.0];
        let selection = select_model(&data, &MixtureConfig::default(), &mut rng).unwrap();
        let min = selection
            .bic_scores
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(selection.bic_scores[selection.component_count() - 1], min);
    }

    #[test]
    fn test_partition_keeps_input_order() {
        let mut model = GaussianMixture::new(2, &MixtureConfig::default());
        model.means = vec![100.0, 500.0];
        model.variances = vec![100.0, 100.0];
        model.weights = vec![0.5, 0.5];
        let clusters = partition(&[510.0, 95.0, 490.0, 105.0], &model);
        assert_eq!(clusters[0].members, vec![95.0, 105.0]);
        assert_eq!(clusters[1].members, vec![510.0, 490.0]);
        assert_eq!(clusters[1].center, 500.0);
    }

    #[test]
    fn test_cluster_std_dev_is_sample_std_dev() {
        let c = Cluster {
            members: vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
            center: 5.0,
        };
        // Sum of squared deviations 32, n - 1 = 7.
        assert!((c.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
