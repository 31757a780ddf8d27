//! k-means++ seeding for one-dimensional data.

use rand::Rng;

/// Choose `k` initial means from `data`.
///
/// The first mean is drawn uniformly; each following mean is drawn with
/// probability proportional to its squared distance from the nearest mean
/// already chosen. When every point coincides with a chosen mean the draw
/// falls back to uniform.
pub fn kmeans_plus_plus<R: Rng + ?Sized>(data: &[f64], k: usize, rng: &mut R) -> Vec<f64> {
    if data.is_empty() {
        return vec![0.0; k];
    }

    let n = data.len();
    let mut means = Vec::with_capacity(k);
    means.push(data[rng.gen_range(0..n)]);

    let mut distances = vec![0.0; n];
    while means.len() < k {
        let mut total = 0.0;
        for (d, &x) in distances.iter_mut().zip(data) {
            *d = means
                .iter()
                .map(|&m| (x - m) * (x - m))
                .fold(f64::INFINITY, f64::min);
            total += *d;
        }

        let next = if total > 0.0 {
            let r = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            distances
                .iter()
                .position(|&d| {
                    cumulative += d;
                    cumulative >= r
                })
                .map(|i| data[i])
                // Rounding can leave `cumulative` a hair below `r`.
                .unwrap_or(data[n - 1])
        } else {
            data[rng.gen_range(0..n)]
        };
        means.push(next);
    }

    means
}
