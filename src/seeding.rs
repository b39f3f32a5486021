//! Centroid seeding: picking the students whose features become the initial
//! centroids.
//!
//! Index selection is behind the [`CentroidSeeder`] trait so scenario tests
//! can pin the starting configuration exactly while production runs sample
//! uniformly from a seeded generator. Reruns with the same seed reproduce the
//! same outcome bit for bit.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::types::{Centroid, FeatureVector};

/// Source of initial centroid positions.
///
/// Implementations must return exactly `count` distinct indices in
/// `0..population`; selection order is meaningful because it fixes the
/// pre-stabilization cluster numbering.
pub trait CentroidSeeder: Send + Sync {
    /// Short identifier for logs and summaries.
    fn name(&self) -> &str;

    /// Pick `count` distinct student indices from `0..population`.
    fn select_indices(&self, population: usize, count: usize) -> Vec<usize>;
}

/// Uniform sampling without replacement from a fixed seed.
pub struct SeededSampler {
    pub seed: u64,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl CentroidSeeder for SeededSampler {
    fn name(&self) -> &str {
        "seeded-sampler"
    }

    fn select_indices(&self, population: usize, count: usize) -> Vec<usize> {
        // Fresh generator per call: the sampler stays stateless, so reusing
        // one instance across runs cannot drift.
        let mut rng = SmallRng::seed_from_u64(self.seed);
        rand::seq::index::sample(&mut rng, population, count).into_vec()
    }
}

/// Hand-picked starting indices, for scenario tests and replay.
pub struct FixedIndices {
    pub indices: Vec<usize>,
}

impl FixedIndices {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

impl CentroidSeeder for FixedIndices {
    fn name(&self) -> &str {
        "fixed-indices"
    }

    fn select_indices(&self, _population: usize, count: usize) -> Vec<usize> {
        self.indices[..count].to_vec()
    }
}

/// Copy the seeded students' feature arrays into the initial centroid set,
/// preserving selection order.
pub fn initialize_centroids(
    vectors: &[FeatureVector],
    count: usize,
    seeder: &dyn CentroidSeeder,
) -> Vec<Centroid> {
    let indices = seeder.select_indices(vectors.len(), count);
    debug_assert_eq!(
        indices.len(),
        count,
        "seeder {} returned {} indices, wanted {}",
        seeder.name(),
        indices.len(),
        count
    );
    #[cfg(debug_assertions)]
    {
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        debug_assert_eq!(
            sorted.len(),
            count,
            "seeder {} returned duplicate indices",
            seeder.name()
        );
    }
    indices.iter().map(|&i| vectors[i].features).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vectors(n: usize) -> Vec<FeatureVector> {
        (0..n)
            .map(|i| FeatureVector {
                student_id: i as u64,
                features: [i as f64 / n as f64; 4],
            })
            .collect()
    }

    #[test]
    fn test_seeded_sampler_is_deterministic() {
        let sampler = SeededSampler::new(1234);
        let a = sampler.select_indices(50, 5);
        let b = sampler.select_indices(50, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_sampler_indices_are_valid() {
        for seed in 0..20 {
            let sampler = SeededSampler::new(seed);
            let mut indices = sampler.select_indices(30, 7);
            assert_eq!(indices.len(), 7);
            assert!(indices.iter().all(|&i| i < 30));
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), 7, "duplicate index for seed {}", seed);
        }
    }

    #[test]
    fn test_full_population_selection_covers_everyone() {
        let sampler = SeededSampler::new(9);
        let mut indices = sampler.select_indices(8, 8);
        indices.sort_unstable();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_fixed_indices_prefix() {
        let seeder = FixedIndices::new(vec![4, 1, 6]);
        assert_eq!(seeder.select_indices(10, 2), vec![4, 1]);
        assert_eq!(seeder.select_indices(10, 3), vec![4, 1, 6]);
    }

    #[test]
    fn test_initialize_copies_selected_features() {
        let vectors = make_vectors(10);
        let seeder = FixedIndices::new(vec![3, 0, 7]);
        let centroids = initialize_centroids(&vectors, 3, &seeder);
        assert_eq!(centroids.len(), 3);
        assert_eq!(centroids[0], vectors[3].features);
        assert_eq!(centroids[1], vectors[0].features);
        assert_eq!(centroids[2], vectors[7].features);
    }
}
