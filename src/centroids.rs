//! Centroid updates and convergence measurement.
//!
//! Each round replaces every centroid with the component-wise mean of its
//! members. A cluster that lost all members keeps its previous position
//! unchanged — no division by zero, no reseeding — so it can pick members
//! back up in a later round or end the run as an empty tier.

use crate::assignment::distance_sq;
use crate::constants::FEATURE_DIMS;
use crate::types::{Centroid, FeatureVector};

/// Compute next-round centroids as member means, carrying empty clusters
/// forward untouched.
pub fn update_centroids(
    vectors: &[FeatureVector],
    assignments: &[usize],
    previous: &[Centroid],
) -> Vec<Centroid> {
    debug_assert_eq!(vectors.len(), assignments.len());
    let k = previous.len();
    let mut sums = vec![[0.0; FEATURE_DIMS]; k];
    let mut counts = vec![0usize; k];
    for (v, &cluster) in vectors.iter().zip(assignments) {
        debug_assert!(cluster < k, "assignment {} out of range for k={}", cluster, k);
        for d in 0..FEATURE_DIMS {
            sums[cluster][d] += v.features[d];
        }
        counts[cluster] += 1;
    }

    (0..k)
        .map(|c| {
            if counts[c] == 0 {
                previous[c]
            } else {
                let n = counts[c] as f64;
                let mut mean = [0.0; FEATURE_DIMS];
                for d in 0..FEATURE_DIMS {
                    mean[d] = sums[c][d] / n;
                }
                mean
            }
        })
        .collect()
}

/// Largest Euclidean distance any centroid moved between two rounds. The
/// run has converged once this drops below the configured epsilon.
pub fn max_displacement(old: &[Centroid], new: &[Centroid]) -> f64 {
    debug_assert_eq!(old.len(), new.len());
    old.iter()
        .zip(new)
        .map(|(a, b)| distance_sq(a, b).sqrt())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(id: u64, features: [f64; FEATURE_DIMS]) -> FeatureVector {
        FeatureVector {
            student_id: id,
            features,
        }
    }

    #[test]
    fn test_update_takes_component_means() {
        let vectors = vec![
            vector(1, [0.0, 0.25, 0.5, 0.0]),
            vector(2, [1.0, 0.25, 0.75, 0.0]),
            vector(3, [0.5, 0.5, 0.5, 0.5]),
        ];
        let assignments = vec![0, 0, 1];
        let previous = vec![[0.0; 4], [0.0; 4]];
        let next = update_centroids(&vectors, &assignments, &previous);
        assert_eq!(next[0], [0.5, 0.25, 0.625, 0.0]);
        assert_eq!(next[1], [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_empty_cluster_keeps_previous_position() {
        let vectors = vec![vector(1, [0.1; 4]), vector(2, [0.3; 4])];
        let assignments = vec![0, 0];
        let previous = vec![[0.9; 4], [0.7, 0.6, 0.5, 0.4]];
        let next = update_centroids(&vectors, &assignments, &previous);
        assert_eq!(next[0], [0.2; 4]);
        assert_eq!(next[1], [0.7, 0.6, 0.5, 0.4]);
        assert!(next[1].iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_max_displacement_is_euclidean() {
        let old = vec![[0.0; 4], [0.0; 4]];
        let new = vec![[0.1, 0.0, 0.0, 0.0], [0.3, 0.4, 0.0, 0.0]];
        let shift = max_displacement(&old, &new);
        assert!((shift - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_max_displacement_zero_for_identical_sets() {
        let centroids = vec![[0.2, 0.4, 0.6, 0.8]];
        assert_eq!(max_displacement(&centroids, &centroids), 0.0);
    }
}
