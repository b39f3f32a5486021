//! Nearest-centroid assignment.
//!
//! Distances are compared in squared form: the square root is monotonic, so
//! the argmin and every tie are identical to the true Euclidean metric, and
//! the hot loop skips the sqrt. Ties go to the lowest centroid index because
//! the scan only replaces the best candidate on a strictly smaller distance.

use crate::constants::FEATURE_DIMS;
use crate::types::{Centroid, FeatureVector};

/// Squared Euclidean distance between a feature array and a centroid.
#[inline(always)]
pub fn distance_sq(a: &[f64; FEATURE_DIMS], b: &Centroid) -> f64 {
    let mut sum = 0.0;
    for d in 0..FEATURE_DIMS {
        let diff = a[d] - b[d];
        sum += diff * diff;
    }
    sum
}

/// Index of the nearest centroid; the first one scanned wins exact ties.
#[inline(always)]
pub fn nearest_centroid(features: &[f64; FEATURE_DIMS], centroids: &[Centroid]) -> usize {
    debug_assert!(!centroids.is_empty(), "no centroids to assign against");
    let mut best = 0;
    let mut best_dist = distance_sq(features, &centroids[0]);
    for (i, c) in centroids.iter().enumerate().skip(1) {
        let dist = distance_sq(features, c);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Assign every vector to its nearest centroid. `result[i]` is the cluster
/// of `vectors[i]`.
pub fn assign_all(vectors: &[FeatureVector], centroids: &[Centroid]) -> Vec<usize> {
    vectors
        .iter()
        .map(|v| nearest_centroid(&v.features, centroids))
        .collect()
}

/// Sum of squared distances from each vector to its assigned centroid — the
/// quantity each assign/update round drives down.
pub fn inertia(vectors: &[FeatureVector], centroids: &[Centroid], assignments: &[usize]) -> f64 {
    debug_assert_eq!(vectors.len(), assignments.len());
    vectors
        .iter()
        .zip(assignments)
        .map(|(v, &cluster)| distance_sq(&v.features, &centroids[cluster]))
        .sum()
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
    fn test_distance_sq() {
        let a = [0.0, 0.0, 0.0, 0.0];
        let b = [0.5, 0.5, 0.0, 0.0];
        assert!((distance_sq(&a, &b) - 0.5).abs() < 1e-12);
        assert_eq!(distance_sq(&a, &a), 0.0);
    }

    #[test]
    fn test_nearest_picks_closest() {
        let centroids = vec![[0.0; 4], [1.0, 1.0, 1.0, 1.0]];
        assert_eq!(nearest_centroid(&[0.1, 0.1, 0.0, 0.0], &centroids), 0);
        assert_eq!(nearest_centroid(&[0.9, 0.9, 1.0, 1.0], &centroids), 1);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // Equidistant from both centroids along the first dimension.
        let centroids = vec![[0.0; 4], [1.0, 0.0, 0.0, 0.0], [0.0; 4]];
        assert_eq!(nearest_centroid(&[0.5, 0.0, 0.0, 0.0], &centroids), 0);
        // Identical centroids: index 0 beats its duplicate at index 2.
        assert_eq!(nearest_centroid(&[0.1, 0.0, 0.0, 0.0], &centroids), 0);
    }

    #[test]
    fn test_assign_all_pairs_by_position() {
        let vectors = vec![
            vector(10, [0.0, 0.0, 0.0, 0.0]),
            vector(20, [1.0, 1.0, 1.0, 1.0]),
            vector(30, [0.1, 0.0, 0.0, 0.0]),
        ];
        let centroids = vec![[0.0; 4], [1.0; 4]];
        assert_eq!(assign_all(&vectors, &centroids), vec![0, 1, 0]);
    }

    #[test]
    fn test_inertia_zero_when_vectors_sit_on_centroids() {
        let vectors = vec![vector(1, [0.25; 4]), vector(2, [0.75; 4])];
        let centroids = vec![[0.25; 4], [0.75; 4]];
        assert_eq!(inertia(&vectors, &centroids, &[0, 1]), 0.0);
    }

    #[test]
    fn test_inertia_sums_squared_distances() {
        let vectors = vec![vector(1, [0.0; 4]), vector(2, [1.0, 0.0, 0.0, 0.0])];
        let centroids = vec![[0.5, 0.0, 0.0, 0.0]];
        let value = inertia(&vectors, &centroids, &[0, 0]);
        assert!((value - 0.5).abs() < 1e-12);
    }
}
