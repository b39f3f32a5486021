//! Label stabilization: relabel clusters so indices carry meaning.
//!
//! Raw k-means labels are an accident of seeding — the same grouping can come
//! back numbered differently on a different seed. After the loop ends we
//! order clusters ascending by mean performance (the literacy/math midpoint,
//! in normalized space) and renumber, so cluster 0 is always the weakest tier
//! and cluster k-1 the strongest. Empty clusters rank with performance 0.0;
//! exact ties keep their raw relative order.

use crate::constants::FEATURE_DIMS;
use crate::types::{Centroid, FeatureVector};

/// Mean normalized performance of each raw cluster. Empty clusters score 0.0.
pub fn performance_by_cluster(
    vectors: &[FeatureVector],
    assignments: &[usize],
    k: usize,
) -> Vec<f64> {
    let mut sums = vec![0.0; k];
    let mut counts = vec![0usize; k];
    for (v, &cluster) in vectors.iter().zip(assignments) {
        sums[cluster] += v.performance();
        counts[cluster] += 1;
    }
    (0..k)
        .map(|c| {
            if counts[c] == 0 {
                0.0
            } else {
                sums[c] / counts[c] as f64
            }
        })
        .collect()
}

/// Old-label → stabilized-label map, ordering clusters ascending by the given
/// performance values. The sort is stable, so ties preserve raw label order.
pub fn stabilization_remap(performance: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..performance.len()).collect();
    order.sort_by(|&a, &b| performance[a].total_cmp(&performance[b]));
    let mut remap = vec![0; performance.len()];
    for (new, &old) in order.iter().enumerate() {
        remap[old] = new;
    }
    remap
}

/// Renumber assignments and reorder centroids in place so labels ascend by
/// cluster performance.
pub fn stabilize(
    vectors: &[FeatureVector],
    assignments: &mut [usize],
    centroids: &mut Vec<Centroid>,
) {
    let k = centroids.len();
    let performance = performance_by_cluster(vectors, assignments, k);
    let remap = stabilization_remap(&performance);
    for a in assignments.iter_mut() {
        *a = remap[*a];
    }
    let mut reordered = vec![[0.0; FEATURE_DIMS]; k];
    for (old, &new) in remap.iter().enumerate() {
        reordered[new] = centroids[old];
    }
    *centroids = reordered;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_with_performance(id: u64, performance: f64) -> FeatureVector {
        FeatureVector {
            student_id: id,
            features: [performance, performance, 0.0, 0.0],
        }
    }

    #[test]
    fn test_remap_orders_ascending() {
        // Raw cluster 0 is strongest, 2 weakest: labels must reverse.
        let remap = stabilization_remap(&[0.9, 0.5, 0.1]);
        assert_eq!(remap, vec![2, 1, 0]);
    }

    #[test]
    fn test_remap_ties_keep_raw_order() {
        let remap = stabilization_remap(&[0.5, 0.5, 0.1]);
        assert_eq!(remap, vec![1, 2, 0]);
    }

    #[test]
    fn test_remap_is_a_permutation() {
        let remap = stabilization_remap(&[0.3, 0.9, 0.0, 0.6]);
        let mut sorted = remap.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_cluster_ranks_weakest() {
        let vectors = vec![
            vector_with_performance(1, 0.8),
            vector_with_performance(2, 0.6),
        ];
        // Cluster 1 has no members.
        let performance = performance_by_cluster(&vectors, &[0, 2], 3);
        assert_eq!(performance[1], 0.0);
        let remap = stabilization_remap(&performance);
        assert_eq!(remap[1], 0);
    }

    #[test]
    fn test_stabilize_moves_labels_and_centroids_together() {
        let vectors = vec![
            vector_with_performance(1, 0.9),
            vector_with_performance(2, 0.9),
            vector_with_performance(3, 0.1),
        ];
        let mut assignments = vec![0, 0, 1];
        let mut centroids = vec![[0.9, 0.9, 0.0, 0.0], [0.1, 0.1, 0.0, 0.0]];
        stabilize(&vectors, &mut assignments, &mut centroids);
        // Strong pair relabeled to 1, weak singleton to 0.
        assert_eq!(assignments, vec![1, 1, 0]);
        assert_eq!(centroids[0], [0.1, 0.1, 0.0, 0.0]);
        assert_eq!(centroids[1], [0.9, 0.9, 0.0, 0.0]);
    }

    #[test]
    fn test_stabilize_noop_when_already_ordered() {
        let vectors = vec![
            vector_with_performance(1, 0.1),
            vector_with_performance(2, 0.9),
        ];
        let mut assignments = vec![0, 1];
        let mut centroids = vec![[0.1, 0.1, 0.0, 0.0], [0.9, 0.9, 0.0, 0.0]];
        let before = (assignments.clone(), centroids.clone());
        stabilize(&vectors, &mut assignments, &mut centroids);
        assert_eq!((assignments, centroids), before);
    }
}
