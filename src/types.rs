//! Core data structures: raw student metrics, normalized feature vectors,
//! centroids, and engine configuration.
//!
//! [`StudentMetric`] is the collaborator hand-off format — whatever aggregates
//! the per-game rows upstream must deliver fully-populated numeric fields
//! (nulls defaulted to 0 before they get here). Everything downstream of
//! normalization works on [`FeatureVector`]s and never touches raw metrics
//! again.

use crate::constants::*;

/// One student's aggregate game-performance metrics.
///
/// - `literacy_progress` / `math_progress`: completion percentages, 0..100
/// - `total_score`: lifetime score across all games
/// - `games_played`: lifetime game count
///
/// Immutable for the duration of a run; the engine never mutates its input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StudentMetric {
    pub student_id: u64,
    pub literacy_progress: f64,
    pub math_progress: f64,
    pub total_score: u32,
    pub games_played: u32,
}

/// A student's position in normalized feature space, each component in [0,1].
///
/// Carries the source `student_id` so assignments can be reported per student;
/// the id is an association only and plays no part in distance computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector {
    pub student_id: u64,
    pub features: [f64; FEATURE_DIMS],
}

impl FeatureVector {
    /// Normalized literacy progress.
    #[inline(always)]
    pub fn literacy(&self) -> f64 {
        self.features[FEAT_LITERACY]
    }

    /// Normalized math progress.
    #[inline(always)]
    pub fn math(&self) -> f64 {
        self.features[FEAT_MATH]
    }

    /// Normalized total score.
    #[inline(always)]
    pub fn score(&self) -> f64 {
        self.features[FEAT_SCORE]
    }

    /// Normalized games played.
    #[inline(always)]
    pub fn games(&self) -> f64 {
        self.features[FEAT_GAMES]
    }

    /// Midpoint of the two progress dimensions — the quantity tiers are
    /// ordered by.
    #[inline(always)]
    pub fn performance(&self) -> f64 {
        (self.features[FEAT_LITERACY] + self.features[FEAT_MATH]) / 2.0
    }
}

/// A cluster's representative point: feature-shaped, tied to no student.
pub type Centroid = [f64; FEATURE_DIMS];

/// Engine parameters. All three must be positive;
/// [`crate::engine::cluster_students`] rejects zero `cluster_count`/
/// `max_iterations` and non-positive or non-finite `convergence_epsilon`
/// before touching the data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusteringConfig {
    /// Requested tier count `k`. Silently reduced to the student count when
    /// the cohort is smaller than `k`.
    pub cluster_count: usize,
    /// Cap on assign/update iterations before giving up on convergence.
    pub max_iterations: u32,
    /// Convergence threshold on the maximum centroid displacement.
    pub convergence_epsilon: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            cluster_count: DEFAULT_CLUSTER_COUNT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_epsilon: DEFAULT_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClusteringConfig::default();
        assert_eq!(config.cluster_count, 3);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.convergence_epsilon, 0.001);
    }

    #[test]
    fn test_feature_accessors() {
        let v = FeatureVector {
            student_id: 7,
            features: [0.1, 0.3, 0.5, 0.7],
        };
        assert_eq!(v.literacy(), 0.1);
        assert_eq!(v.math(), 0.3);
        assert_eq!(v.score(), 0.5);
        assert_eq!(v.games(), 0.7);
        assert!((v.performance() - 0.2).abs() < 1e-12);
    }
}
