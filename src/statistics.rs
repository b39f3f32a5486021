//! Per-cluster report generation and outcome persistence.
//!
//! Reports are computed after stabilization, so cluster 0 is the weakest tier
//! and averages line up with the final labels. Progress averages are rescaled
//! back to the 0–100 range educators see in the product; score and games stay
//! in normalized [0,1] because their raw ranges differ per cohort.

use serde::Serialize;

use crate::constants::{FEAT_GAMES, FEAT_LITERACY, FEAT_MATH, FEAT_SCORE, FEATURE_DIMS, PROGRESS_MAX};
use crate::engine::ClusteringOutcome;
use crate::types::FeatureVector;

// ── Per-cluster report ──────────────────────────────────────────────

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ClusterReport {
    /// Stabilized cluster label, 0 = weakest tier.
    pub cluster: usize,
    pub student_count: usize,
    /// Share of the cohort in this cluster, 0–100, unrounded.
    pub percentage_of_total: f64,
    /// Mean literacy progress on the 0–100 scale.
    pub avg_literacy: f64,
    /// Mean math progress on the 0–100 scale.
    pub avg_math: f64,
    /// Mean normalized total score, [0,1].
    pub avg_score: f64,
    /// Mean normalized games played, [0,1].
    pub avg_games: f64,
    /// Midpoint of `avg_literacy` and `avg_math`, 0–100. Ascends with the
    /// cluster label by construction.
    pub avg_performance: f64,
}

// ── Aggregation ─────────────────────────────────────────────────────

/// Build one report per stabilized label in `0..k`. Empty clusters appear as
/// zero-count rows with zeroed averages rather than being dropped, so
/// consumers can index reports by label.
pub fn build_reports(
    vectors: &[FeatureVector],
    assignments: &[usize],
    k: usize,
) -> Vec<ClusterReport> {
    debug_assert_eq!(vectors.len(), assignments.len());
    let total = vectors.len();
    let mut sums = vec![[0.0; FEATURE_DIMS]; k];
    let mut counts = vec![0usize; k];
    for (v, &cluster) in vectors.iter().zip(assignments) {
        for d in 0..FEATURE_DIMS {
            sums[cluster][d] += v.features[d];
        }
        counts[cluster] += 1;
    }

    (0..k)
        .map(|c| {
            let count = counts[c];
            if count == 0 {
                return ClusterReport {
                    cluster: c,
                    student_count: 0,
                    percentage_of_total: 0.0,
                    avg_literacy: 0.0,
                    avg_math: 0.0,
                    avg_score: 0.0,
                    avg_games: 0.0,
                    avg_performance: 0.0,
                };
            }
            let n = count as f64;
            let avg_literacy = sums[c][FEAT_LITERACY] / n * PROGRESS_MAX;
            let avg_math = sums[c][FEAT_MATH] / n * PROGRESS_MAX;
            ClusterReport {
                cluster: c,
                student_count: count,
                percentage_of_total: count as f64 / total as f64 * 100.0,
                avg_literacy,
                avg_math,
                avg_score: sums[c][FEAT_SCORE] / n,
                avg_games: sums[c][FEAT_GAMES] / n,
                avg_performance: (avg_literacy + avg_math) / 2.0,
            }
        })
        .collect()
}

// ── Persistence ─────────────────────────────────────────────────────

/// Save a full clustering outcome as JSON.
pub fn save_outcome(outcome: &ClusteringOutcome, path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(outcome).expect("Failed to serialize outcome");
    std::fs::write(path, json).expect("Failed to write outcome file");
}
