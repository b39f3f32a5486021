//! Feature extraction: raw metrics projected into normalized [0,1] space.
//!
//! The two progress metrics arrive on a fixed 0–100 scale and are divided by
//! [`PROGRESS_MAX`]. Score and games have no fixed upper bound, so they are
//! min-max scaled against the cohort being clustered. A cohort where every
//! student shares the same score (or game count) collapses that dimension to
//! 0.0 for everyone, which keeps a constant column from contributing to any
//! distance.
//!
//! Ranges are computed over the input itself, so the same student can land on
//! different coordinates in different cohorts. That is intentional: tiers are
//! relative to the group being analyzed, not to a global scale.

use crate::constants::*;
use crate::types::{FeatureVector, StudentMetric};

/// Scale a fixed-range progress value to [0,1], clamping stray inputs.
#[inline(always)]
fn scale_progress(value: f64) -> f64 {
    value.clamp(0.0, PROGRESS_MAX) / PROGRESS_MAX
}

/// Min-max scale `value` against the cohort range. A degenerate range
/// (max == min) maps everything to 0.0.
#[inline(always)]
fn scale_min_max(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    }
}

/// Project every metric into normalized feature space, preserving input order.
pub fn extract_features(metrics: &[StudentMetric]) -> Vec<FeatureVector> {
    if metrics.is_empty() {
        return Vec::new();
    }

    let mut score_min = f64::INFINITY;
    let mut score_max = f64::NEG_INFINITY;
    let mut games_min = f64::INFINITY;
    let mut games_max = f64::NEG_INFINITY;
    for m in metrics {
        let score = m.total_score as f64;
        let games = m.games_played as f64;
        score_min = score_min.min(score);
        score_max = score_max.max(score);
        games_min = games_min.min(games);
        games_max = games_max.max(games);
    }

    metrics
        .iter()
        .map(|m| {
            let mut features = [0.0; FEATURE_DIMS];
            features[FEAT_LITERACY] = scale_progress(m.literacy_progress);
            features[FEAT_MATH] = scale_progress(m.math_progress);
            features[FEAT_SCORE] = scale_min_max(m.total_score as f64, score_min, score_max);
            features[FEAT_GAMES] = scale_min_max(m.games_played as f64, games_min, games_max);
            FeatureVector {
                student_id: m.student_id,
                features,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: u64, literacy: f64, math: f64, score: u32, games: u32) -> StudentMetric {
        StudentMetric {
            student_id: id,
            literacy_progress: literacy,
            math_progress: math,
            total_score: score,
            games_played: games,
        }
    }

    #[test]
    fn test_progress_scaled_by_fixed_range() {
        let vectors = extract_features(&[metric(1, 50.0, 100.0, 0, 0)]);
        assert_eq!(vectors[0].literacy(), 0.5);
        assert_eq!(vectors[0].math(), 1.0);
    }

    #[test]
    fn test_min_max_endpoints_hit_zero_and_one() {
        let vectors = extract_features(&[
            metric(1, 0.0, 0.0, 100, 5),
            metric(2, 0.0, 0.0, 400, 25),
            metric(3, 0.0, 0.0, 250, 15),
        ]);
        assert_eq!(vectors[0].score(), 0.0);
        assert_eq!(vectors[1].score(), 1.0);
        assert_eq!(vectors[2].score(), 0.5);
        assert_eq!(vectors[0].games(), 0.0);
        assert_eq!(vectors[1].games(), 1.0);
        assert_eq!(vectors[2].games(), 0.5);
    }

    #[test]
    fn test_constant_column_collapses_to_zero() {
        let vectors = extract_features(&[
            metric(1, 10.0, 20.0, 300, 7),
            metric(2, 30.0, 40.0, 300, 7),
        ]);
        for v in &vectors {
            assert_eq!(v.score(), 0.0);
            assert_eq!(v.games(), 0.0);
        }
    }

    #[test]
    fn test_single_student_scores_zero() {
        // With one student both min-max ranges are degenerate.
        let vectors = extract_features(&[metric(9, 80.0, 60.0, 9999, 120)]);
        assert_eq!(vectors[0].score(), 0.0);
        assert_eq!(vectors[0].games(), 0.0);
        assert_eq!(vectors[0].literacy(), 0.8);
        assert_eq!(vectors[0].math(), 0.6);
    }

    #[test]
    fn test_zero_one_column_is_noop() {
        // A count column already spanning {0,1} survives min-max unchanged.
        let vectors = extract_features(&[
            metric(1, 0.0, 0.0, 0, 1),
            metric(2, 0.0, 0.0, 1, 0),
            metric(3, 0.0, 0.0, 1, 1),
        ]);
        assert_eq!(vectors[0].score(), 0.0);
        assert_eq!(vectors[1].score(), 1.0);
        assert_eq!(vectors[2].score(), 1.0);
        assert_eq!(vectors[0].games(), 1.0);
        assert_eq!(vectors[1].games(), 0.0);
        assert_eq!(vectors[2].games(), 1.0);
    }

    #[test]
    fn test_out_of_range_progress_clamped() {
        let vectors = extract_features(&[metric(1, -5.0, 187.0, 0, 0)]);
        assert_eq!(vectors[0].literacy(), 0.0);
        assert_eq!(vectors[0].math(), 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_features(&[]).is_empty());
    }

    #[test]
    fn test_order_and_ids_preserved() {
        let vectors = extract_features(&[
            metric(31, 1.0, 2.0, 10, 1),
            metric(17, 3.0, 4.0, 20, 2),
        ]);
        assert_eq!(vectors[0].student_id, 31);
        assert_eq!(vectors[1].student_id, 17);
    }
}
