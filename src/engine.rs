//! The clustering engine: validation, the assign/update loop, and outcome
//! assembly.
//!
//! One run is: validate → normalize → seed → iterate assignment and centroid
//! updates until the largest centroid displacement drops below epsilon (or
//! the iteration cap is hit) → one final assignment pass → stabilize labels →
//! build reports. Hitting the cap is not an error; the outcome says
//! `converged: false` and still carries the best grouping found.

use serde::Serialize;

use crate::assignment::assign_all;
use crate::centroids::{max_displacement, update_centroids};
use crate::constants::PROGRESS_MAX;
use crate::error::ClusteringError;
use crate::features::extract_features;
use crate::seeding::{initialize_centroids, CentroidSeeder, SeededSampler};
use crate::stabilize::stabilize;
use crate::statistics::{build_reports, ClusterReport};
use crate::types::{Centroid, ClusteringConfig, StudentMetric};

// ── Outcome types ───────────────────────────────────────────────────

/// One student's final tier.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct StudentAssignment {
    pub student_id: u64,
    pub cluster: usize,
}

/// How the run ended.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Tier count actually used: the requested k, capped at the cohort size.
    pub effective_k: usize,
    /// Completed assign/update rounds.
    pub iterations_run: u32,
    /// False when the loop hit `max_iterations` with centroids still moving.
    pub converged: bool,
}

/// Full result of one run. Labels are stabilized throughout: assignments,
/// centroids, and reports all use the same performance-ordered numbering.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ClusteringOutcome {
    /// One entry per input student, in input order.
    pub assignments: Vec<StudentAssignment>,
    pub centroids: Vec<Centroid>,
    pub reports: Vec<ClusterReport>,
    pub summary: RunSummary,
}

// ── Validation ──────────────────────────────────────────────────────

#[inline]
fn check_progress(student_id: u64, field: &'static str, value: f64) -> Result<(), ClusteringError> {
    if !value.is_finite() || !(0.0..=PROGRESS_MAX).contains(&value) {
        return Err(ClusteringError::InvalidMetric {
            student_id,
            field,
            value,
        });
    }
    Ok(())
}

/// Check every metric before any clustering work; the first offender aborts.
/// Score and games are unsigned by construction and need no range check.
pub fn validate_metrics(metrics: &[StudentMetric]) -> Result<(), ClusteringError> {
    for m in metrics {
        check_progress(m.student_id, "literacy_progress", m.literacy_progress)?;
        check_progress(m.student_id, "math_progress", m.math_progress)?;
    }
    Ok(())
}

fn validate_config(config: &ClusteringConfig) -> Result<(), ClusteringError> {
    if config.cluster_count == 0 {
        return Err(ClusteringError::ZeroClusterCount);
    }
    if config.max_iterations == 0 {
        return Err(ClusteringError::ZeroMaxIterations);
    }
    if !config.convergence_epsilon.is_finite() || config.convergence_epsilon <= 0.0 {
        return Err(ClusteringError::InvalidEpsilon(config.convergence_epsilon));
    }
    Ok(())
}

// ── Entry points ────────────────────────────────────────────────────

/// Cluster a cohort into performance tiers with an injected seeder.
///
/// An empty cohort is valid and returns an empty outcome with
/// `effective_k: 0`. A cohort smaller than the requested `cluster_count`
/// silently reduces k to the cohort size.
pub fn cluster_students(
    metrics: &[StudentMetric],
    config: &ClusteringConfig,
    seeder: &dyn CentroidSeeder,
) -> Result<ClusteringOutcome, ClusteringError> {
    validate_config(config)?;
    validate_metrics(metrics)?;

    if metrics.is_empty() {
        return Ok(ClusteringOutcome {
            assignments: Vec::new(),
            centroids: Vec::new(),
            reports: Vec::new(),
            summary: RunSummary {
                effective_k: 0,
                iterations_run: 0,
                converged: true,
            },
        });
    }

    let vectors = extract_features(metrics);
    let k = config.cluster_count.min(vectors.len());
    let mut centroids = initialize_centroids(&vectors, k, seeder);

    let mut iterations = 0u32;
    let mut converged = false;
    while iterations < config.max_iterations {
        let assignments = assign_all(&vectors, &centroids);
        let next = update_centroids(&vectors, &assignments, &centroids);
        let shift = max_displacement(&centroids, &next);
        centroids = next;
        iterations += 1;
        if shift < config.convergence_epsilon {
            converged = true;
            break;
        }
    }

    // Final pass against the centroids the loop settled on, so reported
    // assignments always match reported centroids.
    let mut assignments = assign_all(&vectors, &centroids);
    stabilize(&vectors, &mut assignments, &mut centroids);
    let reports = build_reports(&vectors, &assignments, k);

    let student_assignments = vectors
        .iter()
        .zip(&assignments)
        .map(|(v, &cluster)| StudentAssignment {
            student_id: v.student_id,
            cluster,
        })
        .collect();

    Ok(ClusteringOutcome {
        assignments: student_assignments,
        centroids,
        reports,
        summary: RunSummary {
            effective_k: k,
            iterations_run: iterations,
            converged,
        },
    })
}

/// Cluster with uniform random seeding from `seed`. Same seed, same data,
/// same config: bit-identical outcome.
pub fn cluster_students_seeded(
    metrics: &[StudentMetric],
    config: &ClusteringConfig,
    seed: u64,
) -> Result<ClusteringOutcome, ClusteringError> {
    cluster_students(metrics, config, &SeededSampler::new(seed))
}
