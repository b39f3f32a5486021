//! Seed sweep: stability analysis across many seeded runs.
//!
//! K-means outcomes depend on where the centroids start. Before anyone
//! trusts a tier report, the operational question is whether the grouping is
//! a property of the cohort or an accident of one seed. The sweep reruns the
//! engine over a block of consecutive seeds in parallel and reduces the
//! outcomes to an inertia distribution plus a partition census: how many
//! distinct stabilized label vectors showed up, and what share of runs landed
//! on the most common one. Stabilized labels make the census meaningful —
//! two runs that group students identically produce identical vectors even
//! if their raw labels differed.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::assignment::inertia;
use crate::engine::cluster_students_seeded;
use crate::error::ClusteringError;
use crate::features::extract_features;
use crate::types::{ClusteringConfig, StudentMetric};

/// One seed's run, reduced to the numbers stability analysis needs.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SweepRun {
    pub seed: u64,
    pub iterations_run: u32,
    pub converged: bool,
    /// Sum of squared distances to assigned centroids at termination.
    pub inertia: f64,
}

/// Aggregate stability picture across a block of seeds.
#[derive(Serialize)]
pub struct SweepSummary {
    pub runs: Vec<SweepRun>,
    pub inertia_mean: f64,
    pub inertia_std_dev: f64,
    pub inertia_min: f64,
    pub inertia_max: f64,
    pub converged_runs: usize,
    /// Distinct stabilized label vectors across all runs.
    pub distinct_partitions: usize,
    /// Share of runs that landed on the most common partition, 0–1.
    pub modal_partition_share: f64,
    /// Wall-clock seconds for the whole sweep.
    pub elapsed: f64,
}

/// Run the engine once per seed in `base_seed..base_seed + runs` and
/// aggregate. Fails fast with the engine's own error if the data or config
/// is rejected (every seed would fail identically).
pub fn sweep_seeds(
    metrics: &[StudentMetric],
    config: &ClusteringConfig,
    base_seed: u64,
    runs: usize,
) -> Result<SweepSummary, ClusteringError> {
    let t0 = Instant::now();

    if runs == 0 {
        return Ok(SweepSummary {
            runs: Vec::new(),
            inertia_mean: 0.0,
            inertia_std_dev: 0.0,
            inertia_min: 0.0,
            inertia_max: 0.0,
            converged_runs: 0,
            distinct_partitions: 0,
            modal_partition_share: 0.0,
            elapsed: t0.elapsed().as_secs_f64(),
        });
    }

    let vectors = extract_features(metrics);

    let results: Result<Vec<(SweepRun, Vec<usize>)>, ClusteringError> = (0..runs as u64)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i);
            let outcome = cluster_students_seeded(metrics, config, seed)?;
            let labels: Vec<usize> = outcome.assignments.iter().map(|a| a.cluster).collect();
            let run_inertia = inertia(&vectors, &outcome.centroids, &labels);
            Ok((
                SweepRun {
                    seed,
                    iterations_run: outcome.summary.iterations_run,
                    converged: outcome.summary.converged,
                    inertia: run_inertia,
                },
                labels,
            ))
        })
        .collect();
    let results = results?;

    let n = runs as f64;
    let sum: f64 = results.iter().map(|(r, _)| r.inertia).sum();
    let mean = sum / n;
    let variance: f64 = results
        .iter()
        .map(|(r, _)| (r.inertia - mean).powi(2))
        .sum::<f64>()
        / n;
    let inertia_min = results.iter().map(|(r, _)| r.inertia).fold(f64::INFINITY, f64::min);
    let inertia_max = results
        .iter()
        .map(|(r, _)| r.inertia)
        .fold(f64::NEG_INFINITY, f64::max);

    let converged_runs = results.iter().filter(|(r, _)| r.converged).count();

    let mut partition_counts: HashMap<&[usize], usize> = HashMap::new();
    for (_, labels) in &results {
        *partition_counts.entry(labels.as_slice()).or_insert(0) += 1;
    }
    let distinct_partitions = partition_counts.len();
    let modal_count = partition_counts.values().copied().max().unwrap_or(0);

    Ok(SweepSummary {
        runs: results.into_iter().map(|(r, _)| r).collect(),
        inertia_mean: mean,
        inertia_std_dev: variance.sqrt(),
        inertia_min,
        inertia_max,
        converged_runs,
        distinct_partitions,
        modal_partition_share: modal_count as f64 / n,
        elapsed: t0.elapsed().as_secs_f64(),
    })
}

/// Save a sweep summary as JSON.
pub fn save_sweep(summary: &SweepSummary, path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(summary).expect("Failed to serialize sweep summary");
    std::fs::write(path, json).expect("Failed to write sweep summary file");
}
