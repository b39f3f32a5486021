//! Shared environment configuration for the cohort binaries.
//!
//! Consolidates `COHORT_BASE_PATH`, `COHORT_SWEEP_THREADS`, and `COHORT_SEED`
//! reads so both binaries resolve paths and seeds the same way.

use std::path::PathBuf;

use crate::constants::DEFAULT_SEED;

/// Read `COHORT_BASE_PATH` (default `"."`), chdir, print path. Exits on
/// failure so relative `--input`/`--output` paths never land somewhere
/// surprising.
pub fn init_base_path() -> PathBuf {
    let base_path = std::env::var("COHORT_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    println!("COHORT_BASE_PATH={}", base_path);
    let path = PathBuf::from(&base_path);
    if std::env::set_current_dir(&base_path).is_err() {
        eprintln!("Failed to change directory to {}", base_path);
        std::process::exit(1);
    }
    if let Ok(cwd) = std::env::current_dir() {
        println!("Working directory: {}", cwd.display());
    }
    path
}

/// Read `COHORT_SWEEP_THREADS` (fallback `RAYON_NUM_THREADS`, default 8).
/// Builds the rayon global thread pool. Returns the thread count.
pub fn init_sweep_threads() -> usize {
    let num_threads = std::env::var("COHORT_SWEEP_THREADS")
        .or_else(|_| std::env::var("RAYON_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .unwrap();
    println!("Sweep threads: {}", num_threads);
    num_threads
}

/// Read `COHORT_SEED` (default 42).
pub fn default_seed() -> u64 {
    std::env::var("COHORT_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}
