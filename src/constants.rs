//! Feature-space constants and engine defaults.
//!
//! The feature space is fixed at four dimensions. Raw metrics map to
//! dimensions as follows:
//!
//! | Dimension | Raw metric | Normalization |
//! |-----------|------------------|----------------------------|
//! | [`FEAT_LITERACY`] | literacyProgress 0..100 | clamp / 100 |
//! | [`FEAT_MATH`] | mathProgress 0..100 | clamp / 100 |
//! | [`FEAT_SCORE`] | totalScore ≥ 0 | min/max over the cohort |
//! | [`FEAT_GAMES`] | gamesPlayed ≥ 0 | min/max over the cohort |

/// Number of feature dimensions. The engine is specialized to this schema;
/// it is not a variable-width clustering library.
pub const FEATURE_DIMS: usize = 4;

/// Feature indices — positions within a feature array.
pub const FEAT_LITERACY: usize = 0;
pub const FEAT_MATH: usize = 1;
pub const FEAT_SCORE: usize = 2;
pub const FEAT_GAMES: usize = 3;

/// Human-readable feature names, indexed by dimension.
pub const FEATURE_NAMES: [&str; FEATURE_DIMS] = ["literacy", "math", "score", "games"];

/// Default number of performance tiers.
pub const DEFAULT_CLUSTER_COUNT: usize = 3;

/// Default iteration cap for the assign/update loop.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default convergence threshold: the run converges when no centroid moved
/// farther than this (Euclidean) during the last update.
pub const DEFAULT_EPSILON: f64 = 0.001;

/// Default RNG seed used by the binaries when none is given. Kept stable so
/// scheduled runs over the same cohort reproduce bit-identical reports.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound of the progress-percentage metrics (literacy/math).
pub const PROGRESS_MAX: f64 = 100.0;
