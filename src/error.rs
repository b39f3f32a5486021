//! Error types for clustering runs.
//!
//! Input validation is fail-fast: the first offending metric aborts the run
//! and the error names the student and field so the upstream aggregation job
//! can be fixed. Configuration errors are reported the same way but carry no
//! student context. An empty cohort is *not* an error — the engine returns an
//! empty outcome for it.

use thiserror::Error;

/// Everything that can abort a clustering run before assignments exist.
#[derive(Error, Debug)]
pub enum ClusteringError {
    /// A metric field is NaN, infinite, or outside its documented range.
    #[error("student {student_id}: {field} must be a finite value in [0,100], got {value}")]
    InvalidMetric {
        student_id: u64,
        field: &'static str,
        value: f64,
    },

    /// `cluster_count` of 0 — there is no meaningful zero-tier grouping.
    #[error("cluster count must be at least 1")]
    ZeroClusterCount,

    /// `max_iterations` of 0 — the loop would never refine anything.
    #[error("max iterations must be at least 1")]
    ZeroMaxIterations,

    /// Epsilon must be a positive finite threshold for displacement checks.
    #[error("convergence epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

impl ClusteringError {
    /// True for errors caused by the caller's configuration rather than the
    /// student data itself.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, ClusteringError::InvalidMetric { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_metric_message_names_student_and_field() {
        let err = ClusteringError::InvalidMetric {
            student_id: 42,
            field: "literacy_progress",
            value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("student 42"));
        assert!(msg.contains("literacy_progress"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors_flagged() {
        assert!(ClusteringError::ZeroClusterCount.is_configuration());
        assert!(ClusteringError::ZeroMaxIterations.is_configuration());
        assert!(ClusteringError::InvalidEpsilon(-1.0).is_configuration());
    }
}
