//! CSV ingestion for cohort metric exports.
//!
//! The upstream aggregation job exports one row per student. Parsing is
//! strict: a malformed row aborts the load with its line number, because a
//! silently skipped student would shift every min-max range and with it the
//! whole grouping. Duplicate ids are rejected for the same reason.

use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use thiserror::Error;

use crate::types::StudentMetric;

/// Expected first line of every metrics export.
pub const CSV_HEADER: &str = "student_id,literacy_progress,math_progress,total_score,games_played";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read metrics file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

fn parse_field<T>(raw: &str, name: &str, line: usize) -> Result<T, LoadError>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = raw.trim();
    trimmed.parse().map_err(|e| LoadError::Parse {
        line,
        message: format!("invalid {} '{}': {}", name, trimmed, e),
    })
}

/// Parse a metrics export. Blank lines are skipped; everything else must be
/// the header (line 1) or a well-formed row.
pub fn parse_metrics_csv(reader: impl BufRead) -> Result<Vec<StudentMetric>, LoadError> {
    let mut metrics = Vec::new();
    let mut seen_ids: HashSet<u64> = HashSet::new();
    let mut saw_header = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();

        if !saw_header {
            if trimmed != CSV_HEADER {
                return Err(LoadError::Parse {
                    line: line_no,
                    message: format!("expected header '{}', got '{}'", CSV_HEADER, trimmed),
                });
            }
            saw_header = true;
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').collect();
        if fields.len() != 5 {
            return Err(LoadError::Parse {
                line: line_no,
                message: format!("expected 5 fields, got {}", fields.len()),
            });
        }

        let student_id: u64 = parse_field(fields[0], "student_id", line_no)?;
        if !seen_ids.insert(student_id) {
            return Err(LoadError::Parse {
                line: line_no,
                message: format!("duplicate student_id {}", student_id),
            });
        }

        metrics.push(StudentMetric {
            student_id,
            literacy_progress: parse_field(fields[1], "literacy_progress", line_no)?,
            math_progress: parse_field(fields[2], "math_progress", line_no)?,
            total_score: parse_field(fields[3], "total_score", line_no)?,
            games_played: parse_field(fields[4], "games_played", line_no)?,
        });
    }

    if !saw_header {
        return Err(LoadError::Parse {
            line: 1,
            message: "missing header line".to_string(),
        });
    }

    Ok(metrics)
}

/// Load a metrics export from disk.
pub fn load_metrics_csv(path: &str) -> Result<Vec<StudentMetric>, LoadError> {
    let file = File::open(path)?;
    parse_metrics_csv(BufReader::new(file))
}
