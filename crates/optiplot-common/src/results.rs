//! Helpers for raw optimizer run output.
//!
//! The optimizer writes one run per line as comma-separated numbers, e.g. the
//! best time found in each iteration. These helpers turn such files into a
//! single series that a chart definition can embed.

use crate::error::{OptiplotError, Result};
use std::fmt::Write as _;
use tracing::debug;

/// Seconds per minute, used by [`seconds_to_minutes`].
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Parses one comma-separated run.
///
/// Whitespace around fields is ignored and empty fields (including the
/// trailing one the optimizer emits) are skipped.
pub fn parse_run_line(line: &str) -> Result<Vec<f64>> {
    line.split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(_, field)| !field.is_empty())
        .map(|(idx, field)| {
            field.parse::<f64>().map_err(|_| {
                OptiplotError::data(format!("column {}: '{field}' is not a number", idx + 1))
            })
        })
        .collect()
}

/// Parses every non-blank line of `input` as a run.
pub fn parse_runs(input: &str) -> Result<Vec<Vec<f64>>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse_run_line(line).map_err(|err| match err {
                OptiplotError::Data { message, .. } => OptiplotError::data_at_line(message, idx + 1),
                other => other,
            })
        })
        .collect()
}

/// Averages runs column by column.
///
/// Every column is divided by the number of runs, so a run shorter than the
/// others counts as zero in the columns it lacks. The result has `width`
/// columns when given (extra values are dropped), otherwise as many as the
/// longest run.
pub fn average_runs(runs: &[Vec<f64>], width: Option<usize>) -> Vec<f64> {
    if runs.is_empty() {
        return Vec::new();
    }

    let width = width.unwrap_or_else(|| runs.iter().map(Vec::len).max().unwrap_or(0));
    let mut sums = vec![0.0; width];
    for run in runs {
        for (sum, value) in sums.iter_mut().zip(run) {
            *sum += value;
        }
    }

    let count = runs.len() as f64;
    debug!(runs = runs.len(), width, "averaged runs");
    sums.into_iter().map(|sum| sum / count).collect()
}

/// Converts a series measured in seconds to minutes.
pub fn seconds_to_minutes(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v / SECONDS_PER_MINUTE).collect()
}

/// Formats a series the way the optimizer tooling prints it: every value
/// followed by a comma.
pub fn format_series(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 8);
    for value in values {
        let _ = write!(out, "{value},");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_line_with_trailing_comma() {
        let values = parse_run_line("6842, 6820,6402 ,").unwrap();
        assert_eq!(values, vec![6842.0, 6820.0, 6402.0]);
    }

    #[test]
    fn test_parse_run_line_reports_column() {
        let err = parse_run_line("1,2,x").unwrap_err();
        assert!(err.to_string().contains("column 3"));
    }

    #[test]
    fn test_parse_runs_reports_line() {
        let err = parse_runs("1,2\n\n3,oops\n").unwrap_err();
        match err {
            OptiplotError::Data { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_average_short_run_counts_as_zero() {
        let runs = vec![vec![10.0, 20.0, 30.0], vec![20.0, 40.0]];
        assert_eq!(average_runs(&runs, None), vec![15.0, 30.0, 15.0]);
    }

    #[test]
    fn test_average_fixed_width_pads_and_truncates() {
        let runs = vec![vec![2.0, 4.0, 6.0]];
        assert_eq!(average_runs(&runs, Some(2)), vec![2.0, 4.0]);
        assert_eq!(average_runs(&runs, Some(4)), vec![2.0, 4.0, 6.0, 0.0]);
    }

    #[test]
    fn test_average_no_runs() {
        assert!(average_runs(&[], Some(10)).is_empty());
    }

    #[test]
    fn test_seconds_to_minutes() {
        assert_eq!(seconds_to_minutes(&[60.0, 90.0, 0.0]), vec![1.0, 1.5, 0.0]);
    }

    #[test]
    fn test_format_series() {
        assert_eq!(format_series(&[1.0, 2.5]), "1,2.5,");
        assert_eq!(format_series(&[]), "");
    }
}
