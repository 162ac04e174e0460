//! Aggregate statistics over the entry stream.

use crate::types::{AnalysisMetrics, LogEntry, SeverityDistribution};
use std::time::Duration;

/// Severity at or above which an entry counts toward error density.
pub const ERROR_DENSITY_THRESHOLD: f64 = 7.0;

/// Summarizes the scored entries of one run.
///
/// `elapsed` is the wall-clock time the run took so far; a zero duration
/// yields a throughput of 0 rather than infinity.
#[must_use]
pub fn summarize_metrics(entries: &[LogEntry], elapsed: Duration) -> AnalysisMetrics {
    let mut severity_distribution = SeverityDistribution::default();
    let mut dense = 0usize;

    for entry in entries {
        severity_distribution.record(entry.severity);
        if entry.severity >= ERROR_DENSITY_THRESHOLD {
            dense += 1;
        }
    }

    let errors_per_1000_lines = if entries.is_empty() {
        0.0
    } else {
        dense as f64 / entries.len() as f64 * 1000.0
    };

    let seconds = elapsed.as_secs_f64();
    let lines_per_second = if seconds > 0.0 {
        entries.len() as f64 / seconds
    } else {
        0.0
    };

    AnalysisMetrics {
        severity_distribution,
        errors_per_1000_lines,
        lines_per_second,
    }
}
