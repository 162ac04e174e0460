//! Core types for the triage engine.
//!
//! This module defines the records that flow through the pipeline: parsed
//! [`LogEntry`] values, their [`ClassifiedError`] projections, detected
//! [`CausalChain`]s, ranked [`RootCause`]s and the aggregate
//! [`AnalysisMetrics`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log level tags recognized by the parser.
///
/// `Warning`/`Warn` and `Critical`/`Fatal` are kept distinct so the level
/// reported for an entry is the tag that actually appeared in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// System-wide failure.
    Critical,
    /// Unrecoverable failure.
    Fatal,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Short form of `Warning`.
    Warn,
    /// General information.
    Info,
    /// Debugging information.
    Debug,
    /// Most verbose tracing output.
    Trace,
}

impl LogLevel {
    /// All levels in severity-descending order, the order the parser probes them.
    pub const ALL: [Self; 8] = [
        Self::Critical,
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Returns the upper-case tag as it appears in log lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Returns the base severity score assigned before keyword escalation.
    #[must_use]
    pub const fn base_score(&self) -> f64 {
        match self {
            Self::Critical | Self::Fatal => 10.0,
            Self::Error => 7.0,
            Self::Warning | Self::Warn => 5.0,
            Self::Info => 3.0,
            Self::Debug | Self::Trace => 1.0,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an entry's timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// Parsed from the line itself.
    #[default]
    Extracted,
    /// No pattern matched; the run's start time was substituted.
    Defaulted,
}

/// One non-blank source line with its extracted and derived attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based position of the line in the original text.
    pub line_number: usize,
    /// Extracted timestamp, or the run start time when none was found.
    pub timestamp: DateTime<Utc>,
    /// Provenance of `timestamp`.
    #[serde(default)]
    pub timestamp_source: TimestampSource,
    /// Extracted or inferred level.
    pub level: LogLevel,
    /// The trimmed line.
    pub message: String,
    /// Severity score in `[0, 10]`.
    pub severity: f64,
}

impl LogEntry {
    /// Returns true if the timestamp was parsed from the line.
    #[must_use]
    pub fn has_timestamp(&self) -> bool {
        self.timestamp_source == TimestampSource::Extracted
    }

    /// Returns true if the entry scored zero, which only a success message does.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.severity <= 0.0
    }
}

/// Error taxonomy, in the order categories are tested.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ErrorCategory {
    /// Voltage, thermal, DIMM and sensor faults.
    Hardware,
    /// BIOS, boot and driver faults.
    Firmware,
    /// Database and query faults.
    Database,
    /// Network and transport faults.
    Network,
    /// Heap, allocation and leak faults.
    Memory,
    /// Disk, file and permission faults.
    Filesystem,
    /// Login, credential and session faults.
    Authentication,
    /// Access control and TLS faults.
    Security,
    /// Latency and throughput problems.
    Performance,
    /// Settings and environment problems.
    Configuration,
    /// CI/CD build and deploy problems.
    Pipeline,
    /// Test-suite failures.
    Testing,
    /// Generic application errors.
    Application,
    /// Generic warnings.
    Warning,
    /// Anything else with a non-zero severity.
    General,
}

impl ErrorCategory {
    /// Returns the display name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hardware => "Hardware",
            Self::Firmware => "Firmware",
            Self::Database => "Database",
            Self::Network => "Network",
            Self::Memory => "Memory",
            Self::Filesystem => "Filesystem",
            Self::Authentication => "Authentication",
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::Configuration => "Configuration",
            Self::Pipeline => "Pipeline",
            Self::Testing => "Testing",
            Self::Application => "Application",
            Self::Warning => "Warning",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry with non-zero severity and its assigned category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedError {
    /// The source entry.
    #[serde(flatten)]
    pub entry: LogEntry,
    /// Assigned category.
    #[serde(rename = "type")]
    pub category: ErrorCategory,
}

/// Occurrence count per category.
pub type PatternCounts = BTreeMap<ErrorCategory, usize>;

/// Impact label attached to chains and root causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Informational.
    Low,
    /// Should be monitored.
    Medium,
    /// Needs attention.
    High,
    /// Requires immediate action.
    Critical,
}

impl Impact {
    /// Maps the maximum event severity of a chain to its impact.
    #[must_use]
    pub fn from_max_severity(max_severity: f64) -> Self {
        if max_severity >= 9.0 {
            Self::Critical
        } else if max_severity >= 7.0 {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Maps a category occurrence count to its impact.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count >= 5 {
            Self::High
        } else if count >= 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// A time-ordered, keyword-correlated sequence of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalChain {
    /// Name of the cascade pattern that matched (e.g. `power_cascade`).
    pub pattern: String,
    /// Short title.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Trigger first, then accepted effects in time order.
    pub events: Vec<LogEntry>,
    /// Stage labels joined with arrows.
    pub chain_text: String,
    /// Confidence in `[0, 0.95]`.
    pub confidence: f64,
    /// Derived from the maximum event severity.
    pub severity: Impact,
    /// Ordered recommendations.
    pub recommendations: Vec<String>,
}

impl CausalChain {
    /// Returns the number of linked events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the chain holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Which ranking tier produced a root cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCauseOrigin {
    /// Promoted from a causal chain.
    CausalChain,
    /// Derived from a category count.
    Pattern,
    /// Severity-bucket fallback.
    SeverityDistribution,
    /// Error-rate fallback.
    ErrorRate,
}

/// A ranked candidate explanation for the observed errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCause {
    /// Short title.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Confidence in `[0, 0.95]`.
    pub confidence: f64,
    /// Number of supporting events.
    pub count: usize,
    /// Impact label.
    pub severity: Impact,
    /// Ordered recommendations.
    pub recommendations: Vec<String>,
    /// Causal narrative when promoted from a chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causal_chain: Option<String>,
    /// Ranking tier that produced this candidate.
    pub origin: RootCauseOrigin,
}

/// Entry counts per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityDistribution {
    /// Severity >= 9.
    pub critical: usize,
    /// 7 <= severity < 9.
    pub high: usize,
    /// 5 <= severity < 7.
    pub medium: usize,
    /// Severity < 5.
    pub low: usize,
}

impl SeverityDistribution {
    /// Adds one entry with the given severity to its bucket.
    pub fn record(&mut self, severity: f64) {
        if severity >= 9.0 {
            self.critical += 1;
        } else if severity >= 7.0 {
            self.high += 1;
        } else if severity >= 5.0 {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }

    /// Returns the total number of recorded entries.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Aggregate statistics over the entry stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Histogram of entry severities.
    pub severity_distribution: SeverityDistribution,
    /// Entries with severity >= 7 per thousand entries.
    pub errors_per_1000_lines: f64,
    /// Wall-clock throughput of the run. Informational only.
    pub lines_per_second: f64,
}

/// Metadata about the analyzed buffer, supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Display name of the source.
    pub name: String,
    /// Size of the buffer in bytes.
    pub size: u64,
    /// Number of non-blank lines.
    pub total_lines: usize,
}

impl FileInfo {
    /// Builds file metadata from a name and the decoded buffer.
    #[must_use]
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            size: text.len() as u64,
            total_lines: text.lines().filter(|l| !l.trim().is_empty()).count(),
        }
    }

    /// Builds file metadata from a name and the raw, not yet decoded buffer.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            total_lines: bytes
                .split(|b| *b == b'\n')
                .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
                .count(),
        }
    }
}
