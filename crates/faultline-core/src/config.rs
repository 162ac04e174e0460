//! Analyzer configuration and per-run context.

use crate::error::{FaultlineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Largest accepted chain window: one year.
pub const MAX_WINDOW_MINUTES: i64 = 365 * 24 * 60;

/// Tuning for causal-chain detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Window after the most recently accepted event in which effects are accepted.
    pub window_minutes: i64,
    /// Minimum severity for an entry to count as an effect.
    pub min_effect_severity: f64,
    /// Minimum events (trigger included) for a chain to be emitted.
    pub min_chain_events: usize,
    /// Whether entries without an extracted timestamp take part in chain scanning.
    pub include_untimed: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            window_minutes: 30,
            min_effect_severity: 6.0,
            min_chain_events: 2,
            include_untimed: false,
        }
    }
}

/// Tuning for root-cause ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Minimum chain length for promotion to a root cause.
    pub promote_min_events: usize,
    /// Minimum category count for a pattern root cause.
    pub min_pattern_count: usize,
    /// Error-rate percentage above which the high-error-rate fallback fires.
    pub error_rate_threshold_percent: f64,
    /// Entry count above which a quiet log is reported as operating normally.
    pub normal_min_entries: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            promote_min_events: 3,
            min_pattern_count: 1,
            error_rate_threshold_percent: 5.0,
            normal_min_entries: 100,
        }
    }
}

/// Configuration for the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Causal-chain tuning.
    pub chains: ChainConfig,
    /// Ranking tuning.
    pub ranker: RankerConfig,
    /// Minimum severity for an entry to appear in the timeline.
    pub timeline_min_severity: f64,
    /// Maximum number of timeline entries.
    pub timeline_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            chains: ChainConfig::default(),
            ranker: RankerConfig::default(),
            timeline_min_severity: 6.0,
            timeline_limit: 25,
        }
    }
}

impl AnalyzerConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_MINUTES).contains(&self.chains.window_minutes) {
            return Err(FaultlineError::InvalidConfig(format!(
                "chains.window_minutes must be within 1..={MAX_WINDOW_MINUTES}"
            )));
        }
        if !(0.0..=10.0).contains(&self.chains.min_effect_severity) {
            return Err(FaultlineError::InvalidConfig(
                "chains.min_effect_severity must be within 0..=10".to_string(),
            ));
        }
        if self.chains.min_chain_events < 2 {
            return Err(FaultlineError::InvalidConfig(
                "chains.min_chain_events must be at least 2".to_string(),
            ));
        }
        if self.ranker.min_pattern_count == 0 {
            return Err(FaultlineError::InvalidConfig(
                "ranker.min_pattern_count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.ranker.error_rate_threshold_percent) {
            return Err(FaultlineError::InvalidConfig(
                "ranker.error_rate_threshold_percent must be within 0..=100".to_string(),
            ));
        }
        if !(0.0..=10.0).contains(&self.timeline_min_severity) {
            return Err(FaultlineError::InvalidConfig(
                "timeline_min_severity must be within 0..=10".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the causal-chain window.
    #[must_use]
    pub const fn with_window_minutes(mut self, minutes: i64) -> Self {
        self.chains.window_minutes = minutes;
        self
    }

    /// Includes entries without extracted timestamps in chain scanning.
    #[must_use]
    pub const fn with_untimed_entries(mut self, include: bool) -> Self {
        self.chains.include_untimed = include;
        self
    }

    /// Sets the minimum category count for pattern root causes.
    #[must_use]
    pub const fn with_min_pattern_count(mut self, count: usize) -> Self {
        self.ranker.min_pattern_count = count;
        self
    }

    /// Sets the maximum number of timeline entries.
    #[must_use]
    pub const fn with_timeline_limit(mut self, limit: usize) -> Self {
        self.timeline_limit = limit;
        self
    }
}

/// Analysis mode requested by the caller. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Fast pass.
    Quick,
    /// Default pass.
    #[default]
    Standard,
    /// Thorough pass.
    Deep,
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quick => write!(f, "Quick"),
            Self::Standard => write!(f, "Standard"),
            Self::Deep => write!(f, "Deep"),
        }
    }
}

/// Label used when no external model is selected.
pub const RULE_BASED_MODEL: &str = "Rule-based";

/// Caller-supplied run settings echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Requested mode.
    pub mode: AnalysisMode,
    /// Label of the externally selected model.
    pub model_label: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::default(),
            model_label: RULE_BASED_MODEL.to_string(),
        }
    }
}

impl RunConfig {
    /// Sets the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the model label.
    #[must_use]
    pub fn with_model_label(mut self, label: impl Into<String>) -> Self {
        self.model_label = label.into();
        self
    }
}

/// Per-run context threaded through the pipeline.
///
/// `started_at` doubles as the timestamp of entries whose time could not be
/// extracted, so re-running with the same context is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    clock: Instant,
}

impl RunContext {
    /// Creates a context starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a context with a fixed start time.
    #[must_use]
    pub fn at(started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            clock: Instant::now(),
        }
    }

    /// Returns the time elapsed since the context was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
