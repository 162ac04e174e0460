//! Pipeline entry point.
//!
//! The `Analyzer` takes one decoded text buffer plus run settings and returns
//! an [`AnalysisReport`]. Stages run strictly in order; none of them touches
//! I/O, so a run either completes over the whole buffer or (for raw bytes)
//! fails up front.

use crate::chains::build_causal_chains;
use crate::classifier::{classify_entries, Classification};
use crate::config::{AnalysisMode, AnalyzerConfig, RunConfig, RunContext};
use crate::detector::LogKind;
use crate::error::Result;
use crate::metrics::summarize_metrics;
use crate::parser::{decode_utf8, parse_entries};
use crate::ranker::rank_root_causes;
use crate::types::{
    AnalysisMetrics, CausalChain, ClassifiedError, FileInfo, LogEntry, PatternCounts, RootCause,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Identifier of the run that produced this report.
    pub run_id: Uuid,
    /// Start time of the run.
    pub analyzed_at: DateTime<Utc>,
    /// Caller-supplied file metadata.
    pub file: FileInfo,
    /// Requested mode, echoed.
    pub mode: AnalysisMode,
    /// Selected model label, echoed.
    pub model_label: String,
    /// Detected log family.
    pub log_kind: LogKind,
    /// Every parsed entry in line order.
    pub entries: Vec<LogEntry>,
    /// Classified errors in line order.
    pub errors: Vec<ClassifiedError>,
    /// Error counts per category.
    pub patterns: PatternCounts,
    /// Detected causal chains.
    pub chains: Vec<CausalChain>,
    /// Ranked root-cause candidates.
    pub root_causes: Vec<RootCause>,
    /// Aggregate statistics.
    pub metrics: AnalysisMetrics,
    /// Most notable entries in time order.
    pub timeline: Vec<LogEntry>,
    /// Number of entries whose timestamp defaulted to the run start.
    pub untimed_entries: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub analysis_duration_ms: u64,
}

impl AnalysisReport {
    /// Entries with 5 <= severity < 7.
    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| (5.0..7.0).contains(&e.severity))
    }

    /// Number of classified errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the top-ranked root cause, if any.
    #[must_use]
    pub fn primary_root_cause(&self) -> Option<&RootCause> {
        self.root_causes.first()
    }
}

/// Runs the triage pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FaultlineError::InvalidConfig`] if any threshold is out of range.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the analyzer's configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes raw bytes, which must be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FaultlineError::InvalidEncoding`] if `bytes` is not UTF-8.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        file: FileInfo,
        run: &RunConfig,
        ctx: &RunContext,
    ) -> Result<AnalysisReport> {
        let text = decode_utf8(bytes)?;
        Ok(self.analyze_text(text, file, run, ctx))
    }

    /// Analyzes a decoded text buffer.
    ///
    /// Entries without an extractable timestamp are stamped with
    /// `ctx.started_at`, so two runs over the same text with the same context
    /// produce the same entries, patterns and ranking.
    #[must_use]
    pub fn analyze_text(
        &self,
        text: &str,
        file: FileInfo,
        run: &RunConfig,
        ctx: &RunContext,
    ) -> AnalysisReport {
        let span = info_span!("analysis", run_id = %ctx.run_id, file = %file.name);
        let _enter = span.enter();

        let entries = parse_entries(text, ctx.started_at);
        let untimed_entries = entries.iter().filter(|e| !e.has_timestamp()).count();
        debug!(entries = entries.len(), untimed_entries, "parsed entries");
        if untimed_entries > 0 {
            warn!(
                untimed_entries,
                total = entries.len(),
                "entries without a recognizable timestamp were stamped with the run start time"
            );
        }

        let Classification { errors, patterns } = classify_entries(&entries);
        debug!(errors = errors.len(), categories = patterns.len(), "classified entries");

        let chains = build_causal_chains(&entries, &self.config.chains);
        debug!(chains = chains.len(), "built causal chains");

        let root_causes = rank_root_causes(
            entries.len(),
            &errors,
            &patterns,
            &chains,
            &self.config.ranker,
        );
        debug!(root_causes = root_causes.len(), "ranked root causes");

        let timeline = self.timeline(&entries);
        let log_kind = LogKind::detect(text);
        let metrics = summarize_metrics(&entries, ctx.elapsed());
        let analysis_duration_ms = u64::try_from(ctx.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            entries = entries.len(),
            errors = errors.len(),
            root_causes = root_causes.len(),
            kind = %log_kind,
            duration_ms = analysis_duration_ms,
            "analysis complete"
        );

        AnalysisReport {
            run_id: ctx.run_id,
            analyzed_at: ctx.started_at,
            file,
            mode: run.mode,
            model_label: run.model_label.clone(),
            log_kind,
            entries,
            errors,
            patterns,
            chains,
            root_causes,
            metrics,
            timeline,
            untimed_entries,
            analysis_duration_ms,
        }
    }

    fn timeline(&self, entries: &[LogEntry]) -> Vec<LogEntry> {
        let mut notable: Vec<LogEntry> = entries
            .iter()
            .filter(|e| e.severity >= self.config.timeline_min_severity)
            .cloned()
            .collect();
        notable.sort_by_key(|e| e.timestamp);
        notable.truncate(self.config.timeline_limit);
        notable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultlineError;
    use crate::types::{ErrorCategory, Impact, RootCauseOrigin};
    use chrono::TimeZone;
    use proptest::prelude::*;
    use std::fmt::Write as _;

    fn ctx() -> RunContext {
        RunContext::at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    fn analyze(text: &str) -> AnalysisReport {
        Analyzer::new().analyze_text(
            text,
            FileInfo::from_text("test.log", text),
            &RunConfig::default(),
            &ctx(),
        )
    }

    mod analyzer_tests {
        use super::*;

        #[test]
        fn rejects_invalid_config() {
            let config = AnalyzerConfig::default().with_window_minutes(0);
            assert!(Analyzer::with_config(config).is_err());
        }

        #[test]
        fn accepts_valid_config() {
            let config = AnalyzerConfig::default().with_timeline_limit(5);
            let analyzer = Analyzer::with_config(config).unwrap();
            assert_eq!(analyzer.config().timeline_limit, 5);
        }

        #[test]
        fn invalid_utf8_is_terminal() {
            let bytes = b"ok line\n\xff\xfe broken";
            let err = Analyzer::new()
                .analyze_bytes(bytes, FileInfo::default(), &RunConfig::default(), &ctx())
                .unwrap_err();
            assert!(matches!(err, FaultlineError::InvalidEncoding { offset: 8 }));
        }

        #[test]
        fn bytes_and_text_agree() {
            let text = "2024-01-01 10:00:00 ERROR disk full\n";
            let context = ctx();
            let analyzer = Analyzer::new();
            let from_bytes = analyzer
                .analyze_bytes(
                    text.as_bytes(),
                    FileInfo::from_text("a", text),
                    &RunConfig::default(),
                    &context,
                )
                .unwrap();
            let from_text =
                analyzer.analyze_text(text, FileInfo::from_text("a", text), &RunConfig::default(), &context);
            assert_eq!(from_bytes.entries, from_text.entries);
            assert_eq!(from_bytes.root_causes, from_text.root_causes);
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn power_cascade_scenario() {
            let report = analyze(
                "2024-01-01 10:00:00 ERROR VRM voltage out of range\n\
                 2024-01-01 10:01:00 CRITICAL thermal shutdown triggered\n",
            );

            assert_eq!(report.entries.len(), 2);
            assert_eq!(report.errors.len(), 2);
            assert!(report.errors.iter().all(|e| e.category == ErrorCategory::Hardware));
            assert_eq!(report.patterns.get(&ErrorCategory::Hardware), Some(&2));

            let power: Vec<_> = report
                .chains
                .iter()
                .filter(|c| c.pattern == "power_cascade")
                .collect();
            assert_eq!(power.len(), 1);
            assert_eq!(power[0].len(), 2);
            assert!((power[0].confidence - 0.8).abs() < 1e-9);
            assert_eq!(power[0].severity, Impact::Critical);

            // A two-event chain is not promoted; the Hardware pattern is.
            assert!(report
                .root_causes
                .iter()
                .all(|c| c.origin != RootCauseOrigin::CausalChain));
            let top = report.primary_root_cause().unwrap();
            assert_eq!(top.title, "Hardware System Issue");
            assert!((top.confidence - 0.7).abs() < 1e-9);
        }

        #[test]
        fn success_line_excluded_everywhere() {
            let report = analyze("INFO Operation completed successfully\n");

            assert_eq!(report.entries.len(), 1);
            assert!(report.entries[0].severity.abs() < f64::EPSILON);
            assert!(report.errors.is_empty());
            assert!(report.patterns.is_empty());
            assert!(report.root_causes.is_empty());
        }

        #[test]
        fn quiet_log_operates_normally() {
            let mut text = String::new();
            for i in 0..200 {
                let _ = writeln!(text, "2024-01-01 10:00:00 INFO request {i} completed successfully");
            }

            let report = analyze(&text);

            assert_eq!(report.entries.len(), 200);
            assert_eq!(report.error_count(), 0);
            assert_eq!(report.root_causes.len(), 1);
            let cause = &report.root_causes[0];
            assert_eq!(cause.title, "System Operating Normally");
            assert!((cause.confidence - 0.9).abs() < f64::EPSILON);
            assert_eq!(cause.severity, Impact::Low);
        }

        #[test]
        fn empty_buffer_yields_empty_report() {
            let report = analyze("");
            assert!(report.entries.is_empty());
            assert!(report.root_causes.is_empty());
            assert_eq!(report.file.total_lines, 0);
            assert_eq!(report.metrics.severity_distribution.total(), 0);
        }

        #[test]
        fn untimed_entries_are_counted_and_left_out_of_chains() {
            let report = analyze(
                "ERROR VRM voltage out of range\n\
                 CRITICAL thermal shutdown triggered\n",
            );
            assert_eq!(report.untimed_entries, 2);
            assert!(report.chains.is_empty());

            let analyzer =
                Analyzer::with_config(AnalyzerConfig::default().with_untimed_entries(true)).unwrap();
            let text = "ERROR VRM voltage out of range\nCRITICAL thermal shutdown triggered\n";
            let report = analyzer.analyze_text(
                text,
                FileInfo::from_text("t", text),
                &RunConfig::default(),
                &ctx(),
            );
            // Both entries share the run start time, so no effect is strictly later.
            assert!(report.chains.is_empty());
            assert_eq!(report.untimed_entries, 2);
        }
    }

    mod report_tests {
        use super::*;

        #[test]
        fn echoes_run_settings_and_file() {
            let text = "line one\nline two\n";
            let run = RunConfig::default()
                .with_mode(AnalysisMode::Deep)
                .with_model_label("llama3");
            let context = ctx();
            let report = Analyzer::new().analyze_text(
                text,
                FileInfo::from_text("x.log", text),
                &run,
                &context,
            );

            assert_eq!(report.mode, AnalysisMode::Deep);
            assert_eq!(report.model_label, "llama3");
            assert_eq!(report.run_id, context.run_id);
            assert_eq!(report.analyzed_at, context.started_at);
            assert_eq!(report.file.name, "x.log");
            assert_eq!(report.file.total_lines, 2);
        }

        #[test]
        fn warnings_and_timeline() {
            let report = analyze(
                "2024-01-01 10:05:00 WARNING disk nearly full\n\
                 2024-01-01 10:00:00 ERROR disk read error\n\
                 2024-01-01 10:01:00 INFO heartbeat\n",
            );

            let warnings: Vec<_> = report.warnings().collect();
            assert_eq!(warnings.len(), 1);
            assert_eq!(warnings[0].line_number, 1);

            // Only the ERROR line reaches severity 6.
            assert_eq!(report.timeline.len(), 1);
            assert_eq!(report.timeline[0].line_number, 2);
        }

        #[test]
        fn timeline_is_sorted_and_limited() {
            let mut text = String::new();
            for minute in (0..40).rev() {
                let _ = writeln!(text, "2024-01-01 10:{minute:02}:00 ERROR disk read error");
            }

            let report = analyze(&text);

            assert_eq!(report.timeline.len(), 25);
            assert!(report
                .timeline
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp));
            assert_eq!(report.timeline[0].line_number, 40);
        }

        #[test]
        fn detects_log_kind() {
            let report = analyze("jenkins build started\ndocker deploy failed\n");
            assert_eq!(report.log_kind, LogKind::Pipeline);
        }

        #[test]
        fn serializes_with_iso_timestamps() {
            let report = analyze("2024-01-01 10:00:00 ERROR disk read error\n");
            let json = serde_json::to_value(&report).unwrap();

            assert_eq!(json["entries"][0]["timestamp"], "2024-01-01T10:00:00Z");
            assert_eq!(json["errors"][0]["type"], "Filesystem");
            assert_eq!(json["patterns"]["Filesystem"], 1);

            let back: AnalysisReport = serde_json::from_value(json).unwrap();
            assert_eq!(back.entries, report.entries);
        }
    }

    proptest! {
        #[test]
        fn prop_idempotent_with_fixed_context(lines in proptest::collection::vec("[ -~]{0,60}", 0..40)) {
            let text = lines.join("\n");
            let context = ctx();
            let analyzer = Analyzer::new();
            let run = RunConfig::default();

            let a = analyzer.analyze_text(&text, FileInfo::from_text("p", &text), &run, &context);
            let b = analyzer.analyze_text(&text, FileInfo::from_text("p", &text), &run, &context);

            prop_assert_eq!(&a.entries, &b.entries);
            prop_assert_eq!(&a.patterns, &b.patterns);
            prop_assert_eq!(&a.root_causes, &b.root_causes);
        }

        #[test]
        fn prop_errors_are_positive_and_not_success(lines in proptest::collection::vec("[ -~]{0,60}", 0..40)) {
            let text = lines.join("\n");
            let report = analyze(&text);

            for error in &report.errors {
                prop_assert!(error.entry.severity > 0.0);
                prop_assert!(!crate::scorer::is_success(&error.entry.message));
            }
            let total: usize = report.patterns.values().sum();
            prop_assert_eq!(total, report.errors.len());
        }
    }
}
