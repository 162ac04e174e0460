//! Human-readable rendering of analysis reports.
//!
//! The text report has three sections: a summary of the run and its
//! findings, the ranked root causes, and a timeline of high-severity events.

// Allow format string pushing for readability in formatter functions
#![allow(clippy::format_push_string)]

use std::io::Write;

use faultline_core::{AnalysisReport, Impact, LogEntry, RootCause};

use crate::error::Result;
use crate::output::TextDisplay;

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────────────────\n";

/// Maximum number of characters of a message shown in the timeline.
const MESSAGE_WIDTH: usize = 120;

/// Formats a full report: summary, root causes and timeline.
#[must_use]
pub fn format_report(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format_header(report));
    output.push_str(&format_summary(report));
    output.push('\n');
    output.push_str(&format_root_causes(&report.root_causes));
    output.push('\n');
    output.push_str(&format_timeline(&report.timeline));
    output.push_str(&format_footer(report));

    output
}

fn format_header(report: &AnalysisReport) -> String {
    let mut header = String::new();
    header.push_str(HEAVY_RULE);
    header.push_str("                    FAULTLINE ANALYSIS REPORT\n");
    header.push_str(HEAVY_RULE);
    header.push_str(&format!(
        "Analyzed: {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    header.push_str(&format!("Duration: {}ms\n", report.analysis_duration_ms));
    header
}

/// Formats the summary section.
#[must_use]
pub fn format_summary(report: &AnalysisReport) -> String {
    let metrics = &report.metrics;
    let dist = &metrics.severity_distribution;

    let mut section = String::new();
    section.push_str("\nSUMMARY\n");
    section.push_str(LIGHT_RULE);

    section.push_str("File\n");
    section.push_str(&format!("  Name:            {}\n", report.file.name));
    section.push_str(&format!("  Size:            {} bytes\n", report.file.size));
    section.push_str(&format!("  Lines:           {}\n", report.file.total_lines));

    section.push_str("Run\n");
    section.push_str(&format!("  Mode:            {}\n", report.mode));
    section.push_str(&format!("  Model:           {}\n", report.model_label));
    section.push_str(&format!("  Log kind:        {}\n", report.log_kind));
    section.push_str(&format!(
        "  Throughput:      {:.0} lines/sec\n",
        metrics.lines_per_second
    ));

    section.push_str("Findings\n");
    section.push_str(&format!("  Errors:          {}\n", report.error_count()));
    section.push_str(&format!("  Warnings:        {}\n", report.warnings().count()));
    section.push_str(&format!("  Root causes:     {}\n", report.root_causes.len()));
    section.push_str(&format!(
        "  Error density:   {:.1} per 1000 lines\n",
        metrics.errors_per_1000_lines
    ));

    section.push_str("Severity\n");
    section.push_str(&format!("  Critical:        {}\n", dist.critical));
    section.push_str(&format!("  High:            {}\n", dist.high));
    section.push_str(&format!("  Medium:          {}\n", dist.medium));
    section.push_str(&format!("  Low:             {}\n", dist.low));

    section.push_str("Patterns\n");
    if report.patterns.is_empty() {
        section.push_str("  No error patterns detected\n");
    } else {
        let mut patterns: Vec<_> = report.patterns.iter().collect();
        patterns.sort_by(|a, b| b.1.cmp(a.1));
        for (category, count) in patterns {
            section.push_str(&format!("  {category}: {count} occurrences\n"));
        }
    }

    if report.untimed_entries > 0 {
        section.push_str(&format!(
            "\n⚠️  {} entries had no recognizable timestamp; they are stamped with the run start time and left out of causal chains.\n",
            report.untimed_entries
        ));
    }

    section
}

/// Formats the ranked root causes.
#[must_use]
pub fn format_root_causes(causes: &[RootCause]) -> String {
    let mut section = String::new();
    section.push_str("ROOT CAUSES\n");
    section.push_str(LIGHT_RULE);

    if causes.is_empty() {
        section.push_str("No systematic root causes identified.\n");
        return section;
    }

    for (i, cause) in causes.iter().enumerate() {
        section.push_str(&format!(
            "\n{} [{}] {}\n",
            impact_icon(cause.severity),
            i + 1,
            cause.title
        ));
        section.push_str(&format!("   Confidence: {:.0}%\n", cause.confidence * 100.0));
        section.push_str(&format!("   Severity:   {}\n", cause.severity));
        section.push_str(&format!("   {}\n", cause.description));

        if let Some(ref chain) = cause.causal_chain {
            section.push_str(&format!("   Chain: {chain}\n"));
        }

        if !cause.recommendations.is_empty() {
            section.push_str("   Recommendations:\n");
            for recommendation in &cause.recommendations {
                section.push_str(&format!("   • {recommendation}\n"));
            }
        }
    }

    section
}

/// Formats the high-severity event timeline.
#[must_use]
pub fn format_timeline(timeline: &[LogEntry]) -> String {
    let mut section = String::new();
    section.push_str("TIMELINE\n");
    section.push_str(LIGHT_RULE);

    if timeline.is_empty() {
        section.push_str("No high-severity events detected.\n");
        return section;
    }

    for entry in timeline {
        section.push_str(&format!(
            "{} [{}] {} (line {})\n",
            severity_icon(entry.severity),
            entry.timestamp.format("%H:%M:%S"),
            entry.level,
            entry.line_number
        ));
        section.push_str(&format!("   {}\n", truncate(&entry.message, MESSAGE_WIDTH)));
        section.push_str(&format!("   Severity: {:.1}/10\n", entry.severity));
    }

    section
}

fn format_footer(report: &AnalysisReport) -> String {
    let mut footer = String::new();
    footer.push('\n');
    footer.push_str(HEAVY_RULE);
    footer.push_str(&format!("Run ID: {}\n", report.run_id));
    footer.push_str(HEAVY_RULE);
    footer
}

const fn impact_icon(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical => "🚨",
        Impact::High => "🔴",
        Impact::Medium => "🟡",
        Impact::Low => "🟢",
    }
}

fn severity_icon(severity: f64) -> &'static str {
    if severity >= 9.0 {
        "🔴"
    } else if severity >= 7.0 {
        "🟡"
    } else {
        "🟠"
    }
}

/// Truncates to `max_chars` characters, marking the cut with `...`.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

impl TextDisplay for AnalysisReport {
    fn write_text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(format_report(self).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use faultline_core::{Analyzer, FileInfo, RunConfig, RunContext};

    fn report(text: &str) -> AnalysisReport {
        let ctx = RunContext::at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        Analyzer::new().analyze_text(
            text,
            FileInfo::from_text("bmc.log", text),
            &RunConfig::default(),
            &ctx,
        )
    }

    const CASCADE: &str = "2024-01-01 10:00:00 ERROR memory error on DIMM A1\n\
                           2024-01-01 10:05:00 ERROR ecc correction storm\n\
                           2024-01-01 10:10:00 CRITICAL uncorrectable error\n";

    #[test]
    fn report_has_all_sections() {
        let output = format_report(&report(CASCADE));

        assert!(output.contains("FAULTLINE ANALYSIS REPORT"));
        assert!(output.contains("SUMMARY"));
        assert!(output.contains("ROOT CAUSES"));
        assert!(output.contains("TIMELINE"));
        assert!(output.contains("Name:            bmc.log"));
        assert!(output.contains("Model:           Rule-based"));
    }

    #[test]
    fn promoted_chain_is_rendered_with_narrative() {
        let output = format_root_causes(&report(CASCADE).root_causes);

        assert!(output.contains("Memory Cascade Failure Chain"));
        assert!(output.contains(
            "Chain: Memory error detected → ECC correction attempts → Uncorrectable errors"
        ));
        assert!(output.contains("Confidence: 85%"));
    }

    #[test]
    fn empty_sections_say_so() {
        let empty = report("");
        assert!(format_root_causes(&empty.root_causes).contains("No systematic root causes"));
        assert!(format_timeline(&empty.timeline).contains("No high-severity events"));
        assert!(format_summary(&empty).contains("No error patterns detected"));
    }

    #[test]
    fn untimed_entries_are_called_out() {
        let summary = format_summary(&report("ERROR disk read error\n"));
        assert!(summary.contains("1 entries had no recognizable timestamp"));
    }

    #[test]
    fn timeline_lists_time_level_and_line() {
        let timeline = format_timeline(&report(CASCADE).timeline);
        assert!(timeline.contains("[10:00:00] ERROR (line 1)"));
        assert!(timeline.contains("[10:10:00] CRITICAL (line 3)"));
        assert!(timeline.contains("Severity: 10.0/10"));
    }

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn text_display_writes_report() {
        let mut buf = Vec::new();
        report(CASCADE).write_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(HEAVY_RULE));
    }
}
