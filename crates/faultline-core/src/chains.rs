//! Causal-chain detection across named failure cascades.
//!
//! Entries are time-sorted, then each cascade pattern is scanned
//! independently: every trigger entry opens a window, and effect entries of
//! sufficient severity inside the window extend the chain and re-anchor the
//! window at their own timestamp.

use crate::config::ChainConfig;
use crate::keywords::{CascadePattern, CASCADE_PATTERNS};
use crate::types::{CausalChain, Impact, LogEntry};
use chrono::TimeDelta;
use tracing::debug;

/// Maximum confidence assigned to any chain.
pub const MAX_CHAIN_CONFIDENCE: f64 = 0.95;

/// Confidence of a chain with `len` events: `min(0.95, 0.7 + 0.05 * len)`.
#[must_use]
pub fn chain_confidence(len: usize) -> f64 {
    (len.saturating_mul(5).saturating_add(70) as f64 / 100.0).min(MAX_CHAIN_CONFIDENCE)
}

/// A time-sorted entry with its lowercased message.
struct Candidate<'a> {
    entry: &'a LogEntry,
    lower: String,
}

/// Builds causal chains from scored entries using the built-in cascade library.
#[must_use]
pub fn build_causal_chains(entries: &[LogEntry], config: &ChainConfig) -> Vec<CausalChain> {
    build_causal_chains_with(entries, config, CASCADE_PATTERNS)
}

/// Builds causal chains using a caller-supplied cascade library.
///
/// Overlapping chains from repeated triggers are kept as independent evidence.
#[must_use]
pub fn build_causal_chains_with(
    entries: &[LogEntry],
    config: &ChainConfig,
    patterns: &[CascadePattern],
) -> Vec<CausalChain> {
    let mut sorted: Vec<Candidate<'_>> = entries
        .iter()
        .filter(|e| config.include_untimed || e.has_timestamp())
        .map(|entry| Candidate {
            entry,
            lower: entry.message.to_lowercase(),
        })
        .collect();
    // Stable: equal timestamps keep line order.
    sorted.sort_by_key(|c| c.entry.timestamp);

    let mut chains = Vec::new();
    for pattern in patterns {
        let before = chains.len();
        for (idx, trigger) in sorted.iter().enumerate() {
            if !pattern.is_triggered_by(&trigger.lower) {
                continue;
            }
            let sequence = follow_effects(trigger.entry, &sorted[idx + 1..], pattern, config);
            if sequence.len() >= config.min_chain_events {
                chains.push(chain_from_sequence(pattern, sequence));
            }
        }
        debug!(
            pattern = pattern.name,
            chains = chains.len() - before,
            "scanned cascade pattern"
        );
    }

    chains
}

/// Extends a chain from `trigger` over the entries sorted after it.
///
/// A window too large to represent has no upper bound.
fn follow_effects<'a>(
    trigger: &'a LogEntry,
    later: &[Candidate<'a>],
    pattern: &CascadePattern,
    config: &ChainConfig,
) -> Vec<&'a LogEntry> {
    let window = TimeDelta::try_minutes(config.window_minutes);
    let mut sequence = vec![trigger];
    let mut anchor = trigger.timestamp;

    for candidate in later {
        let ts = candidate.entry.timestamp;
        // Entries sharing the trigger's (or anchor's) timestamp are not effects.
        if ts <= anchor {
            continue;
        }
        let deadline = window.and_then(|w| anchor.checked_add_signed(w));
        if deadline.is_some_and(|deadline| ts > deadline) {
            break;
        }
        if pattern.is_effect(&candidate.lower)
            && candidate.entry.severity >= config.min_effect_severity
        {
            sequence.push(candidate.entry);
            anchor = ts;
        }
    }

    sequence
}

fn chain_from_sequence(pattern: &CascadePattern, sequence: Vec<&LogEntry>) -> CausalChain {
    let len = sequence.len();
    let chain_text = pattern
        .stages
        .iter()
        .take(len)
        .copied()
        .collect::<Vec<_>>()
        .join(" → ");
    let max_severity = sequence
        .iter()
        .map(|e| e.severity)
        .fold(0.0_f64, f64::max);

    CausalChain {
        pattern: pattern.name.to_string(),
        title: pattern.title(),
        description: format!("Detected cascading failure pattern with {len} linked events"),
        events: sequence.into_iter().cloned().collect(),
        chain_text,
        confidence: chain_confidence(len),
        severity: Impact::from_max_severity(max_severity),
        recommendations: vec![
            format!("Investigate root cause in {} subsystem", pattern.subsystem()),
            "Implement early warning monitoring for cascade prevention".to_string(),
            "Review protection mechanisms and failsafes".to_string(),
            "Consider redundancy improvements for critical components".to_string(),
        ],
    }
}
