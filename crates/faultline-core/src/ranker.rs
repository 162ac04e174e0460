//! Root-cause ranking.
//!
//! Candidates come from four tiers:
//!
//! 1. causal chains long enough to promote,
//! 2. one candidate per error category (always evaluated),
//! 3. severity buckets, only when tiers 1-2 produced nothing and errors exist,
//! 4. the overall error rate, only when everything above produced nothing.
//!
//! The merged list is sorted by confidence, then count, both descending.

use crate::config::RankerConfig;
use crate::types::{
    CausalChain, ClassifiedError, Impact, PatternCounts, RootCause, RootCauseOrigin,
};
use std::cmp::Ordering;

/// Maximum confidence assigned to a pattern root cause.
pub const MAX_PATTERN_CONFIDENCE: f64 = 0.95;

/// Confidence of a category seen `count` times: `min(0.95, 0.5 + 0.1 * count)`.
#[must_use]
pub fn pattern_confidence(count: usize) -> f64 {
    // Percent arithmetic keeps equal confidences bit-identical across tiers.
    (count.saturating_mul(10).saturating_add(50) as f64 / 100.0).min(MAX_PATTERN_CONFIDENCE)
}

/// Ranks root-cause candidates for one analysis run.
#[must_use]
pub fn rank_root_causes(
    total_entries: usize,
    errors: &[ClassifiedError],
    patterns: &PatternCounts,
    chains: &[CausalChain],
    config: &RankerConfig,
) -> Vec<RootCause> {
    let mut causes: Vec<RootCause> = chains
        .iter()
        .filter(|chain| chain.len() >= config.promote_min_events)
        .map(promote_chain)
        .collect();

    causes.extend(
        patterns
            .iter()
            .filter(|(_, count)| **count >= config.min_pattern_count)
            .map(|(category, count)| pattern_cause(category.as_str(), *count)),
    );

    if causes.is_empty() && !errors.is_empty() {
        causes.extend(severity_distribution_causes(errors));
    }

    if causes.is_empty() {
        causes.extend(error_rate_cause(total_entries, errors.len(), config));
    }

    sort_root_causes(&mut causes);
    causes
}

/// Sorts by confidence then count, both descending. Stable for equal keys.
pub fn sort_root_causes(causes: &mut [RootCause]) {
    causes.sort_by(compare_root_causes);
}

fn compare_root_causes(a: &RootCause, b: &RootCause) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.count.cmp(&a.count))
}

fn promote_chain(chain: &CausalChain) -> RootCause {
    RootCause {
        title: chain.title.clone(),
        description: chain.description.clone(),
        confidence: chain.confidence,
        count: chain.len(),
        severity: chain.severity,
        recommendations: chain.recommendations.clone(),
        causal_chain: Some(chain.chain_text.clone()),
        origin: RootCauseOrigin::CausalChain,
    }
}

fn pattern_cause(category: &str, count: usize) -> RootCause {
    let lower = category.to_lowercase();
    RootCause {
        title: format!("{category} System Issue"),
        description: format!(
            "Multiple {lower} events ({count} occurrences) indicate systematic problem"
        ),
        confidence: pattern_confidence(count),
        count,
        severity: Impact::from_count(count),
        recommendations: vec![
            format!("Investigate {lower} infrastructure components"),
            "Monitor system resources and performance metrics".to_string(),
            "Review recent configuration changes".to_string(),
            "Implement preventive monitoring alerts".to_string(),
        ],
        causal_chain: None,
        origin: RootCauseOrigin::Pattern,
    }
}

fn severity_distribution_causes(errors: &[ClassifiedError]) -> Vec<RootCause> {
    let critical = errors.iter().filter(|e| e.entry.severity >= 8.0).count();
    let elevated = errors
        .iter()
        .filter(|e| (6.0..8.0).contains(&e.entry.severity))
        .count();

    let mut causes = Vec::new();

    if critical > 0 {
        causes.push(RootCause {
            title: "Critical System Events Detected".to_string(),
            description: format!(
                "Found {critical} critical severity events requiring immediate attention"
            ),
            confidence: 0.8,
            count: critical,
            severity: Impact::Critical,
            recommendations: vec![
                "Review critical events immediately".to_string(),
                "Check system stability and performance".to_string(),
                "Investigate resource constraints".to_string(),
                "Implement monitoring for early detection".to_string(),
            ],
            causal_chain: None,
            origin: RootCauseOrigin::SeverityDistribution,
        });
    }

    if elevated > 0 {
        causes.push(RootCause {
            title: "System Performance Issues".to_string(),
            description: format!(
                "Found {elevated} medium severity events indicating performance degradation"
            ),
            confidence: 0.7,
            count: elevated,
            severity: Impact::Medium,
            recommendations: vec![
                "Monitor system performance metrics".to_string(),
                "Review error patterns for trends".to_string(),
                "Consider capacity planning".to_string(),
                "Optimize system configuration".to_string(),
            ],
            causal_chain: None,
            origin: RootCauseOrigin::SeverityDistribution,
        });
    }

    causes
}

fn error_rate_cause(
    total_entries: usize,
    total_errors: usize,
    config: &RankerConfig,
) -> Option<RootCause> {
    let error_rate = if total_entries > 0 {
        total_errors as f64 / total_entries as f64 * 100.0
    } else {
        0.0
    };

    if error_rate > config.error_rate_threshold_percent {
        Some(RootCause {
            title: "High Error Rate Detected".to_string(),
            description: format!(
                "Error rate of {error_rate:.1}% ({total_errors}/{total_entries}) exceeds normal thresholds"
            ),
            confidence: 0.6,
            count: total_errors,
            severity: Impact::Medium,
            recommendations: vec![
                "Investigate causes of elevated error rate".to_string(),
                "Review system configuration and resources".to_string(),
                "Implement error rate monitoring".to_string(),
                "Consider system optimization".to_string(),
            ],
            causal_chain: None,
            origin: RootCauseOrigin::ErrorRate,
        })
    } else if total_entries > config.normal_min_entries {
        Some(RootCause {
            title: "System Operating Normally".to_string(),
            description: format!(
                "Low error rate of {error_rate:.1}% indicates stable system operation"
            ),
            confidence: 0.9,
            count: total_errors,
            severity: Impact::Low,
            recommendations: vec![
                "Continue current monitoring practices".to_string(),
                "Maintain regular log reviews".to_string(),
                "Keep current configuration".to_string(),
                "Document stable configuration for reference".to_string(),
            ],
            causal_chain: None,
            origin: RootCauseOrigin::ErrorRate,
        })
    } else {
        None
    }
}
