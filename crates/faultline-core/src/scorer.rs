//! Severity scoring with false-positive suppression.
//!
//! Scoring is two-staged: a success phrase anywhere in the line forces the
//! score to exactly 0, otherwise the level's base score is escalated by the
//! first matching failure multiplier and clamped to 10.

use crate::keywords::{contains_any, FAILURE_MULTIPLIERS, SUCCESS_PHRASES};
use crate::types::LogLevel;

/// Upper bound of the severity scale.
pub const MAX_SEVERITY: f64 = 10.0;

/// Returns true if the lowercased message contains a success phrase.
#[must_use]
pub fn is_success_lower(message_lower: &str) -> bool {
    contains_any(message_lower, SUCCESS_PHRASES)
}

/// Returns true if the message contains a success phrase.
#[must_use]
pub fn is_success(message: &str) -> bool {
    is_success_lower(&message.to_lowercase())
}

/// Returns the multiplier of the first failure keyword in the message, if any.
#[must_use]
pub fn failure_multiplier(message_lower: &str) -> Option<f64> {
    FAILURE_MULTIPLIERS
        .iter()
        .find(|(keyword, _)| message_lower.contains(keyword))
        .map(|(_, multiplier)| *multiplier)
}

/// Scores a message at the given level into `[0, 10]`.
#[must_use]
pub fn score(level: LogLevel, message: &str) -> f64 {
    let lower = message.to_lowercase();

    if is_success_lower(&lower) {
        return 0.0;
    }

    let base = level.base_score();
    let escalated = failure_multiplier(&lower).map_or(base, |m| base * m);
    escalated.min(MAX_SEVERITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    mod success_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("INFO Operation completed successfully" ; "completed successfully")]
        #[test_case("all tests passed" ; "passed")]
        #[test_case("node is healthy" ; "healthy")]
        #[test_case("coverage 100%" ; "percent")]
        #[test_case("All systems operational" ; "operational")]
        #[test_case("signature is valid" ; "is valid")]
        fn recognized(message: &str) {
            assert!(is_success(message));
        }

        // Phrases match anywhere in the line, including inside longer words.
        #[test_case("authentication token expired" ; "ok inside token")]
        #[test_case("abnormal termination" ; "normal inside abnormal")]
        #[test_case("worker inactive after crash" ; "active inside inactive")]
        #[test_case("upload unsuccessful" ; "success inside unsuccessful")]
        fn recognized_inside_words(message: &str) {
            assert!(is_success(message));
            assert!(score(crate::parser::extract_level(message), message).abs() < f64::EPSILON);
        }

        #[test_case("disk read error" ; "plain error")]
        #[test_case("kernel panic on cpu 3" ; "panic")]
        fn not_recognized(message: &str) {
            assert!(!is_success(message));
        }
    }

    mod score_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn success_overrides_everything() {
            let s = score(LogLevel::Critical, "CRITICAL panic handler completed successfully");
            assert!(s.abs() < f64::EPSILON);
        }

        #[test_case(LogLevel::Error, "disk read error", 7.0 ; "no multiplier")]
        #[test_case(LogLevel::Info, "kernel panic", 6.0 ; "panic doubles")]
        #[test_case(LogLevel::Warning, "socket disconnected", 6.5 ; "disconnected")]
        #[test_case(LogLevel::Error, "job failed", 10.0 ; "clamped")]
        #[test_case(LogLevel::Debug, "lost frame", 1.3 ; "debug lost")]
        fn escalation(level: LogLevel, message: &str, expected: f64) {
            assert!((score(level, message) - expected).abs() < 1e-9);
        }

        #[test]
        fn only_first_multiplier_applies() {
            // failed (1.7) precedes timeout (1.4); applying both would give 5 * 1.7 * 1.4.
            let s = score(LogLevel::Warning, "request failed after timeout");
            assert!((s - 8.5).abs() < 1e-9);
        }

        #[test]
        fn multiplier_order_not_message_order() {
            // "timeout" appears first in the text but "unreachable" ranks higher.
            assert_eq!(failure_multiplier("timeout: host unreachable"), Some(1.5));
        }

        #[test]
        fn no_multiplier() {
            assert_eq!(failure_multiplier("cache warmed"), None);
        }
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(message in ".{0,120}", idx in 0usize..8) {
            let s = score(LogLevel::ALL[idx], &message);
            prop_assert!((0.0..=MAX_SEVERITY).contains(&s));
        }

        #[test]
        fn prop_zero_iff_success(message in "[a-z %]{0,80}", idx in 0usize..8) {
            let s = score(LogLevel::ALL[idx], &message);
            prop_assert_eq!(s == 0.0, is_success(&message));
        }

        #[test]
        fn prop_success_suffix_forces_zero(prefix in "[a-z ]{0,60}", idx in 0usize..8) {
            let message = format!("{prefix} completed successfully");
            prop_assert!(score(LogLevel::ALL[idx], &message).abs() < f64::EPSILON);
        }
    }
}
