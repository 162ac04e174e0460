//! Keyword tables driving scoring, classification and cascade detection.
//!
//! All tables are ordered slices: iteration order is the match priority.
//! Adding a category or cascade only touches data here.

use crate::types::ErrorCategory;

/// Phrases that mark a line as a success message, forcing severity to 0.
pub static SUCCESS_PHRASES: &[&str] = &[
    "completed successfully",
    "success",
    "passed",
    "ok",
    "normal",
    "healthy",
    "good",
    "operational",
    "ready",
    "online",
    "active",
    "optimal",
    "excellent",
    "within normal range",
    "is good",
    "is normal",
    "is optimal",
    "is excellent",
    "100%",
    "all systems operational",
    "is valid",
    "are running normally",
    "test passed",
    "responded successfully",
];

/// Failure keywords and their severity multipliers. Only the first hit applies.
pub static FAILURE_MULTIPLIERS: &[(&str, f64)] = &[
    ("panic", 2.0),
    ("crash", 1.8),
    ("failed", 1.7),
    ("failure", 1.7),
    ("segfault", 1.9),
    ("unreachable", 1.5),
    ("denied", 1.5),
    ("timeout", 1.4),
    ("authentication", 1.4),
    ("refused", 1.4),
    ("permission", 1.3),
    ("disconnected", 1.3),
    ("lost", 1.3),
];

/// Keywords that imply an `ERROR` level when no tag is present.
pub static ERROR_LEVEL_HINTS: &[&str] =
    &["exception", "error", "failed", "failure", "crash", "panic"];

/// Keywords that imply a `WARNING` level when no tag is present.
pub static WARNING_LEVEL_HINTS: &[&str] = &["warning", "warn", "deprecated", "timeout", "retry"];

/// Category keyword sets in taxonomy order. First category with a hit wins.
pub static CATEGORY_KEYWORDS: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Hardware,
        &[
            "vrm", "voltage", "thermal", "temperature", "cpu", "memory", "dimm", "ecc", "sensors",
            "fan",
        ],
    ),
    (
        ErrorCategory::Firmware,
        &["bios", "uefi", "firmware", "boot", "microcode", "driver"],
    ),
    (
        ErrorCategory::Database,
        &[
            "database", "sql", "connection", "query", "table", "schema", "mysql", "postgres",
        ],
    ),
    (
        ErrorCategory::Network,
        &[
            "network", "timeout", "socket", "connection", "http", "tcp", "udp", "dns", "ssl",
        ],
    ),
    (
        ErrorCategory::Memory,
        &["memory", "heap", "oom", "allocation", "garbage", "leak", "buffer"],
    ),
    (
        ErrorCategory::Filesystem,
        &["file", "permission", "disk", "directory", "io", "read", "write", "space"],
    ),
    (
        ErrorCategory::Authentication,
        &["auth", "login", "credential", "token", "session", "password", "unauthorized"],
    ),
    (
        ErrorCategory::Security,
        &["security", "access", "forbidden", "ssl", "tls", "certificate", "encryption"],
    ),
    (
        ErrorCategory::Performance,
        &["slow", "performance", "latency", "bottleneck", "cpu", "lag", "delay"],
    ),
    (
        ErrorCategory::Configuration,
        &["config", "setting", "parameter", "property", "environment", "variable"],
    ),
    (
        ErrorCategory::Pipeline,
        &["build", "deploy", "pipeline", "ci", "cd", "jenkins", "azure", "docker"],
    ),
    (
        ErrorCategory::Testing,
        &["test", "assert", "pytest", "jest", "junit", "spec", "mock", "fixture"],
    ),
];

/// Generic error words that fall back to [`ErrorCategory::Application`].
pub static GENERIC_ERROR_WORDS: &[&str] = &["error", "exception", "fail", "crash", "panic"];

/// Generic warning words that fall back to [`ErrorCategory::Warning`].
pub static GENERIC_WARNING_WORDS: &[&str] = &["warn", "warning", "deprecated"];

/// A named cascading-failure signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadePattern {
    /// Identifier such as `power_cascade`.
    pub name: &'static str,
    /// Keywords that start a cascade.
    pub triggers: &'static [&'static str],
    /// Stage labels, truncated to the chain length when rendered.
    pub stages: &'static [&'static str],
    /// Keywords that mark a downstream effect.
    pub effects: &'static [&'static str],
}

impl CascadePattern {
    /// Returns true if the lowercased message contains a trigger keyword.
    #[must_use]
    pub fn is_triggered_by(&self, message_lower: &str) -> bool {
        contains_any(message_lower, self.triggers)
    }

    /// Returns true if the lowercased message contains an effect keyword.
    #[must_use]
    pub fn is_effect(&self, message_lower: &str) -> bool {
        contains_any(message_lower, self.effects)
    }

    /// Returns the chain title, e.g. `Power Cascade Failure Chain`.
    #[must_use]
    pub fn title(&self) -> String {
        let words: Vec<String> = self
            .name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect();
        format!("{} Failure Chain", words.join(" "))
    }

    /// Returns the subsystem named in recommendations (the first trigger).
    #[must_use]
    pub fn subsystem(&self) -> &'static str {
        self.triggers.first().copied().unwrap_or(self.name)
    }
}

/// Cascade library, scanned in order.
pub static CASCADE_PATTERNS: &[CascadePattern] = &[
    CascadePattern {
        name: "power_cascade",
        triggers: &["vrm", "voltage", "power"],
        stages: &[
            "VRM instability",
            "Voltage regulation failure",
            "Power delivery issues",
            "Component undervolt",
            "System instability",
        ],
        effects: &["thermal", "cpu", "hang", "crash", "reset"],
    },
    CascadePattern {
        name: "thermal_cascade",
        triggers: &["thermal", "temperature", "overheat"],
        stages: &[
            "Thermal threshold exceeded",
            "CPU throttling engaged",
            "Performance degradation",
            "Thermal protection triggered",
            "Emergency shutdown",
        ],
        effects: &["throttle", "slow", "hang", "shutdown", "reboot"],
    },
    CascadePattern {
        name: "memory_cascade",
        triggers: &["memory", "dram", "ecc"],
        stages: &[
            "Memory error detected",
            "ECC correction attempts",
            "Uncorrectable errors",
            "Memory controller panic",
            "System halt",
        ],
        effects: &["correction", "uncorrectable", "panic", "halt", "crash"],
    },
];

/// Returns true if `haystack` contains any of `needles` as a substring.
#[must_use]
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_are_in_fixed_order() {
        let names: Vec<&str> = FAILURE_MULTIPLIERS.iter().map(|(k, _)| *k).collect();
        let failed = names.iter().position(|k| *k == "failed").unwrap();
        let timeout = names.iter().position(|k| *k == "timeout").unwrap();
        assert!(failed < timeout);
        assert_eq!(names[0], "panic");
    }

    #[test]
    fn category_table_follows_taxonomy_order() {
        let categories: Vec<ErrorCategory> = CATEGORY_KEYWORDS.iter().map(|(c, _)| *c).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert_eq!(categories.len(), 12);
    }

    #[test]
    fn cascade_titles() {
        let titles: Vec<String> = CASCADE_PATTERNS.iter().map(CascadePattern::title).collect();
        assert_eq!(
            titles,
            vec![
                "Power Cascade Failure Chain",
                "Thermal Cascade Failure Chain",
                "Memory Cascade Failure Chain",
            ]
        );
    }

    #[test]
    fn cascade_patterns_have_stages_for_every_length() {
        for pattern in CASCADE_PATTERNS {
            assert_eq!(pattern.stages.len(), 5, "{}", pattern.name);
            assert!(!pattern.triggers.is_empty());
            assert!(!pattern.effects.is_empty());
        }
    }
}
