//! Pattern classifier: assigns each non-zero-severity entry a category.

use crate::keywords::{contains_any, CATEGORY_KEYWORDS, GENERIC_ERROR_WORDS, GENERIC_WARNING_WORDS};
use crate::scorer::is_success_lower;
use crate::types::{ClassifiedError, ErrorCategory, LogEntry, PatternCounts};

/// Classifies a message into exactly one category.
///
/// Categories are tested in taxonomy order; the generic error and warning
/// words are consulted only when no category keyword matches.
#[must_use]
pub fn classify(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map_or_else(
            || {
                if contains_any(&lower, GENERIC_ERROR_WORDS) {
                    ErrorCategory::Application
                } else if contains_any(&lower, GENERIC_WARNING_WORDS) {
                    ErrorCategory::Warning
                } else {
                    ErrorCategory::General
                }
            },
            |(category, _)| *category,
        )
}

/// Result of classifying an entry stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Errors in entry order.
    pub errors: Vec<ClassifiedError>,
    /// Occurrences per category.
    pub patterns: PatternCounts,
}

/// Classifies every entry with severity > 0 that is not a success message.
#[must_use]
pub fn classify_entries(entries: &[LogEntry]) -> Classification {
    let mut classification = Classification::default();

    for entry in entries {
        if entry.is_suppressed() || is_success_lower(&entry.message.to_lowercase()) {
            continue;
        }

        let category = classify(&entry.message);
        *classification.patterns.entry(category).or_insert(0) += 1;
        classification.errors.push(ClassifiedError {
            entry: entry.clone(),
            category,
        });
    }

    classification
}
