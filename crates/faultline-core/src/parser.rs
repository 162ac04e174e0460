//! Entry parser: splits raw text into ordered, timestamped, leveled entries.
//!
//! Timestamps are probed with four pattern families in fixed priority order
//! (ISO-8601, US slash, syslog, day-month-year). The first family whose match
//! also parses wins. Lines with no usable timestamp get the run start time and
//! are tagged [`TimestampSource::Defaulted`].

use crate::error::{FaultlineError, Result};
use crate::keywords::{contains_any, ERROR_LEVEL_HINTS, WARNING_LEVEL_HINTS};
use crate::scorer::score;
use crate::types::{LogEntry, LogLevel, TimestampSource};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{4}-\d{2}-\d{2})[T\s](\d{2}:\d{2}:\d{2}(?:\.\d{3})?)(Z|[+-]\d{2}:\d{2})?",
    )
    .unwrap_or_else(|_| unreachable!())
});

static US_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2})").unwrap_or_else(|_| unreachable!())
});

static SYSLOG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w{3} \d{2} \d{2}:\d{2}:\d{2})").unwrap_or_else(|_| unreachable!())
});

static DMY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}-\w{3}-\d{4} \d{2}:\d{2}:\d{2})").unwrap_or_else(|_| unreachable!())
});

/// A timestamp pattern family and the parser for its captures.
struct TimestampFamily {
    regex: &'static Lazy<Regex>,
    parse: fn(&Captures<'_>, i32) -> Option<DateTime<Utc>>,
}

static TIMESTAMP_FAMILIES: [TimestampFamily; 4] = [
    TimestampFamily {
        regex: &ISO_REGEX,
        parse: parse_iso,
    },
    TimestampFamily {
        regex: &US_REGEX,
        parse: parse_us,
    },
    TimestampFamily {
        regex: &SYSLOG_REGEX,
        parse: parse_syslog,
    },
    TimestampFamily {
        regex: &DMY_REGEX,
        parse: parse_dmy,
    },
];

fn parse_iso(caps: &Captures<'_>, _year: i32) -> Option<DateTime<Utc>> {
    let text = format!("{} {}", &caps[1], &caps[2]);
    let naive = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())?;

    match caps.get(3).map(|m| m.as_str()) {
        None | Some("Z") => Some(naive.and_utc()),
        Some(offset) => {
            let offset = parse_offset(offset)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let (hours, minutes) = offset.get(1..)?.split_once(':')?;
    let seconds = hours.parse::<i32>().ok()? * 3600 + minutes.parse::<i32>().ok()? * 60;
    FixedOffset::east_opt(sign * seconds)
}

fn parse_us(caps: &Captures<'_>, _year: i32) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&caps[1], "%m/%d/%Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_syslog(caps: &Captures<'_>, year: i32) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&format!("{year} {}", &caps[1]), "%Y %b %d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_dmy(caps: &Captures<'_>, _year: i32) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&caps[1], "%d-%b-%Y %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decodes a raw buffer as UTF-8 text.
///
/// # Errors
///
/// Returns [`FaultlineError::InvalidEncoding`] with the offset of the first
/// invalid byte.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| FaultlineError::InvalidEncoding {
        offset: e.valid_up_to(),
    })
}

/// Extracts the first parseable timestamp from a line.
///
/// `current_year` fills in syslog timestamps, which carry no year.
#[must_use]
pub fn extract_timestamp(line: &str, current_year: i32) -> Option<DateTime<Utc>> {
    TIMESTAMP_FAMILIES.iter().find_map(|family| {
        family
            .regex
            .captures(line)
            .and_then(|caps| (family.parse)(&caps, current_year))
    })
}

/// Extracts the level tag of a line, falling back to keyword inference.
///
/// Tags are matched case-insensitively as `[LEVEL]`, `LEVEL:` or ` LEVEL `
/// with a single space on both sides, probing levels in severity-descending
/// order so the most severe tag present wins. A bare tag at the start or end
/// of the line is not a tag.
#[must_use]
pub fn extract_level(line: &str) -> LogLevel {
    let upper = line.to_uppercase();

    for level in LogLevel::ALL {
        let tag = level.as_str();
        if upper.contains(&format!("[{tag}]"))
            || upper.contains(&format!("{tag}:"))
            || upper.contains(&format!(" {tag} "))
        {
            return level;
        }
    }

    let lower = line.to_lowercase();
    if contains_any(&lower, ERROR_LEVEL_HINTS) {
        LogLevel::Error
    } else if contains_any(&lower, WARNING_LEVEL_HINTS) {
        LogLevel::Warning
    } else {
        LogLevel::Info
    }
}

/// Parses a text buffer into scored entries, one per non-blank line.
///
/// Line numbers are 1-based positions in `text`; blank lines are skipped
/// without renumbering. Entries with no extractable timestamp receive
/// `fallback_time`.
#[must_use]
pub fn parse_entries(text: &str, fallback_time: DateTime<Utc>) -> Vec<LogEntry> {
    let current_year = fallback_time.year();

    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }

            let (timestamp, timestamp_source) = extract_timestamp(line, current_year).map_or(
                (fallback_time, TimestampSource::Defaulted),
                |ts| (ts, TimestampSource::Extracted),
            );
            let level = extract_level(line);

            Some(LogEntry {
                line_number: idx + 1,
                timestamp,
                timestamp_source,
                level,
                message: line.to_string(),
                severity: score(level, line),
            })
        })
        .collect()
}
