//! # faultline-core
//!
//! Log triage engine. Turns a free-form log buffer into scored entries,
//! classified errors, causal chains and a ranked list of probable root causes.
//!
//! ## Pipeline
//!
//! - **Parser**: timestamp and level extraction per non-blank line
//! - **Scorer**: 0-10 severity with success-phrase suppression
//! - **Classifier**: one category per error, with per-category counts
//! - **Chains**: time-windowed cascade detection (power, thermal, memory)
//! - **Ranker**: tiered root-cause candidates sorted by confidence
//! - **Metrics**: severity histogram, error density, throughput
//!
//! ## Quick Start
//!
//! ```rust
//! use faultline_core::{Analyzer, FileInfo, RunConfig, RunContext};
//!
//! let text = "2024-01-01 10:00:00 ERROR VRM voltage out of range\n\
//!             2024-01-01 10:01:00 CRITICAL thermal shutdown triggered\n";
//!
//! let report = Analyzer::new().analyze_text(
//!     text,
//!     FileInfo::from_text("bmc.log", text),
//!     &RunConfig::default(),
//!     &RunContext::new(),
//! );
//!
//! assert_eq!(report.errors.len(), 2);
//! assert_eq!(report.chains.len(), 1);
//! assert_eq!(report.root_causes[0].title, "Hardware System Issue");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod chains;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod error;
pub mod keywords;
pub mod metrics;
pub mod parser;
pub mod ranker;
pub mod scorer;
pub mod types;

pub use analyzer::{AnalysisReport, Analyzer};
pub use chains::{build_causal_chains, build_causal_chains_with, chain_confidence};
pub use classifier::{classify, classify_entries, Classification};
pub use config::{
    AnalysisMode, AnalyzerConfig, ChainConfig, RankerConfig, RunConfig, RunContext,
    MAX_WINDOW_MINUTES, RULE_BASED_MODEL,
};
pub use detector::LogKind;
pub use error::{FaultlineError, Result};
pub use keywords::{CascadePattern, CASCADE_PATTERNS};
pub use metrics::summarize_metrics;
pub use parser::{decode_utf8, extract_level, extract_timestamp, parse_entries};
pub use ranker::{pattern_confidence, rank_root_causes, sort_root_causes};
pub use scorer::{is_success, score, MAX_SEVERITY};
pub use types::{
    AnalysisMetrics, CausalChain, ClassifiedError, ErrorCategory, FileInfo, Impact, LogEntry,
    LogLevel, PatternCounts, RootCause, RootCauseOrigin, SeverityDistribution, TimestampSource,
};
