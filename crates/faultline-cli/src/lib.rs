//! # faultline-cli
//!
//! Command-line front end for the Faultline triage engine.
//!
//! Provides commands for:
//! - Analyzing a log file into a ranked root-cause report
//! - Detecting the kind of a log file
//!
//! # Architecture
//!
//! The CLI owns all I/O: it reads the file, hands the raw bytes to
//! [`faultline_core::Analyzer`] on a blocking worker, and renders the
//! returned report as text or JSON.
//!
//! ```text
//! ┌──────────────┐   bytes + RunConfig   ┌────────────────┐
//! │ faultline-cli│──────────────────────►│ faultline-core │
//! │              │◄──────────────────────│                │
//! └──────────────┘    AnalysisReport     └────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod report;

pub use cli::{AnalyzeArgs, Cli, Commands, Format, Mode};
pub use error::{CliError, Result};
pub use output::OutputFormat;
