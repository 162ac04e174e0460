//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`analyze`] - Full triage of a log file
//! - [`detect`] - Log-kind detection only

pub mod analyze;
pub mod detect;

pub use analyze::AnalyzeCommand;
pub use detect::DetectCommand;
