//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use faultline_core::{AnalysisMode, RULE_BASED_MODEL};

/// Faultline - log triage and root-cause ranking.
#[derive(Parser, Debug, Clone)]
#[command(name = "faultline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "FAULTLINE_FORMAT",
        default_value_t = Format::Text
    )]
    pub format: Format,

    /// Emit debug logs on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze a log file and rank probable root causes.
    Analyze(AnalyzeArgs),

    /// Print the detected log kind of a file.
    Detect {
        /// Log file to inspect.
        file: PathBuf,
    },
}

/// Arguments for `analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Log file to analyze.
    pub file: PathBuf,

    /// Analysis mode, echoed in the report.
    #[arg(short, long, value_enum, default_value_t = Mode::Standard)]
    pub mode: Mode,

    /// Model label, echoed in the report.
    #[arg(long, env = "FAULTLINE_MODEL", default_value = RULE_BASED_MODEL)]
    pub model: String,

    /// JSON file with analyzer thresholds.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the report to this path instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Analysis mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Mode {
    /// Fast pass.
    Quick,
    /// Default pass.
    #[default]
    Standard,
    /// Thorough pass.
    Deep,
}

impl From<Mode> for AnalysisMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Quick => Self::Quick,
            Mode::Standard => Self::Standard,
            Mode::Deep => Self::Deep,
        }
    }
}
