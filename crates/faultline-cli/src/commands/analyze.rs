//! Analyze command implementation.
//!
//! Reads a log file, runs the analyzer on a blocking worker and renders the
//! report. An interrupt while the worker runs discards the run.

use std::io::Write;
use std::path::Path;

use faultline_core::{AnalysisReport, Analyzer, AnalyzerConfig, FileInfo, RunConfig, RunContext};
use tracing::{debug, info, warn};

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

/// Handler for the analyze command.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeCommand;

impl AnalyzeCommand {
    /// Creates a new analyze command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the analyze command.
    ///
    /// # Errors
    ///
    /// Returns error if the file or configuration cannot be read, the input
    /// is not UTF-8, or the run is interrupted.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &AnalyzeArgs,
    ) -> Result<()> {
        let config = match &args.config {
            Some(path) => load_config(path).await?,
            None => AnalyzerConfig::default(),
        };
        let analyzer = Analyzer::with_config(config)?;

        let bytes = tokio::fs::read(&args.file).await?;
        let file = FileInfo::from_bytes(display_name(&args.file), &bytes);
        debug!(file = %file.name, size = file.size, "read input");

        let run = RunConfig::default()
            .with_mode(args.mode.into())
            .with_model_label(args.model.clone());

        let report = run_analysis(analyzer, bytes, file, run).await?;

        match &args.output {
            Some(path) => {
                let rendered = format.to_string(&report)?;
                tokio::fs::write(path, rendered).await?;
                info!(path = %path.display(), "report written");
                if !format.is_json() {
                    writeln!(out, "Report written to {}", path.display())?;
                }
            }
            None => format.write(out, &report)?,
        }

        Ok(())
    }
}

/// Loads analyzer thresholds from a JSON file.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the file is missing, malformed or out of range.
pub async fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    AnalyzerConfig::from_json(&json).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Runs the analyzer on a blocking worker, racing it against Ctrl-C.
async fn run_analysis(
    analyzer: Analyzer,
    bytes: Vec<u8>,
    file: FileInfo,
    run: RunConfig,
) -> Result<AnalysisReport> {
    let ctx = RunContext::new();
    let worker =
        tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&bytes, file, &run, &ctx));

    tokio::select! {
        joined = worker => match joined {
            Ok(report) => Ok(report?),
            Err(e) if e.is_cancelled() => Err(CliError::Cancelled),
            Err(e) => Err(CliError::Io(std::io::Error::other(e))),
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupted, discarding partial analysis");
            Err(CliError::Cancelled)
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
