//! Faultline CLI binary entrypoint.
//!
//! This is the main entry point for the `faultline` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use faultline_cli::cli::{Cli, Commands};
use faultline_cli::commands::{AnalyzeCommand, DetectCommand};
use faultline_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(cli));
    // An interrupted analysis may still hold a blocking worker; don't wait for it.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), faultline_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Analyze(args) => {
            let cmd = AnalyzeCommand::new();
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::Detect { file } => {
            let cmd = DetectCommand::new();
            cmd.execute(&mut stdout, &format, &file).await?;
        }
    }

    Ok(())
}
