//! npm-sec-analyzer - withdrawn npm version detection CLI tool
//!
//! Analyzes the published version history of npm packages and reports
//! patch-level gaps that suggest a version was withdrawn.

use anyhow::Context;
use clap::Parser;
use npm_sec_analyzer::cli::CliArgs;
use npm_sec_analyzer::error::{AppError, OutputError};
use npm_sec_analyzer::orchestrator::{ExitStatus, Orchestrator};
use npm_sec_analyzer::output::{create_formatter, OutputConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let status = match e.downcast_ref::<AppError>() {
                Some(AppError::Config(_)) => ExitStatus::Usage,
                _ => ExitStatus::Error,
            };
            ExitCode::from(status.code())
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitStatus> {
    if args.verbose {
        eprintln!("npm-sec-analyzer v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Packages: {}", args.packages.join(", "));
        if args.no_advisories {
            eprintln!("Advisories: disabled");
        }
    }

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(args.clone())?;
    let result = orchestrator.run().await;

    // Create output formatter based on CLI options
    let output_config =
        OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.output.is_some());
    let formatter = create_formatter(output_config);

    // Output results
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::from(OutputError::write_error(path, e)))?;
            let mut writer = BufWriter::new(file);
            formatter
                .format(&result, &mut writer)
                .and_then(|_| writer.flush())
                .map_err(|e| AppError::from(OutputError::write_error(path, e)))?;
            if !args.quiet {
                eprintln!("Report written to {}", path.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            formatter
                .format(&result, &mut stdout)
                .context("failed to write report to stdout")?;
            stdout.flush()?;
        }
    }

    for error in &result.errors {
        eprintln!("Error: {}", error);
    }

    Ok(result.exit_status())
}
