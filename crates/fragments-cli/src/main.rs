// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// page-fragments - Launches the test runner for page-fragments suites
//
// Usage: page-fragments [CONFIG] [-v]
//
// Resolves the runner config (JSON file or defaults, plus environment
// overrides), runs the configured test command with the config exported to
// its environment, and exits with the runner's status. The runner's stdout
// and stderr are inherited unchanged.

mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use page_fragments::RunnerConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run page-fragments test suites
#[derive(Parser)]
#[command(name = "page-fragments")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON runner config (defaults and environment are used when omitted)
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => RunnerConfig::load(path)
            .await
            .with_context(|| format!("Failed to load runner config from {}", path.display()))?,
        None => RunnerConfig::from_env().context("Failed to build runner config")?,
    };

    let status = runner::run(&config).await?;
    Ok(runner::exit_code(status))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
