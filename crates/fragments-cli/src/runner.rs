// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Runner process management

use anyhow::{Context, Result};
use page_fragments::RunnerConfig;
use std::process::{ExitCode, ExitStatus};
use tokio::process::Command;

/// Builds the runner command with the config exported to its environment.
pub fn build_command(config: &RunnerConfig) -> Result<Command> {
    let (program, args) = config.command()?;

    let mut command = Command::new(program);
    command.args(args);
    for (name, value) in config.to_env() {
        command.env(name, value);
    }
    Ok(command)
}

/// Runs the configured test command to completion.
///
/// Stdout and stderr are inherited, so the runner's output reaches the
/// terminal unchanged.
pub async fn run(config: &RunnerConfig) -> Result<ExitStatus> {
    let mut command = build_command(config)?;
    tracing::info!(
        "Running {} against {}",
        config.runner.join(" "),
        config.base_url
    );

    let status = command
        .status()
        .await
        .with_context(|| format!("Failed to launch runner '{}'", config.runner[0]))?;

    if status.success() {
        tracing::debug!("Runner finished successfully");
    } else {
        tracing::warn!("Runner exited with {}", status);
    }
    Ok(status)
}

/// Maps the runner's exit status onto this process's exit code.
///
/// Termination by signal (no exit code) maps to 1.
pub fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE),
        None => ExitCode::FAILURE,
    }
}
