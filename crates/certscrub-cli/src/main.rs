// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Certscrub — certificate photo and name replacement
//
// Entry point. Initialises logging, parses arguments, and runs the selected
// command, reporting failures in plain English.

mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use certscrub_core::ErrorOrigin;
use certscrub_core::human_errors::humanize_error;

use args::{Cli, Command};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Redact(args) => commands::redact(&args),
        Command::Sample(args) => commands::sample(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            tracing::error!(%err, origin = ?human.origin, "certscrub failed");
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::from(exit_code(human.origin))
        }
    }
}

/// Distinct exit codes so scripts can tell which input to fix.
fn exit_code(origin: ErrorOrigin) -> u8 {
    match origin {
        ErrorOrigin::Internal => 1,
        ErrorOrigin::Caller => 2,
        ErrorOrigin::InputDocument => 3,
        ErrorOrigin::ReplacementAsset => 4,
    }
}
