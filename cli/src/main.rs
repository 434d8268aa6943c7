//! Agentspace registrar - agent gallery, Agent Engine and authorization CLI

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use agentspace_registrar::cli::Cli;
use agentspace_registrar::domain::ErrorKind;
use agentspace_registrar::output::json::format_error;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log filter override, e.g. `AGENTSPACE_LOG=agentspace_registrar=trace`.
const LOG_ENV: &str = "AGENTSPACE_LOG";

fn main() -> ExitCode {
    // A missing .env is the normal case.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);
    let json = cli.json;

    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            let kind = ErrorKind::classify(&e);
            tracing::debug!(error = ?e, kind = kind.code(), "command failed");
            let message = format!("{e:#}");
            if json {
                match format_error(&message, kind.code()) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("Error: {message}"),
                }
            } else {
                eprintln!("Error: {message}");
            }
            ExitCode::from(kind.exit_code())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| match cli.verbose {
        0 if cli.quiet => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cli.verbose >= 2),
        )
        .init();
}
