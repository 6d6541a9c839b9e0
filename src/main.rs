// src/main.rs

//! pa
//!
//! Entry point for the pa CLI, a client for the Pixela habit-graph API.
//!
//! Responsibilities of this file:
//! - Load `.env`, initialise logging and parse CLI arguments
//! - Resolve settings (flags > environment > `.pa.yaml` > defaults)
//! - Hand off to the command handlers and map the outcome to an exit code
//!
//! There is intentionally *no business logic* here.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod pixela;
mod render;
mod util;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter variable; logs go to stderr so stdout stays one JSON line.
const LOG_ENV: &str = "PA_LOG";

/// Program entry point.
///
/// A single request per invocation, so a current-thread runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = cli::Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // The failed answer is already on stdout.
        Err(err) if error::is_reported(&err) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: cli::Cli) -> Result<()> {
    let file = config::FileConfig::discover(cli.globals.config.as_deref())?;
    let settings = config::Settings::resolve(&cli.globals, file);
    tracing::debug!(
        username = %settings.username,
        retry = settings.retry,
        base_url = %settings.base_url,
        "settings resolved"
    );

    let factory = api::ClientFactory::new(settings);
    let mut out = io::stdout();

    commands::run(cli.command, &factory, &mut out).await?;
    out.flush()?;
    Ok(())
}
