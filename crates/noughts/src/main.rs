//! Noughts - tic-tac-toe against a minimax opponent
//!
//! Two front-ends over the same engine: a terminal UI and a line-oriented
//! REPL for scripted play.

#![warn(missing_docs)]

mod cli;
mod config;
mod controller;
mod repl;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use controller::Controller;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            game,
            ai_delay_ms,
            log_file,
        } => {
            let config = GameConfig::from_args(&game)?;
            run_play(config, ai_delay_ms, log_file).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Repl { game } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(io::stderr)
                .init();

            let config = GameConfig::from_args(&game)?;
            run_repl(config)
        }
    }
}

/// Run the terminal UI
async fn run_play(
    config: GameConfig,
    ai_delay_ms: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = config;
    if let Some(ms) = ai_delay_ms {
        config = config.with_ai_delay_ms(ms);
    }
    if let Some(path) = log_file {
        config = config.with_log_file(path);
    }
    tui::run_tui(config).await
}

/// Run the stdin command loop
#[instrument(skip(config))]
fn run_repl(config: GameConfig) -> Result<ExitCode> {
    info!("Starting noughts REPL");

    let mut controller = Controller::new(&config);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let report = repl::run_repl(&mut controller, stdin, &mut stdout, &mut stderr)
        .context("REPL I/O failed")?;
    Ok(report.exit_code())
}
