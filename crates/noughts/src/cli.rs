//! Command-line interface for noughts.

use clap::{Args, Parser, Subcommand};
use noughts_core::Player;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against an exhaustive minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a minimax computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Shared game options
        #[command(flatten)]
        game: GameArgs,

        /// Milliseconds the AI waits before answering
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// File that receives log output while the UI owns the terminal
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Read commands from stdin (`move X Y`, `undo`, `new-game`, `toggle-ai`, ...)
    Repl {
        /// Shared game options
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Options accepted by every front-end.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Player who opens every round (X or O)
    #[arg(long)]
    pub starting_player: Option<Player>,

    /// Play both sides by hand
    #[arg(long)]
    pub no_ai: bool,
}
