//! Terminal UI for noughts

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::config::GameConfig;
use app::{Action, App};

/// Run the terminal UI until the user quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Log to a file so output does not corrupt the screen
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,noughts=debug,noughts_core=debug")
            }),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_game(&mut terminal, &mut app, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, let the AI move when it is due, otherwise wait for a key.
#[instrument(skip_all, fields(ai_delay_ms = *config.ai_delay_ms()))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &GameConfig,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.controller().ai_to_move() {
            app.start_thinking();
            terminal.draw(|f| ui::draw(f, app))?;

            sleep(config.ai_delay()).await;

            let solver = app.controller().solver();
            let player = app.controller().engine().current_player();
            let board = app.controller().engine().board();
            let pick = tokio::task::spawn_blocking(move || solver.best_move(player, &board))
                .await
                .context("AI search task failed")?;
            debug!(?pick, "AI search finished");
            app.finish_thinking(pick);

            // Keys pressed during the search are not meant for the new position.
            while event::poll(Duration::ZERO)? {
                let _ = event::read()?;
            }
            continue;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code) == Action::Quit
        {
            info!("User quit");
            return Ok(());
        }
    }
}
