//! Application state and key handling.

use super::input::{digit_cell, move_cursor};
use crate::config::GameConfig;
use crate::controller::Controller;
use crossterm::event::KeyCode;
use noughts_core::{Cell, MoveOutcome, Player, UndoOutcome};
use tracing::debug;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the UI.
    Quit,
}

/// Main application state.
pub struct App {
    controller: Controller,
    cursor: Cell,
    status_message: String,
    thinking: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(config: &GameConfig) -> Self {
        let controller = Controller::new(config);
        let status_message = format!("{} to move", controller.engine().current_player());
        Self {
            controller,
            cursor: Cell::ALL[4],
            status_message,
            thinking: false,
        }
    }

    /// Gets the game controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Gets the board cursor.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while the AI search is running.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Marks the start of an AI turn.
    pub fn start_thinking(&mut self) {
        self.thinking = true;
        self.status_message = format!("{} is thinking...", self.controller.ai_player());
    }

    /// Plays the move the solver picked.
    pub fn finish_thinking(&mut self, pick: Option<Cell>) {
        self.thinking = false;
        match pick {
            Some(cell) => self.place(cell),
            None => {
                self.status_message =
                    format!("{} to move", self.controller.engine().current_player());
            }
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        debug!(?key, "Handling key");
        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.cursor = move_cursor(self.cursor, key);
            }
            _ if self.thinking => {}
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(cell) = digit_cell(c) {
                    self.cursor = cell;
                    self.place(cell);
                }
            }
            KeyCode::Esc | KeyCode::Char('u') => self.undo(),
            KeyCode::Char('n') => {
                self.controller.new_round();
                self.status_message = "New round".to_string();
            }
            KeyCode::Char('a') => {
                let enabled = self.controller.toggle_ai();
                self.status_message = format!("AI {}", if enabled { "on" } else { "off" });
            }
            _ => {}
        }
        Action::Continue
    }

    fn place(&mut self, cell: Cell) {
        let player = self.controller.engine().current_player();
        let outcome = self.controller.play(cell);
        self.report(player, cell, outcome);
    }

    fn undo(&mut self) {
        let undone = self.controller.undo();
        self.status_message = match undone.last() {
            Some(UndoOutcome::Undone { .. }) => {
                format!("Undone, {} to move", self.controller.engine().current_player())
            }
            _ => "Nothing to undo".to_string(),
        };
    }

    fn report(&mut self, player: Player, cell: Cell, outcome: MoveOutcome) {
        self.status_message = match outcome {
            MoveOutcome::Continue => format!(
                "{} played {}. {} to move",
                player,
                cell,
                self.controller.engine().current_player()
            ),
            MoveOutcome::Win { player, line } => format!("{} wins on {}!", player, line),
            MoveOutcome::Draw => "Draw!".to_string(),
            MoveOutcome::Rejected(reason) => reason.to_string(),
        };
    }
}
