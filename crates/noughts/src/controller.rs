//! Presentation-side game flow shared by the REPL and the terminal UI.
//!
//! The controller owns the engine, decides when the computer plays,
//! and closes finished rounds so the next one starts on an empty board.

use crate::config::GameConfig;
use derive_getters::Getters;
use noughts_core::{
    AiSolver, Board, Cell, GameEngine, MoveOutcome, Player, RoundStatus, UndoOutcome, WinLine,
};
use tracing::{debug, info, instrument};

/// Final position of the last completed round, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RoundSummary {
    /// Board as it stood on the final move.
    board: Board,
    /// Winner and completed line, or `None` for a draw.
    winner: Option<(Player, WinLine)>,
}

/// Drives one session: human moves, AI replies, round turnover.
#[derive(Debug, Clone)]
pub struct Controller {
    engine: GameEngine,
    solver: AiSolver,
    last_round: Option<RoundSummary>,
}

impl Controller {
    /// Creates a controller with the configured starting player and AI flag.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        let mut engine = GameEngine::new();
        engine.set_starting_player(*config.starting_player());
        engine.set_ai_enabled(*config.ai_enabled());
        info!(
            starting_player = %engine.starting_player(),
            ai_enabled = engine.ai_enabled(),
            "Session started"
        );
        Self {
            engine,
            solver: AiSolver::new(),
            last_round: None,
        }
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The solver used for computer moves.
    pub fn solver(&self) -> AiSolver {
        self.solver
    }

    /// Summary of the most recently finished round, until the next move.
    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// The side the computer plays: whoever does not open the round.
    pub fn ai_player(&self) -> Player {
        self.engine.starting_player().opponent()
    }

    /// True when the computer should move next.
    pub fn ai_to_move(&self) -> bool {
        self.engine.ai_enabled()
            && self.engine.round_status() == RoundStatus::InProgress
            && self.engine.current_player() == self.ai_player()
    }

    /// Places the current player's mark at `cell`.
    ///
    /// A finished round is summarized and cleared before returning.
    #[instrument(skip(self, cell), fields(cell = %cell))]
    pub fn play(&mut self, cell: Cell) -> MoveOutcome {
        if self.engine.is_valid_move(cell) {
            self.last_round = None;
        }

        let player = self.engine.current_player();
        let outcome = self.engine.apply_move(cell);

        match outcome {
            MoveOutcome::Win { player, line } => self.finish_round(Some((player, line))),
            MoveOutcome::Draw => self.finish_round(None),
            MoveOutcome::Continue => debug!(player = %player, "Move accepted"),
            MoveOutcome::Rejected(reason) => debug!(reason = %reason, "Move ignored"),
        }
        outcome
    }

    /// Lets the solver pick and play a move for the computer.
    ///
    /// Returns `None` when it is not the computer's turn.
    #[instrument(skip(self))]
    pub fn play_ai(&mut self) -> Option<(Cell, MoveOutcome)> {
        if !self.ai_to_move() {
            return None;
        }
        let player = self.engine.current_player();
        let cell = self.solver.best_move(player, &self.engine.board())?;
        info!(player = %player, cell = %cell, "AI move");
        Some((cell, self.play(cell)))
    }

    /// Takes back moves until it is a human's turn again.
    ///
    /// With the AI on, that means undoing the AI's reply and the human
    /// move before it.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Vec<UndoOutcome> {
        let mut undone = Vec::new();
        loop {
            let outcome = self.engine.undo();
            if outcome == UndoOutcome::NothingToUndo {
                if undone.is_empty() {
                    undone.push(outcome);
                }
                break;
            }
            undone.push(outcome);
            if !self.ai_to_move() {
                break;
            }
        }
        debug!(count = undone.len(), "Undo finished");
        undone
    }

    /// Abandons the live round and starts an empty one.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) {
        self.engine.reset_round();
        self.last_round = None;
    }

    /// Flips the AI flag and returns the new value.
    #[instrument(skip(self))]
    pub fn toggle_ai(&mut self) -> bool {
        self.engine.toggle_ai()
    }

    fn finish_round(&mut self, winner: Option<(Player, WinLine)>) {
        info!(
            winner = ?winner.map(|(p, _)| p),
            crosses = self.engine.score(Player::Cross),
            circles = self.engine.score(Player::Circle),
            "Round finished"
        );
        self.last_round = Some(RoundSummary {
            board: self.engine.board(),
            winner,
        });
        self.engine.reset_round();
    }
}
