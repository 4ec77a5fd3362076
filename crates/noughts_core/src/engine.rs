//! The rules engine: applies moves to a session and reports round outcomes.

use crate::error::CellError;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::rules::{self, WinLine};
use crate::session::GameSession;
use crate::types::{Board, Cell, Player};
use derive_more::Display;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Rejection {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Cell),
    /// The live round is won or drawn and has not been reset.
    #[display("The round is over")]
    RoundOver,
}

/// Result of [`GameEngine::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The move was placed and the round goes on.
    Continue,
    /// The move completed a line; the winner has been added to the tally.
    Win {
        /// Player who completed the line.
        player: Player,
        /// The completed line.
        line: WinLine,
    },
    /// The ninth move was placed without completing a line.
    Draw,
    /// Nothing changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// True for `Win` and `Draw`.
    pub fn ends_round(&self) -> bool {
        matches!(self, MoveOutcome::Win { .. } | MoveOutcome::Draw)
    }
}

/// Result of [`GameEngine::undo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndoOutcome {
    /// The live round had no moves.
    NothingToUndo,
    /// The last move was taken back.
    Undone {
        /// Cell that was cleared.
        cell: Cell,
        /// Player who had made the move.
        player: Player,
        /// Line the move had completed, whose tally entry was removed.
        revoked_win: Option<WinLine>,
    },
}

/// Where the live round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundStatus {
    /// Fewer than nine moves and no completed line.
    InProgress,
    /// The last move completed a line.
    Won(Player, WinLine),
    /// Nine moves and no completed line.
    Drawn,
}

/// Tic-tac-toe rules engine.
///
/// Owns one [`GameSession`]. All mutation goes through the methods here;
/// the current player and the board are derived from the move list on
/// every call rather than stored.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    session: GameSession,
}

impl GameEngine {
    /// Creates an engine with a fresh session.
    #[instrument]
    pub fn new() -> Self {
        Self {
            session: GameSession::new(),
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Moves of the live round, in play order.
    pub fn moves(&self) -> &[Cell] {
        self.session.moves()
    }

    /// One entry per won round.
    pub fn winners(&self) -> &[Player] {
        self.session.winners()
    }

    /// Player who opens every round.
    pub fn starting_player(&self) -> Player {
        *self.session.starting_player()
    }

    /// Whether the front-end should let the solver play.
    pub fn ai_enabled(&self) -> bool {
        *self.session.ai_enabled()
    }

    /// Number of rounds `player` has won this session.
    pub fn score(&self, player: Player) -> usize {
        self.winners().iter().filter(|&&p| p == player).count()
    }

    /// Player to move: the starting player after an even number of moves.
    pub fn current_player(&self) -> Player {
        self.session.mover_at(self.moves().len())
    }

    /// True if no move of the live round occupies `cell`.
    pub fn is_valid_move(&self, cell: Cell) -> bool {
        !self.moves().contains(&cell)
    }

    /// Board rebuilt from the live round's moves.
    pub fn board(&self) -> Board {
        Board::from_moves(self.starting_player(), self.moves())
    }

    /// Checks `player` for three in a row on `board`.
    pub fn is_player_winning(&self, player: Player, board: &Board) -> Option<WinLine> {
        rules::is_player_winning(player, board)
    }

    /// Where the live round stands.
    pub fn round_status(&self) -> RoundStatus {
        let count = self.moves().len();
        if count == 0 {
            return RoundStatus::InProgress;
        }

        let last_mover = self.session.mover_at(count - 1);
        if let Some(line) = rules::is_player_winning(last_mover, &self.board()) {
            RoundStatus::Won(last_mover, line)
        } else if count == 9 {
            RoundStatus::Drawn
        } else {
            RoundStatus::InProgress
        }
    }

    /// Places the current player's mark at `cell`.
    ///
    /// An occupied cell, or a round that is already over, leaves the
    /// session untouched and reports `Rejected`.
    #[instrument(skip(self, cell), fields(cell = %cell))]
    pub fn apply_move(&mut self, cell: Cell) -> MoveOutcome {
        if !self.is_valid_move(cell) {
            debug!("Ignoring move on occupied cell");
            return MoveOutcome::Rejected(Rejection::Occupied(cell));
        }
        if self.round_status() != RoundStatus::InProgress {
            debug!("Ignoring move after the round ended");
            return MoveOutcome::Rejected(Rejection::RoundOver);
        }

        let player = self.current_player();
        self.session.moves_mut().push(cell);
        let board = self.board();

        let outcome = if let Some(line) = rules::is_player_winning(player, &board) {
            self.session.winners_mut().push(player);
            info!(player = %player, line = %line, "Round won");
            MoveOutcome::Win { player, line }
        } else if rules::is_full(&board) {
            info!("Round drawn");
            MoveOutcome::Draw
        } else {
            debug!(player = %player, "Move placed");
            MoveOutcome::Continue
        };

        self.debug_check_invariants();
        outcome
    }

    /// Validates raw coordinates, then applies the move.
    #[instrument(skip(self))]
    pub fn apply_move_at(&mut self, x: usize, y: usize) -> Result<MoveOutcome, CellError> {
        let cell = Cell::new(x, y).inspect_err(|e| warn!(error = %e, "Rejected coordinates"))?;
        Ok(self.apply_move(cell))
    }

    /// Takes back the last move of the live round.
    ///
    /// If that move had completed a line, the matching tally entry is
    /// removed too. Rounds already cleared by [`reset_round`](Self::reset_round)
    /// cannot be undone.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> UndoOutcome {
        let Some(&cell) = self.moves().last() else {
            debug!("Nothing to undo");
            return UndoOutcome::NothingToUndo;
        };

        let player = self.session.mover_at(self.moves().len() - 1);
        let revoked_win = rules::is_player_winning(player, &self.board());
        if revoked_win.is_some() {
            self.session.winners_mut().pop();
        }
        self.session.moves_mut().pop();

        info!(cell = %cell, player = %player, revoked_win = revoked_win.is_some(), "Move undone");
        self.debug_check_invariants();
        UndoOutcome::Undone {
            cell,
            player,
            revoked_win,
        }
    }

    /// Clears the live round. Tally, starting player and AI flag persist.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        self.session.moves_mut().clear();
        info!("Round reset");
    }

    /// Turns the AI opponent on or off.
    #[instrument(skip(self))]
    pub fn set_ai_enabled(&mut self, enabled: bool) {
        self.session.set_ai_enabled(enabled);
    }

    /// Flips the AI flag and returns the new value.
    #[instrument(skip(self))]
    pub fn toggle_ai(&mut self) -> bool {
        let enabled = !self.ai_enabled();
        self.session.set_ai_enabled(enabled);
        info!(enabled, "AI toggled");
        enabled
    }

    /// Changes who opens each round.
    ///
    /// Only allowed between rounds; returns false and changes nothing if
    /// the live round already has moves.
    #[instrument(skip(self))]
    pub fn set_starting_player(&mut self, player: Player) -> bool {
        if !self.moves().is_empty() {
            warn!("Cannot change the starting player mid-round");
            return false;
        }
        self.session.set_starting_player(player);
        true
    }

    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = SessionInvariants::check_all(&self.session)
        {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Session invariant violated: {}", descriptions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(engine: &mut GameEngine, indices: &[usize]) -> Vec<MoveOutcome> {
        indices
            .iter()
            .map(|&i| engine.apply_move(Cell::ALL[i]))
            .collect()
    }

    #[test]
    fn test_current_player_alternates() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.current_player(), Player::Cross);
        play(&mut engine, &[4]);
        assert_eq!(engine.current_player(), Player::Circle);
        play(&mut engine, &[0]);
        assert_eq!(engine.current_player(), Player::Cross);
    }

    #[test]
    fn test_starting_player_controls_turn_order() {
        let mut engine = GameEngine::new();
        assert!(engine.set_starting_player(Player::Circle));
        assert_eq!(engine.current_player(), Player::Circle);

        play(&mut engine, &[4]);
        assert_eq!(engine.board().get(Cell::ALL[4]), crate::Square::Occupied(Player::Circle));
        assert!(!engine.set_starting_player(Player::Cross));
        assert_eq!(engine.starting_player(), Player::Circle);
    }

    #[test]
    fn test_round_status_tracks_win() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4]);
        assert_eq!(engine.round_status(), RoundStatus::InProgress);

        play(&mut engine, &[2]);
        assert_eq!(
            engine.round_status(),
            RoundStatus::Won(Player::Cross, WinLine::Row(0))
        );
    }

    #[test]
    fn test_move_after_win_is_rejected() {
        let mut engine = GameEngine::new();
        play(&mut engine, &[0, 3, 1, 4, 2]);

        let outcome = engine.apply_move(Cell::ALL[8]);
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::RoundOver));
        assert_eq!(engine.moves().len(), 5);
        assert_eq!(engine.winners(), &[Player::Cross]);
    }

    #[test]
    fn test_toggle_ai() {
        let mut engine = GameEngine::new();
        assert!(engine.ai_enabled());
        assert!(!engine.toggle_ai());
        assert!(!engine.ai_enabled());
        engine.set_ai_enabled(true);
        assert!(engine.ai_enabled());
    }

    #[test]
    fn test_apply_move_at_rejects_out_of_range() {
        let mut engine = GameEngine::new();
        let result = engine.apply_move_at(3, 1);
        assert_eq!(result, Err(CellError::OutOfRange { x: 3, y: 1 }));
        assert!(engine.moves().is_empty());

        assert_eq!(engine.apply_move_at(1, 1), Ok(MoveOutcome::Continue));
    }
}
