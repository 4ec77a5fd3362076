//! Invariants over the live round's move list.

use super::Invariant;
use crate::rules::is_player_winning;
use crate::session::GameSession;
use crate::types::Board;
use std::collections::HashSet;

/// Invariant: no cell is played twice in a round.
pub struct UniqueMovesInvariant;

impl Invariant<GameSession> for UniqueMovesInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut seen = HashSet::new();
        session.moves().iter().all(|cell| seen.insert(*cell))
    }

    fn description() -> &'static str {
        "Each cell appears at most once in the move list"
    }
}

/// Invariant: a round never holds more than nine moves.
pub struct BoundedHistoryInvariant;

impl Invariant<GameSession> for BoundedHistoryInvariant {
    fn holds(session: &GameSession) -> bool {
        session.moves().len() <= 9
    }

    fn description() -> &'static str {
        "A round holds at most nine moves"
    }
}

/// Invariant: only the final move of a round may complete a line.
///
/// Once a line is complete the round is over, so no earlier prefix of
/// the move list may already contain a winner.
pub struct SingleWinInvariant;

impl Invariant<GameSession> for SingleWinInvariant {
    fn holds(session: &GameSession) -> bool {
        let moves = session.moves();
        (1..moves.len()).all(|len| {
            let board = Board::from_moves(*session.starting_player(), &moves[..len]);
            is_player_winning(session.mover_at(len - 1), &board).is_none()
        })
    }

    fn description() -> &'static str {
        "No move is played after a line is complete"
    }
}
