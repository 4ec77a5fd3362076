//! Alternating marks invariant: the rebuilt board matches the move list.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Board;

/// Invariant: the board holds one mark per move, alternating from the starting player.
///
/// The starting player owns `ceil(n / 2)` marks and the other player
/// `floor(n / 2)` after `n` moves.
pub struct AlternatingMarksInvariant;

impl Invariant<GameSession> for AlternatingMarksInvariant {
    fn holds(session: &GameSession) -> bool {
        let starting = *session.starting_player();
        let moves = session.moves();
        let board = Board::from_moves(starting, moves);

        let first = board.count(starting);
        let second = board.count(starting.opponent());

        first + second == moves.len() && first == moves.len().div_ceil(2)
    }

    fn description() -> &'static str {
        "Board marks alternate from the starting player, one per move"
    }
}
