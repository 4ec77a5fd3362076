//! Session state shared by every round played in one sitting.

use crate::types::{Cell, Player};
use derive_getters::Getters;
use serde::Serialize;

/// Everything the engine remembers between calls.
///
/// `moves` is the only record of the live round; the board is always
/// rebuilt from it. `winners` grows by one entry per won round and is
/// never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct GameSession {
    /// Player who makes the first move of every round.
    starting_player: Player,
    /// Moves of the live round, in play order.
    moves: Vec<Cell>,
    /// One entry per won round, in the order the rounds ended.
    winners: Vec<Player>,
    /// Whether the front-end should let the solver play.
    ai_enabled: bool,
}

impl GameSession {
    /// Creates a session with crosses to start, AI enabled, and no history.
    pub fn new() -> Self {
        Self {
            starting_player: Player::Cross,
            moves: Vec::new(),
            winners: Vec::new(),
            ai_enabled: true,
        }
    }

    pub(crate) fn moves_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.moves
    }

    pub(crate) fn winners_mut(&mut self) -> &mut Vec<Player> {
        &mut self.winners
    }

    pub(crate) fn set_starting_player(&mut self, player: Player) {
        self.starting_player = player;
    }

    pub(crate) fn set_ai_enabled(&mut self, enabled: bool) {
        self.ai_enabled = enabled;
    }

    /// Player who made the move at `index` in the live round.
    pub fn mover_at(&self, index: usize) -> Player {
        if index % 2 == 0 {
            self.starting_player
        } else {
            self.starting_player.opponent()
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
