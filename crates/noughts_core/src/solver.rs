//! Exhaustive minimax search for the computer player.
//!
//! Crosses maximize and circles minimize. The tree is small enough on a
//! 3x3 board that every line of play is searched to the end: no pruning,
//! no transposition table.

use crate::rules::is_player_winning;
use crate::types::{Board, Cell, Player};
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Value of a position under perfect play.
///
/// Ordered so that `CircleWins < Draw < CrossWins`; the two win variants
/// play the role of the infinite sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Score {
    /// Circles force a win (negative infinity).
    CircleWins,
    /// Neither side can force a win.
    Draw,
    /// Crosses force a win (positive infinity).
    CrossWins,
}

impl Score {
    /// Numeric value: `-inf`, `0` or `+inf`.
    pub fn value(self) -> f64 {
        match self {
            Score::CircleWins => f64::NEG_INFINITY,
            Score::Draw => 0.0,
            Score::CrossWins => f64::INFINITY,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Minimax move picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiSolver;

impl AiSolver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }

    /// Best cell for `player`, breaking ties with the thread-local RNG.
    ///
    /// Returns `None` only when the board is full.
    pub fn best_move(&self, player: Player, board: &Board) -> Option<Cell> {
        self.best_move_with(player, board, &mut rand::thread_rng())
    }

    /// Best cell for `player`, breaking ties with `rng`.
    ///
    /// Candidates are scored in row-major order and folded pairwise; on
    /// equal scores the incumbent and the challenger each win with
    /// probability one half.
    #[instrument(skip(self, board, rng), fields(player = %player))]
    pub fn best_move_with<R: Rng + ?Sized>(
        &self,
        player: Player,
        board: &Board,
        rng: &mut R,
    ) -> Option<Cell> {
        let best = self
            .evaluate(player, board)
            .into_iter()
            .reduce(|a, b| prefer(player, a, b, &mut *rng));

        if let Some((cell, score)) = best {
            debug!(cell = %cell, score = %score, "Solver picked move");
        } else {
            debug!("No empty cell to play");
        }
        best.map(|(cell, _)| cell)
    }

    /// Scores every empty cell for `player`, in row-major order.
    pub fn evaluate(&self, player: Player, board: &Board) -> Vec<(Cell, Score)> {
        let empty = board.empty_cells();
        (0..empty.len())
            .map(|i| {
                let cell = empty[i];
                let (rest, len) = without(&empty, i);
                let child = board.placed(cell, player);
                let score = minimax_score(player.opponent(), &child, &rest[..len]);
                (cell, score)
            })
            .collect()
    }
}

/// Value of `board` with `player` to move and `empty_cells` left to fill.
///
/// A board is terminal once either side has a line or no cell is left.
/// Otherwise every empty cell is tried and the best child for `player`
/// is returned. Ties are irrelevant here since only the score escapes.
///
/// `empty_cells` must be distinct cells of the 3x3 grid, so at most nine.
pub fn minimax_score(player: Player, board: &Board, empty_cells: &[Cell]) -> Score {
    debug_assert!(
        empty_cells.len() <= 9,
        "minimax_score takes at most nine empty cells, got {}",
        empty_cells.len()
    );
    if is_player_winning(Player::Cross, board).is_some() {
        return Score::CrossWins;
    }
    if is_player_winning(Player::Circle, board).is_some() {
        return Score::CircleWins;
    }
    if empty_cells.is_empty() {
        return Score::Draw;
    }

    let children = (0..empty_cells.len()).map(|i| {
        let (rest, len) = without(empty_cells, i);
        let child = board.placed(empty_cells[i], player);
        minimax_score(player.opponent(), &child, &rest[..len])
    });

    let best = match player {
        Player::Cross => children.max(),
        Player::Circle => children.min(),
    };
    // At least one empty cell means at least one child.
    best.unwrap_or(Score::Draw)
}

/// `cells` with the entry at `skip` removed, in a fixed-size buffer.
fn without(cells: &[Cell], skip: usize) -> ([Cell; 9], usize) {
    let mut rest = [Cell::ALL[0]; 9];
    let mut len = 0;
    for (i, &cell) in cells.iter().enumerate() {
        if i != skip {
            rest[len] = cell;
            len += 1;
        }
    }
    (rest, len)
}

/// Keeps whichever of `a` and `b` is better for `player`, flipping a coin on ties.
fn prefer<T, R: Rng + ?Sized>(player: Player, a: (T, Score), b: (T, Score), rng: &mut R) -> (T, Score) {
    match (a.1.cmp(&b.1), player) {
        (Ordering::Equal, _) => {
            if rng.gen_bool(0.5) {
                a
            } else {
                b
            }
        }
        (Ordering::Greater, Player::Cross) | (Ordering::Less, Player::Circle) => a,
        _ => b,
    }
}
