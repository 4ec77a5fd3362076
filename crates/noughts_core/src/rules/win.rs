//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Player, Square};
use serde::Serialize;

/// Direction of a diagonal, in the original page's screen convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Slope {
    /// The `\` diagonal: (0,0), (1,1), (2,2).
    Negative,
    /// The `/` diagonal: (2,0), (1,1), (0,2).
    Positive,
}

impl Slope {
    /// Signed slope, -1 or +1.
    pub fn value(self) -> i8 {
        match self {
            Slope::Negative => -1,
            Slope::Positive => 1,
        }
    }
}

/// A completed line of three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WinLine {
    /// Row `y`, counted from the top.
    Row(u8),
    /// Column `x`, counted from the left.
    Column(u8),
    /// One of the two diagonals.
    Diagonal(Slope),
}

/// Every line, in scan order: rows top to bottom, columns left to right,
/// then the `\` and `/` diagonals.
const LINES: [WinLine; 8] = [
    WinLine::Row(0),
    WinLine::Row(1),
    WinLine::Row(2),
    WinLine::Column(0),
    WinLine::Column(1),
    WinLine::Column(2),
    WinLine::Diagonal(Slope::Negative),
    WinLine::Diagonal(Slope::Positive),
];

impl WinLine {
    /// The three cells that make up the line.
    pub fn cells(self) -> [Cell; 3] {
        let at = |x: usize, y: usize| Cell::ALL[y * 3 + x];
        match self {
            WinLine::Row(y) => {
                let y = y as usize;
                [at(0, y), at(1, y), at(2, y)]
            }
            WinLine::Column(x) => {
                let x = x as usize;
                [at(x, 0), at(x, 1), at(x, 2)]
            }
            WinLine::Diagonal(Slope::Negative) => [at(0, 0), at(1, 1), at(2, 2)],
            WinLine::Diagonal(Slope::Positive) => [at(2, 0), at(1, 1), at(0, 2)],
        }
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinLine::Row(y) => write!(f, "row {}", y),
            WinLine::Column(x) => write!(f, "column {}", x),
            WinLine::Diagonal(slope) => write!(f, "diagonal (slope {:+})", slope.value()),
        }
    }
}

/// Checks whether `player` has three in a row on `board`.
///
/// Returns the first completed line in scan order, so a board with
/// several lines always reports the same one.
pub fn is_player_winning(player: Player, board: &Board) -> Option<WinLine> {
    let mark = Square::Occupied(player);
    LINES
        .into_iter()
        .find(|line| line.cells().iter().all(|&cell| board.get(cell) == mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(player: Player, indices: &[usize]) -> Board {
        indices
            .iter()
            .fold(Board::new(), |board, &i| board.placed(Cell::ALL[i], player))
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(is_player_winning(Player::Cross, &board), None);
        assert_eq!(is_player_winning(Player::Circle, &board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(Player::Cross, &[0, 1, 2]);
        assert_eq!(is_player_winning(Player::Cross, &board), Some(WinLine::Row(0)));
        assert_eq!(is_player_winning(Player::Circle, &board), None);
    }

    #[test]
    fn test_winner_column() {
        let board = board_with(Player::Circle, &[1, 4, 7]);
        assert_eq!(
            is_player_winning(Player::Circle, &board),
            Some(WinLine::Column(1))
        );
    }

    #[test]
    fn test_winner_diagonals() {
        let falling = board_with(Player::Circle, &[0, 4, 8]);
        assert_eq!(
            is_player_winning(Player::Circle, &falling),
            Some(WinLine::Diagonal(Slope::Negative))
        );

        let rising = board_with(Player::Cross, &[2, 4, 6]);
        assert_eq!(
            is_player_winning(Player::Cross, &rising),
            Some(WinLine::Diagonal(Slope::Positive))
        );
    }

    #[test]
    fn test_scan_order_prefers_rows() {
        // Row 0 and column 0 both complete.
        let board = board_with(Player::Cross, &[0, 1, 2, 3, 6]);
        assert_eq!(is_player_winning(Player::Cross, &board), Some(WinLine::Row(0)));

        // Column 2 and the `\` diagonal both complete.
        let board = board_with(Player::Cross, &[0, 2, 4, 5, 8]);
        assert_eq!(
            is_player_winning(Player::Cross, &board),
            Some(WinLine::Column(2))
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Player::Cross, &[0, 1]);
        assert_eq!(is_player_winning(Player::Cross, &board), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WinLine::Row(2).to_string(), "row 2");
        assert_eq!(
            WinLine::Diagonal(Slope::Negative).to_string(),
            "diagonal (slope -1)"
        );
    }
}
