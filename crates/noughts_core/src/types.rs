//! Core domain types for tic-tac-toe.

use crate::error::CellError;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Crosses, the maximizing side of the search.
    #[serde(rename = "X", alias = "x")]
    #[strum(to_string = "X", serialize = "cross")]
    Cross,
    /// Circles, the minimizing side of the search.
    #[serde(rename = "O", alias = "o")]
    #[strum(to_string = "O", serialize = "circle")]
    Circle,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Cross => Player::Circle,
            Player::Circle => Player::Cross,
        }
    }
}

/// A cell on the 3x3 grid, addressed by column `x` and row `y`.
///
/// Coordinates are always in `0..3`; the only way to build a cell from
/// raw numbers is [`Cell::new`], which rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    x: u8,
    y: u8,
}

impl Cell {
    /// All nine cells in row-major order (row 0 left to right, then row 1, then row 2).
    pub const ALL: [Cell; 9] = [
        Cell::at(0, 0),
        Cell::at(1, 0),
        Cell::at(2, 0),
        Cell::at(0, 1),
        Cell::at(1, 1),
        Cell::at(2, 1),
        Cell::at(0, 2),
        Cell::at(1, 2),
        Cell::at(2, 2),
    ];

    /// Creates a cell, rejecting coordinates outside the grid.
    pub fn new(x: usize, y: usize) -> Result<Self, CellError> {
        if x > 2 || y > 2 {
            return Err(CellError::OutOfRange { x, y });
        }
        Ok(Self::at(x as u8, y as u8))
    }

    const fn at(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Creates a cell from its row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column, 0 to 2 from left.
    pub fn x(self) -> usize {
        self.x as usize
    }

    /// Row, 0 to 2 from top.
    pub fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.y() * 3 + self.x()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
///
/// A board is a plain value: copying it is how the search gives every
/// recursive call its own snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Rebuilds a board by replaying `moves`, alternating players from `starting_player`.
    pub fn from_moves(starting_player: Player, moves: &[Cell]) -> Self {
        let mut board = Self::new();
        let mut player = starting_player;
        for &cell in moves {
            board.set(cell, Square::Occupied(player));
            player = player.opponent();
        }
        board
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.squares[cell.index()]
    }

    /// Sets the square at the given cell.
    pub fn set(&mut self, cell: Cell, square: Square) {
        self.squares[cell.index()] = square;
    }

    /// Returns a copy of this board with `player` marked at `cell`.
    pub fn placed(mut self, cell: Cell, player: Player) -> Self {
        self.set(cell, Square::Occupied(player));
        self
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .iter()
            .copied()
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    /// Number of squares marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|&&square| square == Square::Occupied(player))
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.squares[row * 3 + col] {
                    Square::Empty => '.',
                    Square::Occupied(Player::Cross) => 'X',
                    Square::Occupied(Player::Circle) => 'O',
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
