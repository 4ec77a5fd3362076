//! Error types for the engine.

use derive_more::{Display, Error};

/// Raw coordinates that do not name a cell on the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CellError {
    /// A coordinate is outside `0..=2`.
    #[display("Cell ({}, {}) is outside the 3x3 grid", x, y)]
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
    },
}
