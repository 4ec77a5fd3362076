//! Keyboard mapping for the board cursor.

use crossterm::event::KeyCode;
use noughts_core::Cell;

/// Moves the cursor one step with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Cell, key: KeyCode) -> Cell {
    let (x, y) = (cursor.x(), cursor.y());
    let (x, y) = match key {
        KeyCode::Left => (x.saturating_sub(1), y),
        KeyCode::Right => ((x + 1).min(2), y),
        KeyCode::Up => (x, y.saturating_sub(1)),
        KeyCode::Down => (x, (y + 1).min(2)),
        _ => return cursor,
    };
    Cell::new(x, y).unwrap_or(cursor)
}

/// Maps digits 1-9 to cells in reading order, like a phone keypad.
pub fn digit_cell(c: char) -> Option<Cell> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Cell::from_index)
}
