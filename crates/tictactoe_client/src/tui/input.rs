//! Keyboard and mouse input mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::board::CellIndex;

use super::ui::BoardLayout;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor with an arrow key.
    MoveCursor(KeyCode),
    /// Activate the cell under the cursor.
    ActivateCursor,
    /// Activate a specific cell (digit keys).
    Activate(CellIndex),
    /// Request a new game.
    NewGame,
    /// Leave the client.
    Quit,
}

/// Maps a key event to a command.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('n') | KeyCode::Char('r') => Some(Command::NewGame),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::ActivateCursor),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| CellIndex::new(d as usize - 1))
            .map(Command::Activate),
        code @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down) => {
            Some(Command::MoveCursor(code))
        }
        _ => None,
    }
}

/// Moves the cursor one cell; stops at the board edge.
pub fn move_cursor(cursor: CellIndex, key: KeyCode) -> CellIndex {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Left => CellIndex::from_row_col(row, col.wrapping_sub(1)),
        KeyCode::Right => CellIndex::from_row_col(row, col + 1),
        KeyCode::Up => CellIndex::from_row_col(row.wrapping_sub(1), col),
        KeyCode::Down => CellIndex::from_row_col(row + 1, col),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Finds the cell drawn at a terminal position.
pub fn hit_test(layout: &BoardLayout, column: u16, row: u16) -> Option<CellIndex> {
    CellIndex::all().find(|index| {
        let rect = layout.cell(*index);
        column >= rect.x
            && column < rect.x.saturating_add(rect.width)
            && row >= rect.y
            && row < rect.y.saturating_add(rect.height)
    })
}
