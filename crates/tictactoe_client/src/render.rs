//! Projection from session state to a board view.
//!
//! The view is rebuilt from scratch on every state change; it carries no
//! state of its own, so equal inputs always give equal views.

use tracing::instrument;

use crate::board::{Board, CELL_COUNT, Cell, CellIndex};
use crate::session::{SessionState, TurnOwner};

/// What activating a cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    /// Submit the human's move on this cell.
    SubmitMove(CellIndex),
}

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    index: CellIndex,
    cell: Cell,
    interactive: bool,
    highlighted: bool,
}

impl CellView {
    /// Board position.
    pub fn index(&self) -> CellIndex {
        self.index
    }

    /// Contents.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Accepts clicks.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Shown as disabled.
    pub fn is_disabled(&self) -> bool {
        !self.interactive
    }

    /// Part of the winning line.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Text shown in the cell; blank when empty.
    pub fn label(&self) -> &'static str {
        self.cell.symbol()
    }

    /// The action a click dispatches, if the cell is interactive.
    pub fn activate(&self) -> Option<CellAction> {
        self.interactive.then_some(CellAction::SubmitMove(self.index))
    }
}

/// A full 3x3 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    cells: [CellView; CELL_COUNT],
}

impl BoardView {
    /// All cells in board order.
    pub fn cells(&self) -> &[CellView; CELL_COUNT] {
        &self.cells
    }

    /// The cell at `index`.
    pub fn cell(&self, index: CellIndex) -> &CellView {
        &self.cells[index.get()]
    }

    /// Cells in row `row` (0-2).
    pub fn row(&self, row: usize) -> &[CellView] {
        &self.cells[row * 3..row * 3 + 3]
    }

    /// Number of cells that accept clicks.
    pub fn interactive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.interactive).count()
    }
}

/// Builds [`BoardView`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardRenderer;

impl BoardRenderer {
    /// Renders a board.
    ///
    /// A cell is interactive iff it is empty, the human holds the turn and
    /// the game is not over. Cells in `winning_combo` are highlighted
    /// whether or not they are interactive.
    #[instrument(skip(board, winning_combo), fields(combo_len = winning_combo.len()))]
    pub fn render(
        board: &Board,
        turn_owner: TurnOwner,
        game_over: bool,
        winning_combo: &[CellIndex],
    ) -> BoardView {
        let open = turn_owner == TurnOwner::Human && !game_over;
        let cells = CellIndex::ALL.map(|index| {
            let cell = board.get(index);
            CellView {
                index,
                cell,
                interactive: open && cell.is_empty(),
                highlighted: winning_combo.contains(&index),
            }
        });
        BoardView { cells }
    }

    /// Renders the current session.
    pub fn render_session(state: &SessionState) -> BoardView {
        Self::render(
            state.board(),
            *state.turn_owner(),
            *state.game_over(),
            state.winning_combo(),
        )
    }
}
