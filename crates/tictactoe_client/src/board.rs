//! Board types shared by the controller and the renderer.
//!
//! The resolver owns the rules; the client only needs to carry the nine
//! cells it was sent and know which symbol belongs to which side.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Wire symbol for an empty cell.
pub const EMPTY_SYMBOL: &str = " ";

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A mark placed on the board.
///
/// The resolver plays `X`; the human at this client plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter)]
pub enum Mark {
    /// The local player's mark (`O`).
    #[display("O")]
    Human,
    /// The resolver's mark (`X`).
    #[display("X")]
    Opponent,
}

impl Mark {
    /// Returns the wire symbol for this mark.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Human => "O",
            Self::Opponent => "X",
        }
    }

    /// Parses a wire symbol into a mark.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "O" => Some(Self::Human),
            "X" => Some(Self::Opponent),
            _ => None,
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Occupied by a mark.
    Marked(Mark),
}

impl Cell {
    /// Returns true if the cell is unoccupied.
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the wire symbol for this cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Empty => EMPTY_SYMBOL,
            Self::Marked(mark) => mark.symbol(),
        }
    }

    /// Parses a wire symbol into a cell.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        if symbol == EMPTY_SYMBOL {
            return Some(Self::Empty);
        }
        Mark::from_symbol(symbol).map(Self::Marked)
    }
}

/// A validated board index in `0..=8`, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{}", _0)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Every index in board order.
    pub const ALL: [Self; CELL_COUNT] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
    ];

    /// Creates an index, or `None` if it falls outside the board.
    pub fn new(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self(index as u8))
    }

    /// Returns the raw index.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Row of this cell (0-2).
    pub fn row(self) -> usize {
        self.get() / 3
    }

    /// Column of this cell (0-2).
    pub fn col(self) -> usize {
        self.get() % 3
    }

    /// Builds an index from a row and column, both in `0..3`.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::new(row * 3 + col)
        } else {
            None
        }
    }

    /// Iterates over every index in board order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

/// Board array that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardFormatError {
    /// Wrong number of cells.
    #[display("expected {} cells, got {}", CELL_COUNT, _0)]
    WrongLength(#[error(not(source))] usize),
    /// A cell held something other than `" "`, `"O"` or `"X"`.
    #[display("invalid cell {:?} at index {}", symbol, index)]
    InvalidSymbol {
        /// Offending cell position.
        index: usize,
        /// Offending value.
        symbol: String,
    },
}

/// The nine cells of a game, row-major.
///
/// Serializes as the resolver's JSON array of one-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an all-empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Returns the cell at `index`.
    pub fn get(&self, index: CellIndex) -> Cell {
        self.cells[index.get()]
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns true when no cell is occupied.
    pub fn is_all_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Iterates over `(index, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        CellIndex::all().map(|index| (index, self.get(index)))
    }

    /// Parses the resolver's symbol array.
    #[instrument(skip(symbols), fields(len = symbols.len()))]
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, BoardFormatError> {
        if symbols.len() != CELL_COUNT {
            return Err(BoardFormatError::WrongLength(symbols.len()));
        }
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (index, symbol) in symbols.iter().enumerate() {
            let symbol = symbol.as_ref();
            cells[index] =
                Cell::from_symbol(symbol).ok_or_else(|| BoardFormatError::InvalidSymbol {
                    index,
                    symbol: symbol.to_string(),
                })?;
        }
        Ok(Self { cells })
    }

    /// Renders the board as three text rows, empty cells shown by number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => result.push_str(&(pos + 1).to_string()),
                    Cell::Marked(mark) => result.push_str(mark.symbol()),
                }
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

impl TryFrom<Vec<String>> for Board {
    type Error = BoardFormatError;

    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_symbols(symbols.as_slice())
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board
            .cells
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }
}
