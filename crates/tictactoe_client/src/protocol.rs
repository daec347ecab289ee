//! Request and response payloads of the resolver's HTTP API.
//!
//! Responses are decoded into loose wire structs and then checked into
//! the typed values the controller consumes.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{Board, CellIndex, Mark};
use crate::error::{ResolverError, ResolverErrorKind};

/// Path of the new-game endpoint.
pub const NEW_GAME_PATH: &str = "/api/new";

/// Path of the move endpoint.
pub const MOVE_PATH: &str = "/api/move";

/// Body of `POST /api/move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Chosen cell, 0-8.
    #[serde(rename = "move")]
    pub cell: usize,
}

impl From<CellIndex> for MoveRequest {
    fn from(index: CellIndex) -> Self {
        Self { cell: index.get() }
    }
}

/// Response of `GET /api/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Fresh board.
    pub board: Board,
    /// Side to move, as reported by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<String>,
}

impl NewGameResponse {
    /// Decodes a response body.
    #[instrument(skip(body), fields(len = body.len()))]
    pub fn from_json(body: &[u8]) -> Result<Self, ResolverError> {
        let response: Self = serde_json::from_slice(body)?;
        debug!(current_turn = ?response.current_turn, "Decoded new-game response");
        Ok(response)
    }
}

/// Terminal result reported by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    /// A mark completed a line.
    Mark(Mark),
    /// Any other non-empty value; the resolver sends `"Tie"`.
    Draw(String),
}

impl Winner {
    /// Interprets the wire `winner` field. Empty means no result yet.
    pub fn from_wire(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(match Mark::from_symbol(value) {
            Some(mark) => Self::Mark(mark),
            None => Self::Draw(value.to_string()),
        })
    }

    /// Outcome from the human's point of view.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Mark(Mark::Human) => Outcome::HumanWon,
            Self::Mark(Mark::Opponent) => Outcome::HumanLost,
            Self::Draw(_) => Outcome::Draw,
        }
    }
}

/// How a finished game ended for the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The human completed a line.
    HumanWon,
    /// The resolver completed a line.
    HumanLost,
    /// Board filled with no line.
    Draw,
}

/// Response of `POST /api/move` as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
struct WireMoveResult {
    board: Board,
    #[serde(default)]
    ai_move: Option<usize>,
    #[serde(default)]
    winner: Option<String>,
    #[serde(default)]
    winning_combo: Option<Vec<usize>>,
}

/// Validated response of `POST /api/move`.
///
/// `board` already contains both the human's placement and the
/// resolver's reply, if it made one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Authoritative board after the round.
    pub board: Board,
    /// Cell the resolver played, if it played.
    pub ai_move: Option<CellIndex>,
    /// Terminal result, if the game ended.
    pub winner: Option<Winner>,
    /// Cells of the completed line. Empty when there is none.
    pub winning_combo: Vec<CellIndex>,
}

impl MoveResult {
    /// Creates a non-terminal result.
    pub fn in_progress(board: Board) -> Self {
        Self {
            board,
            ai_move: None,
            winner: None,
            winning_combo: Vec::new(),
        }
    }

    /// Decodes and validates a response body.
    #[instrument(skip(body), fields(len = body.len()))]
    pub fn from_json(body: &[u8]) -> Result<Self, ResolverError> {
        let wire: WireMoveResult = serde_json::from_slice(body)?;
        Self::from_wire(wire)
    }

    fn from_wire(wire: WireMoveResult) -> Result<Self, ResolverError> {
        let ai_move = wire.ai_move.map(checked_index).transpose()?;
        let winning_combo = wire
            .winning_combo
            .unwrap_or_default()
            .into_iter()
            .map(checked_index)
            .collect::<Result<Vec<_>, _>>()?;
        let winner = wire.winner.as_deref().and_then(Winner::from_wire);
        debug!(?ai_move, ?winner, combo_len = winning_combo.len(), "Decoded move result");
        Ok(Self {
            board: wire.board,
            ai_move,
            winner,
            winning_combo,
        })
    }
}

fn checked_index(index: usize) -> Result<CellIndex, ResolverError> {
    CellIndex::new(index).ok_or_else(|| {
        ResolverError::new(ResolverErrorKind::MalformedResponse(format!(
            "index {} is outside the board",
            index
        )))
    })
}

/// Error body sent alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Resolver's message, e.g. `"Invalid move"`.
    pub error: String,
}
