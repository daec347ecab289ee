//! Shared test helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tictactoe_client::{
    Board, CellIndex, MoveResult, NewGameResponse, Resolver, ResolverError, ResolverErrorKind,
    Winner,
};

/// A request the scripted resolver received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    NewGame,
    Move(usize),
}

/// Resolver that answers from queued responses and records every call.
#[derive(Debug, Default)]
pub struct ScriptedResolver {
    new_games: Mutex<VecDeque<Result<NewGameResponse, ResolverError>>>,
    moves: Mutex<VecDeque<Result<MoveResult, ResolverError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_new_game(&self, response: Result<NewGameResponse, ResolverError>) {
        self.new_games.lock().unwrap().push_back(response);
    }

    pub fn push_move(&self, response: Result<MoveResult, ResolverError>) {
        self.moves.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn exhausted() -> ResolverError {
    ResolverError::new(ResolverErrorKind::Transport("script exhausted".to_string()))
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn new_game(&self) -> Result<NewGameResponse, ResolverError> {
        self.calls.lock().unwrap().push(Call::NewGame);
        let next = self.new_games.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }

    async fn submit_move(&self, cell: CellIndex) -> Result<MoveResult, ResolverError> {
        self.calls.lock().unwrap().push(Call::Move(cell.get()));
        let next = self.moves.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }
}

/// Builds a board from nine characters, e.g. `"XO  O    "`.
pub fn board(cells: &str) -> Board {
    let symbols: Vec<String> = cells.chars().map(|c| c.to_string()).collect();
    Board::from_symbols(symbols.as_slice()).expect("valid test board")
}

pub fn idx(i: usize) -> CellIndex {
    CellIndex::new(i).expect("index on board")
}

pub fn new_game_response() -> NewGameResponse {
    NewGameResponse {
        board: Board::empty(),
        current_turn: Some("O".to_string()),
    }
}

pub fn finished(cells: &str, winner: &str, combo: &[usize]) -> MoveResult {
    MoveResult {
        board: board(cells),
        ai_move: None,
        winner: Winner::from_wire(winner),
        winning_combo: combo.iter().map(|i| idx(*i)).collect(),
    }
}
