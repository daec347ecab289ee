//! Client-side session state.
//!
//! A single [`SessionState`] is owned by the controller and read by the
//! renderer. Interactivity is derived purely from its fields: a request in
//! flight, a finished game, or the opponent holding the turn all freeze
//! the board.

use derive_getters::Getters;
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

use crate::board::{Board, CellIndex};
use crate::error::ResolverError;
use crate::protocol::{MoveResult, NewGameResponse, Outcome};

/// Side currently permitted to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum TurnOwner {
    /// The local player.
    #[default]
    Human,
    /// The resolver, including while a request is in flight.
    Opponent,
}

/// Identifies one issued request.
///
/// Tokens increase monotonically; only the reply carrying the latest
/// token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display)]
#[display("#{}", _0)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Returns the following token.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Status {
    /// Board is open for the human.
    #[display("Your Turn!")]
    AwaitingHuman,
    /// A request is in flight.
    #[display("Waiting for opponent...")]
    AwaitingResolver,
    /// Human completed a line.
    #[display("You Win!")]
    Won,
    /// Opponent completed a line.
    #[display("You Lose.")]
    Lost,
    /// No line and no cells left.
    #[display("It's a Draw!")]
    Draw,
    /// The latest request failed.
    #[display("Request failed: {}", _0)]
    Failed(String),
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::HumanWon => Self::Won,
            Outcome::HumanLost => Self::Lost,
            Outcome::Draw => Self::Draw,
        }
    }
}

/// Coarse state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Human may pick a cell.
    AwaitingHuman,
    /// The resolver holds the turn.
    AwaitingOpponent,
    /// Game finished; only a new game leaves this phase.
    Terminal(Outcome),
}

/// Everything the client knows about the current game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionState {
    /// Last board received from the resolver.
    board: Board,
    /// Who may act.
    turn_owner: TurnOwner,
    /// Set once the resolver reports a winner or a draw.
    game_over: bool,
    /// How the game ended, when it has.
    outcome: Option<Outcome>,
    /// A request is in flight.
    pending: bool,
    /// Token of the most recently issued request.
    token: RequestToken,
    /// Cells to highlight.
    winning_combo: Vec<CellIndex>,
    /// Status line contents.
    status: Status,
    /// Failure of the latest request, cleared by the next success.
    last_error: Option<ResolverError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            turn_owner: TurnOwner::Human,
            game_over: false,
            outcome: None,
            pending: false,
            token: RequestToken::default(),
            winning_combo: Vec::new(),
            status: Status::AwaitingHuman,
            last_error: None,
        }
    }
}

impl SessionState {
    /// Creates the initial state: empty board, human to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the human may submit a move right now.
    pub fn accepts_moves(&self) -> bool {
        self.turn_owner == TurnOwner::Human && !self.game_over && !self.pending
    }

    /// True when `index` would accept a click.
    pub fn is_interactive(&self, index: CellIndex) -> bool {
        self.board.get(index).is_empty() && self.accepts_moves()
    }

    /// Current state machine position.
    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(outcome) if self.game_over => Phase::Terminal(outcome),
            _ if self.turn_owner == TurnOwner::Opponent || self.pending => {
                Phase::AwaitingOpponent
            }
            _ => Phase::AwaitingHuman,
        }
    }

    /// True when `token` belongs to the latest request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending && token == self.token
    }

    /// Marks a new request as in flight and returns its token.
    #[instrument(skip(self), fields(previous = %self.token))]
    pub(crate) fn begin_request(&mut self) -> RequestToken {
        self.token = self.token.next();
        self.pending = true;
        self.turn_owner = TurnOwner::Opponent;
        if !self.game_over {
            self.status = Status::AwaitingResolver;
        }
        debug!(token = %self.token, "Request issued");
        self.token
    }

    /// Replaces the session with a fresh game.
    #[instrument(skip_all)]
    pub(crate) fn apply_new_game(&mut self, response: NewGameResponse) {
        if !response.board.is_all_empty() {
            warn!(
                board = %response.board.display(),
                "Resolver started a game on a non-empty board"
            );
        }
        *self = Self {
            board: response.board,
            token: self.token,
            ..Self::default()
        };
        info!("New game started");
    }

    /// Folds a move result into the session.
    #[instrument(skip_all)]
    pub(crate) fn apply_move_result(&mut self, result: MoveResult) {
        self.board = result.board;
        self.pending = false;
        self.last_error = None;
        match result.winner {
            Some(winner) => {
                let outcome = winner.outcome();
                info!(?winner, ?outcome, "Game over");
                self.game_over = true;
                self.outcome = Some(outcome);
                self.turn_owner = TurnOwner::Opponent;
                self.winning_combo = result.winning_combo;
                self.status = outcome.into();
            }
            None => {
                debug!(ai_move = ?result.ai_move, "Opponent replied");
                self.turn_owner = TurnOwner::Human;
                self.winning_combo.clear();
                self.status = Status::AwaitingHuman;
            }
        }
    }

    /// Records a failed request, leaving the board as it was.
    #[instrument(skip_all, fields(error = %error))]
    pub(crate) fn apply_failure(&mut self, error: ResolverError) {
        warn!("Request failed");
        self.pending = false;
        if self.game_over {
            self.turn_owner = TurnOwner::Opponent;
        } else {
            self.turn_owner = TurnOwner::Human;
        }
        self.status = Status::Failed(error.kind().to_string());
        self.last_error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use crate::error::ResolverErrorKind;
    use crate::protocol::Winner;

    fn idx(i: usize) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    #[test]
    fn test_initial_state_awaits_human() {
        let state = SessionState::new();
        assert!(state.board().is_all_empty());
        assert_eq!(state.turn_owner(), &TurnOwner::Human);
        assert!(!*state.game_over());
        assert!(state.accepts_moves());
        assert_eq!(state.phase(), Phase::AwaitingHuman);
        assert_eq!(state.status().to_string(), "Your Turn!");
    }

    #[test]
    fn test_begin_request_freezes_board() {
        let mut state = SessionState::new();
        let token = state.begin_request();
        assert_eq!(token, RequestToken::default().next());
        assert!(*state.pending());
        assert!(!state.accepts_moves());
        assert!(!state.is_interactive(idx(0)));
        assert_eq!(state.phase(), Phase::AwaitingOpponent);
        assert!(state.is_current(token));
    }

    #[test]
    fn test_later_request_supersedes_token() {
        let mut state = SessionState::new();
        let first = state.begin_request();
        let second = state.begin_request();
        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_terminal_result_sets_outcome() {
        let mut state = SessionState::new();
        state.begin_request();
        let mut result = MoveResult::in_progress(Board::empty());
        result.winner = Some(Winner::Mark(Mark::Human));
        result.winning_combo = vec![idx(2), idx(4), idx(6)];
        state.apply_move_result(result);
        assert!(*state.game_over());
        assert_eq!(state.turn_owner(), &TurnOwner::Opponent);
        assert_eq!(state.phase(), Phase::Terminal(Outcome::HumanWon));
        assert_eq!(state.status(), &Status::Won);
        assert_eq!(state.winning_combo().len(), 3);
    }

    #[test]
    fn test_failure_returns_turn_and_keeps_board() {
        let mut state = SessionState::new();
        state.begin_request();
        state.apply_failure(ResolverError::new(ResolverErrorKind::Status(500)));
        assert!(!*state.pending());
        assert!(state.accepts_moves());
        assert!(state.board().is_all_empty());
        assert!(state.last_error().is_some());
        assert_eq!(state.status().to_string(), "Request failed: resolver returned HTTP 500");
    }

    #[test]
    fn test_status_text_per_outcome() {
        assert_eq!(Status::from(Outcome::HumanWon).to_string(), "You Win!");
        assert_eq!(Status::from(Outcome::HumanLost).to_string(), "You Lose.");
        assert_eq!(Status::from(Outcome::Draw).to_string(), "It's a Draw!");
    }
}
