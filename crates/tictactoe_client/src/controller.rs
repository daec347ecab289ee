//! Turn controller: mediates between user intent, the resolver and the
//! session state.
//!
//! Each action is split into three steps so the UI loop can keep running
//! while a request is in flight:
//!
//! 1. `begin_*` marks the session pending and hands back a [`Ticket`].
//! 2. [`dispatch`] performs the round trip and produces a [`Reply`].
//! 3. [`TurnController::apply`] folds the reply into the session, unless a
//!    newer request has been issued since, in which case it is dropped.
//!
//! [`TurnController::start_new_game`] and [`TurnController::submit_move`]
//! run all three steps back to back.

use std::sync::Arc;

use derive_new::new;
use tracing::{debug, info, instrument, warn};

use crate::board::CellIndex;
use crate::error::{ResolverError, ResolverErrorKind};
use crate::protocol::{MoveResult, NewGameResponse};
use crate::render::{BoardRenderer, BoardView};
use crate::resolver::Resolver;
use crate::session::{RequestToken, SessionState};

/// Which endpoint a ticket is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `GET /api/new`.
    NewGame,
    /// `POST /api/move`.
    Move(CellIndex),
}

/// An issued but not yet answered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Ticket {
    /// Session token at issue time.
    pub token: RequestToken,
    /// What to ask the resolver.
    pub kind: RequestKind,
}

/// Resolver answer for a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    /// Answer to a new-game request.
    NewGame(Result<NewGameResponse, ResolverError>),
    /// Answer to a move request.
    Move(Result<MoveResult, ResolverError>),
}

/// A resolver answer tagged with the token of its request.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Reply {
    /// Token copied from the ticket.
    pub token: RequestToken,
    /// The answer.
    pub body: ReplyBody,
}

/// Result of applying a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The session was updated.
    Current,
    /// A newer request superseded this one; nothing changed.
    Stale,
}

/// Performs the round trip for a ticket.
#[instrument(skip(resolver), fields(token = %ticket.token))]
pub async fn dispatch<R: Resolver + ?Sized>(resolver: &R, ticket: Ticket) -> Reply {
    let body = match ticket.kind {
        RequestKind::NewGame => ReplyBody::NewGame(resolver.new_game().await),
        RequestKind::Move(cell) => ReplyBody::Move(resolver.submit_move(cell).await),
    };
    Reply::new(ticket.token, body)
}

/// Owns the session and drives it through resolver round trips.
#[derive(Debug)]
pub struct TurnController<R> {
    resolver: Arc<R>,
    state: SessionState,
}

impl<R: Resolver> TurnController<R> {
    /// Creates a controller with a fresh session.
    pub fn new(resolver: R) -> Self {
        Self::with_shared(Arc::new(resolver))
    }

    /// Creates a controller around an already shared resolver.
    pub fn with_shared(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            state: SessionState::new(),
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handle to the resolver, for running [`dispatch`] elsewhere.
    pub fn resolver(&self) -> Arc<R> {
        Arc::clone(&self.resolver)
    }

    /// Projects the session onto a board view.
    pub fn render(&self) -> BoardView {
        BoardRenderer::render_session(&self.state)
    }

    /// Issues a new-game request. Always allowed, even mid-move.
    #[instrument(skip(self))]
    pub fn begin_new_game(&mut self) -> Ticket {
        let token = self.state.begin_request();
        info!(token = %token, "Starting new game");
        Ticket::new(token, RequestKind::NewGame)
    }

    /// Issues a move request for `index`.
    ///
    /// Returns `Ok(None)` without issuing anything when the session does not
    /// accept moves (game over, opponent's turn, or a request in flight).
    /// Occupancy is left to the resolver.
    #[instrument(skip(self))]
    pub fn begin_move(&mut self, index: usize) -> Result<Option<Ticket>, ResolverError> {
        let cell = CellIndex::new(index)
            .ok_or_else(|| ResolverError::new(ResolverErrorKind::InvalidCell(index)))?;
        if !self.state.accepts_moves() {
            debug!(
                game_over = self.state.game_over(),
                pending = self.state.pending(),
                "Ignoring move, session not accepting moves"
            );
            return Ok(None);
        }
        let token = self.state.begin_request();
        info!(cell = %cell, token = %token, "Submitting move");
        Ok(Some(Ticket::new(token, RequestKind::Move(cell))))
    }

    /// Applies a reply if it answers the latest request.
    #[instrument(skip(self, reply), fields(token = %reply.token, current = %self.state.token()))]
    pub fn apply(&mut self, reply: Reply) -> Applied {
        if !self.state.is_current(reply.token) {
            warn!("Discarding stale reply");
            return Applied::Stale;
        }
        match reply.body {
            ReplyBody::NewGame(Ok(response)) => self.state.apply_new_game(response),
            ReplyBody::Move(Ok(result)) => self.state.apply_move_result(result),
            ReplyBody::NewGame(Err(err)) | ReplyBody::Move(Err(err)) => {
                self.state.apply_failure(err)
            }
        }
        Applied::Current
    }

    /// Starts a new game and waits for the resolver.
    ///
    /// On failure the session keeps its previous board and the error is
    /// also returned.
    #[instrument(skip(self))]
    pub async fn start_new_game(&mut self) -> Result<(), ResolverError> {
        let ticket = self.begin_new_game();
        let reply = dispatch(self.resolver.as_ref(), ticket).await;
        self.apply(reply);
        self.current_error()
    }

    /// Submits a move and waits for the resolver.
    ///
    /// Returns `Ok(false)` when the move was ignored because the session does
    /// not accept moves.
    #[instrument(skip(self))]
    pub async fn submit_move(&mut self, index: usize) -> Result<bool, ResolverError> {
        let Some(ticket) = self.begin_move(index)? else {
            return Ok(false);
        };
        let reply = dispatch(self.resolver.as_ref(), ticket).await;
        self.apply(reply);
        self.current_error().map(|()| true)
    }

    fn current_error(&self) -> Result<(), ResolverError> {
        match self.state.last_error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
