//! Tic-tac-toe client for a remote move resolver.
//!
//! The resolver owns the rules and plays the opponent; this crate keeps
//! the client-side session in step with it and renders the board.
//!
//! # Architecture
//!
//! - **Controller**: [`TurnController`] issues requests and folds replies
//!   into the [`SessionState`], discarding replies to superseded requests
//! - **Renderer**: [`BoardRenderer`] projects the session onto a
//!   [`BoardView`] deciding which cells accept clicks
//! - **Resolver**: [`Resolver`] trait with an HTTP implementation
//! - **TUI**: ratatui front end driving the controller
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_client::{ClientConfig, HttpResolver, TurnController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = HttpResolver::new(&ClientConfig::default())?;
//! let mut controller = TurnController::new(resolver);
//! controller.start_new_game().await?;
//! controller.submit_move(4).await?;
//! println!("{}", controller.state().status());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod cli;
mod config;
mod controller;
mod error;
mod protocol;
mod render;
mod resolver;
mod session;
pub mod tui;

pub use board::{Board, BoardFormatError, CELL_COUNT, Cell, CellIndex, EMPTY_SYMBOL, Mark};
pub use cli::Cli;
pub use config::{ClientConfig, DEFAULT_LOG_FILE, DEFAULT_SERVER_URL};
pub use controller::{Applied, Reply, ReplyBody, RequestKind, Ticket, TurnController, dispatch};
pub use error::{ConfigError, ResolverError, ResolverErrorKind};
pub use protocol::{
    ErrorBody, MOVE_PATH, MoveRequest, MoveResult, NEW_GAME_PATH, NewGameResponse, Outcome, Winner,
};
pub use render::{BoardRenderer, BoardView, CellAction, CellView};
pub use resolver::{HttpResolver, Resolver};
pub use session::{Phase, RequestToken, SessionState, Status, TurnOwner};
