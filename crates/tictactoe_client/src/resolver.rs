//! The remote move resolver.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::board::CellIndex;
use crate::config::ClientConfig;
use crate::error::{ResolverError, ResolverErrorKind};
use crate::protocol::{
    ErrorBody, MOVE_PATH, MoveRequest, MoveResult, NEW_GAME_PATH, NewGameResponse,
};

/// Service that owns the game rules and plays the opponent.
///
/// One call is one round trip; implementations do not retry.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Starts a fresh game and returns its empty board.
    async fn new_game(&self) -> Result<NewGameResponse, ResolverError>;

    /// Plays the human's move and returns the board after the opponent's reply.
    async fn submit_move(&self, cell: CellIndex) -> Result<MoveResult, ResolverError>;
}

/// Resolver reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    base_url: String,
    client: reqwest::Client,
}

impl HttpResolver {
    /// Creates a resolver client for the configured server.
    #[instrument(skip_all, fields(server_url = %config.server_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ResolverError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(*timeout);
        }
        let client = builder.build()?;
        info!("Created HTTP resolver");
        Ok(Self {
            base_url: config.server_url().clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the body, turning non-success statuses into errors.
    async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, ResolverError> {
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            return Ok(body.to_vec());
        }
        warn!(
            status = %status,
            body = %String::from_utf8_lossy(&body),
            "Resolver returned error status"
        );
        match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(err) if status == StatusCode::BAD_REQUEST => {
                Err(ResolverError::new(ResolverErrorKind::Rejected(err.error)))
            }
            _ => Err(ResolverError::new(ResolverErrorKind::Status(status.as_u16()))),
        }
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn new_game(&self) -> Result<NewGameResponse, ResolverError> {
        info!("Requesting new game");
        let response = self.client.get(self.url(NEW_GAME_PATH)).send().await?;
        let body = Self::read_body(response).await?;
        debug!(body = %String::from_utf8_lossy(&body), "Got new-game response");
        NewGameResponse::from_json(&body)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn submit_move(&self, cell: CellIndex) -> Result<MoveResult, ResolverError> {
        info!("Sending move");
        let request = MoveRequest::from(cell);
        let response = self
            .client
            .post(self.url(MOVE_PATH))
            .json(&request)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        debug!(body = %String::from_utf8_lossy(&body), "Got move response");
        MoveResult::from_json(&body)
    }
}
