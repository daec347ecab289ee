//! Tests for the HTTP resolver against an in-process fake server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tictactoe_client::{
    Cell, CellIndex, ClientConfig, HttpResolver, Mark, MoveRequest, Outcome, Resolver,
    ResolverErrorKind, TurnController,
};

type Seen = Arc<Mutex<Vec<usize>>>;

const EMPTY_BOARD: [&str; 9] = [" "; 9];

async fn new_game() -> Json<Value> {
    Json(json!({ "board": EMPTY_BOARD, "current_turn": "O" }))
}

/// Plays like the real resolver for a handful of scripted cells.
async fn make_move(
    State(seen): State<Seen>,
    Json(request): Json<MoveRequest>,
) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(request.cell);
    match request.cell {
        0 => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid move" }))),
        1 => (StatusCode::OK, Json(json!({ "board": [" ", " "], "winner": null }))),
        2 => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" }))),
        3 => (
            StatusCode::OK,
            Json(json!({
                "board": ["X", "X", "X", "O", "O", " ", " ", " ", " "],
                "ai_move": 2,
                "winner": "X",
                "winning_combo": [0, 1, 2]
            })),
        ),
        cell => {
            let mut board = EMPTY_BOARD.map(String::from);
            board[cell] = "O".to_string();
            board[0] = "X".to_string();
            (
                StatusCode::OK,
                Json(json!({ "board": board, "ai_move": 0, "winner": null, "winning_combo": [] })),
            )
        }
    }
}

async fn spawn_fake(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });
    addr
}

async fn fake_resolver() -> (HttpResolver, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/api/new", get(new_game))
        .route("/api/move", post(make_move))
        .with_state(Arc::clone(&seen));
    let addr = spawn_fake(router).await;
    let config = ClientConfig::new(
        format!("http://{}", addr),
        "test.log",
        Some(Duration::from_secs(5)),
    )
    .expect("Valid config");
    (HttpResolver::new(&config).expect("Client builds"), seen)
}

fn idx(i: usize) -> CellIndex {
    CellIndex::new(i).unwrap()
}

#[tokio::test]
async fn test_new_game_returns_empty_board() {
    let (resolver, _) = fake_resolver().await;
    let response = resolver.new_game().await.expect("New game failed");
    assert!(response.board.is_all_empty());
    assert_eq!(response.current_turn.as_deref(), Some("O"));
}

#[tokio::test]
async fn test_move_posts_index_as_json() {
    let (resolver, seen) = fake_resolver().await;
    let result = resolver.submit_move(idx(4)).await.expect("Move failed");
    assert_eq!(*seen.lock().unwrap(), vec![4]);
    assert_eq!(result.board.get(idx(4)), Cell::Marked(Mark::Human));
    assert_eq!(result.board.get(idx(0)), Cell::Marked(Mark::Opponent));
    assert_eq!(result.ai_move, Some(idx(0)));
    assert!(result.winner.is_none());
}

#[tokio::test]
async fn test_bad_request_maps_to_rejected() {
    let (resolver, _) = fake_resolver().await;
    let err = resolver.submit_move(idx(0)).await.unwrap_err();
    assert_eq!(err.kind(), &ResolverErrorKind::Rejected("Invalid move".to_string()));
}

#[tokio::test]
async fn test_short_board_is_malformed() {
    let (resolver, _) = fake_resolver().await;
    let err = resolver.submit_move(idx(1)).await.unwrap_err();
    assert!(matches!(err.kind(), ResolverErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let (resolver, _) = fake_resolver().await;
    let err = resolver.submit_move(idx(2)).await.unwrap_err();
    assert_eq!(err.kind(), &ResolverErrorKind::Status(500));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ClientConfig::new(format!("http://{}", addr), "test.log", None).unwrap();
    let resolver = HttpResolver::new(&config).unwrap();
    let err = resolver.new_game().await.unwrap_err();
    assert!(matches!(err.kind(), ResolverErrorKind::Transport(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let router = Router::new().route(
        "/api/new",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "board": EMPTY_BOARD }))
        }),
    );
    let addr = spawn_fake(router).await;
    let config = ClientConfig::new(
        format!("http://{}", addr),
        "test.log",
        Some(Duration::from_millis(100)),
    )
    .unwrap();
    let resolver = HttpResolver::new(&config).unwrap();
    let err = resolver.new_game().await.unwrap_err();
    assert!(matches!(err.kind(), ResolverErrorKind::Transport(_)));
}

#[tokio::test]
async fn test_full_round_trip_through_controller() {
    let (resolver, seen) = fake_resolver().await;
    let mut controller = TurnController::new(resolver);

    controller.start_new_game().await.expect("New game failed");
    controller.submit_move(3).await.expect("Move failed");

    assert_eq!(*seen.lock().unwrap(), vec![3]);
    let state = controller.state();
    assert_eq!(state.status().to_string(), "You Lose.");
    assert_eq!(state.outcome(), &Some(Outcome::HumanLost));
    assert_eq!(controller.render().interactive_count(), 0);
}
