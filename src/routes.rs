use crate::error::ApiError;
use crate::models::{SavePgnRequest, SavePuzzleRequest, SaveResponse};
use crate::storage::PuzzleStorage;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const EXPECTED_JSON: &str = "Expected application/json";

#[derive(Clone)]
struct AppState {
    storage: Arc<PuzzleStorage>,
}

/// Builds the full HTTP surface: pages, JSON endpoints and `/static`.
pub fn app(storage: Arc<PuzzleStorage>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/submit", get(board))
        .route("/solve", get(board))
        .route("/save_pgn", post(save_pgn))
        .route("/save_puzzle", post(save_puzzle))
        .route("/random_puzzle", get(random_puzzle))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .layer(CorsLayer::permissive())
        .with_state(AppState { storage })
}

async fn home() -> Html<&'static str> {
    Html(include_str!("../templates/home.html"))
}

/// Submit and solve share the same board page.
async fn board() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(%rejection, "Rejected request body");
        ApiError::bad_request(EXPECTED_JSON)
    })
}

async fn save_pgn(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let request = SavePgnRequest::from_json(&json_body(payload)?)?;

    let filename = state.storage.save_pgn(&request.pgn).await.map_err(|e| {
        error!("Failed to save pgn: {:#}", e);
        ApiError::internal("Failed to save", e)
    })?;

    info!(%filename, "Saved pgn");
    Ok(Json(SaveResponse { filename }))
}

async fn save_puzzle(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let puzzle = SavePuzzleRequest::from_json(&json_body(payload)?)?.into_puzzle();

    let filename = state.storage.save_puzzle(&puzzle).await.map_err(|e| {
        error!("Failed to save puzzle: {:#}", e);
        ApiError::internal("Failed to save", e)
    })?;

    info!(%filename, "Saved puzzle");
    Ok(Json(SaveResponse { filename }))
}

/// `{}` rather than an error when nothing has been stored yet.
async fn random_puzzle(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let puzzle = state.storage.random_puzzle().await.map_err(|e| {
        error!("{}", e);
        ApiError::from(e)
    })?;

    Ok(Json(match puzzle {
        Some(puzzle) => json!({ "pgn": puzzle.pgn, "solution": puzzle.solution }),
        None => json!({}),
    }))
}
