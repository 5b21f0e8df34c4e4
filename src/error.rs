use crate::storage::RandomPuzzleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request input.
    #[error("{0}")]
    BadRequest(String),

    /// Filesystem or (de)serialization failure inside the store.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Wraps a storage failure, keeping the whole cause chain in the message.
    pub fn internal(action: &str, err: anyhow::Error) -> Self {
        Self::Internal(format!("{}: {:#}", action, err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RandomPuzzleError> for ApiError {
    fn from(err: RandomPuzzleError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn internal_message_includes_cause_chain() {
        let err = std::fs::read("/definitely/not/here")
            .context("Failed to write pgn_x.pgn")
            .unwrap_err();
        let api = ApiError::internal("Failed to save", err);

        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let message = api.to_string();
        assert!(message.starts_with("Failed to save: Failed to write pgn_x.pgn: "));
    }

    #[test]
    fn random_puzzle_errors_keep_their_step() {
        let list = ApiError::from(RandomPuzzleError::List(anyhow::anyhow!("permission denied")));
        assert_eq!(list.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(list.to_string(), "Failed to list puzzles: permission denied");

        let read = ApiError::from(RandomPuzzleError::Read(
            anyhow::anyhow!("expected value").context("Failed to parse puzzle_x.json"),
        ));
        assert_eq!(
            read.to_string(),
            "Failed to read puzzle: Failed to parse puzzle_x.json: expected value"
        );
    }

    #[test]
    fn bad_request_maps_to_400() {
        let api = ApiError::bad_request("Empty pgn");
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.to_string(), "Empty pgn");
    }
}
