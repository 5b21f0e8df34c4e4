use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A stored puzzle: the game so far plus the expected continuation.
///
/// `solution` is usually a string but is kept as whatever JSON value the
/// submitter sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub pgn: String,
    #[serde(default = "empty_solution", deserialize_with = "null_as_empty")]
    pub solution: Value,
}

impl Puzzle {
    pub fn new(pgn: impl Into<String>, solution: impl Into<Value>) -> Self {
        Self {
            pgn: pgn.into(),
            solution: solution.into(),
        }
    }
}

fn empty_solution() -> Value {
    Value::String(String::new())
}

// Older records may carry `"solution": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(empty_solution()),
        solution => Ok(solution),
    }
}

#[derive(Debug, Serialize)]
pub struct SavePgnRequest {
    pub pgn: String,
}

impl SavePgnRequest {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        Ok(Self {
            pgn: required_pgn(body)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SavePuzzleRequest {
    pub pgn: String,
    pub solution: Value,
}

impl SavePuzzleRequest {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let pgn = required_pgn(body)?;

        let solution = match body.get("solution") {
            None | Some(Value::Null) => empty_solution(),
            Some(solution) => solution.clone(),
        };

        Ok(Self { pgn, solution })
    }

    pub fn into_puzzle(self) -> Puzzle {
        Puzzle::new(self.pgn, self.solution)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub filename: String,
}

/// The pgn is kept verbatim; only the emptiness check looks at it trimmed.
fn required_pgn(body: &Value) -> Result<String, ApiError> {
    match body.get("pgn") {
        Some(Value::String(pgn)) if !pgn.trim().is_empty() => Ok(pgn.clone()),
        _ => Err(ApiError::bad_request("Empty pgn")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pgn_is_kept_verbatim() {
        let request = SavePgnRequest::from_json(&json!({ "pgn": "  1. e4 e5\n" })).unwrap();
        assert_eq!(request.pgn, "  1. e4 e5\n");
    }

    #[test]
    fn rejects_missing_blank_or_non_string_pgn() {
        for body in [
            json!({}),
            json!({ "pgn": "" }),
            json!({ "pgn": " \n\t " }),
            json!({ "pgn": 42 }),
            json!({ "pgn": null }),
            json!(["1. e4"]),
            json!("1. e4"),
        ] {
            let err = SavePgnRequest::from_json(&body).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Empty pgn"), "{}", body);
            assert!(SavePuzzleRequest::from_json(&body).is_err());
        }
    }

    #[test]
    fn solution_defaults_to_empty() {
        let missing = SavePuzzleRequest::from_json(&json!({ "pgn": "1. d4" })).unwrap();
        assert_eq!(missing.solution, json!(""));

        let null = SavePuzzleRequest::from_json(&json!({ "pgn": "1. d4", "solution": null })).unwrap();
        assert_eq!(null.into_puzzle(), Puzzle::new("1. d4", ""));
    }

    #[test]
    fn non_string_solution_is_kept_as_sent() {
        let number = SavePuzzleRequest::from_json(&json!({ "pgn": "1. e4", "solution": 5 })).unwrap();
        assert_eq!(number.solution, json!(5));

        let moves = SavePuzzleRequest::from_json(&json!({ "pgn": "1. d4", "solution": ["Nf3", "c4"] }))
            .unwrap();
        assert_eq!(moves.into_puzzle().solution, json!(["Nf3", "c4"]));
    }

    #[test]
    fn puzzle_reads_null_or_missing_solution() {
        let null: Puzzle = serde_json::from_str(r#"{"pgn": "1. c4", "solution": null}"#).unwrap();
        assert_eq!(null.solution, json!(""));

        let missing: Puzzle = serde_json::from_str(r#"{"pgn": "1. c4"}"#).unwrap();
        assert_eq!(missing.solution, json!(""));
    }
}
