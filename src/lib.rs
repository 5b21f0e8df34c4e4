//! Puzzle store service: saves PGN submissions and puzzles as flat files and
//! hands back a random stored puzzle.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod storage;
