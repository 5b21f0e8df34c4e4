use anyhow::{Context, Result};
use clap::Parser;
use puzzle_store::config::Config;
use puzzle_store::routes;
use puzzle_store::storage::PuzzleStorage;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("puzzle_store=info,server=info,tower_http=info")),
        )
        .with_target(false)
        .init();

    let config = Config::parse();

    let storage = Arc::new(PuzzleStorage::new(&config.store_dir)?);
    info!(store_dir = %config.store_dir.display(), "Puzzle store ready");

    let app = routes::app(storage, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!("Puzzle store running on http://{}", config.bind);
    info!("  GET  /              - Home page");
    info!("  GET  /submit        - Submit a puzzle");
    info!("  GET  /solve         - Solve a puzzle");
    info!("  POST /save_pgn      - Store a pgn");
    info!("  POST /save_puzzle   - Store a puzzle");
    info!("  GET  /random_puzzle - Fetch a random puzzle");

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
