use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use puzzle_store::models::{Puzzle, SavePgnRequest, SavePuzzleRequest, SaveResponse};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "puzzle")]
#[command(about = "A CLI tool for storing and fetching chess puzzles", long_about = None)]
struct Cli {
    #[arg(long, env = "PUZZLE_API_URL", default_value = "http://localhost:5000", help = "Base URL of the puzzle store")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Store a pgn")]
    SavePgn {
        #[arg(short, long, conflicts_with = "pgn", required_unless_present = "pgn", help = "Read the pgn from a file")]
        file: Option<PathBuf>,

        #[arg(short, long, help = "The pgn text")]
        pgn: Option<String>,
    },

    #[command(about = "Store a puzzle")]
    SavePuzzle {
        #[arg(short, long, help = "The pgn leading up to the puzzle")]
        pgn: String,

        #[arg(short, long, help = "Expected solution (optional)")]
        solution: Option<String>,
    },

    #[command(about = "Show a random stored puzzle")]
    Random,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_command(&cli.api_url, cli.command).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_command(api_url: &str, command: Commands) -> Result<()> {
    let client = reqwest::Client::new();
    let api_url = api_url.trim_end_matches('/');

    match command {
        Commands::SavePgn { file, pgn } => {
            let pgn = match (file, pgn) {
                (Some(path), _) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(pgn)) => pgn,
                (None, None) => bail!("Provide --file or --pgn"),
            };
            save_pgn(&client, api_url, pgn).await?;
        }
        Commands::SavePuzzle { pgn, solution } => {
            save_puzzle(&client, api_url, pgn, solution.unwrap_or_default()).await?;
        }
        Commands::Random => {
            show_random_puzzle(&client, api_url).await?;
        }
    }

    Ok(())
}

async fn save_pgn(client: &reqwest::Client, api_url: &str, pgn: String) -> Result<()> {
    let response = client
        .post(format!("{}/save_pgn", api_url))
        .json(&SavePgnRequest { pgn })
        .send()
        .await
        .context("Failed to reach the puzzle store")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        bail!("Failed to save pgn ({}): {}", status, error_text);
    }

    let result: SaveResponse = response.json().await?;
    println!("✅ PGN saved as {}", result.filename);

    Ok(())
}

async fn save_puzzle(
    client: &reqwest::Client,
    api_url: &str,
    pgn: String,
    solution: String,
) -> Result<()> {
    let response = client
        .post(format!("{}/save_puzzle", api_url))
        .json(&SavePuzzleRequest {
            pgn,
            solution: Value::String(solution),
        })
        .send()
        .await
        .context("Failed to reach the puzzle store")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        bail!("Failed to save puzzle ({}): {}", status, error_text);
    }

    let result: SaveResponse = response.json().await?;
    println!("✅ Puzzle saved as {}", result.filename);

    Ok(())
}

async fn show_random_puzzle(client: &reqwest::Client, api_url: &str) -> Result<()> {
    let response = client
        .get(format!("{}/random_puzzle", api_url))
        .send()
        .await
        .context("Failed to reach the puzzle store")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        bail!("Failed to fetch puzzle ({}): {}", status, error_text);
    }

    let body: Value = response.json().await?;
    if body.as_object().is_some_and(|o| o.is_empty()) {
        println!("📭 No puzzles stored yet.");
        return Ok(());
    }

    let puzzle: Puzzle = serde_json::from_value(body).context("Unexpected puzzle format")?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("PGN"), Cell::new(&puzzle.pgn)]));
    let solution = match &puzzle.solution {
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    table.add_row(Row::new(vec![Cell::new("Solution"), Cell::new(&solution)]));

    println!("\n🧩 Random puzzle\n");
    table.printstd();
    println!();

    Ok(())
}
