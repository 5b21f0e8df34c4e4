use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "puzzle-store")]
#[command(about = "Stores chess puzzles and serves a random one back", long_about = None)]
pub struct Config {
    #[arg(long, env = "PUZZLE_STORE_DIR", default_value = "puzzles", help = "Directory holding pgn and puzzle records")]
    pub store_dir: PathBuf,

    #[arg(long, env = "PUZZLE_BIND", default_value = "0.0.0.0:5000", help = "Address to listen on")]
    pub bind: SocketAddr,

    #[arg(long, env = "PUZZLE_STATIC_DIR", default_value = "static", help = "Directory served under /static")]
    pub static_dir: PathBuf,
}
