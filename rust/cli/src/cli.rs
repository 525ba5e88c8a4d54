//! Command-line argument definitions (clap derive).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drawpoker",
    version,
    about = "Five-card draw poker at the terminal"
)]
pub struct DrawPokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new game from configuration
    Play {
        /// TOML configuration file (overrides DRAWPOKER_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many hands
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        hands: Option<u32>,
        /// Directory for hand histories and session files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Continue a saved game
    Resume {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        hands: Option<u32>,
    },
    /// Show a recorded hand
    Replay {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        hand_id: String,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
