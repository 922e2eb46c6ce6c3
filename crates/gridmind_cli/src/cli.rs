//! Command-line interface for gridmind.

use clap::{Parser, Subcommand};

/// Gridmind - N-by-N tic-tac-toe against a learning predictor
#[derive(Parser, Debug)]
#[command(name = "gridmind")]
#[command(about = "Tic-tac-toe engine with a pattern-learning predictor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively against 0, 1, or 2 engines
    Play {
        /// Board side length
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Engine seats: 0 = two humans, 1 = an engine answers as O,
        /// 2 = engines play both marks
        #[arg(short, long, default_value = "1")]
        engines: usize,

        /// Seed for the engines' tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run engine-vs-engine games and report what the engines learn
    Exhibit {
        /// Board side length
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Number of games to play
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Seed for the engines' tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the winning lines for a board size
    Lines {
        /// Board side length
        #[arg(short, long, default_value = "3")]
        size: usize,
    },
}
