//! Gridmind - terminal front-end for the game engine.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            size,
            engines,
            seed,
        } => play::run(size, engines, seed),
        Command::Exhibit { size, games, seed } => play::exhibit(size, games, seed),
        Command::Lines { size } => play::lines(size),
    }
}
