//! Interactive and exhibition game loops.

use anyhow::{Result, bail};
use gridmind::{Board, Mark, Predictor, Session, Status};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use strum::IntoEnumIterator;
use tracing::info;

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn build_session(size: usize, engines: usize) -> Result<Session> {
    let board = Board::with_size(size)?;
    let mut session = Session::new(board);
    match engines {
        0 => {}
        1 => session.seat_engine(Predictor::new(Mark::O), Mark::O)?,
        2 => {
            session.seat_engine(Predictor::new(Mark::X), Mark::X)?;
            session.seat_engine(Predictor::new(Mark::O), Mark::O)?;
        }
        n => bail!("engine seats must be 0, 1, or 2 (got {n})"),
    }
    Ok(session)
}

/// Interactive play against the configured engine seats.
pub fn run(size: usize, engines: usize, seed: Option<u64>) -> Result<()> {
    let mut session = build_session(size, engines)?;
    let mut rng = rng_from(seed);
    let stdin = io::stdin();

    loop {
        session.advance(&mut rng)?;
        println!("{}\n", session.board().display());

        let status = session.board().status().clone();
        match &status {
            Status::Won(line) => {
                if let Some(mark) = session.board().winner() {
                    println!("{mark} wins on {line:?}");
                }
            }
            Status::Draw => println!("draw"),
            Status::InProgress => {
                print!(
                    "{} to move (cell index, 'state', or 'quit'): ",
                    session.board().turn_mark()
                );
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    return Ok(());
                }
                let entry = line.trim();
                match entry {
                    "quit" | "q" => return Ok(()),
                    "state" => {
                        let snapshot = session.board().snapshot();
                        println!("{}", serde_json::to_string_pretty(&snapshot)?);
                    }
                    _ => match entry.parse::<usize>() {
                        Ok(position) => {
                            if let Err(err) = session.play_move(position) {
                                println!("rejected: {err}");
                            }
                        }
                        Err(_) => println!("not a cell index: {entry}"),
                    },
                }
                continue;
            }
        }

        print!("play again? [y/N]: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            return Ok(());
        }
        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        session.next_game();
    }
}

/// Engine-vs-engine games with a learning report at the end.
pub fn exhibit(size: usize, games: usize, seed: Option<u64>) -> Result<()> {
    let mut session = build_session(size, 2)?;
    let mut rng = rng_from(seed);
    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;

    for game in 1..=games {
        session.advance(&mut rng)?;
        match session.board().status() {
            Status::Won(_) => match session.board().winner() {
                Some(Mark::X) => {
                    x_wins += 1;
                    info!(game, mark = %Mark::X, "game won");
                }
                Some(Mark::O) => {
                    o_wins += 1;
                    info!(game, mark = %Mark::O, "game won");
                }
                None => {}
            },
            Status::Draw => {
                draws += 1;
                info!(game, "draw");
            }
            Status::InProgress => {}
        }
        session.next_game();
    }

    println!("played {games} games on a {size}x{size} board");
    println!("X wins: {x_wins}  O wins: {o_wins}  draws: {draws}");
    for mark in Mark::iter() {
        if let Some(engine) = session.engine(mark) {
            println!(
                "{mark} engine knows {} winning lines",
                engine.borrow().knowledge().len()
            );
        }
    }
    Ok(())
}

/// Prints the winning-line enumeration for a board size.
pub fn lines(size: usize) -> Result<()> {
    let board = Board::with_size(size)?;
    println!(
        "{} winning lines on a {size}x{size} board:",
        board.lines().len()
    );
    for line in board.lines() {
        println!("{line:?}");
    }
    Ok(())
}
