//! Core domain types for the game engine.

use serde::{Deserialize, Serialize};

/// A player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// The cross mark (moves first in a fresh game).
    X,
    /// The nought mark.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the mark in the cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// An ascending sequence of cell indices that wins the game when a single
/// mark holds every cell on it.
pub type Line = Vec<usize>;

/// One history entry: a mark placed at a position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// The cell index it was placed at.
    pub position: usize,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Game is ongoing.
    InProgress,
    /// Board is full with no completed line.
    Draw,
    /// A line was completed; carries its cells in ascending order.
    Won(Line),
}

impl Status {
    /// Checks whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// Returns the completed line, if the game was won.
    pub fn winning_line(&self) -> Option<&Line> {
        match self {
            Status::Won(line) => Some(line),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::InProgress => write!(f, "in progress"),
            Status::Draw => write!(f, "draw"),
            Status::Won(line) => write!(f, "won on {line:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_opponent_is_involutive() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent().opponent(), Mark::O);
    }

    #[test]
    fn test_mark_parses_case_insensitively() {
        assert_eq!(Mark::from_str("x").unwrap(), Mark::X);
        assert_eq!(Mark::from_str("O").unwrap(), Mark::O);
        assert!(Mark::from_str("z").is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!Status::InProgress.is_terminal());
        assert!(Status::Draw.is_terminal());
        assert!(Status::Won(vec![0, 1, 2]).is_terminal());
        assert_eq!(Status::Won(vec![0, 1, 2]).winning_line(), Some(&vec![0, 1, 2]));
    }
}
