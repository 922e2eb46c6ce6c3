//! Error types for board and session misuse.

use crate::types::Mark;
use derive_more::Display;

/// Error raised when a move or board configuration is rejected.
///
/// Every check runs before any write, so a rejected call leaves the board
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardError {
    /// The position lies outside the board.
    #[display("position {_0} is out of bounds")]
    OutOfBounds(usize),
    /// The cell already holds a mark.
    #[display("cell {_0} is already occupied")]
    Occupied(usize),
    /// The game has already ended.
    #[display("the game is already over")]
    GameOver,
    /// A board needs at least two cells per side.
    #[display("board size {_0} is too small (minimum 2)")]
    SizeTooSmall(usize),
}

impl std::error::Error for BoardError {}

/// Error raised by session orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The engine does not favor the mark it was seated for.
    #[display("engine favors {good} but was seated for the other mark")]
    MarkMismatch {
        /// Mark the engine favors.
        good: Mark,
        /// Mark the engine opposes.
        bad: Mark,
    },
    /// A human move arrived while an engine owns the turn.
    #[display("an engine owns the current turn")]
    EngineTurn,
    /// The board rejected the move.
    #[display("{_0}")]
    Board(BoardError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for SessionError {
    fn from(err: BoardError) -> Self {
        SessionError::Board(err)
    }
}
