//! N-by-N tic-tac-toe engine with a pattern-learning move predictor.
//!
//! Two cooperating pieces:
//!
//! - [`Board`] owns cells, turn order, move history, and win/tie
//!   detection, with winning lines enumerated for any side length >= 2.
//! - [`Predictor`] watches a board through the [`BoardObserver`] seam,
//!   remembers the winning lines games end on, and ranks empty cells
//!   from that knowledge when asked for a move.
//!
//! [`Session`] wires the two together for play against zero, one, or two
//! engines; with two engines it plays whole games by itself and both
//! sides keep learning across games.
//!
//! # Example
//!
//! ```
//! use gridmind::{Board, Mark, Predictor};
//!
//! let mut board = Board::new();
//! board.mark(0, Mark::X)?;
//! board.mark(4, Mark::O)?;
//! board.mark(1, Mark::X)?;
//!
//! let mut intel = Predictor::new(Mark::X);
//! intel.learn_line(vec![0, 1, 2]);
//!
//! // One empty cell left on a known line held by X: play it.
//! assert_eq!(intel.think(&board), Some(2));
//! # Ok::<(), gridmind::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod lines;
mod observer;
mod predictor;
mod session;
mod types;

pub use board::{Board, DEFAULT_SIZE, ObserverHandle, Snapshot};
pub use error::{BoardError, SessionError};
pub use lines::{LineIndex, solve};
pub use observer::{BoardEvent, BoardObserver};
pub use predictor::{Plan, PlanCount, PlanKind, Plans, Predictor};
pub use session::{Seat, Session};
pub use types::{Cell, Line, Mark, Move, Status};
