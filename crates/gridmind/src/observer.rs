//! Observer seam for board notifications.

use crate::board::Board;
use crate::types::{Mark, Status};
use serde::{Deserialize, Serialize};

/// Notification emitted by a [`Board`] after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A mark was placed.
    Marked {
        /// The cell index that was marked.
        position: usize,
        /// The mark that was placed.
        mark: Mark,
        /// The status recomputed after the move.
        status: Status,
    },
    /// The board was cleared for a new game.
    Reset,
}

/// A subscriber to board mark/reset notifications.
///
/// Observers receive a shared reference to the board: they can read any
/// state they need, but cannot mutate it from inside a notification.
pub trait BoardObserver {
    /// Called after every mark and reset.
    fn on_board_event(&mut self, board: &Board, event: &BoardEvent);
}
