//! Board state, move application, and win/tie detection.

use crate::error::BoardError;
use crate::lines::LineIndex;
use crate::observer::{BoardEvent, BoardObserver};
use crate::types::{Cell, Line, Mark, Move, Status};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::instrument;

/// Shared handle to a board observer.
pub type ObserverHandle = Rc<RefCell<dyn BoardObserver>>;

/// Default board side length.
pub const DEFAULT_SIZE: usize = 3;

/// Game board: cells, turn order, move history, and status.
///
/// The board validates every move before writing anything, recomputes the
/// status from the last move after each write, and notifies subscribed
/// observers of marks and resets. Winning lines are fixed per size and
/// survive resets; changing the size recomputes them and clears the board.
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    index: LineIndex,
    marks: [Mark; 2],
    turn: usize,
    next_start: usize,
    history: Vec<Move>,
    status: Status,
    observers: Vec<ObserverHandle>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("cells", &self.cells)
            .field("marks", &self.marks)
            .field("turn", &self.turn)
            .field("history", &self.history)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Creates a 3x3 board with the default marks.
    pub fn new() -> Self {
        Self::build(DEFAULT_SIZE)
    }

    /// Creates a board with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SizeTooSmall`] for sizes below 2.
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if size < 2 {
            return Err(BoardError::SizeTooSmall(size));
        }
        Ok(Self::build(size))
    }

    fn build(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            index: LineIndex::new(size),
            marks: [Mark::X, Mark::O],
            turn: 0,
            next_start: 0,
            history: Vec::new(),
            status: Status::InProgress,
            observers: Vec::new(),
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at the given position, if it is on the board.
    pub fn cell(&self, position: usize) -> Option<Cell> {
        self.cells.get(position).copied()
    }

    /// Checks whether the cell at the given position is empty.
    pub fn is_empty(&self, position: usize) -> bool {
        matches!(self.cell(position), Some(Cell::Empty))
    }

    /// The two marks in turn order for a fresh configuration.
    pub fn marks(&self) -> [Mark; 2] {
        self.marks
    }

    /// Index of the mark that moves next (0 or 1).
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The mark that moves next.
    pub fn turn_mark(&self) -> Mark {
        self.marks[self.turn]
    }

    /// Moves made so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current game status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Mark that completed the winning line, if the game was won.
    pub fn winner(&self) -> Option<Mark> {
        match &self.status {
            Status::Won(line) => line.first().and_then(|&cell| self.cells[cell].mark()),
            _ => None,
        }
    }

    /// All winning lines for the current size.
    pub fn lines(&self) -> &[Line] {
        self.index.lines()
    }

    /// Places `mark` at `position` and recomputes the status.
    ///
    /// When the move ends the game, the starting turn for the next game
    /// flips, so players alternate who opens across successive games.
    ///
    /// # Errors
    ///
    /// Rejects moves on a finished game, out-of-range positions, and
    /// occupied cells. All validation happens before any write, so a
    /// rejected move leaves the board untouched.
    #[instrument(skip(self))]
    pub fn mark(&mut self, position: usize, mark: Mark) -> Result<&Status, BoardError> {
        if self.status.is_terminal() {
            return Err(BoardError::GameOver);
        }
        if position >= self.cells.len() {
            return Err(BoardError::OutOfBounds(position));
        }
        if !self.is_empty(position) {
            return Err(BoardError::Occupied(position));
        }

        self.cells[position] = Cell::Occupied(mark);
        self.history.push(Move::new(mark, position));
        self.turn ^= 1;
        self.status = self.compute_status();
        if self.status.is_terminal() {
            self.next_start ^= 1;
        }

        let event = BoardEvent::Marked {
            position,
            mark,
            status: self.status.clone(),
        };
        self.notify(&event);
        Ok(&self.status)
    }

    /// Replays recorded moves onto the board in order.
    ///
    /// Stops at the first rejected move and returns its error.
    #[instrument(skip(self, moves))]
    pub fn replay(&mut self, moves: &[Move]) -> Result<&Status, BoardError> {
        for entry in moves {
            self.mark(entry.position, entry.mark)?;
        }
        Ok(&self.status)
    }

    /// Clears the board for a new game, keeping size and winning lines.
    ///
    /// The starting turn is whatever the last finished game scheduled.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.history.clear();
        self.turn = self.next_start;
        self.status = Status::InProgress;
        self.notify(&BoardEvent::Reset);
    }

    /// Changes the side length, recomputing the winning lines and
    /// clearing the board for a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SizeTooSmall`] for sizes below 2.
    #[instrument(skip(self))]
    pub fn set_size(&mut self, size: usize) -> Result<(), BoardError> {
        if size < 2 {
            return Err(BoardError::SizeTooSmall(size));
        }
        self.size = size;
        self.cells = vec![Cell::Empty; size * size];
        self.index = LineIndex::new(size);
        self.next_start = 0;
        self.reset();
        Ok(())
    }

    /// Subscribes an observer to mark/reset notifications.
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        self.observers.push(observer);
    }

    /// Drops a previously subscribed observer.
    pub fn unsubscribe(&mut self, observer: &ObserverHandle) {
        self.observers.retain(|o| !Rc::ptr_eq(o, observer));
    }

    /// Returns a render-ready snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            cells: self.cells.clone(),
            turn_mark: self.turn_mark(),
            status: self.status.clone(),
            history: self.history.clone(),
        }
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their index so a player can pick a move.
    pub fn display(&self) -> String {
        let width = (self.size * self.size - 1).to_string().len();
        let mut out = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let position = row * self.size + col;
                let text = match self.cells[position] {
                    Cell::Empty => position.to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                out.push_str(&format!("{text:>width$}"));
                if col + 1 < self.size {
                    out.push('|');
                }
            }
            if row + 1 < self.size {
                out.push('\n');
                out.push_str(&"-".repeat(self.size * (width + 1) - 1));
                out.push('\n');
            }
        }
        out
    }

    /// Status as seen from the last move: a win on any line through it,
    /// otherwise a draw once no empty cell remains.
    fn compute_status(&self) -> Status {
        let Some(last) = self.history.last() else {
            return Status::InProgress;
        };
        for &id in self.index.containing(last.position) {
            let line = self.index.line(id);
            if line
                .iter()
                .all(|&cell| self.cells[cell] == Cell::Occupied(last.mark))
            {
                return Status::Won(line.clone());
            }
        }
        if self.cells.iter().any(|cell| cell.is_empty()) {
            Status::InProgress
        } else {
            Status::Draw
        }
    }

    /// Delivers an event to every subscriber.
    ///
    /// The registry is taken out of the struct for the duration of the
    /// dispatch, so observers see the board immutably and cannot re-enter
    /// `mark` or `reset` from inside a notification.
    fn notify(&mut self, event: &BoardEvent) {
        let observers = std::mem::take(&mut self.observers);
        for observer in &observers {
            observer.borrow_mut().on_board_event(self, event);
        }
        self.observers = observers;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the board for rendering hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Side length.
    pub size: usize,
    /// Cells in row-major order.
    pub cells: Vec<Cell>,
    /// Mark that moves next.
    pub turn_mark: Mark,
    /// Current status.
    pub status: Status,
    /// Moves made so far, in order.
    pub history: Vec<Move>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_blank() {
        let board = Board::new();
        assert_eq!(board.size(), 3);
        assert_eq!(board.cells().len(), 9);
        assert!(board.cells().iter().all(|cell| cell.is_empty()));
        assert_eq!(board.turn_mark(), Mark::X);
        assert_eq!(board.status(), &Status::InProgress);
    }

    #[test]
    fn test_mark_flips_turn_and_records_history() {
        let mut board = Board::new();
        board.mark(4, Mark::X).unwrap();
        assert_eq!(board.turn_mark(), Mark::O);
        assert_eq!(board.history(), &[Move::new(Mark::X, 4)]);
        assert_eq!(board.cell(4), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_size_below_two_rejected() {
        assert_eq!(Board::with_size(1).unwrap_err(), BoardError::SizeTooSmall(1));
        let mut board = Board::new();
        assert_eq!(board.set_size(0), Err(BoardError::SizeTooSmall(0)));
        assert_eq!(board.size(), 3);
    }

    #[test]
    fn test_set_size_recomputes_lines_and_clears() {
        let mut board = Board::new();
        board.mark(0, Mark::X).unwrap();
        board.set_size(4).unwrap();
        assert_eq!(board.cells().len(), 16);
        assert_eq!(board.lines().len(), 14);
        assert!(board.history().is_empty());
        assert_eq!(board.status(), &Status::InProgress);
    }

    #[test]
    fn test_display_shows_marks_and_indices() {
        let mut board = Board::new();
        board.mark(4, Mark::X).unwrap();
        let shown = board.display();
        assert!(shown.contains('X'));
        assert!(shown.contains('8'));
        assert!(!shown.contains('4'));
    }
}
