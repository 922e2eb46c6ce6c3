//! Orchestration for games between humans and predictors.

use crate::board::{Board, ObserverHandle};
use crate::error::SessionError;
use crate::predictor::Predictor;
use crate::types::{Mark, Status};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Who controls a mark.
#[derive(Debug, Clone)]
pub enum Seat {
    /// Moves come from the host front-end.
    Human,
    /// Moves come from an attached predictor.
    Engine(Rc<RefCell<Predictor>>),
}

/// A board plus seat assignments, driving auto-play.
///
/// Engine moves happen only inside [`Session::advance`], which the host
/// calls after rendering; any presentation delay between render and
/// advance stands in for the cosmetic scheduling gap a UI would want.
/// Human moves submitted while an engine owns the turn are refused, so a
/// person cannot slip a move in ahead of a pending engine reply.
#[derive(Debug)]
pub struct Session {
    board: Board,
    seats: [Seat; 2],
}

impl Session {
    /// Creates a session with two human seats.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            seats: [Seat::Human, Seat::Human],
        }
    }

    /// Assigns an engine to the seat playing `mark`.
    ///
    /// The predictor subscribes to the board, so it keeps learning lines
    /// from finished games even while its seat is idle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MarkMismatch`] when the predictor does not
    /// favor the mark it is being seated for.
    #[instrument(skip(self, predictor))]
    pub fn seat_engine(&mut self, predictor: Predictor, mark: Mark) -> Result<(), SessionError> {
        if predictor.good_mark() != mark {
            warn!(%mark, good = %predictor.good_mark(), "refusing mismatched engine");
            return Err(SessionError::MarkMismatch {
                good: predictor.good_mark(),
                bad: predictor.bad_mark(),
            });
        }
        let seat = self.seat_index(mark);
        let engine = Rc::new(RefCell::new(predictor));
        let handle: ObserverHandle = engine.clone();
        self.board.subscribe(handle);
        self.seats[seat] = Seat::Engine(engine);
        info!(%mark, "engine seated");
        Ok(())
    }

    /// The engine seated for `mark`, if any.
    pub fn engine(&self, mark: Mark) -> Option<Rc<RefCell<Predictor>>> {
        match &self.seats[self.seat_index(mark)] {
            Seat::Engine(engine) => Some(engine.clone()),
            Seat::Human => None,
        }
    }

    /// The underlying board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Checks whether the mark on turn belongs to an engine.
    pub fn engine_owns_turn(&self) -> bool {
        matches!(
            self.seats[self.seat_index(self.board.turn_mark())],
            Seat::Engine(_)
        )
    }

    /// Submits a human move for the mark that currently owns the turn.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EngineTurn`] when an engine owns the turn,
    /// and forwards any rejection from the board.
    #[instrument(skip(self))]
    pub fn play_move(&mut self, position: usize) -> Result<&Status, SessionError> {
        let mark = self.board.turn_mark();
        if matches!(self.seats[self.seat_index(mark)], Seat::Engine(_)) {
            return Err(SessionError::EngineTurn);
        }
        Ok(self.board.mark(position, mark)?)
    }

    /// Lets seated engines move while they own the turn and the game is
    /// live. Returns the number of engine moves made.
    ///
    /// With two engines seated this plays the game to completion.
    #[instrument(skip(self, rng))]
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, SessionError> {
        let mut moves = 0;
        while matches!(self.board.status(), Status::InProgress) {
            let mark = self.board.turn_mark();
            let Seat::Engine(engine) = &self.seats[self.seat_index(mark)] else {
                break;
            };
            let Some(position) = engine.borrow().think_with(&self.board, rng) else {
                break;
            };
            debug!(%mark, position, "engine move");
            self.board.mark(position, mark)?;
            moves += 1;
        }
        Ok(moves)
    }

    /// Starts the next game, keeping engine knowledge.
    #[instrument(skip(self))]
    pub fn next_game(&mut self) {
        self.board.reset();
    }

    /// Seat slot for a mark: its position in the board's turn order.
    fn seat_index(&self, mark: Mark) -> usize {
        usize::from(self.board.marks()[0] != mark)
    }
}
