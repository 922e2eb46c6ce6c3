//! Pattern-learning move predictor.
//!
//! The predictor carries no search tree. It remembers winning lines it
//! has seen games end on, sorts the ones still live on the current board
//! into offense, defense, and neutral plans, and ranks empty cells from
//! those plans when asked for a move.

use crate::board::Board;
use crate::observer::{BoardEvent, BoardObserver};
use crate::types::{Cell, Line, Mark, Status};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Plans
// ─────────────────────────────────────────────────────────────

/// How a known line relates to the predictor's marks on the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    /// Only the favorable mark is on the line.
    Offense,
    /// Only the unfavorable mark is on the line.
    Defense,
    /// Nobody has touched the line yet.
    Neutral,
}

impl PlanKind {
    /// Ranking weight for this plan kind on a board of side `size`.
    fn weight(self, size: usize) -> f64 {
        match self {
            PlanKind::Defense => 2.0 / size as f64,
            PlanKind::Offense => 1.0 / size as f64,
            PlanKind::Neutral => 0.0,
        }
    }
}

/// Tally of cell contents along one known line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanCount {
    /// Cells holding the favorable mark.
    pub good: usize,
    /// Cells holding the unfavorable mark.
    pub bad: usize,
    /// Empty cells.
    pub empty: usize,
}

/// A known line classified against the live board.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct Plan {
    /// The line's cells in ascending order.
    line: Line,
    /// Current contents of each cell on the line.
    state: Vec<(usize, Cell)>,
    /// Content tally for the line.
    count: PlanCount,
}

/// Known lines sorted by how they can still be completed.
///
/// Lines already decided (no empty cell) and lines holding both marks are
/// unusable and appear in no bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plans {
    /// Lines the predictor can still complete.
    pub offense: Vec<Plan>,
    /// Lines the opponent can still complete.
    pub defense: Vec<Plan>,
    /// Known lines nobody has touched yet.
    pub neutral: Vec<Plan>,
}

impl Plans {
    /// Iterates every plan with its classification.
    pub fn iter(&self) -> impl Iterator<Item = (PlanKind, &Plan)> {
        self.offense
            .iter()
            .map(|plan| (PlanKind::Offense, plan))
            .chain(self.defense.iter().map(|plan| (PlanKind::Defense, plan)))
            .chain(self.neutral.iter().map(|plan| (PlanKind::Neutral, plan)))
    }

    /// Total number of live plans.
    pub fn len(&self) -> usize {
        self.offense.len() + self.defense.len() + self.neutral.len()
    }

    /// Checks whether no known line is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────
//  Predictor
// ─────────────────────────────────────────────────────────────

/// Move predictor that learns winning lines and ranks candidate moves.
///
/// Knowledge persists across board resets; that carry-over is the whole
/// point. It only clears when the predictor's marks change or
/// [`Predictor::clear_knowledge`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictor {
    good_mark: Mark,
    bad_mark: Mark,
    knowledge: Vec<Line>,
}

impl Predictor {
    /// Creates a predictor favoring `good_mark`, with empty knowledge.
    pub fn new(good_mark: Mark) -> Self {
        Self {
            good_mark,
            bad_mark: good_mark.opponent(),
            knowledge: Vec::new(),
        }
    }

    /// The mark this predictor plays for.
    pub fn good_mark(&self) -> Mark {
        self.good_mark
    }

    /// The mark this predictor plays against.
    pub fn bad_mark(&self) -> Mark {
        self.bad_mark
    }

    /// Winning lines learned so far.
    pub fn knowledge(&self) -> &[Line] {
        &self.knowledge
    }

    /// Swaps the predictor to favor `good_mark`, clearing learned lines.
    pub fn set_marks(&mut self, good_mark: Mark) {
        if good_mark != self.good_mark {
            self.good_mark = good_mark;
            self.bad_mark = good_mark.opponent();
            self.knowledge.clear();
        }
    }

    /// Forgets every learned line.
    pub fn clear_knowledge(&mut self) {
        self.knowledge.clear();
    }

    /// Records winning lines, skipping any already known.
    ///
    /// Idempotent: re-learning a known line is a no-op. Returns how many
    /// lines were newly added.
    #[instrument(skip(self, lines))]
    pub fn learn<I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = Line>,
    {
        let mut added = 0;
        for line in lines {
            if !self.knowledge.contains(&line) {
                self.knowledge.push(line);
                added += 1;
            }
        }
        if added > 0 {
            debug!(added, total = self.knowledge.len(), "knowledge grew");
        }
        added
    }

    /// Records a single winning line. See [`Predictor::learn`].
    pub fn learn_line(&mut self, line: Line) -> usize {
        self.learn(std::iter::once(line))
    }

    /// Classifies known lines against the live board.
    ///
    /// Lines with no empty cell left are decided and skipped; lines
    /// holding both marks can never be completed and are discarded.
    #[instrument(skip(self, board))]
    pub fn plans(&self, board: &Board) -> Plans {
        let mut plans = Plans::default();
        for line in &self.knowledge {
            let mut count = PlanCount::default();
            let mut state = Vec::with_capacity(line.len());
            let mut usable = true;
            for &cell in line {
                let Some(content) = board.cell(cell) else {
                    // Knowledge from a larger board; nothing to plan here.
                    usable = false;
                    break;
                };
                match content {
                    Cell::Empty => count.empty += 1,
                    Cell::Occupied(mark) if mark == self.good_mark => count.good += 1,
                    Cell::Occupied(mark) if mark == self.bad_mark => count.bad += 1,
                    Cell::Occupied(_) => {
                        usable = false;
                        break;
                    }
                }
                state.push((cell, content));
            }
            if !usable || count.empty == 0 || (count.good > 0 && count.bad > 0) {
                continue;
            }
            let plan = Plan::new(line.clone(), state, count);
            if count.good > 0 {
                plans.offense.push(plan);
            } else if count.bad > 0 {
                plans.defense.push(plan);
            } else {
                plans.neutral.push(plan);
            }
        }
        plans
    }

    /// Picks the best empty cell to play, or `None` when the board has
    /// no empty cell left.
    ///
    /// Ties between equally ranked cells break uniformly at random; with
    /// no knowledge, every empty cell ties at zero and the pick is a
    /// uniform random empty cell.
    pub fn think(&self, board: &Board) -> Option<usize> {
        self.think_with(board, &mut rand::rng())
    }

    /// Like [`Predictor::think`], with a caller-supplied random source.
    ///
    /// An offense plan one cell short of completion wins immediately and
    /// short-circuits the ranking. Otherwise each plan adds its kind's
    /// weight plus `size ^ (size - empty)` to every empty cell on its
    /// line, so plans closer to completion dominate.
    #[instrument(skip(self, board, rng))]
    pub fn think_with<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<usize> {
        let empties: Vec<usize> = board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(position, _)| position)
            .collect();
        if empties.is_empty() {
            return None;
        }

        let size = board.size();
        let plans = self.plans(board);

        for plan in &plans.offense {
            if plan.count().empty == 1 {
                return plan
                    .state()
                    .iter()
                    .find(|(_, cell)| cell.is_empty())
                    .map(|(position, _)| *position);
            }
        }

        let mut ranks = vec![0.0_f64; board.cells().len()];
        for (kind, plan) in plans.iter() {
            let value = (size as f64).powi(size as i32 - plan.count().empty as i32);
            let weight = kind.weight(size);
            for (position, cell) in plan.state() {
                if cell.is_empty() {
                    ranks[*position] += weight + value;
                }
            }
        }

        let best = empties
            .iter()
            .map(|&position| ranks[position])
            .fold(f64::MIN, f64::max);
        let candidates: Vec<usize> = empties
            .into_iter()
            .filter(|&position| ranks[position] == best)
            .collect();
        candidates.choose(rng).copied()
    }
}

impl BoardObserver for Predictor {
    /// Learns the completed line whenever a game ends in a win, no matter
    /// which mark won it.
    fn on_board_event(&mut self, _board: &Board, event: &BoardEvent) {
        if let BoardEvent::Marked {
            status: Status::Won(line),
            ..
        } = event
        {
            self.learn_line(line.clone());
        }
    }
}
