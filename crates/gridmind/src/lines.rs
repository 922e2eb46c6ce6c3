//! Winning-line enumeration for N-by-N boards.

use crate::types::Line;
use tracing::instrument;

/// Enumerates every winning line for a board with the given side length.
///
/// Rows and columns always count, whatever their length. Diagonals count
/// only when they span at least three cells; for sizes above three, the
/// sweep starting in the top row is mirrored from the bottom-right corner
/// to pick up the lower-half diagonals. Every line comes back sorted
/// ascending by cell index.
#[instrument]
pub fn solve(size: usize) -> Vec<Line> {
    let n = size;
    let mut lines = Vec::new();

    for i in 0..n {
        // Row i, then column i.
        lines.push((0..n).map(|j| i * n + j).collect());
        lines.push((0..n).map(|j| i + j * n).collect());
    }

    if n >= 3 {
        let step_dr = (n + 1) as isize;
        let step_dl = (n - 1) as isize;

        // Down-right diagonals starting in the top row, length n - i.
        for i in 0..=(n - 3) {
            lines.push(ray(i, step_dr, n - i));
        }
        // Their lower-half mirrors (i = 0 is the main diagonal, already in).
        for i in 1..=(n - 3) {
            lines.push(ray(n * n - 1 - i, -step_dr, n - i));
        }

        // Down-left diagonals starting in the top row, length i + 1.
        for i in 2..n {
            lines.push(ray(i, step_dl, i + 1));
        }
        // Their lower-half mirrors (i = n - 1 is the main anti-diagonal).
        for i in 2..(n - 1) {
            lines.push(ray(n * n - 1 - i, -step_dl, i + 1));
        }
    }

    lines
}

/// Collects `len` cells from `start` along `step`, sorted ascending.
fn ray(start: usize, step: isize, len: usize) -> Line {
    let mut cells: Line = (0..len)
        .map(|k| (start as isize + step * k as isize) as usize)
        .collect();
    cells.sort_unstable();
    cells
}

/// Winning lines for one board size plus an inverted cell index.
///
/// The inverted index maps each cell to the ids of the lines crossing it,
/// so a post-move win check only inspects lines touching the last move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<Line>,
    by_cell: Vec<Vec<usize>>,
}

impl LineIndex {
    /// Builds the index for a board with the given side length.
    pub fn new(size: usize) -> Self {
        let lines = solve(size);
        let mut by_cell = vec![Vec::new(); size * size];
        for (id, line) in lines.iter().enumerate() {
            for &cell in line {
                by_cell[cell].push(id);
            }
        }
        Self { lines, by_cell }
    }

    /// All winning lines, in enumeration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line with the given id.
    pub fn line(&self, id: usize) -> &Line {
        &self.lines[id]
    }

    /// Ids of the lines crossing the given cell.
    pub fn containing(&self, cell: usize) -> &[usize] {
        &self.by_cell[cell]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three_lines() {
        let lines = solve(3);
        assert_eq!(lines.len(), 8);
        for expected in [
            vec![0, 1, 2],
            vec![3, 4, 5],
            vec![6, 7, 8],
            vec![0, 3, 6],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![0, 4, 8],
            vec![2, 4, 6],
        ] {
            assert!(lines.contains(&expected), "missing line {expected:?}");
        }
    }

    #[test]
    fn test_two_by_two_has_no_diagonals() {
        let lines = solve(2);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.len() == 2));
    }

    #[test]
    fn test_four_by_four_diagonals() {
        let lines = solve(4);
        assert_eq!(lines.len(), 14);
        // The six diagonals of length >= 3.
        for expected in [
            vec![0, 5, 10, 15],
            vec![1, 6, 11],
            vec![4, 9, 14],
            vec![3, 6, 9, 12],
            vec![2, 5, 8],
            vec![7, 10, 13],
        ] {
            assert!(lines.contains(&expected), "missing diagonal {expected:?}");
        }
    }

    #[test]
    fn test_index_inverts_lines() {
        let index = LineIndex::new(3);
        // The center crosses one row, one column, and both diagonals.
        assert_eq!(index.containing(4).len(), 4);
        for (id, line) in index.lines().iter().enumerate() {
            for &cell in line {
                assert!(index.containing(cell).contains(&id));
            }
        }
    }
}
