//! Row-by-row backtracking with per-column run tracking.

use super::line::{line_candidates, runs_of};
use crate::Clues;

/// Progress of one column through its clue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnState {
    /// Index of the run currently being built (== completed run count)
    run: usize,
    /// Length of the open run, 0 if the last cell was empty
    open: usize,
}

struct ColumnClue {
    runs: Vec<usize>,
    /// `tail[i]` = cells needed by runs `i..` including the gap before each
    tail: Vec<usize>,
}

impl ColumnClue {
    fn new(clue: &[usize]) -> Self {
        let runs = runs_of(clue);
        let mut tail = vec![0; runs.len() + 1];
        for i in (0..runs.len()).rev() {
            tail[i] = tail[i + 1] + runs[i] + 1;
        }
        Self { runs, tail }
    }

    /// Feed one more cell to the column; `None` if the clue can no longer be met.
    fn advance(&self, state: ColumnState, filled: bool, rows_left: usize) -> Option<ColumnState> {
        let mut next = state;
        if filled {
            if next.run >= self.runs.len() {
                return None;
            }
            next.open += 1;
            if next.open > self.runs[next.run] {
                return None;
            }
        } else if next.open > 0 {
            if next.open != self.runs[next.run] {
                return None;
            }
            next.run += 1;
            next.open = 0;
        }

        if self.required(next) > rows_left {
            return None;
        }
        Some(next)
    }

    /// Minimum cells still needed below the current row
    fn required(&self, state: ColumnState) -> usize {
        if state.run >= self.runs.len() {
            return 0;
        }
        self.runs[state.run] - state.open + self.tail[state.run + 1]
    }
}

/// Count grids satisfying `clues`, stopping at `limit`.
pub(crate) fn count_solutions(clues: &Clues, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let width = clues.width();
    let height = clues.height();

    let mut rows = Vec::with_capacity(height);
    for clue in &clues.rows {
        let candidates = line_candidates(width, clue);
        if candidates.is_empty() {
            return 0;
        }
        rows.push(candidates);
    }

    let columns: Vec<ColumnClue> = clues.cols.iter().map(|c| ColumnClue::new(c)).collect();
    let start = vec![ColumnState::default(); width];
    if columns
        .iter()
        .zip(&start)
        .any(|(col, &state)| col.required(state) > height)
    {
        return 0;
    }

    let mut search = Search {
        rows,
        columns,
        limit,
        count: 0,
    };
    search.descend(0, &start);
    search.count
}

struct Search {
    rows: Vec<Vec<Vec<bool>>>,
    columns: Vec<ColumnClue>,
    limit: usize,
    count: usize,
}

impl Search {
    fn descend(&mut self, row: usize, states: &[ColumnState]) {
        if row == self.rows.len() {
            // The capacity bound at rows_left == 0 already closed every column
            self.count += 1;
            return;
        }

        let rows_left = self.rows.len() - row - 1;
        let mut next = Vec::with_capacity(states.len());

        for index in 0..self.rows[row].len() {
            next.clear();
            let feasible = {
                let line = &self.rows[row][index];
                self.columns
                    .iter()
                    .zip(states)
                    .zip(line)
                    .all(|((col, &state), &filled)| match col.advance(state, filled, rows_left) {
                        Some(s) => {
                            next.push(s);
                            true
                        }
                        None => false,
                    })
            };
            if !feasible {
                continue;
            }

            self.descend(row + 1, &next);
            if self.count >= self.limit {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_advance() {
        let col = ColumnClue::new(&[2, 1]);
        let s = ColumnState::default();
        // 4 cells: ##.#
        let s = col.advance(s, true, 3).unwrap();
        let s = col.advance(s, true, 2).unwrap();
        let s = col.advance(s, false, 1).unwrap();
        assert_eq!(s, ColumnState { run: 1, open: 0 });
        let s = col.advance(s, true, 0).unwrap();
        assert_eq!(col.required(s), 0);
    }

    #[test]
    fn test_column_rejects() {
        let col = ColumnClue::new(&[2]);
        let one = col.advance(ColumnState::default(), true, 3).unwrap();
        // Run closed too early
        assert!(col.advance(one, false, 2).is_none());
        // Run too long
        let two = col.advance(one, true, 2).unwrap();
        assert!(col.advance(two, true, 1).is_none());
        // Not enough rows left to fit the run
        assert!(col.advance(ColumnState::default(), false, 1).is_none());
        // Blank column never accepts a fill
        let blank = ColumnClue::new(&[0]);
        assert!(blank.advance(ColumnState::default(), true, 4).is_none());
    }
}
