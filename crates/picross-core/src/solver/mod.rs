//! Solution counting for clue sets.
//!
//! Only answers "how many grids fit these clues" up to a cap; it never
//! produces hints. The generator uses it to reject ambiguous candidates.

mod backtrack;
pub mod line;

use crate::{compute_clues, Clues, Grid};

pub use line::{line_candidates, placement_count};

/// Cap used by uniqueness checks: two solutions already prove ambiguity
pub const UNIQUENESS_LIMIT: usize = 2;

/// Stateless solver; all search state lives in each call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Count grids consistent with `clues`, stopping once `limit` is reached.
    ///
    /// When the limit is hit the returned value is the limit, not the real count.
    pub fn count_solutions(&self, clues: &Clues, limit: usize) -> usize {
        backtrack::count_solutions(clues, limit)
    }

    /// Check if the clues admit exactly one solution.
    pub fn has_unique_solution(&self, clues: &Clues) -> bool {
        self.count_solutions(clues, UNIQUENESS_LIMIT) == 1
    }

    /// Check if the grid is the only one matching its own clues.
    pub fn is_uniquely_solvable(&self, grid: &Grid) -> bool {
        self.has_unique_solution(&compute_clues(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clues(rows: &[&[usize]], cols: &[&[usize]]) -> Clues {
        Clues::new(
            rows.iter().map(|r| r.to_vec()).collect(),
            cols.iter().map(|c| c.to_vec()).collect(),
        )
    }

    #[test]
    fn test_full_row_is_unique() {
        let grid = Grid::from_rows(&[".....", "#####", ".....", ".....", "....."]).unwrap();
        assert!(Solver::new().is_uniquely_solvable(&grid));
        assert_eq!(Solver::new().count_solutions(&compute_clues(&grid), 10), 1);
    }

    #[test]
    fn test_odd_checkerboard_is_unique() {
        for size in [3, 5, 7] {
            let mut grid = Grid::new(size);
            for row in 0..size {
                for col in 0..size {
                    grid.set(crate::Position::new(row, col), (row + col) % 2 == 0);
                }
            }
            assert!(Solver::new().is_uniquely_solvable(&grid), "size {}", size);
        }
    }

    #[test]
    fn test_diagonal_switch_has_two_solutions() {
        let solver = Solver::new();
        let switch = clues(&[&[1], &[1]], &[&[1], &[1]]);
        assert_eq!(solver.count_solutions(&switch, 10), 2);
        assert!(!solver.has_unique_solution(&switch));

        let grid = Grid::from_rows(&["#.", ".#"]).unwrap();
        assert!(!solver.is_uniquely_solvable(&grid));
    }

    #[test]
    fn test_search_stops_at_limit() {
        let solver = Solver::new();
        // Every 4x4 permutation matrix fits: 24 solutions
        let one: &[usize] = &[1];
        let perms = clues(&[one; 4], &[one; 4]);
        assert_eq!(solver.count_solutions(&perms, 100), 24);
        assert_eq!(solver.count_solutions(&perms, UNIQUENESS_LIMIT), 2);
        assert_eq!(solver.count_solutions(&perms, 1), 1);
        assert_eq!(solver.count_solutions(&perms, 0), 0);
    }

    #[test]
    fn test_infeasible_clues() {
        let solver = Solver::new();
        // Row clue longer than the line
        assert_eq!(solver.count_solutions(&clues(&[&[3], &[0]], &[&[1], &[1]]), 2), 0);
        // Column clue taller than the board
        assert_eq!(solver.count_solutions(&clues(&[&[1], &[1]], &[&[3], &[0]]), 2), 0);
        // Row and column totals disagree
        assert_eq!(solver.count_solutions(&clues(&[&[2], &[0]], &[&[0], &[0]]), 2), 0);
    }

    #[test]
    fn test_blank_board_is_unique() {
        let grid = Grid::new(5);
        assert!(Solver::new().is_uniquely_solvable(&grid));
    }

    #[test]
    fn test_derived_clues_admit_their_grid() {
        let grid = Grid::from_rows(&["##..#", "#...#", ".###.", "...#.", "#.##."]).unwrap();
        assert!(Solver::new().count_solutions(&compute_clues(&grid), 2) >= 1);
    }
}
