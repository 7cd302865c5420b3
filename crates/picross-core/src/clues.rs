//! Row and column clues derived from a solution grid.

use crate::Grid;
use serde::{Deserialize, Serialize};

/// Run-length clues for every row and column of a grid.
///
/// An all-empty line has the clue `[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clues {
    pub rows: Vec<Vec<usize>>,
    pub cols: Vec<Vec<usize>>,
}

impl Clues {
    pub fn new(rows: Vec<Vec<usize>>, cols: Vec<Vec<usize>>) -> Self {
        Self { rows, cols }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.cols.len()
    }
}

/// Run lengths of consecutive filled cells in `line`, `[0]` if none
pub fn line_clue(line: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0;
    for &filled in line {
        if filled {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    if runs.is_empty() {
        runs.push(0);
    }
    runs
}

/// Derive the clue set of a solution grid
pub fn compute_clues(grid: &Grid) -> Clues {
    let rows = grid.rows().map(line_clue).collect();
    let cols = (0..grid.size()).map(|c| line_clue(&grid.column(c))).collect();
    Clues { rows, cols }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clue() {
        assert_eq!(line_clue(&[true, true, false, true, false]), vec![2, 1]);
        assert_eq!(line_clue(&[false, false, false]), vec![0]);
        assert_eq!(line_clue(&[true, true, true]), vec![3]);
        assert_eq!(line_clue(&[false, true, false, true, true]), vec![1, 2]);
        assert_eq!(line_clue(&[]), vec![0]);
    }

    #[test]
    fn test_compute_clues() {
        let grid = Grid::from_rows(&[
            ".#.#.",
            "#####",
            "#####",
            ".###.",
            "..#..",
        ])
        .unwrap();
        let clues = compute_clues(&grid);

        assert_eq!(
            clues.rows,
            vec![vec![1, 1], vec![5], vec![5], vec![3], vec![1]]
        );
        assert_eq!(
            clues.cols,
            vec![vec![2], vec![4], vec![4], vec![4], vec![2]]
        );
    }

    #[test]
    fn test_blank_grid_clues() {
        let clues = compute_clues(&Grid::new(4));
        assert!(clues.rows.iter().all(|c| c == &vec![0]));
        assert!(clues.cols.iter().all(|c| c == &vec![0]));
        assert_eq!(clues.height(), 4);
        assert_eq!(clues.width(), 4);
    }

    #[test]
    fn test_clues_match_every_line() {
        let grid = Grid::from_rows(&["#.#.#", "##.##", ".....", "#####", "..#.."]).unwrap();
        let clues = compute_clues(&grid);
        for i in 0..5 {
            assert_eq!(clues.rows[i], line_clue(grid.row(i)));
            assert_eq!(clues.cols[i], line_clue(&grid.column(i)));
        }
        assert_eq!(clues.rows[2], vec![0]);
        assert_eq!(clues.cols[0], vec![2, 1]);
    }
}
