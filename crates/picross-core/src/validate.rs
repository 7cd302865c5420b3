//! Submission check: does the player's board match the solution?

use crate::{Grid, MarkGrid, Position};

/// True iff every filled mark sits on a filled solution cell and vice versa.
///
/// Crossed, tentative and untouched cells all count as unfilled.
///
/// # Panics
///
/// Panics if the two grids differ in size.
pub fn equals_solution(marks: &MarkGrid, solution: &Grid) -> bool {
    assert_eq!(
        marks.size(),
        solution.size(),
        "mark grid and solution must have the same size"
    );
    let size = solution.size();
    (0..size).all(|row| {
        (0..size).all(|col| {
            let pos = Position::new(row, col);
            marks.get(pos).is_filled() == solution.get(pos)
        })
    })
}
