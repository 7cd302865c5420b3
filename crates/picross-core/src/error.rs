use thiserror::Error;

/// Errors raised while building a grid from external input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// No rows at all
    #[error("grid has no rows")]
    Empty,
    /// A row whose length differs from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Rows are consistent but the grid is not square
    #[error("grid has {rows} rows of {cols} cells, expected a square")]
    NotSquare { rows: usize, cols: usize },
    /// A character that is neither a filled nor an empty cell
    #[error("unknown cell character {found:?} in row {row}")]
    InvalidCell { row: usize, found: char },
    /// A numeric cell or mark code out of range
    #[error("unknown cell code {0}")]
    InvalidCode(u8),
}
