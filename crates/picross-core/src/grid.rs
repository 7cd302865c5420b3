use crate::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Check that `lens` describes a non-empty square and return its size.
fn square_size(lens: impl IntoIterator<Item = usize>) -> Result<usize, GridError> {
    let mut rows = 0;
    let mut width = None;
    for (row, len) in lens.into_iter().enumerate() {
        match width {
            None => width = Some(len),
            Some(expected) if expected != len => {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: len,
                })
            }
            Some(_) => {}
        }
        rows += 1;
    }
    match width {
        None | Some(0) => Err(GridError::Empty),
        Some(cols) if cols != rows => Err(GridError::NotSquare { rows, cols }),
        Some(cols) => Ok(cols),
    }
}

/// Square boolean grid used for solutions, templates and generated variants.
///
/// Serializes as an array of rows of `0`/`1` integers, the shape the browser
/// game exchanges with the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Parse ASCII rows. `#`, `1`, `X` are filled; `.`, `0`, `-`, space are empty.
    ///
    /// Lowercase `x` is rejected rather than guessed at.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let size = square_size(rows.iter().map(|r| r.as_ref().chars().count()))?;
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            for ch in line.as_ref().chars() {
                let filled = match ch {
                    '#' | '1' | 'X' => true,
                    '.' | '0' | '-' | ' ' => false,
                    found => return Err(GridError::InvalidCell { row, found }),
                };
                cells.push(filled);
            }
        }
        Ok(Self { size, cells })
    }

    /// Build from nested boolean rows
    pub fn from_bools(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let size = square_size(rows.iter().map(Vec::len))?;
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pos: Position) -> bool {
        self.cells[pos.row * self.size + pos.col]
    }

    pub fn set(&mut self, pos: Position, filled: bool) {
        self.cells[pos.row * self.size + pos.col] = filled;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn column(&self, col: usize) -> Vec<bool> {
        (0..self.size).map(|row| self.cells[row * self.size + col]).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when no cell is filled
    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Positions of all filled cells in reading order
    pub fn filled_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    /// Number of filled orthogonal neighbours of `pos`
    pub fn filled_neighbors(&self, pos: Position) -> usize {
        let mut count = 0;
        if pos.row > 0 && self.get(Position::new(pos.row - 1, pos.col)) {
            count += 1;
        }
        if pos.row + 1 < self.size && self.get(Position::new(pos.row + 1, pos.col)) {
            count += 1;
        }
        if pos.col > 0 && self.get(Position::new(pos.row, pos.col - 1)) {
            count += 1;
        }
        if pos.col + 1 < self.size && self.get(Position::new(pos.row, pos.col + 1)) {
            count += 1;
        }
        count
    }

    /// Cell-wise OR with another grid of the same size
    pub fn merged(&self, other: &Grid) -> Grid {
        assert_eq!(self.size, other.size, "cannot merge grids of different sizes");
        Grid {
            size: self.size,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| a || b)
                .collect(),
        }
    }

    /// True when every row reads the same left-to-right and right-to-left
    pub fn is_mirror_symmetric(&self) -> bool {
        self.rows().all(|row| row.iter().eq(row.iter().rev()))
    }

    /// Canonical row-major `1`/`0` encoding used as the layout identity
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| if c { '1' } else { '0' }).collect()
    }

    /// Nested boolean rows
    pub fn to_bools(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Rows separated by newlines or `/`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(|c| c == '\n' || c == '/')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let size = square_size(rows.iter().map(Vec::len))?;
        let mut cells = Vec::with_capacity(size * size);
        for code in rows.into_iter().flatten() {
            cells.push(match code {
                0 => false,
                1 => true,
                other => return Err(GridError::InvalidCode(other)),
            });
        }
        Ok(Self { size, cells })
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(|row| row.iter().map(|&c| c as u8).collect()).collect()
    }
}

/// Player mark on a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mark {
    #[default]
    Empty,
    Filled,
    /// Marked as known-empty
    Crossed,
    /// Tentative; never counts as filled
    Maybe,
}

impl Mark {
    pub fn is_filled(self) -> bool {
        self == Mark::Filled
    }
}

impl TryFrom<u8> for Mark {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Mark::Empty),
            1 => Ok(Mark::Filled),
            2 => Ok(Mark::Crossed),
            3 => Ok(Mark::Maybe),
            other => Err(GridError::InvalidCode(other)),
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Empty => 0,
            Mark::Filled => 1,
            Mark::Crossed => 2,
            Mark::Maybe => 3,
        }
    }
}

/// The player's working grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Mark>>", into = "Vec<Vec<Mark>>")]
pub struct MarkGrid {
    size: usize,
    marks: Vec<Mark>,
}

impl MarkGrid {
    /// Create an untouched board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            marks: vec![Mark::Empty; size * size],
        }
    }

    /// Marks that reproduce `solution` exactly: filled cells become `Filled`, the rest `Empty`
    pub fn from_solution(solution: &Grid) -> Self {
        let size = solution.size();
        let mut marks = Self::new(size);
        for pos in solution.filled_positions() {
            marks.set(pos, Mark::Filled);
        }
        marks
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pos: Position) -> Mark {
        self.marks[pos.row * self.size + pos.col]
    }

    pub fn set(&mut self, pos: Position, mark: Mark) {
        self.marks[pos.row * self.size + pos.col] = mark;
    }

    /// All marks in row-major order
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }
}

impl TryFrom<Vec<Vec<Mark>>> for MarkGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Mark>>) -> Result<Self, Self::Error> {
        let size = square_size(rows.iter().map(Vec::len))?;
        Ok(Self {
            size,
            marks: rows.into_iter().flatten().collect(),
        })
    }
}

impl From<MarkGrid> for Vec<Vec<Mark>> {
    fn from(grid: MarkGrid) -> Self {
        grid.marks.chunks(grid.size.max(1)).map(<[Mark]>::to_vec).collect()
    }
}
