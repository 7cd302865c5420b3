//! Rotation, mirroring and translation of template shapes.
//!
//! Coordinates follow the board: `x` is the column, `y` the row, and rotations
//! turn the board around its origin before the shape is re-anchored by its
//! bounding box.

use crate::{Grid, Position, SimpleRng};

/// Quarter-turn applied to a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Map a cell on a board of `size` cells per side
    pub fn apply(self, pos: Position, size: usize) -> Position {
        let (x, y) = (pos.col, pos.row);
        let (x, y) = match self {
            Rotation::R0 => (x, y),
            Rotation::R90 => (size - 1 - y, x),
            Rotation::R180 => (size - 1 - x, size - 1 - y),
            Rotation::R270 => (y, size - 1 - x),
        };
        Position::new(y, x)
    }
}

/// Bounding box of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub origin: Position,
    pub width: usize,
    pub height: usize,
}

fn extent_of(cells: &[Position]) -> Option<Extent> {
    let min_row = cells.iter().map(|p| p.row).min()?;
    let max_row = cells.iter().map(|p| p.row).max()?;
    let min_col = cells.iter().map(|p| p.col).min()?;
    let max_col = cells.iter().map(|p| p.col).max()?;
    Some(Extent {
        origin: Position::new(min_row, min_col),
        width: max_col - min_col + 1,
        height: max_row - min_row + 1,
    })
}

/// Filled cells of `template` after rotation and optional horizontal mirror
fn oriented(template: &Grid, rotation: Rotation, mirrored: bool) -> Vec<Position> {
    let size = template.size();
    template
        .filled_positions()
        .into_iter()
        .map(|pos| {
            let p = rotation.apply(pos, size);
            if mirrored {
                Position::new(p.row, size - 1 - p.col)
            } else {
                p
            }
        })
        .collect()
}

/// Bounding box of the oriented shape, `None` for an empty template
pub fn shape_extent(template: &Grid, rotation: Rotation, mirrored: bool) -> Option<Extent> {
    extent_of(&oriented(template, rotation, mirrored))
}

/// One concrete placement of a template on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub rotation: Rotation,
    pub mirrored: bool,
    /// Top-left corner of the shape's bounding box after translation
    pub offset: Position,
}

impl Transform {
    /// Draw a rotation, mirror flag and in-bounds offset for `template`.
    ///
    /// `None` when the template is empty.
    pub fn random(template: &Grid, rng: &mut SimpleRng) -> Option<Transform> {
        let rotation = Rotation::ALL[rng.next_usize(4)];
        let mirrored = rng.chance(0.5);
        let extent = shape_extent(template, rotation, mirrored)?;
        let size = template.size();
        let offset = Position::new(
            rng.next_usize(size - extent.height + 1),
            rng.next_usize(size - extent.width + 1),
        );
        Some(Transform {
            rotation,
            mirrored,
            offset,
        })
    }

    /// Render the transformed template into a fresh grid of the same size.
    ///
    /// `None` when the template is empty or the offset pushes the shape off the board.
    pub fn apply(&self, template: &Grid) -> Option<Grid> {
        let size = template.size();
        let cells = oriented(template, self.rotation, self.mirrored);
        let extent = extent_of(&cells)?;
        if self.offset.row + extent.height > size || self.offset.col + extent.width > size {
            return None;
        }

        let mut grid = Grid::new(size);
        for p in cells {
            grid.set(
                Position::new(
                    p.row - extent.origin.row + self.offset.row,
                    p.col - extent.origin.col + self.offset.col,
                ),
                true,
            );
        }
        Some(grid)
    }
}

/// Randomly rotate, mirror and translate `template` on a `board_size` board.
///
/// Inapplicable (returns `None`) when the template's size differs from the
/// board or the template has no filled cell.
pub fn transform_template(template: &Grid, board_size: usize, rng: &mut SimpleRng) -> Option<Grid> {
    if template.size() != board_size {
        return None;
    }
    Transform::random(template, rng)?.apply(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn boot() -> Grid {
        Grid::from_rows(&["#....", "#....", "##...", ".....", "....."]).unwrap()
    }

    #[test]
    fn test_rotation_formulas() {
        let p = Position::new(1, 0); // x = 0, y = 1
        assert_eq!(Rotation::R90.apply(p, 5), Position::new(0, 3));
        assert_eq!(Rotation::R180.apply(p, 5), Position::new(3, 4));
        assert_eq!(Rotation::R270.apply(p, 5), Position::new(4, 1));
        assert_eq!(Rotation::R0.apply(p, 5), p);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let p = Position::new(2, 4);
        let mut q = p;
        for _ in 0..4 {
            q = Rotation::R90.apply(q, 7);
        }
        assert_eq!(q, p);
    }

    #[test]
    fn test_every_orientation_and_offset_keeps_shape() {
        let template = boot();
        let count = template.filled_count();
        for rotation in Rotation::ALL {
            for mirrored in [false, true] {
                let extent = shape_extent(&template, rotation, mirrored).unwrap();
                for row in 0..=(5 - extent.height) {
                    for col in 0..=(5 - extent.width) {
                        let t = Transform {
                            rotation,
                            mirrored,
                            offset: Position::new(row, col),
                        };
                        let grid = t.apply(&template).unwrap();
                        assert_eq!(grid.size(), 5);
                        assert_eq!(grid.filled_count(), count);
                        let placed = shape_extent(&grid, Rotation::R0, false).unwrap();
                        assert_eq!(placed.origin, Position::new(row, col));
                        assert_eq!((placed.width, placed.height), (extent.width, extent.height));
                    }
                }
            }
        }
    }

    #[test]
    fn test_builtin_templates_keep_shape_in_every_placement() {
        let catalog = Catalog::builtin();
        for size in [5, 15, 20, 25] {
            for template in catalog.templates_for_size(size) {
                let grid = &template.grid;
                let count = grid.filled_count();
                for rotation in Rotation::ALL {
                    for mirrored in [false, true] {
                        let extent = shape_extent(grid, rotation, mirrored).unwrap();
                        for row in 0..=(size - extent.height) {
                            for col in 0..=(size - extent.width) {
                                let t = Transform {
                                    rotation,
                                    mirrored,
                                    offset: Position::new(row, col),
                                };
                                let placed = t.apply(grid).unwrap();
                                assert_eq!(placed.size(), size, "{}", template.name);
                                assert_eq!(placed.filled_count(), count, "{}", template.name);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_quarter_turn_swaps_extent() {
        let template = boot();
        let upright = shape_extent(&template, Rotation::R0, false).unwrap();
        let turned = shape_extent(&template, Rotation::R90, false).unwrap();
        assert_eq!((upright.width, upright.height), (2, 3));
        assert_eq!((turned.width, turned.height), (3, 2));
    }

    #[test]
    fn test_mirror_flips_columns() {
        let template = boot();
        let t = Transform {
            rotation: Rotation::R0,
            mirrored: true,
            offset: Position::new(0, 0),
        };
        let grid = t.apply(&template).unwrap();
        assert_eq!(grid.to_string(), ".#...\n.#...\n##...\n.....\n.....\n");
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let t = Transform {
            rotation: Rotation::R0,
            mirrored: false,
            offset: Position::new(3, 0),
        };
        assert!(t.apply(&boot()).is_none());
    }

    #[test]
    fn test_inapplicable_templates() {
        let mut rng = SimpleRng::with_seed(1);
        assert!(transform_template(&boot(), 15, &mut rng).is_none());
        assert!(transform_template(&Grid::new(5), 5, &mut rng).is_none());
    }

    #[test]
    fn test_random_transform_stays_on_board() {
        let mut rng = SimpleRng::with_seed(99);
        let template = boot();
        for _ in 0..200 {
            let grid = transform_template(&template, 5, &mut rng).unwrap();
            assert_eq!(grid.filled_count(), template.filled_count());
        }
    }
}
