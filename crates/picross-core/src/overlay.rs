//! Extra variation on top of a transformed base shape.

use crate::transform::transform_template;
use crate::{Grid, SimpleRng};

/// Probabilities and bounds for overlay merging and sparse-cell pruning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variation {
    /// Chance to OR a transformed overlay onto the base
    pub overlay_chance: f64,
    /// Chance to remove sparse cells afterwards
    pub prune_chance: f64,
    /// Upper bound on cells removed in one pruning step
    pub max_prune: usize,
}

impl Default for Variation {
    fn default() -> Self {
        Self {
            overlay_chance: 0.6,
            prune_chance: 0.35,
            max_prune: 2,
        }
    }
}

/// Merge a randomly placed overlay onto `base`.
///
/// Returns `None` when no overlay fits the board or the merge adds nothing.
pub fn apply_overlay(
    base: &Grid,
    overlays: &[Grid],
    board_size: usize,
    rng: &mut SimpleRng,
) -> Option<Grid> {
    let overlay = rng.choose(overlays)?;
    let placed = transform_template(overlay, board_size, rng)?;
    let merged = base.merged(&placed);
    if merged == *base {
        None
    } else {
        Some(merged)
    }
}

/// Remove up to `count` filled cells that have at most one filled neighbour.
///
/// Each removal picks uniformly among the cells eligible at that moment. If
/// the result would be blank the input is returned unchanged.
pub fn prune_sparse(grid: &Grid, count: usize, rng: &mut SimpleRng) -> Grid {
    let mut pruned = grid.clone();
    for _ in 0..count {
        let eligible: Vec<_> = pruned
            .filled_positions()
            .into_iter()
            .filter(|&p| pruned.filled_neighbors(p) <= 1)
            .collect();
        match rng.choose(&eligible) {
            Some(&pos) => pruned.set(pos, false),
            None => break,
        }
    }
    if pruned.is_blank() {
        grid.clone()
    } else {
        pruned
    }
}

/// Apply the overlay and pruning steps to a base candidate
pub fn vary(
    base: Grid,
    overlays: &[Grid],
    board_size: usize,
    variation: &Variation,
    rng: &mut SimpleRng,
) -> Grid {
    let mut candidate = base;

    if !overlays.is_empty() && rng.chance(variation.overlay_chance) {
        if let Some(merged) = apply_overlay(&candidate, overlays, board_size, rng) {
            candidate = merged;
        }
    }

    if variation.max_prune > 0 && rng.chance(variation.prune_chance) {
        let count = 1 + rng.next_usize(variation.max_prune);
        candidate = prune_sparse(&candidate, count, rng);
    }

    candidate
}
