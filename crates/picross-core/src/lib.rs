//! Picross puzzle engine
//!
//! Clue derivation, solution checking, a uniqueness solver and a seeded
//! battle puzzle generator built on a catalog of hand-authored templates.

mod error;
mod grid;
mod rng;
mod validate;

pub mod cache;
pub mod catalog;
pub mod clues;
pub mod generator;
pub mod overlay;
pub mod solver;
pub mod transform;

pub use cache::RecentLayouts;
pub use catalog::{
    puzzles_for_size, random_puzzles_for_node, random_puzzles_for_size, Catalog,
    DifficultyNode, NodePool, Template,
};
pub use clues::{compute_clues, line_clue, Clues};
pub use error::GridError;
pub use generator::{
    generate_battle_puzzles, BattlePuzzles, GenerateOptions, GenerationStats, Generator,
    GeneratorConfig,
};
pub use grid::{Grid, Mark, MarkGrid, Position};
pub use rng::{fresh_seed, SimpleRng};
pub use solver::Solver;
pub use validate::equals_solution;
