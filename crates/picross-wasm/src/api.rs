//! Boundary logic shared by the exported functions.
//!
//! Everything here works on plain engine types so it runs under native
//! `cargo test`; `lib.rs` only moves values in and out of `JsValue`.

use picross_core::{
    compute_clues, equals_solution, BattlePuzzles, Clues, GenerateOptions, Generator,
    GeneratorConfig, Grid, MarkGrid,
};

/// Largest puzzle count a single JS request may ask for
pub const MAX_REQUEST_COUNT: usize = 1000;

/// Clues of a solution grid
pub fn clues(grid: &Grid) -> Clues {
    compute_clues(grid)
}

/// Compare the player's marks with the solution.
///
/// Mismatched sizes are reported instead of tripping the engine's assertion.
pub fn check_marks(marks: &MarkGrid, solution: &Grid) -> Result<bool, String> {
    if marks.size() != solution.size() {
        return Err(format!(
            "marks are {0}x{0} but the solution is {1}x{1}",
            marks.size(),
            solution.size()
        ));
    }
    Ok(equals_solution(marks, solution))
}

/// Reject counts the browser game could never display
pub fn check_count(count: usize) -> Result<(), String> {
    if count > MAX_REQUEST_COUNT {
        return Err(format!(
            "count {} exceeds the limit of {}",
            count, MAX_REQUEST_COUNT
        ));
    }
    Ok(())
}

/// Serve a battle request for the shared generator.
///
/// A request with an explicit seed runs on an empty history with the shared
/// configuration, so the same seed always yields the same set. Unseeded
/// requests use and extend the shared history.
pub fn shared_battle(
    shared: &mut Generator,
    node_id: &str,
    board_size: usize,
    count: usize,
    options: GenerateOptions,
) -> BattlePuzzles {
    match options.seed {
        Some(_) => Generator::with_config(shared.config().clone())
            .generate(node_id, board_size, count, options),
        None => shared.generate(node_id, board_size, count, options),
    }
}

/// Parse a generator configuration; missing fields keep their defaults
pub fn config_from_json(json: &str) -> Result<GeneratorConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid generator config: {}", e))
}

/// Generator statistics of the last request as JSON
pub fn stats_json(generator: &Generator) -> String {
    serde_json::to_string(&generator.last_stats()).unwrap_or_default()
}
