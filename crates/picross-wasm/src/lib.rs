//! WebAssembly bindings for the picross engine
//!
//! The browser game passes grids as arrays of rows of `0`/`1` (marks use
//! `0..=3`) and receives plain JS objects back. Malformed input comes back as
//! a thrown error string.

use picross_core::{catalog, GenerateOptions, Generator, Grid, MarkGrid, SimpleRng};
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod api;


thread_local! {
    // Shared history for the free functions; the browser main thread is the only caller
    static GENERATOR: RefCell<Generator> = RefCell::new(Generator::new());
}

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn read_options(options: JsValue) -> Result<GenerateOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(GenerateOptions::default());
    }
    Ok(serde_wasm_bindgen::from_value(options)?)
}

/// Derive `{rows, cols}` clues from a solution grid
#[wasm_bindgen(js_name = computeClues)]
pub fn compute_clues(grid: JsValue) -> Result<JsValue, JsValue> {
    let grid: Grid = serde_wasm_bindgen::from_value(grid)?;
    to_js(&api::clues(&grid))
}

/// Whether the player's marks match the solution exactly
#[wasm_bindgen(js_name = equalsSolution)]
pub fn equals_solution(marks: JsValue, solution: JsValue) -> Result<bool, JsValue> {
    let marks: MarkGrid = serde_wasm_bindgen::from_value(marks)?;
    let solution: Grid = serde_wasm_bindgen::from_value(solution)?;
    api::check_marks(&marks, &solution).map_err(|e| JsValue::from_str(&e))
}

/// Generate `{seed, heroPuzzles, enemyPuzzles}`.
///
/// Unseeded calls avoid layouts recently returned by this function; seeded
/// calls always reproduce the same set.
#[wasm_bindgen(js_name = generateBattlePuzzles)]
pub fn generate_battle_puzzles(
    node_id: &str,
    board_size: usize,
    count: usize,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    api::check_count(count).map_err(|e| JsValue::from_str(&e))?;
    let options = read_options(options)?;
    let result = GENERATOR.with(|generator| {
        api::shared_battle(&mut generator.borrow_mut(), node_id, board_size, count, options)
    });
    to_js(&result)
}

/// Every built-in template of the given size
#[wasm_bindgen(js_name = getPuzzlesForSize)]
pub fn get_puzzles_for_size(size: usize) -> Result<JsValue, JsValue> {
    to_js(&catalog::puzzles_for_size(size))
}

/// `count` random built-in templates of the given size
#[wasm_bindgen(js_name = getRandomPuzzlesForSize)]
pub fn get_random_puzzles_for_size(size: usize, count: usize) -> Result<JsValue, JsValue> {
    api::check_count(count).map_err(|e| JsValue::from_str(&e))?;
    let mut rng = SimpleRng::new();
    to_js(&catalog::random_puzzles_for_size(size, count, &mut rng))
}

/// `count` random templates from a node's pool
#[wasm_bindgen(js_name = getRandomPuzzlesForNode)]
pub fn get_random_puzzles_for_node(
    node_id: &str,
    size: usize,
    count: usize,
) -> Result<JsValue, JsValue> {
    api::check_count(count).map_err(|e| JsValue::from_str(&e))?;
    let mut rng = SimpleRng::new();
    to_js(&catalog::random_puzzles_for_node(node_id, size, count, &mut rng))
}

/// A generator with its own recent-layout history
#[wasm_bindgen]
pub struct PuzzleEngine {
    generator: Generator,
}

impl Default for PuzzleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PuzzleEngine {
    /// Create an engine with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> PuzzleEngine {
        PuzzleEngine {
            generator: Generator::new(),
        }
    }

    /// Create an engine from a JSON `GeneratorConfig`
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<PuzzleEngine, JsValue> {
        let config = api::config_from_json(json).map_err(|e| JsValue::from_str(&e))?;
        Ok(PuzzleEngine {
            generator: Generator::with_config(config),
        })
    }

    /// Generate `{seed, heroPuzzles, enemyPuzzles}`
    #[wasm_bindgen]
    pub fn generate(
        &mut self,
        node_id: &str,
        board_size: usize,
        count: usize,
        options: JsValue,
    ) -> Result<JsValue, JsValue> {
        api::check_count(count).map_err(|e| JsValue::from_str(&e))?;
        let options = read_options(options)?;
        let result = self.generator.generate(node_id, board_size, count, options);
        to_js(&result)
    }

    /// Statistics of the last `generate` call as JSON
    #[wasm_bindgen(js_name = lastStatsJson)]
    pub fn last_stats_json(&self) -> String {
        api::stats_json(&self.generator)
    }

    /// Forget recently emitted layouts
    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.generator.clear_history();
    }
}
