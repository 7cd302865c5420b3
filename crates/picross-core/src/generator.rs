use crate::cache::{RecentLayouts, DEFAULT_RECENT_CAPACITY};
use crate::catalog::{draw, Catalog, DifficultyNode};
use crate::overlay::{vary, Variation};
use crate::rng::fresh_seed;
use crate::transform::transform_template;
use crate::{Grid, SimpleRng, Solver};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Added to the resolved seed to derive the hero ordering stream
pub const HERO_SEED_OFFSET: u32 = 0x9E37_79B9;
/// Added to the resolved seed to derive the enemy ordering stream
pub const ENEMY_SEED_OFFSET: u32 = 0x7F4A_7C15;
/// Added to the resolved seed to derive the top-up stream
pub const TOP_UP_SEED_OFFSET: u32 = 0x2545_F491;

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum candidates drawn per request
    pub max_attempts: usize,
    /// Chance to merge an overlay onto a candidate
    pub overlay_chance: f64,
    /// Chance to prune sparse cells from a candidate
    pub prune_chance: f64,
    /// Maximum cells removed by one pruning step
    pub max_prune: usize,
    /// Layouts remembered per node to avoid near-term repeats
    pub recent_capacity: usize,
    /// Fraction of the attempt budget during which mirror-symmetric candidates are skipped
    pub symmetry_filter_fraction: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let variation = Variation::default();
        Self {
            max_attempts: 5000,
            overlay_chance: variation.overlay_chance,
            prune_chance: variation.prune_chance,
            max_prune: variation.max_prune,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            symmetry_filter_fraction: 0.5,
        }
    }
}

impl GeneratorConfig {
    pub fn variation(&self) -> Variation {
        Variation {
            overlay_chance: self.overlay_chance,
            prune_chance: self.prune_chance,
            max_prune: self.max_prune,
        }
    }
}

/// Per-request knobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Seed for a reproducible run; a fresh one is drawn when absent
    pub seed: Option<u32>,
    /// Overrides `GeneratorConfig::max_attempts`
    pub max_attempts: Option<usize>,
}

impl GenerateOptions {
    pub fn seeded(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Matched puzzle orderings for one battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlePuzzles {
    /// Seed that reproduces this result
    pub seed: u32,
    pub hero_puzzles: Vec<Grid>,
    pub enemy_puzzles: Vec<Grid>,
}

/// What happened during the last request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub attempts: usize,
    pub accepted: usize,
    pub topped_up: usize,
    pub inapplicable: usize,
    pub duplicates: usize,
    pub recent: usize,
    pub symmetric: usize,
    pub ambiguous: usize,
}

/// Picross puzzle generator.
///
/// Owns the recent-layout history, so consecutive requests for the same node
/// steer away from layouts it has just emitted.
pub struct Generator {
    config: GeneratorConfig,
    cache: RecentLayouts,
    catalog: Cow<'static, Catalog>,
    last_stats: GenerationStats,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        let cache = RecentLayouts::new(config.recent_capacity);
        Self {
            config,
            cache,
            catalog: Cow::Borrowed(Catalog::builtin()),
            last_stats: GenerationStats::default(),
        }
    }

    /// Create a generator that continues from an existing history
    pub fn with_cache(config: GeneratorConfig, cache: RecentLayouts) -> Self {
        Self {
            cache,
            ..Self::with_config(config)
        }
    }

    /// Replace the template source
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Cow::Owned(catalog);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn cache(&self) -> &RecentLayouts {
        &self.cache
    }

    /// Forget every recently emitted layout
    pub fn clear_history(&mut self) {
        self.cache.clear();
    }

    /// Statistics of the most recent `generate` call
    pub fn last_stats(&self) -> GenerationStats {
        self.last_stats
    }

    /// Generate `count` uniquely solvable puzzles for `node_id` on a `board_size` board.
    ///
    /// Never fails: shortfalls are topped up from the static pool, and an
    /// empty pool yields empty orderings.
    pub fn generate(
        &mut self,
        node_id: &str,
        board_size: usize,
        count: usize,
        options: GenerateOptions,
    ) -> BattlePuzzles {
        let seed = options.seed.unwrap_or_else(fresh_seed);
        let max_attempts = options.max_attempts.unwrap_or(self.config.max_attempts);
        let symmetry_cutoff = (max_attempts as f64 * self.config.symmetry_filter_fraction) as usize;
        let variation = self.config.variation();
        let history_key = history_key(node_id);
        let pool = self.catalog.resolve(node_id, board_size);
        let solver = Solver::new();

        let mut rng = SimpleRng::with_seed(seed);
        let mut stats = GenerationStats::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut puzzles: Vec<Grid> = Vec::new();

        while puzzles.len() < count && stats.attempts < max_attempts {
            stats.attempts += 1;

            let Some(template) = rng.choose(&pool.templates) else {
                break;
            };
            let Some(base) = transform_template(template, board_size, &mut rng) else {
                stats.inapplicable += 1;
                continue;
            };
            let candidate = vary(base, &pool.overlays, board_size, &variation, &mut rng);
            let layout = candidate.encode();

            if seen.contains(&layout) {
                stats.duplicates += 1;
                continue;
            }
            if self.cache.contains(&history_key, &layout) {
                stats.recent += 1;
                continue;
            }
            if stats.attempts <= symmetry_cutoff && candidate.is_mirror_symmetric() {
                stats.symmetric += 1;
                continue;
            }
            if !solver.is_uniquely_solvable(&candidate) {
                log::trace!("attempt {}: ambiguous candidate\n{}", stats.attempts, candidate);
                stats.ambiguous += 1;
                continue;
            }

            self.cache.record(&history_key, &layout);
            seen.insert(layout);
            puzzles.push(candidate);
        }
        stats.accepted = puzzles.len();

        if puzzles.len() < count {
            let mut top_up_rng = SimpleRng::with_seed(seed.wrapping_add(TOP_UP_SEED_OFFSET));
            let extra = draw(&pool.templates, count - puzzles.len(), &mut top_up_rng);
            stats.topped_up = extra.len();
            puzzles.extend(extra);
        }

        log::debug!(
            "{} {}x{} seed {}: {} accepted, {} topped up after {} attempts",
            node_id,
            board_size,
            board_size,
            seed,
            stats.accepted,
            stats.topped_up,
            stats.attempts
        );
        self.last_stats = stats;

        let mut hero_puzzles = puzzles.clone();
        SimpleRng::with_seed(seed.wrapping_add(HERO_SEED_OFFSET)).shuffle(&mut hero_puzzles);
        let mut enemy_puzzles = puzzles;
        SimpleRng::with_seed(seed.wrapping_add(ENEMY_SEED_OFFSET)).shuffle(&mut enemy_puzzles);

        BattlePuzzles {
            seed,
            hero_puzzles,
            enemy_puzzles,
        }
    }
}

/// Known nodes share one history whatever spelling the caller uses
fn history_key(node_id: &str) -> String {
    match node_id.parse::<DifficultyNode>() {
        Ok(node) => node.id().to_string(),
        Err(_) => node_id.to_string(),
    }
}

/// One-off generation with a fresh history
pub fn generate_battle_puzzles(
    node_id: &str,
    board_size: usize,
    count: usize,
    options: GenerateOptions,
) -> BattlePuzzles {
    Generator::new().generate(node_id, board_size, count, options)
}
