//! Picross developer CLI.
//!
//! Commands:
//! - list: Show the built-in template pools
//! - generate: Build a battle puzzle set for a node
//! - check: Print the clues of a hand-drawn grid and test it for uniqueness
//!
//! Grids are written as rows of `#` (filled) and `.` (empty):
//!
//! ```text
//! $ picross check .#.#. ##### ##### .###. ..#..
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};

use picross_core::{
    compute_clues, Catalog, Clues, DifficultyNode, GenerateOptions, Generator, GeneratorConfig,
    Grid, Solver,
};

#[derive(Parser)]
#[command(name = "picross")]
#[command(version)]
#[command(about = "Inspect and generate picross puzzles")]
struct Cli {
    /// Enable debug messages
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in templates
    List {
        /// Only templates of this board size
        #[arg(long)]
        size: Option<usize>,

        /// Only templates of this node (elf-easy, easy, ...)
        #[arg(long)]
        node: Option<DifficultyNode>,
    },

    /// Generate hero and enemy puzzle orderings
    Generate {
        /// Node id; unknown ids use every template of the board size
        #[arg(long, default_value = "elf-practice")]
        node: String,

        /// Board size
        #[arg(long, default_value = "5")]
        size: usize,

        /// Number of puzzles
        #[arg(long, default_value = "5")]
        count: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u32>,

        /// Attempt budget, overrides the config file
        #[arg(long)]
        max_attempts: Option<usize>,

        /// JSON generator configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print clues for a grid and whether they have a unique solution
    Check {
        /// Grid rows, `#` filled and `.` empty
        #[arg(required = true)]
        rows: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::List { size, node } => list(Catalog::builtin(), size, node),
        Commands::Generate {
            node,
            size,
            count,
            seed,
            max_attempts,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => GeneratorConfig::default(),
            };
            let options = GenerateOptions { seed, max_attempts };
            generate(config, &node, size, count, options, json)
        }
        Commands::Check { rows } => check(&rows),
    }
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!("loaded {:?}", config);
    Ok(config)
}

fn list(catalog: &Catalog, size: Option<usize>, node: Option<DifficultyNode>) -> Result<()> {
    for n in DifficultyNode::ALL {
        if node.is_some_and(|wanted| wanted != n) {
            continue;
        }
        let board = size.unwrap_or_else(|| n.board_size());
        let Some(pool) = catalog.node_pool(n, board) else {
            continue;
        };
        println!(
            "{} {}x{}: {} templates, {} overlays",
            n,
            board,
            board,
            pool.templates.len(),
            pool.overlays.len()
        );
        for template in &pool.templates {
            println!("  {} ({} cells)", template.name, template.grid.filled_count());
        }
    }
    Ok(())
}

fn generate(
    config: GeneratorConfig,
    node: &str,
    size: usize,
    count: usize,
    options: GenerateOptions,
    json: bool,
) -> Result<()> {
    let mut generator = Generator::with_config(config);
    let result = generator.generate(node, size, count, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let stats = generator.last_stats();
    println!("Seed: {}", result.seed);
    for (i, grid) in result.hero_puzzles.iter().enumerate() {
        println!("\nPuzzle {}:", i + 1);
        print!("{}", grid);
    }
    println!("\nEnemy order: {}", enemy_order(&result.hero_puzzles, &result.enemy_puzzles));

    println!("\nSummary:");
    println!("  Attempts: {}", stats.attempts);
    println!("  Accepted: {}", stats.accepted);
    println!("  Topped up: {}", stats.topped_up);
    println!(
        "  Rejected: {} ambiguous, {} symmetric, {} duplicate, {} recent, {} inapplicable",
        stats.ambiguous, stats.symmetric, stats.duplicates, stats.recent, stats.inapplicable
    );
    Ok(())
}

/// Enemy ordering as 1-based indexes into the hero ordering
fn enemy_order(hero: &[Grid], enemy: &[Grid]) -> String {
    let mut used = vec![false; hero.len()];
    let mut order = Vec::with_capacity(enemy.len());
    for grid in enemy {
        let found = (0..hero.len()).find(|&i| !used[i] && hero[i] == *grid);
        match found {
            Some(i) => {
                used[i] = true;
                order.push((i + 1).to_string());
            }
            None => order.push("?".to_string()),
        }
    }
    order.join(" ")
}

fn check(rows: &[String]) -> Result<()> {
    let grid = Grid::from_rows(rows).context("cannot parse grid")?;
    let clues = compute_clues(&grid);
    print!("{}", format_clues(&clues));

    let solutions = Solver::new().count_solutions(&clues, 2);
    match solutions {
        0 => bail!("clues have no solution"),
        1 => println!("Unique solution"),
        _ => println!("Not unique: at least 2 solutions"),
    }
    Ok(())
}

fn format_clues(clues: &Clues) -> String {
    let line = |clue: &Vec<usize>| {
        clue.iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut out = String::new();
    out.push_str("Rows:\n");
    for clue in &clues.rows {
        out.push_str(&format!("  {}\n", line(clue)));
    }
    out.push_str("Columns:\n");
    for clue in &clues.cols {
        out.push_str(&format!("  {}\n", line(clue)));
    }
    out
}
