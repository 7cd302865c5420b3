//! Built-in template pools per difficulty node.
//!
//! Templates double as the static level-select puzzles and as the fallback
//! when procedural generation falls short. Shapes are written top-left
//! aligned; short rows and missing rows are padded with empty cells up to the
//! board size.

use crate::{Grid, GridError, SimpleRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Encounter tier a puzzle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyNode {
    Practice,
    Easy,
    Middle,
    Hard,
    Ultra,
}

impl DifficultyNode {
    pub const ALL: [DifficultyNode; 5] = [
        DifficultyNode::Practice,
        DifficultyNode::Easy,
        DifficultyNode::Middle,
        DifficultyNode::Hard,
        DifficultyNode::Ultra,
    ];

    /// Node identifier as used by the route map
    pub fn id(&self) -> &'static str {
        match self {
            DifficultyNode::Practice => "elf-practice",
            DifficultyNode::Easy => "elf-easy",
            DifficultyNode::Middle => "elf-middle",
            DifficultyNode::Hard => "elf-hard",
            DifficultyNode::Ultra => "elf-ultra",
        }
    }

    /// Board size the node's templates are drawn for
    pub fn board_size(&self) -> usize {
        match self {
            DifficultyNode::Practice | DifficultyNode::Easy => 5,
            DifficultyNode::Middle => 15,
            DifficultyNode::Hard => 20,
            DifficultyNode::Ultra => 25,
        }
    }
}

impl fmt::Display for DifficultyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DifficultyNode {
    type Err = String;

    /// Accepts `elf-easy`, `easy`, `EASY`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("elf-").unwrap_or(&lower);
        match name {
            "practice" => Ok(DifficultyNode::Practice),
            "easy" => Ok(DifficultyNode::Easy),
            "middle" => Ok(DifficultyNode::Middle),
            "hard" => Ok(DifficultyNode::Hard),
            "ultra" => Ok(DifficultyNode::Ultra),
            _ => Err(format!("unknown difficulty node {:?}", s)),
        }
    }
}

/// A named hand-authored shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub grid: Grid,
}

/// Templates and overlays of one node at one board size
#[derive(Debug, Clone, Default)]
pub struct NodePool {
    pub templates: Vec<Template>,
    pub overlays: Vec<Grid>,
}

impl NodePool {
    pub fn grids(&self) -> Vec<Grid> {
        self.templates.iter().map(|t| t.grid.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Pools resolved for one generation request
#[derive(Debug, Clone, Default)]
pub struct ResolvedPool {
    pub templates: Vec<Grid>,
    pub overlays: Vec<Grid>,
}

/// Template pools indexed by node and board size
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(DifficultyNode, usize, NodePool)>,
}

impl Catalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The shapes shipped with the game
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin)
    }

    /// Register a pool; an existing pool for the same node and size is replaced
    pub fn insert(&mut self, node: DifficultyNode, size: usize, pool: NodePool) {
        self.entries.retain(|(n, s, _)| !(*n == node && *s == size));
        self.entries.push((node, size, pool));
    }

    /// The node's own pool for `size`, if it has templates
    pub fn node_pool(&self, node: DifficultyNode, size: usize) -> Option<&NodePool> {
        self.entries
            .iter()
            .find(|(n, s, pool)| *n == node && *s == size && !pool.is_empty())
            .map(|(_, _, pool)| pool)
    }

    /// Every template of `size` across all nodes, in node order
    pub fn templates_for_size(&self, size: usize) -> Vec<&Template> {
        let mut entries: Vec<_> = self.entries.iter().filter(|(_, s, _)| *s == size).collect();
        entries.sort_by_key(|(n, _, _)| *n);
        entries
            .into_iter()
            .flat_map(|(_, _, pool)| pool.templates.iter())
            .collect()
    }

    /// Every overlay of `size` across all nodes
    pub fn overlays_for_size(&self, size: usize) -> Vec<Grid> {
        self.entries
            .iter()
            .filter(|(_, s, _)| *s == size)
            .flat_map(|(_, _, pool)| pool.overlays.iter().cloned())
            .collect()
    }

    /// Templates and overlays for `node_id`, falling back to the size-generic pool
    /// when the id is unknown or the node has nothing for `size`.
    pub fn resolve(&self, node_id: &str, size: usize) -> ResolvedPool {
        let own = node_id
            .parse::<DifficultyNode>()
            .ok()
            .and_then(|node| self.node_pool(node, size));
        match own {
            Some(pool) => ResolvedPool {
                templates: pool.grids(),
                overlays: pool.overlays.clone(),
            },
            None => ResolvedPool {
                templates: self.puzzles_for_size(size),
                overlays: self.overlays_for_size(size),
            },
        }
    }

    /// Every static puzzle of `size`
    pub fn puzzles_for_size(&self, size: usize) -> Vec<Grid> {
        self.templates_for_size(size)
            .into_iter()
            .map(|t| t.grid.clone())
            .collect()
    }

    /// `count` random puzzles of `size`
    pub fn random_puzzles_for_size(&self, size: usize, count: usize, rng: &mut SimpleRng) -> Vec<Grid> {
        draw(&self.puzzles_for_size(size), count, rng)
    }

    /// `count` random puzzles from the node's pool, or the size pool as fallback
    pub fn random_puzzles_for_node(
        &self,
        node_id: &str,
        size: usize,
        count: usize,
        rng: &mut SimpleRng,
    ) -> Vec<Grid> {
        draw(&self.resolve(node_id, size).templates, count, rng)
    }
}

/// Draw `count` items: whole shuffled passes over the pool, so repeats only
/// start once every item has been used.
pub(crate) fn draw(pool: &[Grid], count: usize, rng: &mut SimpleRng) -> Vec<Grid> {
    let mut out = Vec::with_capacity(count.min(pool.len()));
    if pool.is_empty() {
        return out;
    }
    while out.len() < count {
        let mut pass: Vec<&Grid> = pool.iter().collect();
        rng.shuffle(&mut pass);
        out.extend(pass.into_iter().take(count - out.len()).cloned());
    }
    out
}

/// Every static puzzle of `size` in the built-in catalog
pub fn puzzles_for_size(size: usize) -> Vec<Grid> {
    Catalog::builtin().puzzles_for_size(size)
}

/// `count` random built-in puzzles of `size`
pub fn random_puzzles_for_size(size: usize, count: usize, rng: &mut SimpleRng) -> Vec<Grid> {
    Catalog::builtin().random_puzzles_for_size(size, count, rng)
}

/// `count` random built-in puzzles for a node
pub fn random_puzzles_for_node(node_id: &str, size: usize, count: usize, rng: &mut SimpleRng) -> Vec<Grid> {
    Catalog::builtin().random_puzzles_for_node(node_id, size, count, rng)
}

/// Pad top-left aligned rows to a `size` board
fn board(size: usize, rows: &[&str]) -> Result<Grid, GridError> {
    if rows.len() > size {
        return Err(GridError::NotSquare {
            rows: rows.len(),
            cols: size,
        });
    }
    let mut padded: Vec<String> = Vec::with_capacity(size);
    for (row, line) in rows.iter().enumerate() {
        let len = line.chars().count();
        if len > size {
            return Err(GridError::Ragged {
                row,
                expected: size,
                found: len,
            });
        }
        padded.push(format!("{}{}", line, ".".repeat(size - len)));
    }
    padded.resize(size, ".".repeat(size));
    Grid::from_rows(&padded)
}

type Shape = (&'static str, &'static [&'static str]);

fn pool(size: usize, templates: &[Shape], overlays: &[Shape]) -> NodePool {
    let parse = |(name, rows): &Shape| match board(size, rows) {
        Ok(grid) => Some((*name, grid)),
        Err(err) => {
            log::error!("skipping built-in shape {}: {}", name, err);
            None
        }
    };
    NodePool {
        templates: templates
            .iter()
            .filter_map(parse)
            .map(|(name, grid)| Template { name, grid })
            .collect(),
        overlays: overlays.iter().filter_map(parse).map(|(_, grid)| grid).collect(),
    }
}

fn build_builtin() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert(DifficultyNode::Practice, 5, pool(5, PRACTICE, &[]));
    catalog.insert(DifficultyNode::Easy, 5, pool(5, EASY, SMALL_OVERLAYS));
    catalog.insert(DifficultyNode::Middle, 15, pool(15, MIDDLE, LARGE_OVERLAYS));
    catalog.insert(DifficultyNode::Hard, 20, pool(20, HARD, LARGE_OVERLAYS));
    catalog.insert(DifficultyNode::Ultra, 25, pool(25, ULTRA, &LARGE_OVERLAYS[..1]));
    catalog
}

const PRACTICE: &[Shape] = &[
    ("heart", &[".#.#.", "#####", "#####", ".###.", "..#.."]),
    ("cup", &["#...#", "#####", ".###.", "..#..", ".###."]),
    ("arrow", &["..#..", ".###.", "#####", "..#..", "..#.."]),
    ("house", &["..#..", ".###.", "#####", ".#.#.", ".###."]),
    ("mushroom", &[".###.", "#####", "..#..", "..#..", ".###."]),
    ("tree", &["..#..", ".###.", "#####", "..#..", ".###."]),
    ("cross", &["..#..", "..#..", "#####", "..#..", "..#.."]),
    ("cat", &["#...#", "#####", "#.#.#", "#####", ".###."]),
];

const EASY: &[Shape] = &[
    ("key", &["###", "#.#", "###", ".#", ".##"]),
    ("boat", &["..#", "..##", "..#", "#####", ".###"]),
    ("fish", &["", ".##.#", "####", ".##.#"]),
    ("note", &["..##", "..#.#", "..#", "###", "##"]),
    ("steps", &["#", "##", "###", "####"]),
    ("flag", &["#", "###", "####", "#", "#"]),
    ("bell", &["..#", ".###", ".###", "#####", "..#"]),
    ("star", &["..#", "#####", ".###", ".#.#", "#...#"]),
];

const SMALL_OVERLAYS: &[Shape] = &[
    ("corner", &["###", "#", "#"]),
    ("moon", &[".##", "#", "#", ".##"]),
];

const MIDDLE: &[Shape] = &[
    (
        "pine",
        &[
            ".......#",
            "......###",
            ".....#####",
            "......###",
            ".....#####",
            "....#######",
            ".....#####",
            "....#######",
            "...#########",
            "..###########",
            "......###",
            "......###",
            "....#######",
        ],
    ),
    (
        "cat face",
        &[
            "#.........#",
            "##.......##",
            "###.....###",
            "###########",
            "###########",
            "##..###..##",
            "##..###..##",
            "###########",
            "####.#.####",
            "###########",
            ".#########",
            "..#######",
        ],
    ),
    (
        "elf hat",
        &[
            "........###",
            "......##..#",
            ".....##...#",
            "....###",
            "....####",
            "...#####",
            "...######",
            "..#######",
            "..########",
            ".##########",
            "#############",
            "###############",
        ],
    ),
    (
        "mug",
        &[
            "",
            "...#..#..#",
            "....#..#..#",
            "..########",
            "..##########",
            "..########.##",
            "..########..#",
            "..########.##",
            "..##########",
            "..########",
            "...######",
            ".##########",
        ],
    ),
    (
        "star",
        &[
            "......#",
            "......#",
            ".....###",
            ".....###",
            "#############",
            ".###########",
            "..#########",
            "...#######",
            "...#######",
            "..####.####",
            "..###...###",
            ".##.......##",
            ".#.........#",
        ],
    ),
];

const HARD: &[Shape] = &[
    (
        "castle",
        &[
            "",
            "..#.#.#......#.#.#",
            "..#####......#####",
            "..#####......#####",
            "...###.#.#.#..###",
            "...###########.##",
            "...############.#",
            "...###...##...###",
            "...###...##...###",
            "...##############",
            "...######..######",
            "...#####....#####",
            "...#####....#####",
            "...#####....#####",
            "..################",
        ],
    ),
    (
        "owl",
        &[
            "..#..........#",
            "..##........##",
            "..############",
            ".##############",
            ".###..####..###",
            ".##.##.##.##.##",
            ".##.##.##.##.##",
            ".###..####..###",
            ".######..######",
            ".#######.#######",
            "..#############",
            "..##.#######.##",
            "..##.#######.##",
            "..###.#####.###",
            "...###########",
            "....###...###",
            "...####...####",
        ],
    ),
];

const ULTRA: &[Shape] = &[
    (
        "dragon",
        &[
            "...........##",
            "..........####",
            ".........##.###",
            ".........######",
            "..........#####",
            "...........####.......#",
            "..#.........####.....##",
            "..##.......######...###",
            ".####.....########.####",
            ".#####...##########.###",
            "..#####.###########..##",
            "...#################..#",
            "....################",
            ".....##############",
            "......############",
            "......###.....###",
            ".....###.......###",
            ".....##.........##",
            "....###.........###",
        ],
    ),
    (
        "lantern",
        &[
            "",
            "....#####",
            "...#######",
            "..###...###",
            "..##.....##.....###",
            "..##.....##....#####",
            "..###...###...###.###",
            "...#######...###...##",
            "....#####...###....##",
            ".....###...###....###",
            ".....###..###....###",
            ".....#######....###",
            ".....######....###",
            ".....#####....#######",
            ".....####....#########",
            ".....###.....####.####",
            ".....###.....###...###",
            "....#####....####.####",
            "...#######....#######",
            "..##########...#####",
        ],
    ),
];

const LARGE_OVERLAYS: &[Shape] = &[
    ("sparkle", &[".#", "###", ".#"]),
    ("twig", &["#", ".#", ".##", "..#"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solver;

    #[test]
    fn test_node_ids() {
        assert_eq!("elf-easy".parse::<DifficultyNode>(), Ok(DifficultyNode::Easy));
        assert_eq!("Ultra".parse::<DifficultyNode>(), Ok(DifficultyNode::Ultra));
        assert!("elf-boss".parse::<DifficultyNode>().is_err());
        for node in DifficultyNode::ALL {
            assert_eq!(node.id().parse::<DifficultyNode>(), Ok(node));
        }
    }

    #[test]
    fn test_builtin_pools_have_expected_sizes() {
        let catalog = Catalog::builtin();
        for node in DifficultyNode::ALL {
            let size = node.board_size();
            let pool = catalog.node_pool(node, size).unwrap();
            assert!(!pool.templates.is_empty(), "{}", node);
            for template in &pool.templates {
                assert_eq!(template.grid.size(), size, "{}", template.name);
                assert!(!template.grid.is_blank(), "{}", template.name);
            }
            for overlay in &pool.overlays {
                assert_eq!(overlay.size(), size);
            }
        }
        assert_eq!(catalog.node_pool(DifficultyNode::Practice, 5).unwrap().templates.len(), 8);
        assert_eq!(catalog.node_pool(DifficultyNode::Easy, 5).unwrap().overlays.len(), 2);
        assert_eq!(puzzles_for_size(5).len(), 16);
        assert!(puzzles_for_size(7).is_empty());
    }

    #[test]
    fn test_small_templates_are_unique() {
        let solver = Solver::new();
        for template in Catalog::builtin().templates_for_size(5) {
            assert!(solver.is_uniquely_solvable(&template.grid), "{}", template.name);
        }
    }

    #[test]
    fn test_middle_templates_are_unique() {
        let solver = Solver::new();
        for template in Catalog::builtin().templates_for_size(15) {
            assert!(solver.is_uniquely_solvable(&template.grid), "{}", template.name);
        }
    }

    #[test]
    fn test_large_templates_are_unique() {
        let solver = Solver::new();
        for size in [20, 25] {
            for template in Catalog::builtin().templates_for_size(size) {
                assert!(solver.is_uniquely_solvable(&template.grid), "{}", template.name);
            }
        }
    }

    #[test]
    fn test_padding() {
        let grid = board(4, &["#", ".##"]).unwrap();
        assert_eq!(grid.to_string(), "#...\n.##.\n....\n....\n");
        assert!(board(2, &["###"]).is_err());
        assert!(board(1, &["#", "#"]).is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_size_pool() {
        let catalog = Catalog::builtin();
        let own = catalog.resolve("elf-easy", 5);
        assert_eq!(own.templates.len(), 8);
        assert_eq!(own.overlays.len(), 2);

        let unknown = catalog.resolve("elf-boss", 5);
        assert_eq!(unknown.templates.len(), 16);

        // Practice has nothing at 15, so the middle pool serves
        let cross = catalog.resolve("practice", 15);
        assert_eq!(cross.templates.len(), 5);

        assert!(catalog.resolve("easy", 9).templates.is_empty());
    }

    #[test]
    fn test_random_draws() {
        let mut rng = SimpleRng::with_seed(17);
        let first = random_puzzles_for_node("elf-practice", 5, 8, &mut rng);
        assert_eq!(first.len(), 8);
        // A full pass uses every template once
        let mut encoded: Vec<String> = first.iter().map(Grid::encode).collect();
        encoded.sort();
        encoded.dedup();
        assert_eq!(encoded.len(), 8);

        let many = random_puzzles_for_size(5, 40, &mut rng);
        assert_eq!(many.len(), 40);
        assert!(random_puzzles_for_size(6, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_insert_replaces_pool() {
        let mut catalog = Catalog::new();
        let dot = board(3, &["#"]).unwrap();
        let pool = NodePool {
            templates: vec![Template { name: "dot", grid: dot.clone() }],
            overlays: Vec::new(),
        };
        catalog.insert(DifficultyNode::Easy, 3, pool.clone());
        catalog.insert(DifficultyNode::Easy, 3, pool);
        assert_eq!(catalog.puzzles_for_size(3), vec![dot]);
    }
}
