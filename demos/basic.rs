//! Basic example of using the picross engine

use picross_core::{
    compute_clues, equals_solution, GenerateOptions, Generator, Grid, Mark, MarkGrid, Position,
    Solver,
};

fn main() {
    // Generate a battle set
    println!("Generating three elf-easy puzzles...\n");
    let mut generator = Generator::new();
    let battle = generator.generate("elf-easy", 5, 3, GenerateOptions::default());
    println!("Seed: {} (pass it back to reproduce this set)\n", battle.seed);

    for (i, puzzle) in battle.hero_puzzles.iter().enumerate() {
        println!("Hero puzzle {}:", i + 1);
        println!("{}", puzzle);
    }

    let stats = generator.last_stats();
    println!("Attempts: {}, accepted: {}, topped up: {}\n", stats.attempts, stats.accepted, stats.topped_up);

    // Parse a grid from a string
    println!("--- Parsing a grid from string ---\n");
    let heart_string = ".#.#./#####/#####/.###./..#..";
    if let Ok(heart) = heart_string.parse::<Grid>() {
        println!("Parsed grid:");
        println!("{}", heart);

        let clues = compute_clues(&heart);
        println!("Row clues: {:?}", clues.rows);
        println!("Column clues: {:?}", clues.cols);

        let solver = Solver::new();
        println!("Unique solution: {}\n", solver.has_unique_solution(&clues));

        // Check a player's board
        let mut marks = MarkGrid::from_solution(&heart);
        println!("Solved board matches: {}", equals_solution(&marks, &heart));
        marks.set(Position::new(0, 0), Mark::Filled);
        println!("After a wrong mark: {}", equals_solution(&marks, &heart));
    }
}
