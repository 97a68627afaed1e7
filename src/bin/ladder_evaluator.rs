use crossword_synth::catalog::Difficulty;
use crossword_synth::generator::Generator;
use crossword_synth::logging;
use crossword_synth::solver::{SearchConfig, Strategy};
use std::collections::HashMap;

const SIZES: [usize; 4] = [9, 11, 13, 15];
const NUM_SEEDS: u64 = 5;
const START_SEED: u64 = 0;

#[derive(Default)]
struct Tally {
    runs: usize,
    words: usize,
    density: f64,
    strategies: HashMap<Strategy, usize>,
}

fn main() {
    logging::init_logger(logging::debug_from_env());

    let presets = [("default", SearchConfig::default()), ("basic", SearchConfig::basic())];
    let mut tallies: Vec<(String, Tally)> = Vec::new();

    println!(
        "Evaluating {} presets x {} difficulties x {} sizes x {} seeds...",
        presets.len(),
        Difficulty::ALL.len(),
        SIZES.len(),
        NUM_SEEDS
    );

    for (preset_name, preset) in &presets {
        for difficulty in Difficulty::ALL {
            let mut tally = Tally::default();
            println!("\n{} / {}", preset_name, difficulty);

            for size in SIZES {
                for seed in START_SEED..START_SEED + NUM_SEEDS {
                    let generator = Generator::new(preset.clone().with_seed(seed));
                    match generator.generate(size, difficulty) {
                        Ok(puzzle) => {
                            println!(
                                "  Size: {:<3} Seed: {:<3} Words: {:<4} Density: {:>5.1}%  Strategy: {}",
                                size,
                                seed,
                                puzzle.placed.len(),
                                puzzle.density() * 100.0,
                                puzzle.strategy
                            );
                            tally.runs += 1;
                            tally.words += puzzle.placed.len();
                            tally.density += puzzle.density();
                            *tally.strategies.entry(puzzle.strategy).or_insert(0) += 1;
                        }
                        Err(e) => {
                            eprintln!("  Size: {:<3} Seed: {:<3} Error: {}", size, seed, e.display_detailed());
                        }
                    }
                }
            }
            tallies.push((format!("{}/{}", preset_name, difficulty), tally));
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Averages ---");
    for (name, tally) in &tallies {
        if tally.runs == 0 {
            println!("{:<16}: No puzzles generated.", name);
            continue;
        }
        let mut strategies: Vec<(String, usize)> = tally
            .strategies
            .iter()
            .map(|(strategy, count)| (strategy.to_string(), *count))
            .collect();
        strategies.sort();
        let breakdown: Vec<String> = strategies
            .iter()
            .map(|(strategy, count)| format!("{} x{}", strategy, count))
            .collect();
        println!(
            "{:<16}: Words = {:.2}, Density = {:.1}%, Strategies: {}",
            name,
            tally.words as f64 / tally.runs as f64,
            tally.density / tally.runs as f64 * 100.0,
            breakdown.join(", ")
        );
    }
}
