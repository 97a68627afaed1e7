use clap::Parser;
use crossword_synth::catalog::{self, Difficulty};
use crossword_synth::errors::{CatalogError, GenerateError};
use crossword_synth::generator::Generator;
use crossword_synth::logging;
use crossword_synth::solver::{SearchConfig, SymmetryMode};
use std::path::PathBuf;
use std::process::ExitCode;

/// Crossword puzzle generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Side length of the square grid
    #[arg(short, long, default_value_t = 11)]
    size: usize,

    /// Word bank to draw from (easy, medium, hard)
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seed for filler letters
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Catalog file (WORD;clue[;quality] per line) used instead of the built-in bank
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Block pattern symmetry (none, rotational)
    #[arg(long, default_value_t = SymmetryMode::None)]
    symmetry: SymmetryMode,

    /// Candidate placements tried per word
    #[arg(long)]
    branching_cap: Option<usize>,

    /// Fill fraction the search prunes toward, between 0 and 1
    #[arg(long)]
    target_density: Option<f64>,

    /// Placements tried by backtracking before falling back to greedy
    #[arg(long)]
    node_budget: Option<usize>,

    /// Greedy results with fewer words fall back to the top half of the list
    #[arg(long)]
    min_words: Option<usize>,

    /// Keep only the seed word when backtracking fails
    #[arg(long)]
    no_fallback: bool,

    /// Block empty cells instead of filling them with letters
    #[arg(long)]
    no_backfill: bool,

    /// Start from plain backtracking (no cap, pruning, fallback or filler)
    #[arg(long)]
    basic: bool,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let mut config = if self.basic {
            SearchConfig::basic()
        } else {
            SearchConfig::default()
        };
        config.seed = self.seed;
        config.symmetry = self.symmetry;
        if let Some(cap) = self.branching_cap {
            config.branching_cap = cap;
        }
        if let Some(density) = self.target_density {
            config.target_density = density;
        }
        if let Some(budget) = self.node_budget {
            config.node_budget = budget;
        }
        if let Some(min_words) = self.min_words {
            config.min_placed_words = min_words;
        }
        if self.no_fallback {
            config.fallback_enabled = false;
        }
        if self.no_backfill {
            config.backfill = false;
        }
        config
    }
}

fn main() -> ExitCode {
    logging::init_logger(logging::debug_from_env());

    if let Err(e) = try_main() {
        if let Some(err) = e.downcast_ref::<GenerateError>() {
            eprintln!("Error: {}", err.display_detailed());
        } else if let Some(err) = e.downcast_ref::<CatalogError>() {
            eprintln!("Error: {} ({})", err, err.code());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let generator = Generator::new(cli.search_config());
    log::debug!("Search configuration: {:?}", generator.config());

    let puzzle = match &cli.words {
        Some(path) => {
            let entries = catalog::load_from_path(path)?;
            log::info!("Loaded {} entries from {}", entries.len(), path.display());
            generator.generate_from(cli.size, cli.difficulty, &entries)?
        }
        None => generator.generate(cli.size, cli.difficulty)?,
    };

    println!("{}", puzzle);
    eprintln!(
        "{} words placed, density {:.1}%, strategy: {}",
        puzzle.placed.len(),
        puzzle.density() * 100.0,
        puzzle.strategy
    );
    Ok(())
}
