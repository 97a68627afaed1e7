//! Top-level puzzle generation.
//!
//! [`Generator`] wires the pipeline together: eligibility filtering, word
//! ordering, the search ladder, post-processing and clue numbering. Each call
//! starts from a fresh grid; nothing is shared between calls.

use crate::catalog::{self, Difficulty, WordEntry};
use crate::errors::GenerateError;
use crate::grid::{Cell, PlacedWord};
use crate::heuristics::order_words;
use crate::numbering::{number_grid, ClueTable};
use crate::postprocess::post_process;
use crate::solver::{run_ladder, SearchConfig, Strategy};
use log::{info, warn};
use std::fmt;

/// Largest grid side length accepted by [`Generator`].
pub const MAX_GRID_SIZE: usize = 64;

/// A finished crossword.
///
/// The grid never contains `Cell::Empty`.
#[derive(Clone, Debug, PartialEq)]
pub struct Puzzle {
    pub size: usize,
    pub difficulty: Difficulty,
    /// Row-major cell matrix.
    pub grid: Vec<Vec<Cell>>,
    pub across: ClueTable,
    pub down: ClueTable,
    /// Clue number shown in each cell, if any.
    pub numbers: Vec<Vec<Option<u32>>>,
    /// Words placed by the search, in placement order, with final clue numbers.
    pub placed: Vec<PlacedWord>,
    /// Ladder rung that produced the grid.
    pub strategy: Strategy,
}

impl Puzzle {
    /// Fraction of cells holding a letter.
    pub fn density(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        let letters = self.grid.iter().flatten().filter(|c| c.is_letter()).count();
        letters as f64 / (self.size * self.size) as f64
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let line: String = row.iter().map(Cell::to_char).collect();
            writeln!(f, "{}", line)?;
        }
        for (title, table) in [("Across", &self.across), ("Down", &self.down)] {
            writeln!(f)?;
            writeln!(f, "{}", title)?;
            for (number, entry) in table {
                writeln!(f, "{:>3}. {} ({})", number, entry.clue, entry.answer.len())?;
            }
        }
        Ok(())
    }
}

/// Puzzle generator with a fixed [`SearchConfig`].
///
/// # Examples
/// ```
/// use crossword_synth::catalog::{Difficulty, WordEntry};
/// use crossword_synth::generator::Generator;
/// use crossword_synth::solver::SearchConfig;
///
/// let words = vec![
///     WordEntry::new("CAT", "Feline", 0.9),
///     WordEntry::new("CAR", "Vehicle", 0.9),
/// ];
/// let puzzle = Generator::new(SearchConfig::basic())
///     .generate_from(5, Difficulty::Easy, &words)
///     .unwrap();
/// assert_eq!(puzzle.placed.len(), 2);
/// assert_eq!(puzzle.across[&1].answer, "CAT");
/// assert_eq!(puzzle.down[&1].answer, "CAR");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: SearchConfig,
}

impl Generator {
    pub fn new(config: SearchConfig) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Builds a puzzle from the built-in word bank for `difficulty`.
    pub fn generate(&self, size: usize, difficulty: Difficulty) -> Result<Puzzle, GenerateError> {
        self.generate_from(size, difficulty, &catalog::builtin(difficulty))
    }

    /// Builds a puzzle from a caller-supplied catalog.
    ///
    /// # Arguments
    /// * `size` - Side length of the square grid.
    /// * `difficulty` - Recorded on the puzzle and used in error messages.
    /// * `entries` - Candidate words. Malformed, duplicate and ill-fitting
    ///   entries are dropped before search.
    ///
    /// # Errors
    /// * [`GenerateError::InvalidConfig`] if the configuration is out of range.
    /// * [`GenerateError::GridTooLarge`] if `size` exceeds [`MAX_GRID_SIZE`].
    /// * [`GenerateError::NoEligibleWords`] if no entry fits a grid of `size`.
    ///
    /// Search itself never fails: when not every word can be placed, the
    /// puzzle holds fewer words and [`Puzzle::strategy`] says which fallback
    /// produced it.
    pub fn generate_from(
        &self,
        size: usize,
        difficulty: Difficulty,
        entries: &[WordEntry],
    ) -> Result<Puzzle, GenerateError> {
        self.config.validate()?;
        if size > MAX_GRID_SIZE {
            return Err(GenerateError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }

        let eligible = catalog::eligible_words(entries, size);
        if eligible.is_empty() {
            return Err(GenerateError::NoEligibleWords { difficulty, size });
        }
        let ordered = order_words(&eligible);
        info!(
            "Generating {}x{} {} puzzle from {} eligible words",
            size,
            size,
            difficulty,
            ordered.len()
        );

        let outcome = run_ladder(size, &ordered, &self.config);
        if outcome.strategy.is_degraded() {
            warn!(
                "Placed {} of {} words using {}",
                outcome.state.placed_count(),
                ordered.len(),
                outcome.strategy
            );
        }

        let mut grid = outcome.state.grid;
        post_process(&mut grid, &self.config);
        let numbering = number_grid(&mut grid);

        Ok(Puzzle {
            size,
            difficulty,
            grid: grid.rows(),
            across: numbering.across,
            down: numbering.down,
            numbers: numbering.numbers,
            placed: grid.placed_words().to_vec(),
            strategy: outcome.strategy,
        })
    }
}

/// Builds a puzzle from the built-in word bank with the default configuration.
///
/// # Examples
/// ```
/// use crossword_synth::catalog::Difficulty;
/// use crossword_synth::generator::generate;
/// use crossword_synth::grid::Cell;
///
/// let puzzle = generate(9, Difficulty::Medium).unwrap();
/// assert_eq!(puzzle.grid.len(), 9);
/// assert!(puzzle.grid.iter().flatten().all(|c| *c != Cell::Empty));
/// assert!(!puzzle.across.is_empty());
/// ```
pub fn generate(size: usize, difficulty: Difficulty) -> Result<Puzzle, GenerateError> {
    Generator::default().generate(size, difficulty)
}
