//! # Crossword Synth Library
//!
//! This library builds crossword puzzles from a pool of candidate words. Given
//! words with clues and quality scores plus a grid size, it searches for an
//! interlocking layout, fills or blocks the leftover cells, and numbers the
//! across and down clues.
//!
//! It is used by two binaries:
//! - `xwgen`: Generates one puzzle from the built-in word banks or a catalog
//!   file and prints it.
//! - `ladder_evaluator`: Runs the generator across difficulties, sizes and
//!   seeds and reports how many words each configuration placed and which
//!   fallback produced the grid.
//!
//! ## Modules
//! - `catalog`: Word entries, difficulty levels, built-in word banks and catalog file parsing.
//! - `heuristics`: Letter frequencies, word ordering, placement scoring and the density pruning estimate.
//! - `grid`: The cell matrix, placed-word index, placement validator and candidate enumeration.
//! - `solver`: Search configuration, checkpointed search state, backtracking and the fallback ladder.
//! - `postprocess`: Filler letters, black-square finalization and symmetry enforcement.
//! - `numbering`: Clue numbering and the across/down clue tables.
//! - `generator`: The `Puzzle` type and the `generate` entry points.
//! - `errors`: Error types with stable codes.
//! - `logging`: Logger setup for the binaries.
//! - `utils`: Parsing grids from strings, for tests and examples.

pub mod catalog;
pub mod errors;
pub mod generator;
pub mod grid;
pub mod heuristics;
pub mod logging;
pub mod numbering;
pub mod postprocess;
pub mod solver;
pub mod utils;

pub use generator::{generate, Generator, Puzzle};
