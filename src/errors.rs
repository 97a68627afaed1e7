//! Error types for puzzle generation and catalog loading.
//!
//! # Error Codes
//!
//! - G001: `NoEligibleWords` (no catalog entry fits the requested grid)
//! - G002: `GridTooLarge` (requested size above `MAX_GRID_SIZE`)
//! - G003: `InvalidConfig` (a `SearchConfig` field is out of range)
//! - C001: `Io` (catalog file could not be read)
//!
//! Search failures never surface here: the fallback ladder absorbs them and
//! degrades the word count instead.

use crate::catalog::Difficulty;
use std::io;

/// Errors returned by [`crate::generator::generate`] and friends before search starts.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Nothing in the catalog can be placed in a grid of this size.
    #[error("no eligible words for {difficulty} puzzle of size {size}")]
    NoEligibleWords { difficulty: Difficulty, size: usize },

    #[error("grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: usize, max: usize },

    #[error("invalid search configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::NoEligibleWords { .. } => "G001",
            GenerateError::GridTooLarge { .. } => "G002",
            GenerateError::InvalidConfig { .. } => "G003",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::NoEligibleWords { .. } => Some(
                "Use a larger grid or a catalog with words of 2 to SIZE letters (A-Z only)",
            ),
            GenerateError::GridTooLarge { .. } => Some("Request a smaller grid"),
            GenerateError::InvalidConfig { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self.help() {
            Some(help) => format!("{} ({})\n  help: {help}", self, self.code()),
            None => format!("{} ({})", self, self.code()),
        }
    }
}

/// Errors raised while loading a word catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),
}

impl CatalogError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Io(_) => "C001",
        }
    }
}
