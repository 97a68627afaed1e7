//! Word placement search.
//!
//! The search commits words in catalog order onto a grid seeded with the first
//! word. Each word after the seed is tried at its best few candidate
//! placements, recursing depth-first and restoring a checkpoint on failure.
//!
//! When the full search cannot place every word, [`run_ladder`] falls back in
//! rungs, each on a fresh grid:
//! 1. backtracking over every word;
//! 2. backtracking over the words with quality at or above the threshold;
//! 3. greedy placement over every word, skipping words with no placement;
//! 4. greedy placement over the top half of the ordering, used when rung 3
//!    placed too few words.
//!
//! Rungs 1 and 2 share one node budget. Running out of it skips straight to
//! rung 3.

use crate::catalog::WordEntry;
use crate::errors::GenerateError;
use crate::grid::{Grid, Placement};
use crate::heuristics::{average_length, can_reach_target_density, rank_placements};
use log::{debug, info, trace, warn};
use std::fmt;
use std::str::FromStr;

/// Candidates explored per word by default.
pub const DEFAULT_BRANCHING_CAP: usize = 10;

/// Fill fraction the pruning estimate aims for by default.
pub const DEFAULT_TARGET_DENSITY: f64 = 0.60;

/// Quality needed to survive into the high-quality rung.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.8;

/// Default cap on placements tried across the backtracking rungs.
pub const DEFAULT_NODE_BUDGET: usize = 2000;

/// Symmetry applied to the block pattern after search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SymmetryMode {
    /// Leave the block pattern as finalization produced it.
    #[default]
    None,
    /// Make `(r, c)` and `(n-1-r, n-1-c)` agree on being blocked.
    Rotational,
}

impl FromStr for SymmetryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(SymmetryMode::None),
            "rotational" => Ok(SymmetryMode::Rotational),
            _ => Err(format!(
                "Unknown symmetry '{}'. Expected one of: none, rotational",
                s
            )),
        }
    }
}

impl fmt::Display for SymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymmetryMode::None => f.write_str("none"),
            SymmetryMode::Rotational => f.write_str("rotational"),
        }
    }
}

/// Which step of the fallback ladder produced the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every word placed by the full backtracking search.
    Backtracking,
    /// Every high-quality word placed by backtracking over that subset.
    HighQualityBacktracking,
    /// Greedy placement over every word.
    Greedy,
    /// Greedy placement over the top half of the ordering.
    ReducedGreedy,
    /// Backtracking failed with fallback disabled; only the seed word remains.
    SeedOnly,
}

impl Strategy {
    /// Whether the grid came from a rung that gives up on some words.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Strategy::Backtracking | Strategy::HighQualityBacktracking)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Backtracking => "backtracking",
            Strategy::HighQualityBacktracking => "high-quality backtracking",
            Strategy::Greedy => "greedy",
            Strategy::ReducedGreedy => "reduced greedy",
            Strategy::SeedOnly => "seed only",
        };
        f.write_str(name)
    }
}

/// Tuning knobs for search and post-processing.
///
/// `SearchConfig::default()` is the full professional pipeline;
/// [`SearchConfig::basic`] is plain unbounded backtracking with no fallback
/// and no cell filling.
///
/// # Examples
/// ```
/// use crossword_synth::solver::{SearchConfig, SymmetryMode};
/// let config = SearchConfig::default()
///     .with_seed(7)
///     .with_symmetry(SymmetryMode::Rotational);
/// assert_eq!(config.branching_cap, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Candidates explored per word. `usize::MAX` means unlimited.
    pub branching_cap: usize,
    /// Fill fraction used by the pruning estimate. `0.0` disables pruning.
    pub target_density: f64,
    pub symmetry: SymmetryMode,
    /// Run rungs 2 to 4 when full backtracking fails.
    pub fallback_enabled: bool,
    /// Fill cells that complete a letter run instead of blocking them.
    pub backfill: bool,
    /// Minimum quality for the high-quality rung.
    pub quality_threshold: f64,
    /// Greedy results with fewer words than this trigger the reduced rung.
    pub min_placed_words: usize,
    /// Placements tried across rungs 1 and 2 before giving up on backtracking.
    pub node_budget: usize,
    /// Seed for the filler letter generator.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            branching_cap: DEFAULT_BRANCHING_CAP,
            target_density: DEFAULT_TARGET_DENSITY,
            symmetry: SymmetryMode::None,
            fallback_enabled: true,
            backfill: true,
            quality_threshold: DEFAULT_QUALITY_THRESHOLD,
            min_placed_words: 2,
            node_budget: DEFAULT_NODE_BUDGET,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Unbounded backtracking with no pruning, no fallback and no backfill.
    pub fn basic() -> Self {
        SearchConfig {
            branching_cap: usize::MAX,
            target_density: 0.0,
            fallback_enabled: false,
            backfill: false,
            ..SearchConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_symmetry(mut self, symmetry: SymmetryMode) -> Self {
        self.symmetry = symmetry;
        self
    }

    pub fn with_node_budget(mut self, node_budget: usize) -> Self {
        self.node_budget = node_budget;
        self
    }

    pub fn with_branching_cap(mut self, branching_cap: usize) -> Self {
        self.branching_cap = branching_cap;
        self
    }

    pub fn with_target_density(mut self, target_density: f64) -> Self {
        self.target_density = target_density;
        self
    }

    /// Checks that every field is in range.
    ///
    /// # Errors
    /// Returns [`GenerateError::InvalidConfig`] if `branching_cap` is zero or a
    /// fraction lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.branching_cap == 0 {
            return Err(invalid("branching_cap must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.target_density) {
            return Err(invalid(&format!(
                "target_density must be between 0 and 1, got {}",
                self.target_density
            )));
        }
        if !(0.0..=1.0).contains(&self.quality_threshold) {
            return Err(invalid(&format!(
                "quality_threshold must be between 0 and 1, got {}",
                self.quality_threshold
            )));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> GenerateError {
    GenerateError::InvalidConfig {
        reason: reason.to_string(),
    }
}

/// The mutable state of one search: the grid and the next clue number to hand out.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    pub grid: Grid,
    pub next_clue: u32,
}

/// An opaque snapshot of a [`SearchState`].
#[derive(Clone, Debug)]
pub struct Checkpoint(SearchState);

impl SearchState {
    pub fn new(size: usize) -> Self {
        SearchState {
            grid: Grid::new_empty(size),
            next_clue: 1,
        }
    }

    /// A fresh state with `first` placed in the centered seed slot.
    ///
    /// Returns `None` if `first` is longer than the grid.
    pub fn seeded(size: usize, first: &WordEntry) -> Option<Self> {
        let mut state = SearchState::new(size);
        let seed = state.grid.seed_placement(&first.text)?;
        state.apply(first, &seed);
        Some(state)
    }

    /// Captures everything needed to undo later placements.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.clone())
    }

    /// Rolls back to `checkpoint`. Restoring the same checkpoint twice yields
    /// the same state.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        *self = checkpoint.0;
    }

    /// Places `entry` and consumes the next clue number.
    pub fn apply(&mut self, entry: &WordEntry, placement: &Placement) {
        self.grid.place_word(entry, placement, self.next_clue);
        self.next_clue += 1;
    }

    pub fn placed_count(&self) -> usize {
        self.grid.placed_words().len()
    }
}

/// Result of running the fallback ladder.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub state: SearchState,
    pub strategy: Strategy,
    /// Placements tried by the backtracking rungs.
    pub nodes: usize,
}

/// Why a backtracking rung stopped without placing every word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backtrack {
    /// Every capped branch was tried.
    Exhausted,
    /// The node budget ran out.
    OverBudget,
}

struct Backtracker<'a> {
    words: &'a [WordEntry],
    config: &'a SearchConfig,
    avg_len: f64,
    nodes: &'a mut usize,
}

impl Backtracker<'_> {
    /// Places `words[index..]` into `state`. On `Exhausted` the state is left as
    /// it was on entry.
    fn search(&mut self, state: &mut SearchState, index: usize) -> Result<(), Backtrack> {
        let words = self.words;
        let Some(word) = words.get(index) else {
            return Ok(());
        };

        let mut candidates = state.grid.find_all_placements(&word.text);
        rank_placements(&mut candidates);
        trace!(
            "{} has {} candidates at depth {}",
            word.text,
            candidates.len(),
            index
        );

        let size = state.grid.size();
        let remaining = words.len() - index - 1;
        for placement in candidates.iter().take(self.config.branching_cap) {
            if *self.nodes >= self.config.node_budget {
                return Err(Backtrack::OverBudget);
            }
            *self.nodes += 1;

            let checkpoint = state.checkpoint();
            state.apply(word, placement);
            let reachable = can_reach_target_density(
                state.grid.filled_count(),
                remaining,
                self.avg_len,
                self.config.target_density,
                size,
            );
            if reachable {
                match self.search(state, index + 1) {
                    Ok(()) => return Ok(()),
                    Err(Backtrack::OverBudget) => return Err(Backtrack::OverBudget),
                    Err(Backtrack::Exhausted) => {}
                }
            }
            state.restore(checkpoint);
        }
        Err(Backtrack::Exhausted)
    }
}

/// Runs one backtracking rung over `words` on a fresh grid.
///
/// `nodes` is shared with other rungs so they draw from the same budget.
fn backtrack(
    size: usize,
    words: &[WordEntry],
    config: &SearchConfig,
    nodes: &mut usize,
) -> Result<SearchState, Backtrack> {
    let first = words.first().ok_or(Backtrack::Exhausted)?;
    let mut state = SearchState::seeded(size, first).ok_or(Backtrack::Exhausted)?;
    let mut backtracker = Backtracker {
        words,
        config,
        avg_len: average_length(words),
        nodes,
    };
    backtracker.search(&mut state, 1)?;
    Ok(state)
}

/// Places each word at its best-ranked placement, skipping words that have none.
///
/// # Arguments
/// * `size` - Side length of the grid.
/// * `words` - Words in search order. The first is the seed.
///
/// # Returns
/// The resulting state. It is empty only if `words` is empty or the seed does
/// not fit.
pub fn place_greedily(size: usize, words: &[WordEntry]) -> SearchState {
    let Some(mut state) = words.first().and_then(|first| SearchState::seeded(size, first)) else {
        return SearchState::new(size);
    };
    for word in &words[1..] {
        let mut candidates = state.grid.find_all_placements(&word.text);
        rank_placements(&mut candidates);
        match candidates.first() {
            Some(best) => state.apply(word, best),
            None => trace!("greedy pass skipped {}", word.text),
        }
    }
    state
}

/// Runs the fallback ladder over `words`, which must already be in search order.
///
/// # Arguments
/// * `size` - Side length of the grid.
/// * `words` - Eligible words sorted by [`crate::heuristics::order_words`].
/// * `config` - Search tuning. Assumed valid.
///
/// # Returns
/// The state produced by the first rung that succeeds, with the rung recorded
/// in [`SearchOutcome::strategy`].
pub fn run_ladder(size: usize, words: &[WordEntry], config: &SearchConfig) -> SearchOutcome {
    let mut nodes = 0;

    let over_budget = match backtrack(size, words, config, &mut nodes) {
        Ok(state) => {
            info!(
                "Backtracking placed all {} words ({} nodes)",
                words.len(),
                nodes
            );
            return SearchOutcome {
                state,
                strategy: Strategy::Backtracking,
                nodes,
            };
        }
        Err(reason) => {
            debug!("Full backtracking failed: {:?} after {} nodes", reason, nodes);
            reason == Backtrack::OverBudget
        }
    };

    if !config.fallback_enabled {
        warn!("Fallback disabled; keeping only the seed word");
        let state = words
            .first()
            .and_then(|first| SearchState::seeded(size, first))
            .unwrap_or_else(|| SearchState::new(size));
        return SearchOutcome {
            state,
            strategy: Strategy::SeedOnly,
            nodes,
        };
    }

    if !over_budget {
        let strong: Vec<WordEntry> = words
            .iter()
            .filter(|w| w.quality >= config.quality_threshold)
            .cloned()
            .collect();
        if strong.is_empty() {
            debug!(
                "No words at quality {} or above; skipping high-quality rung",
                config.quality_threshold
            );
        } else {
            match backtrack(size, &strong, config, &mut nodes) {
                Ok(state) => {
                    info!(
                        "High-quality backtracking placed {} of {} words ({} nodes)",
                        strong.len(),
                        words.len(),
                        nodes
                    );
                    return SearchOutcome {
                        state,
                        strategy: Strategy::HighQualityBacktracking,
                        nodes,
                    };
                }
                Err(reason) => {
                    debug!("High-quality backtracking failed: {:?} after {} nodes", reason, nodes)
                }
            }
        }
    } else {
        debug!("Node budget of {} exhausted; going straight to greedy", config.node_budget);
    }

    let state = place_greedily(size, words);
    if state.placed_count() >= config.min_placed_words {
        info!("Greedy placed {} of {} words", state.placed_count(), words.len());
        return SearchOutcome {
            state,
            strategy: Strategy::Greedy,
            nodes,
        };
    }

    let half = words.len().div_ceil(2);
    let state = place_greedily(size, &words[..half]);
    warn!(
        "Greedy placed too few words; reduced greedy placed {} of the top {}",
        state.placed_count(),
        half
    );
    SearchOutcome {
        state,
        strategy: Strategy::ReducedGreedy,
        nodes,
    }
}
