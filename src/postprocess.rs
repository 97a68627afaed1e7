//! Post-search grid clean-up.
//!
//! Runs in this order on the grid returned by the search:
//! 1. [`backfill`]: writes filler letters into empty cells that touch a letter.
//! 2. [`finalize`]: turns every remaining empty cell into a block.
//! 3. [`enforce_symmetry`]: mirrors the block pattern.
//!
//! No step blocks a letter of a placed word or puts a letter on a placed
//! word's cap, so every placed word still spells its own run afterwards.
//! Filler letters are not checked against any dictionary. Runs made purely of
//! filler get a clue number but no clue.

use crate::grid::{Cell, Grid};
use crate::solver::{SearchConfig, SymmetryMode};
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Letters used for filler cells.
pub const COMMON_LETTERS: [char; 10] = ['E', 'A', 'R', 'I', 'O', 'T', 'N', 'S', 'L', 'C'];

/// What post-processing changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostReport {
    /// Empty cells given a filler letter.
    pub filler: usize,
    /// Empty cells blocked for having no letter neighbor.
    pub isolated: usize,
    /// Empty cells blocked by the final sweep.
    pub swept: usize,
    /// Cells rewritten to satisfy symmetry.
    pub mirrored: usize,
    /// Mirror pairs left unmatched to keep placed words intact.
    pub asymmetric: usize,
}

/// Runs every post-processing step `config` asks for.
///
/// The filler generator is seeded from `config.seed`, so the same grid and
/// config always produce the same output.
pub fn post_process(grid: &mut Grid, config: &SearchConfig) -> PostReport {
    let mut report = PostReport::default();
    let mut rng = SmallRng::seed_from_u64(config.seed);
    if config.backfill {
        report.filler = backfill(grid, &mut rng);
        if report.filler > 0 {
            warn!(
                "Inserted {} filler letters that are not validated as words",
                report.filler
            );
        }
    }
    (report.isolated, report.swept) = finalize(grid);
    let filler = config.backfill.then_some(&mut rng);
    (report.mirrored, report.asymmetric) = enforce_symmetry(grid, config.symmetry, filler);
    if report.asymmetric > 0 {
        warn!(
            "Left {} cell pairs asymmetric where a placed word meets a block",
            report.asymmetric
        );
    }
    debug!(
        "Post-processing: {} filler, {} isolated, {} swept, {} mirrored, {} asymmetric",
        report.filler, report.isolated, report.swept, report.mirrored, report.asymmetric
    );
    report
}

/// Marks the cell just before and just after every placed word.
fn cap_mask(grid: &Grid) -> Vec<bool> {
    let size = grid.size() as isize;
    let mut caps = vec![false; grid.size() * grid.size()];
    let mut mark = |r: isize, c: isize| {
        if (0..size).contains(&r) && (0..size).contains(&c) {
            caps[(r * size + c) as usize] = true;
        }
    };
    for word in grid.placed_words() {
        let (dr, dc) = word.direction.delta();
        let (row, col) = (word.row as isize, word.col as isize);
        let len = word.entry.len() as isize;
        mark(row - dr, col - dc);
        mark(row + dr * len, col + dc * len);
    }
    caps
}

/// Marks every cell covered by a placed word.
fn word_mask(grid: &Grid) -> Vec<bool> {
    let size = grid.size();
    let mut covered = vec![false; size * size];
    for word in grid.placed_words() {
        for (r, c) in word.cells() {
            covered[r * size + c] = true;
        }
    }
    covered
}

fn has_letter_neighbor(grid: &Grid, r: usize, c: usize) -> bool {
    let (r, c) = (r as isize, c as isize);
    grid.is_letter_at(r - 1, c)
        || grid.is_letter_at(r + 1, c)
        || grid.is_letter_at(r, c - 1)
        || grid.is_letter_at(r, c + 1)
}

/// Fills empty cells that would extend a letter run to two or more cells.
///
/// Eligibility is judged on the grid as it was before the pass, so filling one
/// cell never makes a neighbor eligible. Caps of placed words are skipped so
/// that no placed word is lengthened.
///
/// # Returns
/// The number of cells filled.
pub fn backfill(grid: &mut Grid, rng: &mut SmallRng) -> usize {
    let before = grid.clone();
    let caps = cap_mask(&before);
    let size = before.size();
    let mut filled = 0;
    for r in 0..size {
        for c in 0..size {
            if before.cell(r, c) != Cell::Empty || caps[r * size + c] {
                continue;
            }
            if has_letter_neighbor(&before, r, c) {
                let letter = COMMON_LETTERS[rng.gen_range(0..COMMON_LETTERS.len())];
                grid.set_cell(r, c, Cell::Letter(letter));
                filled += 1;
            }
        }
    }
    filled
}

/// Converts every empty cell to `Cell::Blocked`.
///
/// # Returns
/// `(isolated, swept)`: cells blocked because no orthogonal neighbor holds a
/// letter, and cells blocked by the unconditional sweep afterwards.
pub fn finalize(grid: &mut Grid) -> (usize, usize) {
    let size = grid.size();
    let mut isolated = 0;
    for r in 0..size {
        for c in 0..size {
            if grid.cell(r, c) == Cell::Empty && !has_letter_neighbor(grid, r, c) {
                grid.set_cell(r, c, Cell::Blocked);
                isolated += 1;
            }
        }
    }

    let mut swept = 0;
    for r in 0..size {
        for c in 0..size {
            if grid.cell(r, c) == Cell::Empty {
                grid.set_cell(r, c, Cell::Blocked);
                swept += 1;
            }
        }
    }
    (isolated, swept)
}

/// Makes the block pattern symmetric under `mode`.
///
/// For [`SymmetryMode::Rotational`], `(r, c)` is paired with
/// `(size-1-r, size-1-c)`. When only one cell of a pair is blocked:
/// - an open cell that no placed word covers is blocked;
/// - otherwise the blocked cell gets a filler letter from `filler`, provided
///   it is not a cap and touches a placed letter;
/// - otherwise the pair stays asymmetric.
///
/// Passing `None` for `filler` never opens a block.
///
/// # Returns
/// `(changed, asymmetric)`: cells rewritten, and pairs left unmatched.
pub fn enforce_symmetry(
    grid: &mut Grid,
    mode: SymmetryMode,
    mut filler: Option<&mut SmallRng>,
) -> (usize, usize) {
    if mode == SymmetryMode::None {
        return (0, 0);
    }
    let size = grid.size();
    let caps = cap_mask(grid);
    let covered = word_mask(grid);
    let touches_word = |r: usize, c: usize| {
        let (r, c) = (r as isize, c as isize);
        [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)]
            .into_iter()
            .any(|(nr, nc)| {
                (0..size as isize).contains(&nr)
                    && (0..size as isize).contains(&nc)
                    && covered[nr as usize * size + nc as usize]
            })
    };

    let last = size * size;
    let (mut changed, mut asymmetric) = (0, 0);
    for index in 0..last / 2 {
        let mirror = last - 1 - index;
        let here = grid.cell(index / size, index % size).is_blocked();
        let there = grid.cell(mirror / size, mirror % size).is_blocked();
        let (blocked, open) = match (here, there) {
            (true, false) => (index, mirror),
            (false, true) => (mirror, index),
            _ => continue,
        };
        let (br, bc) = (blocked / size, blocked % size);
        if !covered[open] {
            grid.set_cell(open / size, open % size, Cell::Blocked);
            changed += 1;
            continue;
        }
        match filler.as_deref_mut() {
            Some(rng) if !caps[blocked] && touches_word(br, bc) => {
                let letter = COMMON_LETTERS[rng.gen_range(0..COMMON_LETTERS.len())];
                grid.set_cell(br, bc, Cell::Letter(letter));
                changed += 1;
            }
            _ => asymmetric += 1,
        }
    }
    (changed, asymmetric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordEntry;

    fn grid_with_cat() -> Grid {
        let mut grid = Grid::new_empty(5);
        let seed = grid.seed_placement("CAT").unwrap();
        grid.place_word(&WordEntry::new("CAT", "Feline", 0.9), &seed, 1);
        grid
    }

    #[test]
    fn test_backfill_fills_neighbors_but_not_caps() {
        let mut grid = grid_with_cat();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(backfill(&mut grid, &mut rng), 6);
        for (r, c) in [(1, 1), (1, 2), (1, 3), (3, 1), (3, 2), (3, 3)] {
            match grid.cell(r, c) {
                Cell::Letter(l) => assert!(COMMON_LETTERS.contains(&l)),
                other => panic!("({}, {}) should hold filler, got {:?}", r, c, other),
            }
        }
        // Caps of CAT stay empty.
        assert_eq!(grid.cell(2, 0), Cell::Empty);
        assert_eq!(grid.cell(2, 4), Cell::Empty);
        // No cascade into the outer ring.
        assert_eq!(grid.cell(0, 2), Cell::Empty);
        assert_eq!(grid.filled_count(), 9);
    }

    #[test]
    fn test_backfill_is_deterministic_for_a_seed() {
        let mut first = grid_with_cat();
        let mut second = grid_with_cat();
        backfill(&mut first, &mut SmallRng::seed_from_u64(42));
        backfill(&mut second, &mut SmallRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_finalize_blocks_every_empty_cell() {
        let mut grid = grid_with_cat();
        // Only the caps and the six cells above and below CAT touch a letter.
        assert_eq!(finalize(&mut grid), (14, 8));
        assert_eq!(grid.count(Cell::Empty), 0);
        assert_eq!(grid.count(Cell::Blocked), 22);
        assert_eq!(grid.to_string(), "#####\n#####\n#CAT#\n#####\n#####");
    }

    #[test]
    fn test_enforce_symmetry_rotational() {
        let mut grid = Grid::new_empty(3);
        for r in 0..3 {
            for c in 0..3 {
                grid.set_cell(r, c, Cell::Letter('A'));
            }
        }
        grid.set_cell(0, 0, Cell::Blocked);
        grid.set_cell(2, 1, Cell::Blocked);

        assert_eq!(enforce_symmetry(&mut grid.clone(), SymmetryMode::None, None), (0, 0));
        // No placed words, so both open mirrors are blocked.
        assert_eq!(enforce_symmetry(&mut grid, SymmetryMode::Rotational, None), (2, 0));
        assert_eq!(grid.cell(2, 2), Cell::Blocked);
        assert_eq!(grid.cell(0, 1), Cell::Blocked);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(grid.cell(r, c).is_blocked(), grid.cell(2 - r, 2 - c).is_blocked());
            }
        }
        assert_eq!(enforce_symmetry(&mut grid, SymmetryMode::Rotational, None), (0, 0));
    }

    #[test]
    fn test_enforce_symmetry_never_cuts_placed_words() {
        // CATS sits at cols 0..=3, so its trailing cap mirrors onto the C.
        let mut grid = Grid::new_empty(5);
        let seed = grid.seed_placement("CATS").unwrap();
        grid.place_word(&WordEntry::new("CATS", "Felines", 0.9), &seed, 1);
        let bad = grid
            .find_all_placements("BAD")
            .into_iter()
            .find(|p| (p.row, p.col) == (1, 1))
            .unwrap();
        grid.place_word(&WordEntry::new("BAD", "Not good", 0.9), &bad, 2);
        finalize(&mut grid);
        assert_eq!(grid.to_string(), "#####\n#B###\nCATS#\n#D###\n#####");

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(enforce_symmetry(&mut grid, SymmetryMode::Rotational, Some(&mut rng)), (2, 1));
        // B and D mirror onto blocks beside the S, which take filler.
        for (r, c) in [(1, 3), (3, 3)] {
            match grid.cell(r, c) {
                Cell::Letter(l) => assert!(COMMON_LETTERS.contains(&l)),
                other => panic!("({}, {}) should hold filler, got {:?}", r, c, other),
            }
        }
        // The cap after CATS stays blocked and the C stays a letter.
        assert_eq!(grid.cell(2, 4), Cell::Blocked);
        assert_eq!(grid.cell(2, 0), Cell::Letter('C'));
        for word in grid.placed_words() {
            for ((r, c), letter) in word.cells().zip(word.entry.text.chars()) {
                assert_eq!(grid.cell(r, c), Cell::Letter(letter));
            }
        }

        let mut unfilled = grid_with_cat();
        finalize(&mut unfilled);
        assert_eq!(enforce_symmetry(&mut unfilled, SymmetryMode::Rotational, None), (0, 0));
    }

    #[test]
    fn test_enforce_symmetry_without_filler_leaves_pairs() {
        let mut grid = Grid::new_empty(5);
        let seed = grid.seed_placement("CATS").unwrap();
        grid.place_word(&WordEntry::new("CATS", "Felines", 0.9), &seed, 1);
        let bad = grid
            .find_all_placements("BAD")
            .into_iter()
            .find(|p| (p.row, p.col) == (1, 1))
            .unwrap();
        grid.place_word(&WordEntry::new("BAD", "Not good", 0.9), &bad, 2);
        finalize(&mut grid);
        let before = grid.clone();
        assert_eq!(enforce_symmetry(&mut grid, SymmetryMode::Rotational, None), (0, 3));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_post_process_without_backfill() {
        let mut grid = grid_with_cat();
        let config = SearchConfig::basic();
        let report = post_process(&mut grid, &config);
        assert_eq!(report.filler, 0);
        assert_eq!(report.isolated + report.swept, 22);
        assert_eq!(grid.filled_count(), 3);
    }

    #[test]
    fn test_post_process_with_backfill_and_symmetry() {
        let mut grid = grid_with_cat();
        let config = SearchConfig::default().with_symmetry(SymmetryMode::Rotational);
        let report = post_process(&mut grid, &config);
        assert_eq!(report.filler, 6);
        assert_eq!(report.isolated, 4);
        assert_eq!(report.swept, 12);
        // The filled 3x3 block is already centered, so nothing to mirror.
        assert_eq!(report.mirrored, 0);
        assert_eq!(report.asymmetric, 0);
        assert_eq!(grid.count(Cell::Empty), 0);
    }
}
