//! Clue numbering for a finalized grid.
//!
//! Numbers are handed out in one row-major scan. A cell starts an across entry
//! when it is not blocked, its left neighbor is the edge or a block, and its
//! right neighbor is not blocked; down entries are the same rule rotated. A cell
//! starting both gets a single number shared by the two tables.
//!
//! Clues come from the placed words. A run is listed only when a placed word
//! starts on the same cell, runs the same way, and spells exactly the run.
//! Filler runs are numbered but left out of the clue tables.

use crate::grid::{cell_at, Direction, Grid};
use std::collections::BTreeMap;

/// One line of a clue list.
#[derive(Clone, Debug, PartialEq)]
pub struct ClueEntry {
    pub clue: String,
    pub answer: String,
    pub row: usize,
    pub col: usize,
}

/// Clue entries keyed by clue number, iterated in ascending order.
pub type ClueTable = BTreeMap<u32, ClueEntry>;

/// Output of [`number_grid`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Numbering {
    pub across: ClueTable,
    pub down: ClueTable,
    /// Clue number printed in each cell, if any.
    pub numbers: Vec<Vec<Option<u32>>>,
}

fn is_open(grid: &Grid, r: isize, c: isize) -> bool {
    let size = grid.size() as isize;
    (0..size).contains(&r) && (0..size).contains(&c) && !grid.cell(r as usize, c as usize).is_blocked()
}

fn starts_entry(grid: &Grid, r: usize, c: usize, direction: Direction) -> bool {
    let (dr, dc) = direction.delta();
    let (r, c) = (r as isize, c as isize);
    is_open(grid, r, c) && !is_open(grid, r - dr, c - dc) && is_open(grid, r + dr, c + dc)
}

/// Reads the run starting at `(row, col)` up to the next block or edge.
fn read_run(grid: &Grid, row: usize, col: usize, direction: Direction) -> String {
    let mut answer = String::new();
    for offset in 0.. {
        let (r, c) = cell_at(row, col, direction, offset);
        if r >= grid.size() || c >= grid.size() || grid.cell(r, c).is_blocked() {
            break;
        }
        answer.push(grid.cell(r, c).to_char());
    }
    answer
}

/// Numbers `grid` and builds the across and down clue tables.
///
/// Every placed word that ends up in a clue table has its `clue_number`
/// rewritten to the final number. Words left out keep their provisional
/// number.
///
/// # Examples
/// ```
/// use crossword_synth::numbering::number_grid;
/// use crossword_synth::utils::grid_from_str_array;
///
/// let mut grid = grid_from_str_array(&["AB", "C#"]).unwrap();
/// let numbering = number_grid(&mut grid);
/// assert_eq!(numbering.numbers[0][0], Some(1));
/// // No placed words, so nothing has a clue.
/// assert!(numbering.across.is_empty());
/// ```
pub fn number_grid(grid: &mut Grid) -> Numbering {
    let size = grid.size();
    let mut numbering = Numbering {
        numbers: vec![vec![None; size]; size],
        ..Numbering::default()
    };
    let mut next = 1;

    for r in 0..size {
        for c in 0..size {
            let across = starts_entry(grid, r, c, Direction::Across);
            let down = starts_entry(grid, r, c, Direction::Down);
            if !across && !down {
                continue;
            }
            let number = next;
            next += 1;
            numbering.numbers[r][c] = Some(number);

            for (starts, direction) in [(across, Direction::Across), (down, Direction::Down)] {
                if !starts {
                    continue;
                }
                let answer = read_run(grid, r, c, direction);
                let matched = grid.placed_words_mut().iter_mut().find(|p| {
                    p.row == r && p.col == c && p.direction == direction && p.entry.text == answer
                });
                let Some(word) = matched else {
                    continue;
                };
                word.clue_number = number;
                let entry = ClueEntry {
                    clue: word.entry.clue.clone(),
                    answer,
                    row: r,
                    col: c,
                };
                match direction {
                    Direction::Across => numbering.across.insert(number, entry),
                    Direction::Down => numbering.down.insert(number, entry),
                };
            }
        }
    }
    numbering
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordEntry;
    use crate::grid::Placement;
    use crate::postprocess::finalize;

    fn place(grid: &mut Grid, text: &str, clue: &str, row: usize, col: usize, direction: Direction, provisional: u32) {
        let placement = Placement { row, col, direction, score: 0.0, new_cells: 0 };
        grid.place_word(&WordEntry::new(text, clue, 0.9), &placement, provisional);
    }

    /// #####
    /// #####
    /// #CAT#
    /// #A###
    /// ARC##
    fn cat_car_arc() -> Grid {
        let mut grid = Grid::new_empty(5);
        place(&mut grid, "CAT", "Feline", 2, 1, Direction::Across, 1);
        place(&mut grid, "CAR", "Vehicle", 2, 1, Direction::Down, 2);
        place(&mut grid, "ARC", "Curve", 4, 0, Direction::Across, 3);
        finalize(&mut grid);
        grid
    }

    #[test]
    fn test_shared_number_for_across_and_down_start() {
        let mut grid = cat_car_arc();
        let numbering = number_grid(&mut grid);

        assert_eq!(numbering.numbers[2][1], Some(1));
        assert_eq!(numbering.numbers[4][0], Some(2));
        let numbered: usize = numbering.numbers.iter().flatten().filter(|n| n.is_some()).count();
        assert_eq!(numbered, 2);

        assert_eq!(numbering.across.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(numbering.across[&1].answer, "CAT");
        assert_eq!(numbering.across[&1].clue, "Feline");
        assert_eq!(numbering.across[&2].answer, "ARC");
        assert_eq!((numbering.across[&2].row, numbering.across[&2].col), (4, 0));
        assert_eq!(numbering.down.len(), 1);
        assert_eq!(numbering.down[&1].answer, "CAR");
        assert_eq!(numbering.down[&1].clue, "Vehicle");
    }

    #[test]
    fn test_placed_words_get_final_numbers() {
        let mut grid = cat_car_arc();
        number_grid(&mut grid);
        let numbers: Vec<u32> = grid.placed_words().iter().map(|p| p.clue_number).collect();
        assert_eq!(numbers, vec![1, 1, 2]);
    }

    #[test]
    fn test_runs_without_placed_word_have_no_clue() {
        let mut grid = cat_car_arc();
        // Extend CAT into the block so the run no longer spells a placed word.
        grid.set_cell(2, 4, crate::grid::Cell::Letter('S'));
        let numbering = number_grid(&mut grid);
        assert_eq!(numbering.numbers[2][1], Some(1));
        assert!(!numbering.across.contains_key(&1));
        assert!(numbering.down.contains_key(&1));
        // CAT keeps its provisional number.
        assert_eq!(grid.placed_words()[0].clue_number, 1);
        assert_eq!(grid.placed_words()[2].clue_number, 2);
    }

    #[test]
    fn test_numbers_follow_reading_order() {
        let mut grid = crate::utils::grid_from_str_array(&["AB#", "C#D", "EFG"]).unwrap();
        let numbering = number_grid(&mut grid);
        // (0,0) across+down, (1,2) down, (2,0) across.
        assert_eq!(numbering.numbers[0][0], Some(1));
        assert_eq!(numbering.numbers[0][1], None);
        assert_eq!(numbering.numbers[1][2], Some(2));
        assert_eq!(numbering.numbers[2][0], Some(3));
    }
}
