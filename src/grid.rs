//! The crossword grid and the placement rules that govern it.
//!
//! This module defines:
//! - `Cell`: the state of one square (`Empty`, `Letter`, `Blocked`).
//! - `Direction` and `Placement`: where a word could go and how good that spot is.
//! - `PlacedWord`: a committed placement with its provisional clue number.
//! - `Grid`: the square matrix of cells plus the ordered list of placed words,
//!   with the validator (`can_place`) and candidate enumeration
//!   (`find_all_placements`) used by the search.
//!
//! `Blocked` cells are never written during search; they only appear after
//! post-processing.

use crate::catalog::WordEntry;
use crate::heuristics::placement_score;
use std::fmt;

/// State of a single grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not yet decided. Only exists while the puzzle is being built.
    Empty,
    /// A filled square holding an uppercase letter.
    Letter(char),
    /// A black square.
    Blocked,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossword_synth::grid::Cell;
    /// assert_eq!(Cell::Letter('Q').to_char(), 'Q');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// assert_eq!(Cell::Blocked.to_char(), '#');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Letter(c) => *c,
            Cell::Blocked => '#',
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Cell::Letter(_))
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Cell::Blocked)
    }
}

/// Orientation of a word in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The other orientation.
    pub fn perpendicular(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Row and column step for one letter in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates of the `offset`-th letter of a word starting at `(row, col)`.
pub fn cell_at(row: usize, col: usize, direction: Direction, offset: usize) -> (usize, usize) {
    match direction {
        Direction::Across => (row, col + offset),
        Direction::Down => (row + offset, col),
    }
}

/// A validated candidate position for a word, with its ranking data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    /// `1 + intersections + 0.1 * new_cells`, see [`placement_score`].
    pub score: f64,
    /// Number of currently empty cells this placement would fill.
    pub new_cells: usize,
}

/// A word committed to the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub entry: WordEntry,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    /// Provisional during search; rewritten by clue numbering.
    pub clue_number: u32,
}

impl PlacedWord {
    /// Iterates over the cells this word occupies, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.entry.len()).map(move |i| cell_at(self.row, self.col, self.direction, i))
    }

    /// Offset of `(row, col)` within this word, if the word covers that cell.
    pub fn offset_of(&self, row: usize, col: usize) -> Option<usize> {
        let offset = match self.direction {
            Direction::Across if row == self.row && col >= self.col => col - self.col,
            Direction::Down if col == self.col && row >= self.row => row - self.row,
            _ => return None,
        };
        (offset < self.entry.len()).then_some(offset)
    }

    /// Whether the two words share at least one cell.
    pub fn intersects(&self, other: &PlacedWord) -> bool {
        self.cells().any(|(r, c)| other.offset_of(r, c).is_some())
    }
}

/// Square matrix of cells plus the index of placed words.
///
/// The grid keeps a running count of letter cells so that fill checks during
/// search do not rescan the matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    placed: Vec<PlacedWord>,
    filled: usize,
}

impl Grid {
    /// Creates a `size`×`size` grid with every cell `Cell::Empty`.
    ///
    /// # Examples
    /// ```
    /// use crossword_synth::grid::{Cell, Grid};
    /// let grid = Grid::new_empty(5);
    /// assert_eq!(grid.size(), 5);
    /// assert_eq!(grid.cell(4, 4), Cell::Empty);
    /// assert!(grid.placed_words().is_empty());
    /// ```
    pub fn new_empty(size: usize) -> Self {
        Grid {
            size,
            cells: vec![Cell::Empty; size * size],
            placed: Vec::new(),
            filled: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the grid.
    pub fn cell(&self, r: usize, c: usize) -> Cell {
        assert!(r < self.size && c < self.size, "cell ({}, {}) outside {}x{} grid", r, c, self.size, self.size);
        self.cells[r * self.size + c]
    }

    /// Overwrites the cell at `(r, c)`, keeping the letter count in sync.
    ///
    /// This bypasses placement validation and does not touch the placed-word
    /// index; it is meant for post-processing and for building test grids.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the grid.
    pub fn set_cell(&mut self, r: usize, c: usize, cell: Cell) {
        assert!(r < self.size && c < self.size, "cell ({}, {}) outside {}x{} grid", r, c, self.size, self.size);
        let slot = &mut self.cells[r * self.size + c];
        match (slot.is_letter(), cell.is_letter()) {
            (true, false) => self.filled -= 1,
            (false, true) => self.filled += 1,
            _ => {}
        }
        *slot = cell;
    }

    /// Copies the cells out as a row-major matrix.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size.max(1)).map(<[Cell]>::to_vec).take(self.size).collect()
    }

    /// Placed words in insertion (search) order.
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed
    }

    pub(crate) fn placed_words_mut(&mut self) -> &mut [PlacedWord] {
        &mut self.placed
    }

    /// Number of cells holding a letter.
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Fraction of cells holding a letter.
    pub fn density(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        self.filled as f64 / (self.size * self.size) as f64
    }

    /// Counts cells in the given state.
    pub fn count(&self, wanted: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == wanted).count()
    }

    fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size
    }

    /// Whether `(r, c)` is inside the grid and holds a letter. Off-grid is `false`.
    pub fn is_letter_at(&self, r: isize, c: isize) -> bool {
        self.in_bounds(r, c) && self.cell(r as usize, c as usize).is_letter()
    }

    /// Whether some placed word running in `direction` already covers `(r, c)`.
    fn is_claimed(&self, r: usize, c: usize, direction: Direction) -> bool {
        self.placed
            .iter()
            .any(|p| p.direction == direction && p.offset_of(r, c).is_some())
    }

    /// Checks whether `text` can be written starting at `(row, col)` in `direction`.
    ///
    /// A placement is rejected when:
    /// - any part of it lies outside the grid;
    /// - an occupied cell holds a different letter, or is `Blocked`;
    /// - an occupied cell already belongs to a word running the same way;
    /// - a cell it would newly fill has a letter on either perpendicular side
    ///   (that would create an unclued letter run);
    /// - the cell just before the start or just after the end holds a letter
    ///   (that would run two words together);
    /// - the grid already has placed words and this placement crosses none of
    ///   them, or crosses them without filling any new cell.
    ///
    /// The first word on an empty grid needs no intersection.
    pub fn can_place(&self, text: &str, row: isize, col: isize, direction: Direction) -> bool {
        let len = text.chars().count();
        if len == 0 {
            return false;
        }
        let (dr, dc) = direction.delta();
        let end_r = row + dr * (len as isize - 1);
        let end_c = col + dc * (len as isize - 1);
        if !self.in_bounds(row, col) || !self.in_bounds(end_r, end_c) {
            return false;
        }

        if self.is_letter_at(row - dr, col - dc) || self.is_letter_at(end_r + dr, end_c + dc) {
            return false;
        }

        let (pr, pc) = direction.perpendicular().delta();
        let mut intersections = 0;
        for (i, letter) in text.chars().enumerate() {
            let r = row + dr * i as isize;
            let c = col + dc * i as isize;
            match self.cell(r as usize, c as usize) {
                Cell::Letter(existing) => {
                    if existing != letter || self.is_claimed(r as usize, c as usize, direction) {
                        return false;
                    }
                    intersections += 1;
                }
                Cell::Blocked => return false,
                Cell::Empty => {
                    if self.is_letter_at(r - pr, c - pc) || self.is_letter_at(r + pr, c + pc) {
                        return false;
                    }
                }
            }
        }

        self.placed.is_empty() || (intersections > 0 && intersections < len)
    }

    /// Counts how many existing letters a fitting placement would cross.
    ///
    /// The rest of the word's cells are the ones the placement newly fills.
    pub fn count_intersections(&self, text: &str, row: usize, col: usize, direction: Direction) -> usize {
        (0..text.chars().count())
            .map(|i| cell_at(row, col, direction, i))
            .filter(|&(r, c)| self.cell(r, c).is_letter())
            .count()
    }

    /// The centered across slot used for the first word of a search.
    ///
    /// Returns `None` if the word does not fit on this grid.
    pub fn seed_placement(&self, text: &str) -> Option<Placement> {
        let len = text.chars().count();
        if len > self.size {
            return None;
        }
        let row = self.size / 2;
        let col = (self.size - len) / 2;
        if !self.can_place(text, row as isize, col as isize, Direction::Across) {
            return None;
        }
        let intersections = self.count_intersections(text, row, col, Direction::Across);
        let new_cells = len - intersections;
        Some(Placement {
            row,
            col,
            direction: Direction::Across,
            score: placement_score(intersections, new_cells),
            new_cells,
        })
    }

    /// Enumerates every valid placement of `text` that crosses a placed word.
    ///
    /// For each placed word and each pair of matching letters, the candidate
    /// runs perpendicular to the placed word through the shared cell. Each
    /// distinct `(row, col, direction)` is validated once with
    /// [`Grid::can_place`] and scored. The result is in enumeration order,
    /// unsorted.
    pub fn find_all_placements(&self, text: &str) -> Vec<Placement> {
        let letters: Vec<char> = text.chars().collect();
        let mut candidates: Vec<Placement> = Vec::new();
        let mut tried: Vec<(isize, isize, Direction)> = Vec::new();

        for placed in &self.placed {
            for (j, placed_letter) in placed.entry.text.chars().enumerate() {
                for (i, &letter) in letters.iter().enumerate() {
                    if letter != placed_letter {
                        continue;
                    }
                    let (row, col, direction) = match placed.direction {
                        Direction::Across => (
                            placed.row as isize - i as isize,
                            (placed.col + j) as isize,
                            Direction::Down,
                        ),
                        Direction::Down => (
                            (placed.row + j) as isize,
                            placed.col as isize - i as isize,
                            Direction::Across,
                        ),
                    };
                    if tried.contains(&(row, col, direction)) {
                        continue;
                    }
                    tried.push((row, col, direction));

                    if !self.can_place(text, row, col, direction) {
                        continue;
                    }
                    let (row, col) = (row as usize, col as usize);
                    let intersections = self.count_intersections(text, row, col, direction);
                    let new_cells = letters.len() - intersections;
                    candidates.push(Placement {
                        row,
                        col,
                        direction,
                        score: placement_score(intersections, new_cells),
                        new_cells,
                    });
                }
            }
        }
        candidates
    }

    /// Writes `entry` into the grid at `placement` and records it.
    ///
    /// The caller is responsible for having validated the placement.
    pub fn place_word(&mut self, entry: &WordEntry, placement: &Placement, clue_number: u32) {
        debug_assert!(
            self.can_place(
                &entry.text,
                placement.row as isize,
                placement.col as isize,
                placement.direction
            ),
            "placing {} at {:?} violates grid rules",
            entry.text,
            placement
        );
        for (i, letter) in entry.text.chars().enumerate() {
            let (r, c) = cell_at(placement.row, placement.col, placement.direction, i);
            self.set_cell(r, c, Cell::Letter(letter));
        }
        self.placed.push(PlacedWord {
            entry: entry.clone(),
            row: placement.row,
            col: placement.col,
            direction: placement.direction,
            clue_number,
        });
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            let line: String = row.iter().map(Cell::to_char).collect();
            if r + 1 < self.size {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
