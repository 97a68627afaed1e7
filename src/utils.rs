use crate::grid::{Cell, Grid};

/// Parses an array of string slices into a square `Grid`.
///
/// Each string slice is one row, starting from row 0. The number of rows sets
/// the grid size, and every row must have exactly that many characters.
///
/// Valid characters for cells are:
/// - 'A'..='Z': `Cell::Letter`
/// - '.': `Cell::Empty`
/// - '#': `Cell::Blocked`
///
/// The grid has no placed words; letters written this way are loose cells.
/// This is meant for building fixtures in tests and docs.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the grid.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(String)` if:
///     - Any row's character length differs from the number of rows.
///     - An unrecognized character is encountered.
///
/// # Examples
/// ```
/// use crossword_synth::utils::grid_from_str_array;
/// use crossword_synth::grid::Cell;
///
/// let grid = grid_from_str_array(&["CAT", "A#.", "R.."]).unwrap();
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid.cell(0, 1), Cell::Letter('A'));
/// assert_eq!(grid.cell(1, 1), Cell::Blocked);
/// assert_eq!(grid.cell(2, 2), Cell::Empty);
/// assert_eq!(grid.filled_count(), 5);
///
/// assert!(grid_from_str_array(&["ab", "cd"]).is_err());
/// assert!(grid_from_str_array(&["ABC", "D"]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> Result<Grid, String> {
    let size = s.len();
    let mut grid = Grid::new_empty(size);

    for (r, row_str) in s.iter().enumerate() {
        let width = row_str.chars().count();
        if width != size {
            return Err(format!(
                "Row {} has {} characters, expected {} for a square grid",
                r, width, size
            ));
        }

        for (c, ch) in row_str.chars().enumerate() {
            let cell = match ch {
                'A'..='Z' => Cell::Letter(ch),
                '.' => Cell::Empty,
                '#' => Cell::Blocked,
                _ => {
                    return Err(format!(
                        "Unrecognized character '{}' in row {} col {}",
                        ch, r, c
                    ))
                }
            };
            grid.set_cell(r, c, cell);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_array_valid() {
        let grid = grid_from_str_array(&["#CAT#", ".A...", "ARC..", ".....", "....."]).unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.cell(0, 0), Cell::Blocked);
        assert_eq!(grid.cell(2, 2), Cell::Letter('C'));
        assert_eq!(grid.filled_count(), 7);
        assert!(grid.placed_words().is_empty());
        assert_eq!(grid.to_string(), "#CAT#\n.A...\nARC..\n.....\n.....");
    }

    #[test]
    fn test_grid_from_str_array_invalid_char() {
        let result = grid_from_str_array(&["AB", "C?"]);
        assert!(result.unwrap_err().contains("Unrecognized character '?'"));
    }

    #[test]
    fn test_grid_from_str_array_lowercase_rejected() {
        let result = grid_from_str_array(&["ab", ".."]);
        assert!(result.unwrap_err().contains("Unrecognized character 'a' in row 0 col 0"));
    }

    #[test]
    fn test_grid_from_str_array_not_square() {
        let result = grid_from_str_array(&["ABC", "DEF"]);
        assert!(result.unwrap_err().contains("Row 0 has 3 characters, expected 2"));
    }

    #[test]
    fn test_grid_from_str_array_empty_input() {
        let grid = grid_from_str_array(&[]).unwrap();
        assert_eq!(grid.size(), 0);
        assert_eq!(grid.density(), 0.0);
    }
}
