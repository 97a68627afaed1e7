//! Scoring functions that steer the search.
//!
//! Two kinds of heuristics live here:
//! - *Variable ordering*: [`intersection_score`] and [`order_words`] decide which
//!   word the search commits to next. They depend only on the word itself.
//! - *Value ordering*: [`placement_score`] ranks candidate positions for one word
//!   against the current grid.
//!
//! [`can_reach_target_density`] is the pruning estimate used by the backtracking
//! driver.

use crate::catalog::WordEntry;
use crate::grid::Placement;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Bonus added per extra occurrence of a repeated letter.
pub const REPEAT_BONUS: f64 = 5.0;

/// Fraction of a remaining word's letters assumed to land on new cells when
/// estimating reachable fill.
pub const OVERLAP_FACTOR: f64 = 0.7;

/// Returns the relative frequency (in percent) of `letter` in English text.
///
/// Non-letters score `0.0`. Lowercase input is accepted.
///
/// # Examples
/// ```
/// use crossword_synth::heuristics::letter_frequency;
/// assert_eq!(letter_frequency('E'), 12.7);
/// assert_eq!(letter_frequency('z'), 0.1);
/// assert_eq!(letter_frequency('-'), 0.0);
/// ```
pub fn letter_frequency(letter: char) -> f64 {
    match letter.to_ascii_uppercase() {
        'E' => 12.7,
        'T' => 9.1,
        'A' => 8.2,
        'O' => 7.5,
        'I' => 7.0,
        'N' => 6.7,
        'S' => 6.3,
        'H' => 6.1,
        'R' => 6.0,
        'D' => 4.3,
        'L' => 4.0,
        'U' => 2.8,
        'C' => 2.8,
        'M' => 2.4,
        'W' => 2.4,
        'F' => 2.2,
        'Y' => 2.0,
        'G' => 2.0,
        'P' => 1.9,
        'B' => 1.5,
        'V' => 1.0,
        'K' => 0.8,
        'J' => 0.2,
        'X' => 0.2,
        'Q' => 0.1,
        'Z' => 0.1,
        _ => 0.0,
    }
}

/// Calculates how readily `text` is expected to intersect other words.
///
/// The score is the sum of [`letter_frequency`] over every letter, plus
/// `REPEAT_BONUS * (count - 1)` for each letter that occurs more than once.
///
/// # Examples
/// ```
/// use crossword_synth::heuristics::intersection_score;
/// // C + A + T
/// assert!((intersection_score("CAT") - 20.1).abs() < 1e-9);
/// // T + R + E + E, plus one repeat of E
/// assert!((intersection_score("TREE") - 45.5).abs() < 1e-9);
/// ```
pub fn intersection_score(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut score = 0.0;
    for letter in text.chars() {
        score += letter_frequency(letter);
        *counts.entry(letter).or_insert(0) += 1;
    }
    let repeats: usize = counts.values().filter(|&&n| n > 1).map(|&n| n - 1).sum();
    score + REPEAT_BONUS * repeats as f64
}

/// Compares two entries for search order: higher quality first, then higher
/// intersection score, then longer text.
pub fn compare_for_search(a: &WordEntry, b: &WordEntry) -> Ordering {
    b.quality
        .total_cmp(&a.quality)
        .then_with(|| intersection_score(&b.text).total_cmp(&intersection_score(&a.text)))
        .then_with(|| b.len().cmp(&a.len()))
}

/// Returns `words` sorted into search order (see [`compare_for_search`]).
///
/// The sort is stable, so entries that tie on every key keep catalog order and
/// the result is deterministic.
pub fn order_words(words: &[WordEntry]) -> Vec<WordEntry> {
    let mut ordered = words.to_vec();
    ordered.sort_by(compare_for_search);
    ordered
}

/// Scores a candidate placement: `1 + intersections + 0.1 * new_cells`.
///
/// Placements that cross more existing letters and fill more empty cells are
/// tried first.
pub fn placement_score(intersections: usize, new_cells: usize) -> f64 {
    1.0 + intersections as f64 + 0.1 * new_cells as f64
}

/// Sorts candidate placements best first: higher score, then more new cells.
///
/// The sort is stable, so equal candidates stay in enumeration order.
pub fn rank_placements(placements: &mut [Placement]) {
    placements.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.new_cells.cmp(&a.new_cells))
    });
}

/// Mean text length of `words`, or `0.0` for an empty slice.
pub fn average_length(words: &[WordEntry]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    words.iter().map(WordEntry::len).sum::<usize>() as f64 / words.len() as f64
}

/// Estimates whether the target fill can still be reached.
///
/// Assumes each of the `remaining` words contributes `avg_len * OVERLAP_FACTOR`
/// new letters. Returns `true` when
/// `current_fill + remaining * avg_len * 0.7 >= target_density * size²`.
/// A `target_density` of `0.0` never prunes.
pub fn can_reach_target_density(
    current_fill: usize,
    remaining: usize,
    avg_len: f64,
    target_density: f64,
    size: usize,
) -> bool {
    let potential = current_fill as f64 + remaining as f64 * avg_len * OVERLAP_FACTOR;
    potential >= target_density * (size * size) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_frequency_table_covers_alphabet() {
        for c in 'A'..='Z' {
            assert!(letter_frequency(c) > 0.0, "missing frequency for {}", c);
        }
        let total: f64 = ('A'..='Z').map(letter_frequency).sum();
        assert!((total - 100.0).abs() < 1.0, "table sums to {}", total);
    }

    #[test]
    fn test_intersection_score_repeat_bonus() {
        // One letter three times: 2 extra occurrences.
        let expected = 3.0 * letter_frequency('A') + 2.0 * REPEAT_BONUS;
        assert!((intersection_score("AAA") - expected).abs() < 1e-9);
        // Two distinct repeated letters, one extra occurrence each.
        let moon = letter_frequency('M') + 2.0 * letter_frequency('O') + letter_frequency('N') + REPEAT_BONUS;
        assert!((intersection_score("MOON") - moon).abs() < 1e-9);
        assert_eq!(intersection_score(""), 0.0);
    }

    #[test]
    fn test_order_words_quality_first() {
        let words = vec![
            WordEntry::new("ZZZ", "low quality but repeats", 0.5),
            WordEntry::new("CAT", "Feline", 0.9),
            WordEntry::new("QUIZ", "Test", 0.9),
        ];
        let ordered = order_words(&words);
        let texts: Vec<&str> = ordered.iter().map(|w| w.text.as_str()).collect();
        // CAT (20.1) beats QUIZ (10.0) on intersection score at equal quality.
        assert_eq!(texts, vec!["CAT", "QUIZ", "ZZZ"]);
    }

    #[test]
    fn test_order_words_length_breaks_ties() {
        // Same letters, same score: only length differs.
        let words = vec![
            WordEntry::new("AB", "short", 0.9),
            WordEntry::new("BA", "short twin", 0.9),
        ];
        let ordered = order_words(&words);
        // Full tie keeps catalog order.
        assert_eq!(ordered[0].text, "AB");
        assert_eq!(ordered[1].text, "BA");

        // JX and QZJ both score 0.4; the longer one goes first.
        let words = vec![WordEntry::new("JX", "a", 0.9), WordEntry::new("QZJ", "b", 0.9)];
        assert_eq!(compare_for_search(&words[0], &words[1]), Ordering::Greater);
        assert_eq!(order_words(&words)[0].text, "QZJ");
    }

    #[test]
    fn test_placement_score() {
        assert!((placement_score(1, 2) - 2.2).abs() < 1e-9);
        assert!((placement_score(0, 0) - 1.0).abs() < 1e-9);
        assert!(placement_score(2, 0) > placement_score(1, 9));
    }

    #[test]
    fn test_rank_placements() {
        use crate::grid::Direction;
        let at = |col: usize, intersections: usize, new_cells: usize| Placement {
            row: 0,
            col,
            direction: Direction::Across,
            score: placement_score(intersections, new_cells),
            new_cells,
        };
        let mut placements = vec![at(0, 1, 2), at(1, 2, 1), at(2, 1, 4), at(3, 1, 2)];
        rank_placements(&mut placements);
        let cols: Vec<usize> = placements.iter().map(|p| p.col).collect();
        assert_eq!(cols, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_can_reach_target_density() {
        // 25 cells, target 60% = 15 letters.
        assert!(!can_reach_target_density(5, 1, 3.0, 0.6, 5));
        assert!(can_reach_target_density(5, 5, 3.0, 0.6, 5));
        assert!(can_reach_target_density(0, 0, 0.0, 0.0, 5));
    }

    #[test]
    fn test_average_length() {
        let words = vec![WordEntry::new("CAT", "", 1.0), WordEntry::new("HORSE", "", 1.0)];
        assert_eq!(average_length(&words), 4.0);
        assert_eq!(average_length(&[]), 0.0);
    }
}
