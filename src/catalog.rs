//! Word catalog: the pool of `(text, clue, quality)` entries the engine draws from.
//!
//! Three built-in banks are provided, one per [`Difficulty`]. Callers may also
//! supply their own entries, either directly or parsed from text with
//! [`parse_from_str`] / [`load_from_path`].
//!
//! The catalog text format is one entry per line:
//!
//! ```text
//! # comment
//! CAT;Feline pet;0.9
//! DOG;Canine pet
//! ```
//!
//! A missing quality means `1.0`. Blank lines and `#` comments are skipped;
//! malformed lines are skipped with a warning.

use crate::errors::CatalogError;
use log::warn;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A candidate word with its clue and a curation score.
///
/// `quality` lies in `[0, 1]`; hand-curated entries score higher and are
/// searched first.
#[derive(Clone, Debug, PartialEq)]
pub struct WordEntry {
    pub text: String,
    pub clue: String,
    pub quality: f64,
}

impl WordEntry {
    /// Creates an entry, upper-casing the text and clamping `quality` into `[0, 1]`.
    ///
    /// A NaN quality is treated as unscored (`1.0`).
    ///
    /// # Examples
    /// ```
    /// use crossword_synth::catalog::WordEntry;
    /// let entry = WordEntry::new("cat", "Feline pet", 1.7);
    /// assert_eq!(entry.text, "CAT");
    /// assert_eq!(entry.quality, 1.0);
    /// ```
    pub fn new(text: &str, clue: &str, quality: f64) -> Self {
        let quality = if quality.is_nan() {
            1.0
        } else {
            quality.clamp(0.0, 1.0)
        };
        WordEntry {
            text: text.trim().to_uppercase(),
            clue: clue.trim().to_string(),
            quality,
        }
    }

    /// Creates an entry without a curation score (quality `1.0`).
    pub fn unscored(text: &str, clue: &str) -> Self {
        WordEntry::new(text, clue, 1.0)
    }

    /// Number of letters in the answer.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_uppercase())
    }
}

/// Difficulty tier selecting which built-in bank to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}'. Expected one of: easy, medium, hard",
                other
            )),
        }
    }
}

/// Returns the built-in bank for `difficulty`, in catalog order.
pub fn builtin(difficulty: Difficulty) -> Vec<WordEntry> {
    let bank = match difficulty {
        Difficulty::Easy => EASY_WORDS,
        Difficulty::Medium => MEDIUM_WORDS,
        Difficulty::Hard => HARD_WORDS,
    };
    bank.iter()
        .map(|&(text, clue, quality)| WordEntry::new(text, clue, quality))
        .collect()
}

/// Parses catalog text into entries.
///
/// Lines are `WORD;clue[;quality]`. Lines that cannot be parsed are skipped
/// and reported through `warn!`; this never fails.
pub fn parse_from_str(contents: &str) -> Vec<WordEntry> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(idx, raw_line)| {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let entry = parse_line(line);
            if entry.is_none() {
                warn!("Skipping malformed catalog line {}: {:?}", idx + 1, raw_line);
            }
            entry
        })
        .collect()
}

fn parse_line(line: &str) -> Option<WordEntry> {
    let mut parts = line.splitn(3, ';');
    let text = parts.next()?.trim();
    let clue = parts.next()?.trim();
    if text.is_empty() || clue.is_empty() {
        return None;
    }
    match parts.next() {
        Some(raw) => Some(WordEntry::new(text, clue, raw.trim().parse::<f64>().ok()?)),
        None => Some(WordEntry::unscored(text, clue)),
    }
}

/// Reads a catalog file and parses it with [`parse_from_str`].
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<WordEntry>, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_from_str(&contents))
}

/// Filters `entries` down to those placeable in a `size`×`size` grid.
///
/// Drops entries with non-letter characters, entries shorter than two letters
/// or longer than `size`, and repeated answers (the first occurrence wins).
/// Catalog order is preserved.
pub fn eligible_words(entries: &[WordEntry], size: usize) -> Vec<WordEntry> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| WordEntry::new(&e.text, &e.clue, e.quality))
        .filter(|e| e.is_well_formed() && e.len() >= 2 && e.len() <= size)
        .filter(|e| seen.insert(e.text.clone()))
        .collect()
}

const EASY_WORDS: &[(&str, &str, f64)] = &[
    ("CAT", "Feline pet", 0.9),
    ("DOG", "Canine pet", 0.9),
    ("SUN", "Bright star in sky", 0.9),
    ("RUN", "Moves quickly on foot", 0.8),
    ("CAR", "Vehicle for transport", 0.9),
    ("BED", "Where you sleep", 0.8),
    ("TEA", "Hot beverage", 0.8),
    ("SEA", "Large body of water", 0.8),
    ("TIE", "Neck accessory", 0.7),
    ("PIE", "Dessert you bake", 0.8),
    ("BOOK", "Something you read", 0.9),
    ("PLAY", "Children do this for fun", 0.9),
    ("READ", "Look at words in a book", 0.9),
    ("MOON", "Shines at night", 0.9),
    ("STAR", "Twinkles in sky", 0.9),
    ("TREE", "Has leaves and branches", 0.9),
    ("FISH", "Lives in water", 0.9),
    ("BIRD", "Flies in sky", 0.9),
    ("HOME", "Where you live", 0.9),
    ("LOVE", "Deep affection", 0.9),
    ("HAPPY", "Feeling joyful", 0.8),
    ("MUSIC", "Sounds and melodies", 0.9),
    ("DANCE", "Move to music", 0.8),
    ("SMILE", "Happy expression", 0.8),
    ("OCEAN", "Large body of water", 0.9),
    ("RIVER", "Flowing water", 0.9),
    ("BEACH", "Sandy shore", 0.8),
    ("FOREST", "Many trees together", 0.8),
    ("MOUNTAIN", "Tall landform", 0.8),
    ("VALLEY", "Low area between hills", 0.7),
    ("APPLE", "Red or green fruit", 0.9),
    ("BANANA", "Yellow curved fruit", 0.9),
    ("ORANGE", "Citrus fruit", 0.9),
    ("PIZZA", "Italian food", 0.9),
    ("BREAD", "Baked food", 0.9),
    ("WATER", "Clear liquid", 0.9),
    ("COFFEE", "Morning drink", 0.9),
    ("SUGAR", "Sweetener", 0.8),
    ("SALT", "White seasoning", 0.8),
    ("PEPPER", "Black seasoning", 0.8),
    ("FRIEND", "Close companion", 0.9),
    ("FAMILY", "Relatives", 0.9),
    ("SCHOOL", "Place of learning", 0.9),
    ("TEACHER", "Educator", 0.9),
    ("STUDENT", "Learner", 0.9),
    ("PENCIL", "Writing tool", 0.8),
    ("PAPER", "Writing surface", 0.9),
    ("WINDOW", "Glass opening", 0.9),
    ("DOOR", "Entryway", 0.9),
    ("CHAIR", "Seating furniture", 0.9),
    ("TABLE", "Flat surface furniture", 0.9),
    ("LIGHT", "Illumination", 0.9),
    ("COLOR", "Visual property", 0.9),
    ("SHAPE", "Form or outline", 0.8),
    ("SIZE", "Dimensions", 0.8),
    ("WEATHER", "Climate conditions", 0.9),
    ("SEASON", "Spring, summer, etc.", 0.9),
    ("HOLIDAY", "Special day off", 0.9),
    ("BIRTHDAY", "Annual celebration", 0.9),
    ("WEDDING", "Marriage ceremony", 0.8),
    ("PARTY", "Celebration gathering", 0.9),
    ("GIFT", "Present", 0.9),
    ("CAKE", "Sweet dessert", 0.9),
    ("CANDLE", "Wax light source", 0.8),
    ("BALLOON", "Inflatable decoration", 0.7),
    ("COMPUTER", "Device for typing and browsing", 0.9),
    ("KEYBOARD", "Input device with keys", 0.9),
    ("MONITOR", "Computer display screen", 0.9),
    ("MOUSE", "Computer pointing device", 0.9),
    ("INTERNET", "Global network", 0.9),
    ("WEBSITE", "Collection of web pages", 0.9),
    ("EMAIL", "Electronic mail", 0.9),
    ("MESSAGE", "Communication", 0.9),
    ("PHONE", "Communication device", 0.9),
    ("CAMERA", "Photo device", 0.9),
];

const MEDIUM_WORDS: &[(&str, &str, f64)] = &[
    ("SOFTWARE", "Programs and applications", 0.9),
    ("HARDWARE", "Physical computer components", 0.9),
    ("ALGORITHM", "Step-by-step problem-solving procedure", 0.9),
    ("TECHNOLOGY", "Application of scientific knowledge", 0.9),
    ("PROGRAM", "Set of instructions for a computer", 0.9),
    ("NETWORK", "Connected computers", 0.9),
    ("DATABASE", "Organized collection of data", 0.9),
    ("BROWSER", "Web viewing software", 0.9),
    ("DOWNLOAD", "Get files from internet", 0.9),
    ("UPLOAD", "Send files to internet", 0.9),
    ("PASSWORD", "Secret access code", 0.9),
    ("SECURITY", "Protection from threats", 0.9),
    ("ENCRYPTION", "Data encoding method", 0.8),
    ("PROTOCOL", "Communication standard", 0.8),
    ("INTERFACE", "User interaction point", 0.9),
    ("PLATFORM", "Computing environment", 0.9),
    ("FRAMEWORK", "Software structure", 0.8),
    ("LIBRARY", "Collection of code", 0.9),
    ("FUNCTION", "Reusable code block", 0.9),
    ("VARIABLE", "Data storage location", 0.9),
    ("SYNTAX", "Code structure rules", 0.8),
    ("COMPILER", "Code translator", 0.8),
    ("EXECUTABLE", "Runnable program file", 0.7),
    ("DEBUGGING", "Finding and fixing errors", 0.8),
    ("TESTING", "Quality assurance process", 0.9),
    ("DEPLOYMENT", "Releasing software", 0.8),
    ("VERSION", "Release number", 0.9),
    ("UPDATE", "Software improvement", 0.9),
    ("PATCH", "Small fix", 0.8),
    ("FEATURE", "Software capability", 0.9),
    ("RESEARCH", "Systematic investigation", 0.9),
    ("ANALYSIS", "Detailed examination", 0.9),
    ("THEORY", "Scientific explanation", 0.9),
    ("HYPOTHESIS", "Testable prediction", 0.8),
    ("EXPERIMENT", "Scientific test", 0.9),
    ("EVIDENCE", "Supporting information", 0.9),
    ("CONCLUSION", "Final decision", 0.9),
    ("PUBLICATION", "Research paper", 0.8),
    ("CITATION", "Reference to source", 0.8),
    ("BIBLIOGRAPHY", "List of references", 0.7),
];

const HARD_WORDS: &[(&str, &str, f64)] = &[
    ("ALGORITHM", "Step-by-step problem-solving procedure", 0.9),
    ("PROGRAMMING", "Writing code for computers", 0.9),
    ("ARCHITECTURE", "System design structure", 0.9),
    ("OPTIMIZATION", "Improvement process", 0.9),
    ("PERFORMANCE", "Speed and efficiency", 0.9),
    ("SCALABILITY", "Ability to grow", 0.8),
    ("RELIABILITY", "Dependability", 0.9),
    ("MAINTAINABILITY", "Ease of upkeep", 0.7),
    ("DOCUMENTATION", "Written instructions", 0.9),
    ("SPECIFICATION", "Detailed requirements", 0.8),
    ("IMPLEMENTATION", "Putting into practice", 0.9),
    ("INTEGRATION", "Combining systems", 0.9),
    ("VALIDATION", "Verification process", 0.9),
    ("AUTHENTICATION", "Identity verification", 0.9),
    ("AUTHORIZATION", "Permission granting", 0.9),
    ("CONFIGURATION", "System settings", 0.9),
    ("CUSTOMIZATION", "Personalization", 0.9),
    ("AUTOMATION", "Automatic operation", 0.9),
    ("ORCHESTRATION", "Coordinated management", 0.7),
    ("VIRTUALIZATION", "Creating virtual resources", 0.8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_banks_are_well_formed() {
        for difficulty in Difficulty::ALL {
            let bank = builtin(difficulty);
            assert!(!bank.is_empty(), "{} bank is empty", difficulty);
            for entry in &bank {
                assert!(entry.is_well_formed(), "bad entry {:?}", entry);
                assert!((0.0..=1.0).contains(&entry.quality));
                assert!(!entry.clue.is_empty());
            }
        }
    }

    #[test]
    fn test_word_entry_normalizes_text_and_quality() {
        let entry = WordEntry::new("  moon ", " Shines at night ", -0.5);
        assert_eq!(entry.text, "MOON");
        assert_eq!(entry.clue, "Shines at night");
        assert_eq!(entry.quality, 0.0);
        assert_eq!(WordEntry::new("SUN", "Star", f64::NAN).quality, 1.0);
        assert_eq!(WordEntry::unscored("SUN", "Star").quality, 1.0);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        let err = "expert".parse::<Difficulty>().unwrap_err();
        assert!(err.contains("Unknown difficulty 'expert'"));
    }

    #[test]
    fn test_parse_from_str_formats() {
        let text = "\
# starter words
CAT;Feline pet;0.9

dog;Canine pet
BROKEN
NOCLUE;
BADSCORE;Clue;high
TREE;Has leaves;0.5;extra
";
        let entries = parse_from_str(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], WordEntry::new("CAT", "Feline pet", 0.9));
        assert_eq!(entries[1].text, "DOG");
        assert_eq!(entries[1].quality, 1.0);
    }

    #[test]
    fn test_parse_line_rejects_extra_fields_in_quality() {
        assert!(parse_line("TREE;Has leaves;0.5;extra").is_none());
        assert!(parse_line("TREE;Has leaves;0.5").is_some());
    }

    #[test]
    fn test_eligible_words_filters_and_dedups() {
        let entries = vec![
            WordEntry::new("CAT", "Feline", 0.9),
            WordEntry::new("A", "Too short", 0.9),
            WordEntry::new("ELEPHANT", "Too long", 0.9),
            WordEntry::new("ICE CREAM", "Has a space", 0.9),
            WordEntry::new("cat", "Duplicate", 0.1),
            WordEntry::new("DOG", "Canine", 0.8),
        ];
        let eligible = eligible_words(&entries, 5);
        let texts: Vec<&str> = eligible.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["CAT", "DOG"]);
        assert_eq!(eligible[0].clue, "Feline");
    }

    #[test]
    fn test_eligible_words_empty_when_nothing_fits() {
        let entries = vec![WordEntry::new("MOUNTAIN", "Tall landform", 0.8)];
        assert!(eligible_words(&entries, 5).is_empty());
        assert!(eligible_words(&[], 15).is_empty());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let result = load_from_path("/definitely/not/a/catalog.txt");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
