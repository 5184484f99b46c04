//! Centralized tuning constants for Aizzle puzzle and session logic.
//!
//! Tier thresholds and mixing probabilities live here so difficulty scaling
//! can only change through reviewed code, while `SelectionPolicy` lets tools
//! and tests run alternate mixes without touching the defaults.

// Tier thresholds ----------------------------------------------------------
pub(crate) const PATTERN_BASIC_MAX_LEVEL: u32 = 3;
pub(crate) const SEQUENCE_BASIC_MAX_LEVEL: u32 = 2;
pub(crate) const LOGIC_BASIC_MAX_LEVEL: u32 = 2;
pub(crate) const WORD_BASIC_MAX_LEVEL: u32 = 2;

// Tier mixing --------------------------------------------------------------
pub(crate) const PATTERN_ADVANCED_CHANCE: f64 = 0.5;
pub(crate) const SEQUENCE_ADVANCED_CHANCE: f64 = 0.6;
pub(crate) const LOGIC_ADVANCED_CHANCE: f64 = 0.7;
pub(crate) const WORD_BASIC_ANAGRAM_CHANCE: f64 = 0.5;
pub(crate) const WORD_ADVANCED_ANAGRAM_CHANCE: f64 = 0.3;
pub(crate) const WORD_ADVANCED_RIDDLE_CHANCE: f64 = 0.4;
pub(crate) const POLICY_SPLIT_EPSILON: f64 = 1e-9;

// Fixed puzzle copy --------------------------------------------------------
pub(crate) const PATTERN_HINT: &str = "Think about how each number relates to the previous one.";
pub(crate) const SEQUENCE_HINT: &str = "Think about the pattern of movement through the alphabet.";
pub(crate) const LOGIC_HINT: &str =
    "Look for patterns in how the values relate to the letters or numbers.";
pub(crate) const PLACEHOLDER_NEXT_NUMBER: &str = "Next number";
pub(crate) const PLACEHOLDER_NEXT_LETTER: &str = "Next letter";
pub(crate) const PLACEHOLDER_ANSWER: &str = "Answer";
pub(crate) const PLACEHOLDER_NEW_WORD: &str = "New word";
pub(crate) const PLACEHOLDER_COMPLETE_WORD: &str = "Complete word";

// Session scoring ----------------------------------------------------------
pub const POINTS_PER_LEVEL: u32 = 10;
pub const HINT_COST: u32 = 5;
pub const DEFAULT_LEVEL: u32 = 1;

// Storage keys -------------------------------------------------------------
pub(crate) const KEY_SCORE: &str = "puzzle_game_score";
pub(crate) const KEY_LEVEL: &str = "puzzle_game_level";
pub(crate) const KEY_MODE: &str = "puzzle_game_mode";
pub(crate) const KEY_COMPLETED: &str = "puzzle_game_completed";
pub(crate) const KEY_STREAK: &str = "puzzle_game_streak";
pub(crate) const KEY_SOUND: &str = "puzzle_game_sound";

// Leaderboard --------------------------------------------------------------
pub const LEADERBOARD_PAGE_SIZE: usize = 10;

// Seed derivation ----------------------------------------------------------
pub(crate) const PUZZLE_STREAM_TAG: &[u8] = b"aizzle.puzzle";
