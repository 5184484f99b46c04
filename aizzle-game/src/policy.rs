//! Tier mixing policy: how level maps to basic / advanced pools.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::PuzzleCategory;
use crate::constants::{
    LOGIC_ADVANCED_CHANCE, LOGIC_BASIC_MAX_LEVEL, PATTERN_ADVANCED_CHANCE,
    PATTERN_BASIC_MAX_LEVEL, POLICY_SPLIT_EPSILON, SEQUENCE_ADVANCED_CHANCE,
    SEQUENCE_BASIC_MAX_LEVEL, WORD_ADVANCED_ANAGRAM_CHANCE, WORD_ADVANCED_RIDDLE_CHANCE,
    WORD_BASIC_ANAGRAM_CHANCE, WORD_BASIC_MAX_LEVEL,
};

/// Two-tier mix for pattern, sequence and logic puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMix {
    /// Highest level that draws from the basic pool only.
    pub basic_max_level: u32,
    /// Chance of the advanced pool above `basic_max_level`.
    pub advanced_chance: f64,
}

impl TierMix {
    /// Expected share of advanced draws at `level`.
    #[must_use]
    pub fn advanced_share(&self, level: u32) -> f64 {
        if level <= self.basic_max_level {
            0.0
        } else {
            self.advanced_chance
        }
    }
}

/// Sub-kind mix for word puzzles.
///
/// Basic levels split between anagram and missing letters; advanced levels
/// partition a single roll into anagram, riddle, then missing letters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordMix {
    pub basic_max_level: u32,
    pub basic_anagram_chance: f64,
    pub advanced_anagram_chance: f64,
    pub advanced_riddle_chance: f64,
}

impl WordMix {
    /// Missing-letters share of the advanced partition.
    #[must_use]
    pub fn advanced_missing_chance(&self) -> f64 {
        (1.0 - self.advanced_anagram_chance - self.advanced_riddle_chance).max(0.0)
    }

    /// Expected `(anagram, riddle, missing letters)` shares at `level`.
    #[must_use]
    pub fn shares(&self, level: u32) -> (f64, f64, f64) {
        if level <= self.basic_max_level {
            (
                self.basic_anagram_chance,
                0.0,
                1.0 - self.basic_anagram_chance,
            )
        } else {
            (
                self.advanced_anagram_chance,
                self.advanced_riddle_chance,
                self.advanced_missing_chance(),
            )
        }
    }
}

/// Per-category difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    pub pattern: TierMix,
    pub sequence: TierMix,
    pub logic: TierMix,
    pub word: WordMix,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            pattern: TierMix {
                basic_max_level: PATTERN_BASIC_MAX_LEVEL,
                advanced_chance: PATTERN_ADVANCED_CHANCE,
            },
            sequence: TierMix {
                basic_max_level: SEQUENCE_BASIC_MAX_LEVEL,
                advanced_chance: SEQUENCE_ADVANCED_CHANCE,
            },
            logic: TierMix {
                basic_max_level: LOGIC_BASIC_MAX_LEVEL,
                advanced_chance: LOGIC_ADVANCED_CHANCE,
            },
            word: WordMix {
                basic_max_level: WORD_BASIC_MAX_LEVEL,
                basic_anagram_chance: WORD_BASIC_ANAGRAM_CHANCE,
                advanced_anagram_chance: WORD_ADVANCED_ANAGRAM_CHANCE,
                advanced_riddle_chance: WORD_ADVANCED_RIDDLE_CHANCE,
            },
        }
    }
}

impl SelectionPolicy {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a policy.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tier mix for the three two-tier categories, `None` for word.
    #[must_use]
    pub const fn tier_mix(&self, category: PuzzleCategory) -> Option<&TierMix> {
        match category {
            PuzzleCategory::Pattern => Some(&self.pattern),
            PuzzleCategory::Sequence => Some(&self.sequence),
            PuzzleCategory::Logic => Some(&self.logic),
            PuzzleCategory::Word => None,
        }
    }

    /// Validate every probability in the policy.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError` when a chance lies outside `[0, 1]` or the
    /// advanced word partition exceeds 1.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_chance("pattern.advanced_chance", self.pattern.advanced_chance)?;
        check_chance("sequence.advanced_chance", self.sequence.advanced_chance)?;
        check_chance("logic.advanced_chance", self.logic.advanced_chance)?;
        check_chance("word.basic_anagram_chance", self.word.basic_anagram_chance)?;
        check_chance(
            "word.advanced_anagram_chance",
            self.word.advanced_anagram_chance,
        )?;
        check_chance(
            "word.advanced_riddle_chance",
            self.word.advanced_riddle_chance,
        )?;
        let total = self.word.advanced_anagram_chance + self.word.advanced_riddle_chance;
        if total > 1.0 + POLICY_SPLIT_EPSILON {
            return Err(PolicyError::WordSplitExceedsOne { total });
        }
        Ok(())
    }
}

fn check_chance(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::ChanceOutOfRange { field, value })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("{field} must be between 0 and 1 (got {value:.3})")]
    ChanceOutOfRange { field: &'static str, value: f64 },
    #[error("advanced word anagram + riddle chances exceed 1 (got {total:.3})")]
    WordSplitExceedsOne { total: f64 },
}
