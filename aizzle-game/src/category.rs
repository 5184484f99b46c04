//! Puzzle categories, word sub-kinds, and complexity tiers.
use serde::{Deserialize, Serialize};

/// Family of puzzle the engine can generate.
///
/// Unknown keys (from storage, URLs or newer clients) resolve to
/// [`PuzzleCategory::Pattern`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PuzzleCategory {
    #[default]
    Pattern,
    Sequence,
    Logic,
    Word,
}

impl PuzzleCategory {
    pub const ALL: [Self; 4] = [Self::Pattern, Self::Sequence, Self::Logic, Self::Word];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Sequence => "sequence",
            Self::Logic => "logic",
            Self::Word => "word",
        }
    }

    /// Strict lookup; `None` for anything that is not a known key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(key))
    }

    /// Lookup that falls back to the default category for unknown keys.
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            log::debug!("unknown puzzle category {key:?}, falling back to pattern");
            Self::default()
        })
    }
}

impl From<String> for PuzzleCategory {
    fn from(value: String) -> Self {
        Self::from_key_or_default(&value)
    }
}

impl std::fmt::Display for PuzzleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Secondary classification inside the word category. Affects formatting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    Anagram,
    Riddle,
    MissingLetters,
}

impl WordKind {
    pub const ALL: [Self; 3] = [Self::Anagram, Self::Riddle, Self::MissingLetters];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Anagram => "anagram",
            Self::Riddle => "riddle",
            Self::MissingLetters => "missing_letters",
        }
    }

    /// Tier the sub-kind belongs to when the selector reports it.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::Anagram | Self::MissingLetters => Tier::Basic,
            Self::Riddle => Tier::Advanced,
        }
    }
}

/// Complexity bucket used to scale difficulty with level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Advanced,
}

impl Tier {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_through_lookup() {
        for category in PuzzleCategory::ALL {
            assert_eq!(PuzzleCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(PuzzleCategory::from_key(" Word "), Some(PuzzleCategory::Word));
        assert_eq!(PuzzleCategory::from_key("riddle"), None);
    }

    #[test]
    fn unknown_category_falls_back_to_pattern() {
        assert_eq!(
            PuzzleCategory::from_key_or_default("unknown-category"),
            PuzzleCategory::Pattern
        );
        let parsed: PuzzleCategory = serde_json::from_str("\"crossword\"").unwrap();
        assert_eq!(parsed, PuzzleCategory::Pattern);
        let parsed: PuzzleCategory = serde_json::from_str("\"logic\"").unwrap();
        assert_eq!(parsed, PuzzleCategory::Logic);
    }

    #[test]
    fn serializes_lowercase_keys() {
        assert_eq!(
            serde_json::to_string(&PuzzleCategory::Sequence).unwrap(),
            "\"sequence\""
        );
        assert_eq!(
            serde_json::to_string(&WordKind::MissingLetters).unwrap(),
            "\"missing_letters\""
        );
    }

    #[test]
    fn riddles_are_the_advanced_word_kind() {
        assert_eq!(WordKind::Riddle.tier(), Tier::Advanced);
        assert_eq!(WordKind::Anagram.tier(), Tier::Basic);
        assert_eq!(WordKind::MissingLetters.tier(), Tier::Basic);
    }
}
