//! Static puzzle template pools.
//!
//! The catalog is read-only reference data: the built-in pools are embedded
//! as JSON and parsed once, custom pools can be supplied through
//! [`Catalog::from_json`] or a [`crate::CatalogLoader`].
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::category::{PuzzleCategory, Tier, WordKind};

const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/catalog.json");

/// Numeric sequence with its next value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPattern {
    pub sequence: Vec<i64>,
    pub next: i64,
    pub rule: String,
}

/// Letter sequence with its next letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSequence {
    pub sequence: Vec<char>,
    pub next: char,
    pub rule: String,
}

/// Cipher or arithmetic riddle with a stored answer.
///
/// The stored answer is authoritative even where it disagrees with the
/// stated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicRiddle {
    pub template: String,
    pub solution: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnagramTemplate {
    pub word: String,
    pub anagram: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRiddle {
    pub question: String,
    pub answer: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLetters {
    pub incomplete: String,
    pub complete: String,
    pub hint: String,
}

/// Canonical answer a template expects, before any formatting.
pub trait TemplateAnswer {
    fn canonical_answer(&self) -> String;
}

impl TemplateAnswer for NumberPattern {
    fn canonical_answer(&self) -> String {
        self.next.to_string()
    }
}

impl TemplateAnswer for LetterSequence {
    fn canonical_answer(&self) -> String {
        self.next.to_string()
    }
}

impl TemplateAnswer for LogicRiddle {
    fn canonical_answer(&self) -> String {
        self.solution.clone()
    }
}

impl TemplateAnswer for AnagramTemplate {
    fn canonical_answer(&self) -> String {
        self.anagram.clone()
    }
}

impl TemplateAnswer for WordRiddle {
    fn canonical_answer(&self) -> String {
        self.answer.clone()
    }
}

impl TemplateAnswer for MissingLetters {
    fn canonical_answer(&self) -> String {
        self.complete.clone()
    }
}

/// Basic and advanced pools for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TierPools<T> {
    #[serde(default)]
    pub basic: Vec<T>,
    #[serde(default)]
    pub advanced: Vec<T>,
}

impl<T> Default for TierPools<T> {
    fn default() -> Self {
        Self {
            basic: Vec::new(),
            advanced: Vec::new(),
        }
    }
}

impl<T> TierPools<T> {
    #[must_use]
    pub fn pool(&self, tier: Tier) -> &[T] {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Advanced => &self.advanced,
        }
    }
}

/// Word pools, split by sub-kind rather than by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WordPools {
    #[serde(default)]
    pub anagrams: Vec<AnagramTemplate>,
    #[serde(default)]
    pub riddles: Vec<WordRiddle>,
    #[serde(default)]
    pub missing_letters: Vec<MissingLetters>,
}

impl WordPools {
    #[must_use]
    pub fn len_of(&self, kind: WordKind) -> usize {
        match kind {
            WordKind::Anagram => self.anagrams.len(),
            WordKind::Riddle => self.riddles.len(),
            WordKind::MissingLetters => self.missing_letters.len(),
        }
    }
}

/// Borrowed word template tagged with its sub-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordTemplate<'a> {
    Anagram(&'a AnagramTemplate),
    Riddle(&'a WordRiddle),
    MissingLetters(&'a MissingLetters),
}

impl WordTemplate<'_> {
    #[must_use]
    pub const fn kind(&self) -> WordKind {
        match self {
            Self::Anagram(_) => WordKind::Anagram,
            Self::Riddle(_) => WordKind::Riddle,
            Self::MissingLetters(_) => WordKind::MissingLetters,
        }
    }
}

/// A template drawn from the catalog, ready for assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRef<'a> {
    Pattern(&'a NumberPattern),
    Sequence(&'a LetterSequence),
    Logic(&'a LogicRiddle),
    Word(WordTemplate<'a>),
}

impl TemplateRef<'_> {
    #[must_use]
    pub const fn category(&self) -> PuzzleCategory {
        match self {
            Self::Pattern(_) => PuzzleCategory::Pattern,
            Self::Sequence(_) => PuzzleCategory::Sequence,
            Self::Logic(_) => PuzzleCategory::Logic,
            Self::Word(_) => PuzzleCategory::Word,
        }
    }

    /// Sub-kind for word templates, `None` for every other category.
    #[must_use]
    pub const fn word_kind(&self) -> Option<WordKind> {
        match self {
            Self::Word(word) => Some(word.kind()),
            _ => None,
        }
    }

    #[must_use]
    pub fn canonical_answer(&self) -> String {
        match self {
            Self::Pattern(t) => t.canonical_answer(),
            Self::Sequence(t) => t.canonical_answer(),
            Self::Logic(t) => t.canonical_answer(),
            Self::Word(WordTemplate::Anagram(t)) => t.canonical_answer(),
            Self::Word(WordTemplate::Riddle(t)) => t.canonical_answer(),
            Self::Word(WordTemplate::MissingLetters(t)) => t.canonical_answer(),
        }
    }
}

/// Catalog authoring defects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("template pool `{pool}` is empty")]
    EmptyPool { pool: &'static str },
    #[error("template {index} in pool `{pool}` has an empty answer")]
    EmptySolution { pool: &'static str, index: usize },
}

/// Identifier of a tiered pool, e.g. `pattern.advanced`.
#[must_use]
pub const fn tier_pool_id(category: PuzzleCategory, tier: Tier) -> &'static str {
    match (category, tier) {
        (PuzzleCategory::Pattern, Tier::Basic) => "pattern.basic",
        (PuzzleCategory::Pattern, Tier::Advanced) => "pattern.advanced",
        (PuzzleCategory::Sequence, Tier::Basic) => "sequence.basic",
        (PuzzleCategory::Sequence, Tier::Advanced) => "sequence.advanced",
        (PuzzleCategory::Logic, Tier::Basic) => "logic.basic",
        (PuzzleCategory::Logic, Tier::Advanced) => "logic.advanced",
        (PuzzleCategory::Word, _) => "word",
    }
}

/// Identifier of a word sub-kind pool, e.g. `word.anagram`.
#[must_use]
pub const fn word_pool_id(kind: WordKind) -> &'static str {
    match kind {
        WordKind::Anagram => "word.anagram",
        WordKind::Riddle => "word.riddle",
        WordKind::MissingLetters => "word.missing_letters",
    }
}

/// Complete template universe, partitioned by category and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub pattern: TierPools<NumberPattern>,
    #[serde(default)]
    pub sequence: TierPools<LetterSequence>,
    #[serde(default)]
    pub logic: TierPools<LogicRiddle>,
    #[serde(default)]
    pub word: WordPools,
}

impl Catalog {
    /// Parse the embedded catalog asset. A malformed asset yields an empty
    /// catalog, which [`Catalog::validate`] and selection report as empty pools.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::parse_or_empty(DEFAULT_CATALOG_DATA)
    }

    fn parse_or_empty(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|err| {
            log::warn!("embedded puzzle catalog failed to parse: {err}");
            Self::default()
        })
    }

    /// Process-wide built-in catalog.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check that every pool the selector can reach is non-empty and that
    /// every template carries a non-empty answer.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for tier in [Tier::Basic, Tier::Advanced] {
            check_pool(
                tier_pool_id(PuzzleCategory::Pattern, tier),
                self.pattern.pool(tier),
            )?;
            check_pool(
                tier_pool_id(PuzzleCategory::Sequence, tier),
                self.sequence.pool(tier),
            )?;
            check_pool(
                tier_pool_id(PuzzleCategory::Logic, tier),
                self.logic.pool(tier),
            )?;
        }
        check_pool(word_pool_id(WordKind::Anagram), &self.word.anagrams)?;
        check_pool(word_pool_id(WordKind::Riddle), &self.word.riddles)?;
        check_pool(
            word_pool_id(WordKind::MissingLetters),
            &self.word.missing_letters,
        )?;
        Ok(())
    }

    /// Every template in the catalog, in pool order.
    #[must_use]
    pub fn templates(&self) -> Vec<TemplateRef<'_>> {
        let mut all = Vec::with_capacity(self.template_count());
        for tier in [Tier::Basic, Tier::Advanced] {
            all.extend(self.pattern.pool(tier).iter().map(TemplateRef::Pattern));
        }
        for tier in [Tier::Basic, Tier::Advanced] {
            all.extend(self.sequence.pool(tier).iter().map(TemplateRef::Sequence));
        }
        for tier in [Tier::Basic, Tier::Advanced] {
            all.extend(self.logic.pool(tier).iter().map(TemplateRef::Logic));
        }
        all.extend(
            self.word
                .anagrams
                .iter()
                .map(|t| TemplateRef::Word(WordTemplate::Anagram(t))),
        );
        all.extend(
            self.word
                .riddles
                .iter()
                .map(|t| TemplateRef::Word(WordTemplate::Riddle(t))),
        );
        all.extend(
            self.word
                .missing_letters
                .iter()
                .map(|t| TemplateRef::Word(WordTemplate::MissingLetters(t))),
        );
        all
    }

    #[must_use]
    pub fn template_count(&self) -> usize {
        self.pattern.basic.len()
            + self.pattern.advanced.len()
            + self.sequence.basic.len()
            + self.sequence.advanced.len()
            + self.logic.basic.len()
            + self.logic.advanced.len()
            + self.word.anagrams.len()
            + self.word.riddles.len()
            + self.word.missing_letters.len()
    }
}

fn check_pool<T: TemplateAnswer>(pool: &'static str, templates: &[T]) -> Result<(), CatalogError> {
    if templates.is_empty() {
        return Err(CatalogError::EmptyPool { pool });
    }
    if let Some(index) = templates
        .iter()
        .position(|t| t.canonical_answer().trim().is_empty())
    {
        return Err(CatalogError::EmptySolution { pool, index });
    }
    Ok(())
}
