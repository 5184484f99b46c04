//! Aizzle Puzzle Engine
//!
//! Platform-agnostic puzzle generation and session logic for the Aizzle
//! puzzle game. The crate picks a template from a fixed catalog by category
//! and difficulty, formats it into a [`PuzzleData`] and tracks the player's
//! score, streak and settings without any UI or platform dependencies.

pub mod assemble;
pub mod catalog;
pub mod category;
pub mod constants;
pub mod generator;
pub mod leaderboard;
pub mod policy;
pub mod puzzle;
pub mod rng;
pub mod selector;
pub mod session;

// Re-export commonly used types
pub use assemble::assemble;
pub use catalog::{
    AnagramTemplate, Catalog, CatalogError, LetterSequence, LogicRiddle, MissingLetters,
    NumberPattern, TemplateAnswer, TemplateRef, TierPools, WordPools, WordRiddle, WordTemplate,
};
pub use category::{PuzzleCategory, Tier, WordKind};
pub use generator::{
    generate_puzzle, generate_puzzle_for_key, generate_with_trace, try_generate_puzzle,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardPage, RankedEntry};
pub use policy::{PolicyError, SelectionPolicy, TierMix, WordMix};
pub use puzzle::{InputKind, InputSlot, InputSlots, PuzzleData};
pub use rng::{PuzzleRng, ScriptedRolls};
pub use selector::{Selection, SelectionTrace, select_template, select_template_with_trace};
pub use session::{
    HintOutcome, KeyValueStore, MemoryStore, PlaySession, SessionState, SubmitOutcome,
};

use rand::Rng;
use std::convert::Infallible;
use thiserror::Error;

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the template catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the selection policy; the built-in constants unless overridden.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy cannot be loaded or parsed.
    fn load_policy(&self) -> Result<SelectionPolicy, Self::Error> {
        Ok(SelectionPolicy::default())
    }
}

/// Loader backed by the catalog embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

impl CatalogLoader for BuiltinLoader {
    type Error = Infallible;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::builtin().clone())
    }
}

#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("puzzle catalog could not be loaded")]
    Load(#[source] E),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Main engine tying a catalog source to session persistence
pub struct GameEngine<L, S>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    catalog_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    /// Create a new engine with the provided catalog loader and storage
    pub const fn new(catalog_loader: L, storage: S) -> Self {
        Self {
            catalog_loader,
            storage,
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Generate a puzzle from the loader's catalog and policy.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, the policy is invalid, or the
    /// resolved template pool is empty.
    pub fn generate<R>(
        &self,
        category: PuzzleCategory,
        level: u32,
        rng: &mut R,
    ) -> Result<PuzzleData, EngineError<L::Error>>
    where
        R: Rng + ?Sized,
    {
        let catalog = self
            .catalog_loader
            .load_catalog()
            .map_err(EngineError::Load)?;
        let policy = self
            .catalog_loader
            .load_policy()
            .map_err(EngineError::Load)?;
        policy.validate()?;
        Ok(try_generate_puzzle(&catalog, &policy, category, level, rng)?)
    }

    /// Generate a puzzle for the session's mode and level and install it.
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle cannot be generated.
    pub fn next_puzzle<R>(
        &self,
        session: &mut PlaySession,
        rng: &mut R,
    ) -> Result<(), EngineError<L::Error>>
    where
        R: Rng + ?Sized,
    {
        let state = session.state();
        let puzzle = self.generate(state.mode, state.level, rng)?;
        session.install_puzzle(puzzle);
        Ok(())
    }

    /// Seed missing storage keys and start a session from the stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or written.
    pub fn start_session(&mut self) -> Result<PlaySession, S::Error> {
        SessionState::initialize(&mut self.storage).map(PlaySession::new)
    }

    /// Save a session's state
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub fn save_session(&mut self, session: &PlaySession) -> Result<(), S::Error> {
        session.persist(&mut self.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_CATALOG: &str = r#"{
        "pattern": {
            "basic": [{ "sequence": [5, 10, 15], "next": 20, "rule": "add 5" }],
            "advanced": [{ "sequence": [1, 2, 4], "next": 8, "rule": "double" }]
        },
        "sequence": {
            "basic": [{ "sequence": ["B", "D"], "next": "F", "rule": "skip one" }],
            "advanced": [{ "sequence": ["C", "F"], "next": "I", "rule": "skip two" }]
        },
        "logic": {
            "basic": [{ "template": "Two plus two?", "solution": "4", "rule": "addition" }],
            "advanced": [{ "template": "Ten less one?", "solution": "9", "rule": "subtraction" }]
        },
        "word": {
            "anagrams": [{ "word": "STOP", "anagram": "POTS", "hint": "Kitchen items" }],
            "riddles": [{ "question": "What has keys but no locks?", "answer": "PIANO", "hint": "Music" }],
            "missing_letters": [{ "incomplete": "B_N_N_", "complete": "BANANA", "hint": "Fruit" }]
        }
    }"#;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = serde_json::Error;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Catalog::from_json(FIXTURE_CATALOG)
        }
    }

    struct BrokenPolicyLoader;

    impl CatalogLoader for BrokenPolicyLoader {
        type Error = serde_json::Error;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Catalog::from_json(FIXTURE_CATALOG)
        }

        fn load_policy(&self) -> Result<SelectionPolicy, Self::Error> {
            let mut policy = SelectionPolicy::default();
            policy.logic.advanced_chance = 1.5;
            Ok(policy)
        }
    }

    #[test]
    fn engine_generates_from_loader_catalog() {
        let engine = GameEngine::new(FixtureLoader, MemoryStore::new());
        let mut rolls = ScriptedRolls::new(vec![0.0]);
        let puzzle = engine
            .generate(PuzzleCategory::Pattern, 1, &mut rolls)
            .unwrap();
        assert_eq!(
            puzzle.question,
            "What's the next number in this sequence? 5, 10, 15, ..."
        );
        assert_eq!(puzzle.solution, "20");

        let mut rolls = ScriptedRolls::new(vec![0.9, 0.0]);
        let word = engine.generate(PuzzleCategory::Word, 6, &mut rolls).unwrap();
        assert_eq!(word.solution, "BANANA");
    }

    #[test]
    fn invalid_policy_is_rejected_before_selection() {
        let engine = GameEngine::new(BrokenPolicyLoader, MemoryStore::new());
        let mut rolls = ScriptedRolls::new(vec![0.0]);
        let err = engine
            .generate(PuzzleCategory::Logic, 5, &mut rolls)
            .unwrap_err();
        assert!(matches!(err, EngineError::Policy(_)));
        assert_eq!(rolls.consumed(), 0);
    }

    #[test]
    fn engine_starts_and_saves_sessions() {
        let mut engine = GameEngine::new(BuiltinLoader, MemoryStore::new());
        let mut session = engine.start_session().unwrap();
        assert_eq!(session.state(), &SessionState::default());
        assert_eq!(engine.storage().len(), 6);

        session.set_difficulty(4);
        session.set_game_mode(PuzzleCategory::Sequence);
        let mut rng = PuzzleRng::from_user_seed(42);
        engine.next_puzzle(&mut session, &mut rng).unwrap();
        let puzzle = session.puzzle().expect("puzzle installed");
        assert_eq!(puzzle.category, PuzzleCategory::Sequence);
        assert_eq!(session.answers().len(), puzzle.input_slots.len());

        engine.save_session(&session).unwrap();
        let restored = engine.start_session().unwrap();
        assert_eq!(restored.state().level, 4);
        assert_eq!(restored.state().mode, PuzzleCategory::Sequence);
        assert!(restored.puzzle().is_none());
    }

    #[test]
    fn builtin_loader_matches_free_function() {
        let engine = GameEngine::new(BuiltinLoader, MemoryStore::new());
        let mut a = PuzzleRng::from_user_seed(7);
        let mut b = PuzzleRng::from_user_seed(7);
        for category in PuzzleCategory::ALL {
            let via_engine = engine.generate(category, 5, &mut a).unwrap();
            assert_eq!(via_engine, generate_puzzle(category, 5, &mut b));
        }
    }
}
