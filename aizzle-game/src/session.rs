//! Player session: score bookkeeping, answer checking, hints and persistence.
//!
//! Session state is an explicit value. Persistence happens only through
//! [`SessionState::load`] / [`SessionState::save`] against an injected
//! [`KeyValueStore`], never as a side effect of mutation.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::category::PuzzleCategory;
use crate::constants::{
    DEFAULT_LEVEL, HINT_COST, KEY_COMPLETED, KEY_LEVEL, KEY_MODE, KEY_SCORE, KEY_SOUND,
    KEY_STREAK, POINTS_PER_LEVEL,
};
use crate::generator::generate_puzzle;
use crate::puzzle::PuzzleData;
use crate::selector::{normalize_level, normalize_signed_level};

/// Flat string key/value persistence (browser local storage or equivalent).
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// In-process store, used by tests and tooling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Persisted player progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub score: u32,
    pub level: u32,
    pub mode: PuzzleCategory,
    pub completed_puzzles: u32,
    pub streak_count: u32,
    pub sound_enabled: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: DEFAULT_LEVEL,
            mode: PuzzleCategory::Pattern,
            completed_puzzles: 0,
            streak_count: 0,
            sound_enabled: true,
        }
    }
}

impl SessionState {
    /// Read every key, falling back to defaults for missing or malformed values.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a read fails.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, S::Error> {
        let defaults = Self::default();
        let level = read_number(store, KEY_LEVEL)?
            .map_or(defaults.level, normalize_signed_level);
        let mode = store
            .get(KEY_MODE)?
            .map_or(defaults.mode, |raw| PuzzleCategory::from_key_or_default(&raw));
        let sound_enabled = store
            .get(KEY_SOUND)?
            .map_or(defaults.sound_enabled, |raw| raw.trim() != "false");

        let state = Self {
            score: read_counter(store, KEY_SCORE)?.unwrap_or(defaults.score),
            level,
            mode,
            completed_puzzles: read_counter(store, KEY_COMPLETED)?
                .unwrap_or(defaults.completed_puzzles),
            streak_count: read_counter(store, KEY_STREAK)?.unwrap_or(defaults.streak_count),
            sound_enabled,
        };
        log::debug!("session loaded | {state:?}");
        Ok(state)
    }

    /// Seed defaults for any missing key, then load.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a read or write fails.
    pub fn initialize<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Self, S::Error> {
        let defaults = Self::default();
        for (key, value) in defaults.encoded() {
            if store.get(key)?.is_none() {
                store.set(key, &value)?;
            }
        }
        Self::load(store)
    }

    /// Write every key.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a write fails.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), S::Error> {
        for (key, value) in self.encoded() {
            store.set(key, &value)?;
        }
        log::debug!("session saved | {self:?}");
        Ok(())
    }

    fn encoded(&self) -> [(&'static str, String); 6] {
        [
            (KEY_SCORE, self.score.to_string()),
            (KEY_LEVEL, self.level.to_string()),
            (KEY_MODE, self.mode.key().to_string()),
            (KEY_COMPLETED, self.completed_puzzles.to_string()),
            (KEY_STREAK, self.streak_count.to_string()),
            (KEY_SOUND, self.sound_enabled.to_string()),
        ]
    }
}

fn read_number<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<i64>, S::Error> {
    Ok(store.get(key)?.and_then(|raw| match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring malformed session value {key}={raw:?}");
            None
        }
    }))
}

fn read_counter<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<u32>, S::Error> {
    Ok(read_number(store, key)?.map(|value| u32::try_from(value.max(0)).unwrap_or(u32::MAX)))
}

/// Result of checking the player's answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    NoPuzzle,
    Correct { points: u32 },
    Incorrect,
}

impl SubmitOutcome {
    /// Toast text shown to the player, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::NoPuzzle => None,
            Self::Correct { points } => Some(format!("Correct! +{points} points")),
            Self::Incorrect => Some(String::from("Not quite right. Try again!")),
        }
    }
}

/// Result of a hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    NoPuzzle,
    InsufficientScore,
    Applied { index: usize },
    /// Every slot already matches; the hint cost is still charged.
    NotNeeded,
}

impl HintOutcome {
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::NoPuzzle | Self::InsufficientScore => None,
            Self::Applied { .. } => Some(format!("Hint applied! (-{HINT_COST} points)")),
            Self::NotNeeded => Some(String::from("No hints needed!")),
        }
    }
}

/// Live game session: persisted state plus the puzzle in progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaySession {
    state: SessionState,
    puzzle: Option<PuzzleData>,
    answers: Vec<String>,
    needs_new_puzzle: bool,
}

impl PlaySession {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn puzzle(&self) -> Option<&PuzzleData> {
        self.puzzle.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// `true` after a correct answer until the next puzzle is installed.
    #[must_use]
    pub const fn needs_new_puzzle(&self) -> bool {
        self.needs_new_puzzle
    }

    /// Generate the next puzzle from the built-in catalog at the session
    /// level, using `category` or the session mode.
    pub fn generate_new_puzzle<R>(&mut self, category: Option<PuzzleCategory>, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let category = category.unwrap_or(self.state.mode);
        let puzzle = generate_puzzle(category, self.state.level, rng);
        self.install_puzzle(puzzle);
    }

    /// Make `puzzle` current and clear the answers to one empty string per slot.
    pub fn install_puzzle(&mut self, puzzle: PuzzleData) {
        self.answers = puzzle.empty_answers();
        self.puzzle = Some(puzzle);
        self.needs_new_puzzle = false;
    }

    /// Out-of-range indices are ignored.
    pub fn set_player_answer(&mut self, index: usize, value: &str) {
        if let Some(slot) = self.answers.get_mut(index) {
            *slot = value.to_string();
        }
    }

    pub fn reset_puzzle(&mut self) {
        if let Some(puzzle) = &self.puzzle {
            self.answers = puzzle.empty_answers();
        }
    }

    pub fn submit_answer(&mut self) -> SubmitOutcome {
        let Some(puzzle) = &self.puzzle else {
            return SubmitOutcome::NoPuzzle;
        };
        if puzzle.is_solved_by(self.answers.as_slice()) {
            let points = self.state.level.saturating_mul(POINTS_PER_LEVEL);
            self.state.score = self.state.score.saturating_add(points);
            self.state.completed_puzzles = self.state.completed_puzzles.saturating_add(1);
            self.state.streak_count = self.state.streak_count.saturating_add(1);
            self.needs_new_puzzle = true;
            log::info!(
                "puzzle solved | category:{} points:{points} streak:{}",
                puzzle.category,
                self.state.streak_count
            );
            SubmitOutcome::Correct { points }
        } else {
            self.state.streak_count = 0;
            log::debug!("puzzle missed | category:{}", puzzle.category);
            SubmitOutcome::Incorrect
        }
    }

    /// Spend [`HINT_COST`] points to reveal the solution character for the
    /// first slot that is empty or wrong.
    pub fn request_hint(&mut self) -> HintOutcome {
        let Some(puzzle) = &self.puzzle else {
            return HintOutcome::NoPuzzle;
        };
        if self.state.score < HINT_COST {
            return HintOutcome::InsufficientScore;
        }
        self.state.score -= HINT_COST;

        let target = self.answers.iter().enumerate().find_map(|(index, answer)| {
            let expected = puzzle.solution_char(index)?;
            let matches = !answer.is_empty()
                && answer.to_lowercase() == expected.to_lowercase().collect::<String>();
            (!matches).then_some((index, expected))
        });

        match target {
            Some((index, expected)) => {
                self.answers[index] = expected.to_string();
                log::debug!("hint applied | slot:{index}");
                HintOutcome::Applied { index }
            }
            None => HintOutcome::NotNeeded,
        }
    }

    /// Returns the toast text for the change.
    pub fn set_difficulty(&mut self, level: u32) -> String {
        self.state.level = normalize_level(level);
        log::debug!("difficulty set | level:{}", self.state.level);
        format!("Difficulty set to {}", self.state.level)
    }

    pub fn set_game_mode(&mut self, mode: PuzzleCategory) {
        self.state.mode = mode;
    }

    pub fn toggle_sound(&mut self) {
        self.state.sound_enabled = !self.state.sound_enabled;
    }

    /// Save the session state explicitly.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a write fails.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), S::Error> {
        self.state.save(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::InputSlot;
    use smallvec::smallvec;

    fn two_slot_puzzle() -> PuzzleData {
        PuzzleData {
            category: PuzzleCategory::Sequence,
            question: String::from("Spell it"),
            input_slots: smallvec![
                InputSlot::text("1").with_max_length(1),
                InputSlot::text("2").with_max_length(1),
            ],
            solution: String::from("Ok"),
            hint: String::new(),
            explanation: String::new(),
        }
    }

    #[test]
    fn load_uses_defaults_for_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(SessionState::load(&store).unwrap(), SessionState::default());
    }

    #[test]
    fn initialize_seeds_only_missing_keys() {
        let mut store = MemoryStore::new();
        store.set("puzzle_game_score", "40").unwrap();
        let state = SessionState::initialize(&mut store).unwrap();
        assert_eq!(state.score, 40);
        assert_eq!(state.level, 1);
        assert_eq!(store.len(), 6);
        assert_eq!(
            store.get("puzzle_game_sound").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn load_tolerates_malformed_values() {
        let mut store = MemoryStore::new();
        store.set("puzzle_game_score", "lots").unwrap();
        store.set("puzzle_game_level", "-3").unwrap();
        store.set("puzzle_game_mode", "crossword").unwrap();
        store.set("puzzle_game_streak", "-8").unwrap();
        store.set("puzzle_game_sound", "nope").unwrap();
        let state = SessionState::load(&store).unwrap();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.mode, PuzzleCategory::Pattern);
        assert_eq!(state.streak_count, 0);
        assert!(state.sound_enabled);

        store.set("puzzle_game_sound", "false").unwrap();
        assert!(!SessionState::load(&store).unwrap().sound_enabled);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut store = MemoryStore::new();
        let state = SessionState {
            score: 120,
            level: 4,
            mode: PuzzleCategory::Word,
            completed_puzzles: 9,
            streak_count: 3,
            sound_enabled: false,
        };
        state.save(&mut store).unwrap();
        assert_eq!(store.get("puzzle_game_mode").unwrap().as_deref(), Some("word"));
        assert_eq!(SessionState::load(&store).unwrap(), state);
    }

    #[test]
    fn correct_submission_scores_by_level() {
        let mut session = PlaySession::new(SessionState {
            level: 3,
            ..SessionState::default()
        });
        session.install_puzzle(two_slot_puzzle());
        session.set_player_answer(0, "o");
        session.set_player_answer(1, "K");
        let outcome = session.submit_answer();
        assert_eq!(outcome, SubmitOutcome::Correct { points: 30 });
        assert_eq!(outcome.notice().as_deref(), Some("Correct! +30 points"));
        assert_eq!(session.state().score, 30);
        assert_eq!(session.state().completed_puzzles, 1);
        assert_eq!(session.state().streak_count, 1);
        assert!(session.needs_new_puzzle());
    }

    #[test]
    fn wrong_submission_resets_streak() {
        let mut session = PlaySession::new(SessionState {
            streak_count: 4,
            ..SessionState::default()
        });
        assert_eq!(session.submit_answer(), SubmitOutcome::NoPuzzle);
        session.install_puzzle(two_slot_puzzle());
        let outcome = session.submit_answer();
        assert_eq!(outcome, SubmitOutcome::Incorrect);
        assert_eq!(
            outcome.notice().as_deref(),
            Some("Not quite right. Try again!")
        );
        assert_eq!(session.state().streak_count, 0);
        assert!(!session.needs_new_puzzle());
    }

    #[test]
    fn hint_fills_first_empty_or_wrong_slot() {
        let mut session = PlaySession::new(SessionState {
            score: 12,
            ..SessionState::default()
        });
        session.install_puzzle(two_slot_puzzle());
        session.set_player_answer(0, "O");
        session.set_player_answer(1, "x");

        assert_eq!(session.request_hint(), HintOutcome::Applied { index: 1 });
        assert_eq!(session.answers(), ["O", "k"]);
        assert_eq!(session.state().score, 7);

        assert_eq!(session.request_hint(), HintOutcome::NotNeeded);
        assert_eq!(session.state().score, 2);

        assert_eq!(session.request_hint(), HintOutcome::InsufficientScore);
        assert_eq!(session.state().score, 2);
    }

    #[test]
    fn answers_follow_the_installed_puzzle() {
        let mut session = PlaySession::default();
        assert_eq!(session.request_hint(), HintOutcome::NoPuzzle);
        session.install_puzzle(two_slot_puzzle());
        assert_eq!(session.answers(), ["", ""]);
        session.set_player_answer(5, "ignored");
        session.set_player_answer(0, "z");
        session.reset_puzzle();
        assert_eq!(session.answers(), ["", ""]);
    }

    #[test]
    fn settings_changes_are_normalized() {
        let mut session = PlaySession::default();
        assert_eq!(session.set_difficulty(0), "Difficulty set to 1");
        assert_eq!(session.set_difficulty(6), "Difficulty set to 6");
        session.set_game_mode(PuzzleCategory::Logic);
        session.toggle_sound();
        assert_eq!(session.state().mode, PuzzleCategory::Logic);
        assert!(!session.state().sound_enabled);
    }
}
