//! The engine's output contract.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::category::PuzzleCategory;

/// Kind of value an input slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
}

/// One labeled answer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSlot {
    pub placeholder: String,
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl InputSlot {
    #[must_use]
    pub fn text(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            kind: InputKind::Text,
            max_length: None,
        }
    }

    #[must_use]
    pub fn number(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            kind: InputKind::Number,
            max_length: None,
        }
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

pub type InputSlots = SmallVec<[InputSlot; 1]>;

/// A fully formatted puzzle, owned by the caller.
///
/// Slot `i` lines up with character `i` of `solution` when a puzzle has more
/// than one slot; correctness is case-insensitive equality between the
/// in-order concatenation of the slot values and `solution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleData {
    pub category: PuzzleCategory,
    pub question: String,
    pub input_slots: InputSlots,
    pub solution: String,
    pub hint: String,
    pub explanation: String,
}

impl PuzzleData {
    /// One empty answer per input slot.
    #[must_use]
    pub fn empty_answers(&self) -> Vec<String> {
        vec![String::new(); self.input_slots.len()]
    }

    /// Compare the concatenated answers against the solution, ignoring case.
    #[must_use]
    pub fn is_solved_by<S: AsRef<str>>(&self, answers: &[S]) -> bool {
        let joined: String = answers.iter().map(AsRef::as_ref).collect();
        !self.solution.is_empty() && joined.to_lowercase() == self.solution.to_lowercase()
    }

    /// Character of the solution at `index`, used for per-slot hint reveals.
    #[must_use]
    pub fn solution_char(&self, index: usize) -> Option<char> {
        self.solution.chars().nth(index)
    }
}
