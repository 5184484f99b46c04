//! Formatting of selected templates into [`PuzzleData`].
use smallvec::smallvec;

use crate::catalog::{
    AnagramTemplate, LetterSequence, LogicRiddle, MissingLetters, NumberPattern, TemplateRef,
    WordRiddle, WordTemplate,
};
use crate::category::PuzzleCategory;
use crate::constants::{
    LOGIC_HINT, PATTERN_HINT, PLACEHOLDER_ANSWER, PLACEHOLDER_COMPLETE_WORD,
    PLACEHOLDER_NEW_WORD, PLACEHOLDER_NEXT_LETTER, PLACEHOLDER_NEXT_NUMBER, SEQUENCE_HINT,
};
use crate::puzzle::{InputSlot, PuzzleData};

/// Format a template. Pure and total: the same template always yields the
/// same puzzle.
#[must_use]
pub fn assemble(template: TemplateRef<'_>) -> PuzzleData {
    match template {
        TemplateRef::Pattern(t) => assemble_pattern(t),
        TemplateRef::Sequence(t) => assemble_sequence(t),
        TemplateRef::Logic(t) => assemble_logic(t),
        TemplateRef::Word(WordTemplate::Anagram(t)) => assemble_anagram(t),
        TemplateRef::Word(WordTemplate::Riddle(t)) => assemble_word_riddle(t),
        TemplateRef::Word(WordTemplate::MissingLetters(t)) => assemble_missing_letters(t),
    }
}

fn join_terms<T: ToString>(terms: &[T]) -> String {
    terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn assemble_pattern(t: &NumberPattern) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Pattern,
        question: format!(
            "What's the next number in this sequence? {}, ...",
            join_terms(&t.sequence)
        ),
        input_slots: smallvec![InputSlot::number(PLACEHOLDER_NEXT_NUMBER)],
        solution: t.next.to_string(),
        hint: PATTERN_HINT.to_string(),
        explanation: format!("The pattern follows the rule: {}.", t.rule),
    }
}

fn assemble_sequence(t: &LetterSequence) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Sequence,
        question: format!(
            "What letter comes next in this sequence? {}, ...",
            join_terms(&t.sequence)
        ),
        input_slots: smallvec![InputSlot::text(PLACEHOLDER_NEXT_LETTER).with_max_length(1)],
        solution: t.next.to_string(),
        hint: SEQUENCE_HINT.to_string(),
        explanation: format!("The sequence follows the rule: {}.", t.rule),
    }
}

fn assemble_logic(t: &LogicRiddle) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Logic,
        question: t.template.clone(),
        input_slots: smallvec![InputSlot::text(PLACEHOLDER_ANSWER)],
        solution: t.solution.clone(),
        hint: LOGIC_HINT.to_string(),
        explanation: format!("Solution method: {}.", t.rule),
    }
}

fn assemble_anagram(t: &AnagramTemplate) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Word,
        question: format!(
            "Rearrange the letters of {} to form another word.",
            t.word
        ),
        input_slots: smallvec![InputSlot::text(PLACEHOLDER_NEW_WORD)],
        solution: t.anagram.clone(),
        hint: t.hint.clone(),
        explanation: format!("{} and {} are anagrams of each other.", t.word, t.anagram),
    }
}

fn assemble_word_riddle(t: &WordRiddle) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Word,
        question: t.question.clone(),
        input_slots: smallvec![InputSlot::text(PLACEHOLDER_ANSWER)],
        solution: t.answer.clone(),
        hint: t.hint.clone(),
        explanation: format!("The answer is {}.", t.answer),
    }
}

fn assemble_missing_letters(t: &MissingLetters) -> PuzzleData {
    PuzzleData {
        category: PuzzleCategory::Word,
        question: format!("Fill in the missing vowels: {}", t.incomplete),
        input_slots: smallvec![InputSlot::text(PLACEHOLDER_COMPLETE_WORD)],
        solution: t.complete.clone(),
        hint: t.hint.clone(),
        explanation: format!("The complete word is {}.", t.complete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::puzzle::InputKind;

    #[test]
    fn pattern_formats_sequence_and_rule() {
        let template = NumberPattern {
            sequence: vec![2, 4, 6, 8],
            next: 10,
            rule: String::from("add 2"),
        };
        let puzzle = assemble(TemplateRef::Pattern(&template));
        assert_eq!(
            puzzle.question,
            "What's the next number in this sequence? 2, 4, 6, 8, ..."
        );
        assert_eq!(puzzle.solution, "10");
        assert_eq!(puzzle.input_slots.len(), 1);
        assert_eq!(puzzle.input_slots[0].kind, InputKind::Number);
        assert_eq!(puzzle.input_slots[0].placeholder, "Next number");
        assert_eq!(puzzle.input_slots[0].max_length, None);
        assert_eq!(puzzle.explanation, "The pattern follows the rule: add 2.");
    }

    #[test]
    fn negative_terms_keep_their_sign() {
        let template = NumberPattern {
            sequence: vec![3, 0, -3],
            next: -6,
            rule: String::from("subtract 3"),
        };
        let puzzle = assemble(TemplateRef::Pattern(&template));
        assert_eq!(
            puzzle.question,
            "What's the next number in this sequence? 3, 0, -3, ..."
        );
        assert_eq!(puzzle.solution, "-6");
    }

    #[test]
    fn sequence_uses_single_letter_slot() {
        let catalog = Catalog::builtin();
        let puzzle = assemble(TemplateRef::Sequence(&catalog.sequence.basic[2]));
        assert_eq!(
            puzzle.question,
            "What letter comes next in this sequence? Z, Y, X, W, ..."
        );
        assert_eq!(puzzle.solution, "V");
        assert_eq!(puzzle.input_slots[0].max_length, Some(1));
        assert_eq!(puzzle.input_slots[0].kind, InputKind::Text);
        assert_eq!(
            puzzle.explanation,
            "The sequence follows the rule: Reverse alphabet."
        );
    }

    #[test]
    fn logic_question_is_verbatim() {
        let catalog = Catalog::builtin();
        let riddle = &catalog.logic.advanced[0];
        let puzzle = assemble(TemplateRef::Logic(riddle));
        assert_eq!(puzzle.question, riddle.template);
        assert_eq!(puzzle.solution, "22");
        assert_eq!(puzzle.input_slots[0].placeholder, "Answer");
        assert_eq!(puzzle.explanation, "Solution method: Sum of the digits.");
    }

    #[test]
    fn word_sub_kinds_use_template_hints() {
        let catalog = Catalog::builtin();

        let riddle = assemble(TemplateRef::Word(WordTemplate::Riddle(
            &catalog.word.riddles[2],
        )));
        assert_eq!(riddle.solution, "NOON");
        assert_eq!(riddle.hint, "Think about a time of day");
        assert_eq!(riddle.explanation, "The answer is NOON.");

        let missing = assemble(TemplateRef::Word(WordTemplate::MissingLetters(
            &catalog.word.missing_letters[2],
        )));
        assert_eq!(missing.question, "Fill in the missing vowels: K_YB__RD");
        assert_eq!(missing.input_slots[0].placeholder, "Complete word");
        assert_eq!(missing.explanation, "The complete word is KEYBOARD.");
    }

    #[test]
    fn assembly_is_repeatable() {
        for template in Catalog::builtin().templates() {
            assert_eq!(assemble(template), assemble(template));
        }
    }
}
