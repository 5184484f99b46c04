use aizzle_game::catalog::tier_pool_id;
use aizzle_game::{
    Catalog, CatalogError, PuzzleCategory, SelectionPolicy, TemplateRef, Tier, assemble,
    try_generate_puzzle,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::Value;

#[test]
fn every_template_reproduces_its_answer() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.validate(), Ok(()));
    for template in catalog.templates() {
        let puzzle = assemble(template);
        assert_eq!(puzzle.category, template.category());
        assert_eq!(puzzle.solution, template.canonical_answer());
        assert!(!puzzle.question.is_empty());
        assert!(!puzzle.hint.is_empty());
        assert!(!puzzle.explanation.is_empty());
        assert!(puzzle.is_solved_by(&[puzzle.solution.to_lowercase()]));
    }
}

#[test]
fn pattern_questions_embed_every_term() {
    let catalog = Catalog::builtin();
    for tier in [Tier::Basic, Tier::Advanced] {
        for template in catalog.pattern.pool(tier) {
            let puzzle = assemble(TemplateRef::Pattern(template));
            let terms: Vec<String> = template.sequence.iter().map(i64::to_string).collect();
            assert!(
                puzzle.question.ends_with(&format!("{}, ...", terms.join(", "))),
                "{}",
                puzzle.question
            );
            assert_eq!(puzzle.solution.parse::<i64>().unwrap(), template.next);
        }
    }
}

#[test]
fn logic_answers_are_stored_verbatim() {
    let catalog = Catalog::builtin();
    let bird = catalog
        .logic
        .basic
        .iter()
        .find(|riddle| riddle.template.contains("BIRD"))
        .expect("BIRD riddle present");
    assert_eq!(assemble(TemplateRef::Logic(bird)).solution, "27");
}

#[test]
fn puzzle_json_uses_wire_names() {
    let catalog = Catalog::builtin();
    let puzzle = assemble(TemplateRef::Sequence(&catalog.sequence.advanced[0]));
    let value = serde_json::to_value(&puzzle).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "category",
            "explanation",
            "hint",
            "inputSlots",
            "question",
            "solution"
        ]
    );
    assert_eq!(value["category"], Value::from("sequence"));
    assert_eq!(value["inputSlots"][0]["maxLength"], Value::from(1));
}

#[test]
fn custom_catalog_reports_missing_pools() {
    let json = r#"{
        "pattern": {
            "basic": [{ "sequence": [1, 2], "next": 3, "rule": "add 1" }],
            "advanced": []
        }
    }"#;
    let catalog = Catalog::from_json(json).unwrap();
    let policy = SelectionPolicy::default();
    let mut rng = SmallRng::seed_from_u64(3);

    let basic = try_generate_puzzle(&catalog, &policy, PuzzleCategory::Pattern, 1, &mut rng);
    assert_eq!(basic.unwrap().solution, "3");

    let advanced = try_generate_puzzle(&catalog, &policy, PuzzleCategory::Pattern, 9, &mut rng);
    let mut outcomes = vec![advanced];
    for _ in 0..32 {
        outcomes.push(try_generate_puzzle(
            &catalog,
            &policy,
            PuzzleCategory::Pattern,
            9,
            &mut rng,
        ));
    }
    assert!(outcomes.iter().any(|outcome| {
        outcome.as_ref().err()
            == Some(&CatalogError::EmptyPool {
                pool: tier_pool_id(PuzzleCategory::Pattern, Tier::Advanced),
            })
    }));
}
