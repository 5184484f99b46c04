use aizzle_game::constants::{HINT_COST, POINTS_PER_LEVEL};
use aizzle_game::{
    Catalog, CatalogError, HintOutcome, MemoryStore, PlaySession, PuzzleCategory, PuzzleRng,
    SelectionPolicy, SessionState, SubmitOutcome, try_generate_puzzle,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::checks::{CHECK_SESSION_BOOKKEEPING, CheckRecorder, CheckResult};
use super::seeds::SeedInfo;

const HINT_SHARE: f64 = 0.2;
const MISS_SHARE: f64 = 0.3;
const WRONG_ANSWER: &str = "zz-not-an-answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerMove {
    HintThenSolve,
    Miss,
    Solve,
}

impl PlayerMove {
    fn roll<R: Rng>(rng: &mut R) -> Self {
        let roll = rng.r#gen::<f64>();
        if roll < HINT_SHARE {
            Self::HintThenSolve
        } else if roll < HINT_SHARE + MISS_SHARE {
            Self::Miss
        } else {
            Self::Solve
        }
    }
}

/// Independent bookkeeping the session must agree with.
#[derive(Debug, Default)]
struct Ledger {
    score: u32,
    completed: u32,
    streak: u32,
}

/// Install the next puzzle for the session's mode and level under `policy`.
fn install_next_puzzle<R: Rng>(
    catalog: &Catalog,
    policy: &SelectionPolicy,
    session: &mut PlaySession,
    rng: &mut R,
) -> Result<(), CatalogError> {
    let state = session.state();
    let puzzle = try_generate_puzzle(catalog, policy, state.mode, state.level, rng)?;
    session.install_puzzle(puzzle);
    Ok(())
}

/// Play `rounds` puzzles per seed and cross-check every state change.
pub fn simulate_sessions(
    catalog: &Catalog,
    policy: &SelectionPolicy,
    categories: &[PuzzleCategory],
    levels: &[u32],
    seeds: &[SeedInfo],
    rounds: usize,
) -> CheckResult {
    let mut recorder = CheckRecorder::start(CHECK_SESSION_BOOKKEEPING);
    if categories.is_empty() || levels.is_empty() {
        return recorder.finish();
    }

    for seed in seeds {
        let mut puzzles = PuzzleRng::from_user_seed(seed.seed);
        let mut player = SmallRng::seed_from_u64(seed.seed);
        let mut session = PlaySession::new(SessionState::default());
        let mut ledger = Ledger::default();

        for round in 0..rounds {
            recorder.sample();
            let category = categories[round % categories.len()];
            let level = levels[round % levels.len()];
            session.set_game_mode(category);
            session.set_difficulty(level);
            let label = format!("seed {} round {}", seed.seed, round + 1);
            if let Err(err) = install_next_puzzle(catalog, policy, &mut session, &mut puzzles) {
                recorder.fail(format!("{label}: {err}"));
                continue;
            }

            let Some(solution) = session.puzzle().map(|p| p.solution.to_lowercase()) else {
                recorder.fail(format!("{label}: no puzzle installed"));
                continue;
            };

            let player_move = PlayerMove::roll(&mut player);
            if player_move == PlayerMove::HintThenSolve {
                let outcome = session.request_hint();
                if ledger.score >= HINT_COST {
                    ledger.score -= HINT_COST;
                    if outcome != (HintOutcome::Applied { index: 0 }) {
                        recorder.fail(format!("{label}: expected hint on slot 0, got {outcome:?}"));
                    }
                } else if outcome != HintOutcome::InsufficientScore {
                    recorder.fail(format!("{label}: hint should be refused, got {outcome:?}"));
                }
            }

            if player_move == PlayerMove::Miss {
                session.set_player_answer(0, WRONG_ANSWER);
                let outcome = session.submit_answer();
                ledger.streak = 0;
                if outcome != SubmitOutcome::Incorrect {
                    recorder.fail(format!("{label}: wrong answer accepted ({outcome:?})"));
                }
            } else {
                session.set_player_answer(0, &solution);
                let outcome = session.submit_answer();
                let points = session.state().level.saturating_mul(POINTS_PER_LEVEL);
                ledger.score = ledger.score.saturating_add(points);
                ledger.completed = ledger.completed.saturating_add(1);
                ledger.streak = ledger.streak.saturating_add(1);
                if outcome != (SubmitOutcome::Correct { points }) {
                    recorder.fail(format!("{label}: correct answer scored {outcome:?}"));
                }
                if !session.needs_new_puzzle() {
                    recorder.fail(format!("{label}: solved puzzle not marked for replacement"));
                }
            }

            let state = session.state();
            if (state.score, state.completed_puzzles, state.streak_count)
                != (ledger.score, ledger.completed, ledger.streak)
            {
                recorder.fail(format!(
                    "{label}: state {}/{}/{} diverged from ledger {}/{}/{}",
                    state.score,
                    state.completed_puzzles,
                    state.streak_count,
                    ledger.score,
                    ledger.completed,
                    ledger.streak
                ));
                ledger.score = state.score;
                ledger.completed = state.completed_puzzles;
                ledger.streak = state.streak_count;
            }
        }

        let mut store = MemoryStore::new();
        match session
            .persist(&mut store)
            .and_then(|()| SessionState::load(&store))
        {
            Ok(restored) if restored == *session.state() => {}
            Ok(restored) => recorder.fail(format!(
                "seed {}: reloaded state {restored:?} differs from {:?}",
                seed.seed,
                session.state()
            )),
            Err(err) => match err {},
        }
        log::debug!(
            "session simulated | seed:{} rounds:{rounds} score:{}",
            seed.seed,
            session.state().score
        );
    }
    recorder.finish()
}
