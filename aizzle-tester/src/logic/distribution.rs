use aizzle_game::{
    Catalog, CatalogError, PuzzleCategory, PuzzleRng, SelectionPolicy, Tier, WordKind,
    select_template_with_trace,
};
use serde::Serialize;

use super::checks::{CHECK_TIER_DISTRIBUTION, CheckRecorder, CheckResult};
use super::seeds::SeedInfo;

pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Share of draws per bucket. Tiered categories use `advanced`; word
/// puzzles use the three sub-kind buckets, where riddles count as advanced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Shares {
    pub advanced: f64,
    pub anagram: f64,
    pub riddle: f64,
    pub missing_letters: f64,
}

impl Shares {
    fn expected(policy: &SelectionPolicy, category: PuzzleCategory, level: u32) -> Self {
        match policy.tier_mix(category) {
            Some(mix) => Self {
                advanced: mix.advanced_share(level),
                ..Self::default()
            },
            None => {
                let (anagram, riddle, missing_letters) = policy.word.shares(level);
                Self {
                    advanced: riddle,
                    anagram,
                    riddle,
                    missing_letters,
                }
            }
        }
    }

    fn buckets(&self) -> [(&'static str, f64); 4] {
        [
            ("advanced", self.advanced),
            ("anagram", self.anagram),
            ("riddle", self.riddle),
            ("missing_letters", self.missing_letters),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionRow {
    pub category: PuzzleCategory,
    pub level: u32,
    pub seed: u64,
    pub draws: usize,
    pub expected: Shares,
    pub observed: Shares,
}

impl DistributionRow {
    /// Largest absolute gap between expected and observed shares.
    pub fn max_drift(&self) -> f64 {
        self.expected
            .buckets()
            .into_iter()
            .zip(self.observed.buckets())
            .map(|((_, expected), (_, observed))| (expected - observed).abs())
            .fold(0.0, f64::max)
    }
}

#[allow(clippy::cast_precision_loss)]
fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Draw `iterations` selections per category, level and seed.
pub fn run_distribution(
    catalog: &Catalog,
    policy: &SelectionPolicy,
    categories: &[PuzzleCategory],
    levels: &[u32],
    seeds: &[SeedInfo],
    iterations: usize,
) -> Result<Vec<DistributionRow>, CatalogError> {
    let mut rows = Vec::new();
    for seed in seeds {
        for &category in categories {
            for &level in levels {
                let mut rng = PuzzleRng::from_user_seed(seed.seed);
                let mut advanced = 0usize;
                let mut kinds = [0usize; 3];
                for _ in 0..iterations {
                    let trace =
                        select_template_with_trace(catalog, policy, category, level, &mut rng)?
                            .trace;
                    if trace.tier == Tier::Advanced {
                        advanced += 1;
                    }
                    match trace.word_kind {
                        Some(WordKind::Anagram) => kinds[0] += 1,
                        Some(WordKind::Riddle) => kinds[1] += 1,
                        Some(WordKind::MissingLetters) => kinds[2] += 1,
                        None => {}
                    }
                }
                let observed = Shares {
                    advanced: share(advanced, iterations),
                    anagram: share(kinds[0], iterations),
                    riddle: share(kinds[1], iterations),
                    missing_letters: share(kinds[2], iterations),
                };
                log::debug!(
                    "distribution | category:{category} level:{level} seed:{} draws:{} draws_used:{}",
                    seed.seed,
                    iterations,
                    rng.draws()
                );
                rows.push(DistributionRow {
                    category,
                    level,
                    seed: seed.seed,
                    draws: iterations,
                    expected: Shares::expected(policy, category, level),
                    observed,
                });
            }
        }
    }
    Ok(rows)
}

/// Compare observed shares against the policy.
///
/// A bucket the policy never reaches must stay at exactly zero; every other
/// bucket may drift by at most `tolerance`.
pub fn check_distribution(rows: &[DistributionRow], tolerance: f64) -> CheckResult {
    let mut recorder = CheckRecorder::start(CHECK_TIER_DISTRIBUTION);
    for row in rows {
        recorder.sample();
        for ((bucket, expected), (_, observed)) in
            row.expected.buckets().into_iter().zip(row.observed.buckets())
        {
            let unreachable = expected == 0.0 && observed > 0.0;
            if unreachable || (expected - observed).abs() > tolerance {
                recorder.fail(format!(
                    "{} level {} seed {}: {bucket} expected {expected:.3} observed {observed:.3}",
                    row.category, row.level, row.seed
                ));
            }
        }
    }
    recorder.finish()
}
