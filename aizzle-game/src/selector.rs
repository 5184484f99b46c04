//! Template selection: level → tier → uniform draw within the pool.
use rand::Rng;
use serde::Serialize;

use crate::catalog::{
    Catalog, CatalogError, TemplateRef, WordTemplate, tier_pool_id, word_pool_id,
};
use crate::category::{PuzzleCategory, Tier, WordKind};
use crate::policy::{SelectionPolicy, TierMix, WordMix};
use crate::rng::{index_for_roll, roll_unit};

/// Clamp a caller-supplied level into the supported range (`>= 1`).
#[must_use]
pub const fn normalize_level(level: u32) -> u32 {
    if level == 0 { 1 } else { level }
}

/// Same as [`normalize_level`] for signed or stored values.
#[must_use]
pub fn normalize_signed_level(level: i64) -> u32 {
    u32::try_from(level.max(1)).unwrap_or(u32::MAX)
}

/// Record of how a template was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionTrace {
    pub category: PuzzleCategory,
    pub level: u32,
    pub tier: Tier,
    pub word_kind: Option<WordKind>,
    pub pool_id: &'static str,
    /// Roll that decided the tier or sub-kind; `None` when the level only
    /// allows a single pool.
    pub tier_roll: Option<f64>,
    pub index: usize,
    pub pool_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub template: TemplateRef<'a>,
    pub trace: SelectionTrace,
}

/// Pick a template from `catalog` using the default policy.
///
/// # Errors
///
/// Returns `CatalogError::EmptyPool` when the resolved pool has no templates.
pub fn select_template<'a, R>(
    catalog: &'a Catalog,
    category: PuzzleCategory,
    level: u32,
    rng: &mut R,
) -> Result<TemplateRef<'a>, CatalogError>
where
    R: Rng + ?Sized,
{
    select_template_with_trace(catalog, &SelectionPolicy::default(), category, level, rng)
        .map(|selection| selection.template)
}

/// Pick a template under `policy`, returning the decision trace alongside.
///
/// # Errors
///
/// Returns `CatalogError::EmptyPool` when the resolved pool has no templates.
pub fn select_template_with_trace<'a, R>(
    catalog: &'a Catalog,
    policy: &SelectionPolicy,
    category: PuzzleCategory,
    level: u32,
    rng: &mut R,
) -> Result<Selection<'a>, CatalogError>
where
    R: Rng + ?Sized,
{
    let level = normalize_level(level);
    let selection = match category {
        PuzzleCategory::Pattern => {
            let (tier, tier_roll) = resolve_tier(&policy.pattern, level, rng);
            let (template, index, pool_len) =
                pick(catalog.pattern.pool(tier), category, tier, rng)?;
            Selection {
                template: TemplateRef::Pattern(template),
                trace: tier_trace(category, level, tier, tier_roll, index, pool_len),
            }
        }
        PuzzleCategory::Sequence => {
            let (tier, tier_roll) = resolve_tier(&policy.sequence, level, rng);
            let (template, index, pool_len) =
                pick(catalog.sequence.pool(tier), category, tier, rng)?;
            Selection {
                template: TemplateRef::Sequence(template),
                trace: tier_trace(category, level, tier, tier_roll, index, pool_len),
            }
        }
        PuzzleCategory::Logic => {
            let (tier, tier_roll) = resolve_tier(&policy.logic, level, rng);
            let (template, index, pool_len) =
                pick(catalog.logic.pool(tier), category, tier, rng)?;
            Selection {
                template: TemplateRef::Logic(template),
                trace: tier_trace(category, level, tier, tier_roll, index, pool_len),
            }
        }
        PuzzleCategory::Word => select_word(catalog, &policy.word, level, rng)?,
    };

    log::debug!(
        "puzzle selection | category:{} level:{} tier:{} pool:{} index:{}/{}",
        selection.trace.category,
        selection.trace.level,
        selection.trace.tier.key(),
        selection.trace.pool_id,
        selection.trace.index,
        selection.trace.pool_len
    );
    Ok(selection)
}

fn resolve_tier<R>(mix: &TierMix, level: u32, rng: &mut R) -> (Tier, Option<f64>)
where
    R: Rng + ?Sized,
{
    if level <= mix.basic_max_level {
        return (Tier::Basic, None);
    }
    let roll = roll_unit(rng);
    let tier = if roll < mix.advanced_chance {
        Tier::Advanced
    } else {
        Tier::Basic
    };
    (tier, Some(roll))
}

fn resolve_word_kind<R>(mix: &WordMix, level: u32, rng: &mut R) -> (WordKind, f64)
where
    R: Rng + ?Sized,
{
    let roll = roll_unit(rng);
    let kind = if level <= mix.basic_max_level {
        if roll < mix.basic_anagram_chance {
            WordKind::Anagram
        } else {
            WordKind::MissingLetters
        }
    } else if roll < mix.advanced_anagram_chance {
        WordKind::Anagram
    } else if roll < mix.advanced_anagram_chance + mix.advanced_riddle_chance {
        WordKind::Riddle
    } else {
        WordKind::MissingLetters
    };
    (kind, roll)
}

fn pick<'a, T, R>(
    pool: &'a [T],
    category: PuzzleCategory,
    tier: Tier,
    rng: &mut R,
) -> Result<(&'a T, usize, usize), CatalogError>
where
    R: Rng + ?Sized,
{
    pick_from(pool, tier_pool_id(category, tier), rng)
}

fn pick_from<'a, T, R>(
    pool: &'a [T],
    pool_id: &'static str,
    rng: &mut R,
) -> Result<(&'a T, usize, usize), CatalogError>
where
    R: Rng + ?Sized,
{
    let index = index_for_roll(roll_unit(rng), pool.len())
        .ok_or(CatalogError::EmptyPool { pool: pool_id })?;
    let template = pool
        .get(index)
        .ok_or(CatalogError::EmptyPool { pool: pool_id })?;
    Ok((template, index, pool.len()))
}

fn select_word<'a, R>(
    catalog: &'a Catalog,
    mix: &WordMix,
    level: u32,
    rng: &mut R,
) -> Result<Selection<'a>, CatalogError>
where
    R: Rng + ?Sized,
{
    let (kind, roll) = resolve_word_kind(mix, level, rng);
    let pool_id = word_pool_id(kind);
    let (template, index, pool_len) = match kind {
        WordKind::Anagram => {
            let (t, index, len) = pick_from(&catalog.word.anagrams, pool_id, rng)?;
            (WordTemplate::Anagram(t), index, len)
        }
        WordKind::Riddle => {
            let (t, index, len) = pick_from(&catalog.word.riddles, pool_id, rng)?;
            (WordTemplate::Riddle(t), index, len)
        }
        WordKind::MissingLetters => {
            let (t, index, len) = pick_from(&catalog.word.missing_letters, pool_id, rng)?;
            (WordTemplate::MissingLetters(t), index, len)
        }
    };
    Ok(Selection {
        template: TemplateRef::Word(template),
        trace: SelectionTrace {
            category: PuzzleCategory::Word,
            level,
            tier: kind.tier(),
            word_kind: Some(kind),
            pool_id,
            tier_roll: Some(roll),
            index,
            pool_len,
        },
    })
}

const fn tier_trace(
    category: PuzzleCategory,
    level: u32,
    tier: Tier,
    tier_roll: Option<f64>,
    index: usize,
    pool_len: usize,
) -> SelectionTrace {
    SelectionTrace {
        category,
        level,
        tier,
        word_kind: None,
        pool_id: tier_pool_id(category, tier),
        tier_roll,
        index,
        pool_len,
    }
}
