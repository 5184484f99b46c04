//! Puzzle dispatcher: selection followed by assembly.
use rand::Rng;

use crate::assemble::assemble;
use crate::catalog::{Catalog, CatalogError};
use crate::category::PuzzleCategory;
use crate::policy::SelectionPolicy;
use crate::puzzle::PuzzleData;
use crate::selector::{SelectionTrace, select_template_with_trace};

/// Generate a puzzle from the built-in catalog.
///
/// # Panics
///
/// Panics when the resolved template pool is empty. That only happens when
/// the embedded catalog asset is broken, which no runtime input can cause.
pub fn generate_puzzle<R>(category: PuzzleCategory, level: u32, rng: &mut R) -> PuzzleData
where
    R: Rng + ?Sized,
{
    fail_fast(try_generate_puzzle(
        Catalog::builtin(),
        &SelectionPolicy::default(),
        category,
        level,
        rng,
    ))
}

fn fail_fast(result: Result<PuzzleData, CatalogError>) -> PuzzleData {
    result.unwrap_or_else(|err| panic!("built-in puzzle catalog is misconfigured: {err}"))
}

/// Generate a puzzle from a category key; unknown keys become pattern puzzles.
pub fn generate_puzzle_for_key<R>(key: &str, level: u32, rng: &mut R) -> PuzzleData
where
    R: Rng + ?Sized,
{
    generate_puzzle(PuzzleCategory::from_key_or_default(key), level, rng)
}

/// Generate a puzzle from an injected catalog and policy.
///
/// # Errors
///
/// Returns `CatalogError::EmptyPool` when the resolved pool is empty.
pub fn try_generate_puzzle<R>(
    catalog: &Catalog,
    policy: &SelectionPolicy,
    category: PuzzleCategory,
    level: u32,
    rng: &mut R,
) -> Result<PuzzleData, CatalogError>
where
    R: Rng + ?Sized,
{
    generate_with_trace(catalog, policy, category, level, rng).map(|(puzzle, _)| puzzle)
}

/// Generate a puzzle and keep the selection trace for diagnostics.
///
/// # Errors
///
/// Returns `CatalogError::EmptyPool` when the resolved pool is empty.
pub fn generate_with_trace<R>(
    catalog: &Catalog,
    policy: &SelectionPolicy,
    category: PuzzleCategory,
    level: u32,
    rng: &mut R,
) -> Result<(PuzzleData, SelectionTrace), CatalogError>
where
    R: Rng + ?Sized,
{
    let selection = select_template_with_trace(catalog, policy, category, level, rng)?;
    Ok((assemble(selection.template), selection.trace))
}
