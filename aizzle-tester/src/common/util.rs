use aizzle_game::PuzzleCategory;
use anyhow::{Context, Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Expand `--categories`; `all` adds every category, duplicates are dropped.
pub fn parse_categories(raw: &str) -> Result<Vec<PuzzleCategory>> {
    let mut categories = Vec::new();
    for token in split_csv(raw) {
        let expanded: Vec<PuzzleCategory> = if token.eq_ignore_ascii_case("all") {
            PuzzleCategory::ALL.to_vec()
        } else {
            let Some(category) = PuzzleCategory::from_key(&token) else {
                bail!("Unknown category: {token}");
            };
            vec![category]
        };
        for category in expanded {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    if categories.is_empty() {
        categories.extend(PuzzleCategory::ALL);
    }
    Ok(categories)
}

/// Parse `--levels`, accepting single values and inclusive `a-b` ranges.
pub fn parse_levels(raw: &str) -> Result<Vec<u32>> {
    let mut levels = Vec::new();
    for token in split_csv(raw) {
        if let Some((start, end)) = token.split_once('-') {
            let start: u32 = start
                .trim()
                .parse()
                .with_context(|| format!("invalid level range: {token}"))?;
            let end: u32 = end
                .trim()
                .parse()
                .with_context(|| format!("invalid level range: {token}"))?;
            if start > end {
                bail!("level range runs backwards: {token}");
            }
            levels.extend(start..=end);
        } else {
            levels.push(
                token
                    .parse()
                    .with_context(|| format!("invalid level: {token}"))?,
            );
        }
    }
    if levels.is_empty() {
        bail!("no levels given");
    }
    Ok(levels)
}

/// Parse `--rolls` into unit values in `[0, 1)`.
pub fn parse_rolls(raw: &str) -> Result<Vec<f64>> {
    split_csv(raw)
        .into_iter()
        .map(|token| {
            let value: f64 = token
                .parse()
                .with_context(|| format!("invalid roll: {token}"))?;
            if !(0.0..1.0).contains(&value) {
                bail!("roll {token} must lie in [0, 1)");
            }
            Ok(value)
        })
        .collect()
}
