use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Seed metadata carried into every report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub label: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, label: None }
    }

    /// Derive a seed from a free-form phrase so testers can share readable seeds.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        let digest = Sha256::digest(phrase.trim().to_lowercase().as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self {
            seed: u64::from_le_bytes(bytes),
            label: Some(phrase.trim().to_string()),
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        match &self.label {
            Some(label) => format!("{label} ({})", self.seed),
            None => self.seed.to_string(),
        }
    }
}

/// Resolve CLI seed tokens: decimal, `0x` hex, or any other phrase.
///
/// Duplicates are dropped keeping first-seen order; no tokens means `1337`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut seeds: Vec<SeedInfo> = Vec::new();
    for token in tokens {
        if token.is_empty() {
            continue;
        }

        let info = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            let value = u64::from_str_radix(&hex.replace('_', ""), 16)
                .with_context(|| format!("invalid hex seed: {token}"))?;
            SeedInfo::from_numeric(value)
        } else if let Ok(value) = token.parse::<i64>() {
            SeedInfo::from_numeric(value.unsigned_abs())
        } else if let Ok(value) = token.parse::<u64>() {
            SeedInfo::from_numeric(value)
        } else {
            SeedInfo::from_phrase(token)
        };

        if !seeds.iter().any(|existing| existing.seed == info.seed) {
            seeds.push(info);
        }
    }

    if seeds.is_empty() {
        seeds.push(SeedInfo::from_numeric(1337));
    }
    Ok(seeds)
}
