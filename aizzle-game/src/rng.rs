//! Random sources for puzzle selection.
//!
//! Selection only ever consumes unit rolls (`rng.gen::<f64>()`), so any
//! [`rand::Rng`] works. [`PuzzleRng`] gives reproducible seeded streams and
//! [`ScriptedRolls`] replays a fixed list of rolls for deterministic tests.
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::PUZZLE_STREAM_TAG;

/// Uniform roll in `[0, 1)`.
pub fn roll_unit<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.r#gen::<f64>()
}

const MAX_UNIT_ROLL: f64 = 1.0 - f64::EPSILON;

/// Map a unit roll onto `0..len`, `None` when `len == 0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn index_for_roll(roll: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let scaled = (roll.clamp(0.0, MAX_UNIT_ROLL) * len as f64).floor() as usize;
    Some(scaled.min(len - 1))
}

/// Seeded ChaCha stream dedicated to puzzle selection, with draw counting.
#[derive(Debug, Clone)]
pub struct PuzzleRng {
    rng: ChaCha20Rng,
    draws: u64,
}

impl PuzzleRng {
    /// Construct the stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(derive_stream_seed(seed, PUZZLE_STREAM_TAG)),
            draws: 0,
        }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RngCore for PuzzleRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> [u8; 32] {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    seed
}

/// Replays a fixed list of unit rolls, cycling when exhausted.
///
/// Each `next_u64` encodes the next roll so that `rng.gen::<f64>()` returns
/// it back, rounded up onto the 53-bit grid an `f64` draw uses, so a roll
/// equal to a threshold never lands below it. Values are clamped into
/// `[0, 1)`; an empty script behaves like a single `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    #[must_use]
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        let mut rolls: Vec<f64> = rolls.into();
        if rolls.is_empty() {
            rolls.push(0.0);
        }
        for roll in &mut rolls {
            *roll = if roll.is_finite() {
                roll.clamp(0.0, MAX_UNIT_ROLL)
            } else {
                0.0
            };
        }
        Self { rolls, cursor: 0 }
    }

    /// Rolls consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_roll(&mut self) -> f64 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor = self.cursor.saturating_add(1);
        roll
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn encode_unit(roll: f64) -> u64 {
    const PRECISION: u32 = 53;
    let mantissa = (roll * (1u64 << PRECISION) as f64).ceil() as u64;
    mantissa << (64 - PRECISION)
}

impl RngCore for ScriptedRolls {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        encode_unit(self.next_roll())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
