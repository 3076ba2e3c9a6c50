//! Injectable randomness for ladder generation.
//!
//! Generation draws through [`RandomSource`], which every [`rand::Rng`]
//! implements. Tests can hand the generator a [`ScriptedRolls`] instead to
//! pin down exactly which rows are chosen.

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::constants::{STREAM_LADDER, STREAM_PRIZES};

/// Source of bounded integer rolls.
pub trait RandomSource {
    /// Uniform draw from `low..=high`. Returns `low` when `high <= low`.
    fn roll(&mut self, low: u8, high: u8) -> u8;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll(&mut self, low: u8, high: u8) -> u8 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }
}

/// Replays a fixed list of rolls, cycling once exhausted.
///
/// Each scripted value is clamped into the requested range, so a script reads
/// as the literal rung counts and rows it should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRolls {
    script: Vec<u8>,
    pending: VecDeque<u8>,
}

impl ScriptedRolls {
    #[must_use]
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        let script = script.into();
        let pending = script.iter().copied().collect();
        Self { script, pending }
    }

    /// Rolls left before the script starts over.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self, low: u8, high: u8) -> u8 {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        let value = self.pending.pop_front().unwrap_or(low);
        value.clamp(low, high.max(low))
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
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

/// Independent per-purpose streams derived from one user-visible seed.
#[derive(Debug, Clone)]
pub struct RngBundle {
    ladder: CountingRng<ChaCha20Rng>,
    prizes: CountingRng<ChaCha20Rng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            ladder: CountingRng::from_seed_u64(derive_stream_seed(seed, STREAM_LADDER)),
            prizes: CountingRng::from_seed_u64(derive_stream_seed(seed, STREAM_PRIZES)),
        }
    }

    /// Stream used to draw rung counts and rows.
    pub fn ladder(&mut self) -> &mut CountingRng<ChaCha20Rng> {
        &mut self.ladder
    }

    /// Stream used to place prizes on terminal rails.
    pub fn prizes(&mut self) -> &mut CountingRng<ChaCha20Rng> {
        &mut self.prizes
    }

    /// Total draws across both streams.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.ladder.draws().saturating_add(self.prizes.draws())
    }
}

/// Domain-separated stream seed: first 8 bytes of `SHA-256(seed || tag)`.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let digest = Sha256::new()
        .chain_update(user_seed.to_le_bytes())
        .chain_update(domain_tag)
        .finalize();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
