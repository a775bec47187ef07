//! Random number generation for dungeon layout
//!
//! Uses a seeded ChaCha RNG so that a seed and a configuration always
//! reproduce the same layout.

use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Seed for a [`SeededRandom`]
///
/// Text seeds that parse as a `u64` behave exactly like the number; any other
/// text is folded into a `u64` with FNV-1a.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Numeric seed fed to the underlying generator
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(text) => text.parse().unwrap_or_else(|_| fnv1a(text.as_bytes())),
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(FNV_OFFSET_BASIS, |hash, &b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Deterministic source of uniform draws used by generation
///
/// Implementors only supply the `[0, 1)` stream; integer and pick helpers
/// are derived from it so every implementor consumes one draw per call.
pub trait RandomSource {
    /// Next value of the uniform `[0, 1)` stream
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in the inclusive range `[min, max]`
    ///
    /// Callers must pass `min <= max`.
    fn random_integer(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        let span = f64::from(max) - f64::from(min) + 1.0;
        (self.next_unit() * span + f64::from(min)).floor() as i32
    }

    /// Uniformly chosen element of a non-empty slice
    fn random_pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.random_integer(0, items.len() as i32 - 1);
        &items[idx as usize]
    }
}

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Create a new RNG with the given seed
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into().to_u64();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.sample(Standard)
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}
