#![forbid(unsafe_code)]

//! Pseudo-random lane inputs for fixture generation.
//!
//! [`RandomSource`] is an explicit splitmix64 stream. The process-wide
//! source behind [`with_global`] is seeded once, from `LANES_RANDOM_SEED`
//! when set and from the clock otherwise.

use lanes_kind::Lane;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const MIX_CONST1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_CONST2: u64 = 0x94D0_49BB_1331_11EB;

pub const RANDOM_SEED_ENV: &str = "LANES_RANDOM_SEED";

/// Largest value [`RandomSource::next_raw`] can return.
pub const RAW_MAX: u32 = u32::MAX;

static GLOBAL_SOURCE: OnceLock<Mutex<RandomSource>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSource {
    seed: u64,
    counter: u64,
}

impl RandomSource {
    /// Source seeded from the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::seeded(time_seed())
    }

    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seed this stream started from; enough to replay it.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        splitmix64(self.seed.wrapping_add(self.counter.wrapping_mul(GOLDEN_GAMMA)))
    }

    /// One raw draw in `0..=RAW_MAX`.
    #[must_use]
    pub fn next_raw(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    /// Float in `[min, max)`, up to rounding: the top raw draw can land on
    /// `max` itself.
    #[must_use]
    pub fn next_f32(&mut self, min: f32, max: f32) -> f32 {
        self.next_raw() as f32 / (RAW_MAX as f32 / (max - min)) + min
    }

    /// Double in `[min, max)`, with the same rounding caveat as
    /// [`next_f32`](Self::next_f32).
    #[must_use]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        f64::from(self.next_raw()) / (f64::from(RAW_MAX) / (max - min)) + min
    }

    pub fn fill_f32(&mut self, values: &mut [f32], min: f32, max: f32) {
        for value in values {
            *value = self.next_f32(min, max);
        }
    }

    pub fn fill_f64(&mut self, values: &mut [f64], min: f64, max: f64) {
        for value in values {
            *value = self.next_f64(min, max);
        }
    }

    /// Fills lanes with raw random bit patterns.
    ///
    /// Float lanes can come out as NaN, infinities, or subnormals.
    pub fn fill_lanes<T: Lane>(&mut self, values: &mut [T]) {
        let mut raw = [0u8; 8];
        for value in values {
            self.fill_bytes(&mut raw);
            *value = T::from_le_slice(&raw);
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` against the process-wide source, seeding it on first use.
pub fn with_global<R>(f: impl FnOnce(&mut RandomSource) -> R) -> R {
    let cell = GLOBAL_SOURCE.get_or_init(|| {
        let seed = seed_from_env().unwrap_or_else(time_seed);
        Mutex::new(RandomSource::seeded(seed))
    });
    let mut source = cell.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut source)
}

#[must_use]
pub fn global_seed() -> u64 {
    with_global(|source| source.seed())
}

pub fn random_bytes(buf: &mut [u8]) {
    with_global(|source| source.fill_bytes(buf));
}

#[must_use]
pub fn random_f32(min: f32, max: f32) -> f32 {
    with_global(|source| source.next_f32(min, max))
}

#[must_use]
pub fn random_f64(min: f64, max: f64) -> f64 {
    with_global(|source| source.next_f64(min, max))
}

pub fn random_f32_array(values: &mut [f32], min: f32, max: f32) {
    with_global(|source| source.fill_f32(values, min, max));
}

pub fn random_f64_array(values: &mut [f64], min: f64, max: f64) {
    with_global(|source| source.fill_f64(values, min, max));
}

#[must_use]
pub fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    splitmix64(nanos as u64 ^ (nanos >> 64) as u64)
}

#[must_use]
pub fn seed_from_env() -> Option<u64> {
    std::env::var(RANDOM_SEED_ENV)
        .ok()
        .and_then(|raw| parse_seed(&raw))
}

/// Accepts decimal or `0x`-prefixed hex.
#[must_use]
pub fn parse_seed(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => raw.replace('_', "").parse().ok(),
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(MIX_CONST1);
    x ^= x >> 27;
    x = x.wrapping_mul(MIX_CONST2);
    x ^ (x >> 31)
}
