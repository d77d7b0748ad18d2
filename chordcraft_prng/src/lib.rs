// Deterministic random sources for the progression engine.
//
// The generator draws every random decision (transition-matrix samples,
// uniform fallbacks, rhythm-pattern picks) through the `RandomSource` trait
// rather than from an ambient global. Two implementations live here:
//
// - `ChordRng`: xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64
//   seeding. Same seed, same progression, on every platform.
// - `ScriptedRandom`: replays a fixed list of draws in a loop. Tests use it to
//   force specific outcomes ("always pick the first key", "always pick the
//   last candidate").
//
// The core generator uses integer arithmetic only; floats appear solely in
// the final conversion to a unit-interval draw.

use serde::{Deserialize, Serialize};

pub use getrandom::Error as EntropyError;

/// A source of uniform draws in `[0, 1)`.
///
/// Everything the engine randomizes goes through this trait. Sources that only
/// implement `next_f64` derive index picks from it, so a source returning a
/// fixed value pins the engine to a single, predictable path.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`. The default derives it from one
    /// `next_f64` draw; integer generators override it.
    ///
    /// Returns 0 when `len` is 0 so callers never index out of bounds on an
    /// empty pool; they still need to check emptiness before using the index.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Xoshiro256++ PRNG, the engine's default random source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChordRng {
    s: [u64; 4],
}

impl ChordRng {
    /// A fresh seed from the operating system's entropy source. Callers print
    /// it so the run can be replayed with `ChordRng::new`.
    pub fn entropy_seed() -> Result<u64, EntropyError> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Create a new generator seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform integer in `[0, bound)`, exact (Lemire's widening multiply
    /// with rejection of the biased low products). Returns 0 for a zero bound.
    pub fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let wide = u128::from(self.next_u64()) * u128::from(bound);
            if (wide as u64) >= threshold {
                return (wide >> 64) as u64;
            }
        }
    }
}

impl RandomSource for ChordRng {
    /// Upper 53 bits of a `u64` fill the f64 mantissa.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Integer draw, so pools of any size are picked without float bias.
    fn pick_index(&mut self, len: usize) -> usize {
        self.below(len as u64) as usize
    }
}

/// SplitMix64, used only to expand a `u64` seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Replays a fixed script of draws, cycling when it runs out.
///
/// Values are clamped into `[0, 1)` on construction. An empty script behaves
/// like `[0.0]`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

/// Largest f64 strictly below 1.0.
const JUST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

impl ScriptedRandom {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws
            .into()
            .into_iter()
            .map(|d| d.clamp(0.0, JUST_BELOW_ONE))
            .collect();
        Self { draws, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Always draws 0.0: every cumulative pick takes the first candidate.
    pub fn always_first() -> Self {
        Self::constant(0.0)
    }

    /// Always draws just under 1.0: every uniform pick takes the last candidate.
    pub fn always_last() -> Self {
        Self::constant(JUST_BELOW_ONE)
    }

    /// How many draws have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
