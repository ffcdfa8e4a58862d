//! Random sources for battle resolution.
//!
//! Every random decision a battle makes (hit rolls, passive triggers, enemy
//! target choice, turn-order tie shuffles) is drawn from a single
//! [`RngSource`] owned by the session. Implementations must be deterministic:
//! the same seed yields the same battle, which keeps headless simulations and
//! tests reproducible.

use crate::combat::Chance;

/// A deterministic stream of random numbers.
pub trait RngSource {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Common for percentage-based mechanics like hit chance.
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Pick an index in `0..upper_exclusive`. Returns 0 for empty or
    /// single-element ranges without consuming a value.
    fn range(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }

    /// Roll against a percentage chance.
    fn chance(&mut self, chance: Chance) -> bool {
        chance.succeeds(self.roll_d100())
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

impl<R: RngSource + ?Sized> RngSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Fast, small, and
/// statistically solid enough for dice.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a stream from a seed. Equal seeds produce equal streams.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    /// `state' = state * multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let output = Self::pcg_output(self.state);
        self.state = Self::pcg_step(self.state);
        output
    }
}

/// Replays a fixed cycle of raw values.
///
/// Useful for scripted battles: a value `v` rolls `v % 100 + 1` on a d100,
/// so `0` is the best possible roll and `99` the worst.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    /// Create a source cycling through `values`. An empty list behaves as `[0]`.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    /// A source that always rolls 1 on a d100 and always picks index 0.
    pub fn favorable() -> Self {
        Self::new(vec![0])
    }

    /// A source that always rolls 100 on a d100.
    pub fn unfavorable() -> Self {
        Self::new(vec![99])
    }
}

impl RngSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}
