//! Hit chance calculation.

use std::fmt;

use crate::state::Combatant;

/// A probability expressed in whole percent, `0..=100`.
///
/// Rolls are d100 values in `1..=100`; a roll succeeds when it is at or below
/// the percentage, so `0` never succeeds and `100` always does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Chance(u8);

impl Chance {
    pub const NEVER: Self = Self(0);
    pub const ALWAYS: Self = Self(100);

    /// Creates a chance from a percentage, clamped to 100.
    pub const fn percent(value: u32) -> Self {
        if value > 100 { Self(100) } else { Self(value as u8) }
    }

    /// Creates a chance from a probability in `[0.0, 1.0]`, rounded to the
    /// nearest whole percent.
    pub fn from_probability(probability: f32) -> Self {
        let scaled = (probability.clamp(0.0, 1.0) * 100.0).round();
        Self::percent(scaled as u32)
    }

    #[inline]
    pub const fn as_percent(self) -> u32 {
        self.0 as u32
    }

    pub fn as_probability(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Returns true if a d100 roll (`1..=100`) lands within this chance.
    #[inline]
    pub const fn succeeds(self, roll: u32) -> bool {
        roll <= self.0 as u32
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Base chance when accuracy equals speed.
pub const BASE_HIT_PERCENT: i32 = 90;
/// Bonus per point of accuracy above the defender's speed.
pub const ACCURACY_BONUS_PER_POINT: i32 = 5;
/// Penalty per point of defender speed above the attacker's accuracy.
pub const EVASION_PENALTY_PER_POINT: i32 = 20;
pub const MAX_HIT_PERCENT: i32 = 99;
pub const MIN_HIT_PERCENT: i32 = 10;
/// Extra penalty applied when the defender is guarding.
pub const DEFEND_PENALTY_PERCENT: i32 = 25;

/// Calculate the chance that `attacker` lands a hit on `defender`.
///
/// # Formula
///
/// ```text
/// diff = accuracy - speed
/// chance = 90 + 5 * diff   (diff >= 0, capped at 99)
/// chance = 90 - 20 * -diff (diff < 0, floored at 10)
///
/// if defending:
///     chance = max(chance - 25, 0)
/// ```
pub fn hit_chance(attacker: &Combatant, defender: &Combatant) -> Chance {
    hit_chance_from(
        attacker.stats.accuracy,
        defender.stats.speed,
        defender.defending,
    )
}

/// Stat-level form of [`hit_chance`].
pub fn hit_chance_from(accuracy: i32, speed: i32, defending: bool) -> Chance {
    let diff = accuracy.saturating_sub(speed);

    let base = if diff >= 0 {
        BASE_HIT_PERCENT
            .saturating_add(diff.saturating_mul(ACCURACY_BONUS_PER_POINT))
            .min(MAX_HIT_PERCENT)
    } else {
        BASE_HIT_PERCENT
            .saturating_add(diff.saturating_mul(EVASION_PENALTY_PER_POINT))
            .max(MIN_HIT_PERCENT)
    };

    // The guard penalty is not re-floored: a guarded defender can be unhittable.
    let chance = if defending {
        (base - DEFEND_PENALTY_PERCENT).max(0)
    } else {
        base
    };

    Chance::percent(chance as u32)
}
