//! Combat formulas.
//!
//! Pure functions computing hit chance and damage from combatant stats.
//! Nothing here rolls dice: callers draw from an [`RngSource`] and compare
//! against the returned [`Chance`], which keeps every formula testable
//! without a random source.
//!
//! # Core Functions
//!
//! - `hit_chance`: accuracy vs speed, with the guard penalty
//! - `physical_damage`: attack vs defense
//! - `magic_damage`: intelligence + ability power vs resilience
//!
//! [`RngSource`]: crate::rng::RngSource

pub mod damage;
pub mod hit;

pub use damage::{MINIMUM_DAMAGE, magic_damage, mitigate, physical_damage};
pub use hit::{Chance, hit_chance, hit_chance_from};
