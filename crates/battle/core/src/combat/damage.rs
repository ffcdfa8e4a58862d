//! Damage calculation.

use crate::state::Combatant;

/// Smallest amount any damaging hit can deal.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Calculate physical damage from an attack.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack - defense)
///
/// if defending:
///     damage = ceil(damage / 2)
/// ```
pub fn physical_damage(attacker: &Combatant, defender: &Combatant) -> u32 {
    mitigate(
        attacker.stats.attack.saturating_sub(defender.stats.defense),
        defender.defending,
    )
}

/// Calculate magic damage from a damaging ability.
///
/// # Formula
///
/// ```text
/// damage = max(1, intelligence + power - resilience)
///
/// if defending:
///     damage = ceil(damage / 2)
/// ```
pub fn magic_damage(caster: &Combatant, target: &Combatant, power: u32) -> u32 {
    let power = i32::try_from(power).unwrap_or(i32::MAX);
    let raw = caster
        .stats
        .intelligence
        .saturating_add(power)
        .saturating_sub(target.stats.resilience);
    mitigate(raw, target.defending)
}

/// Applies the damage floor and the guard halving (rounded up).
pub fn mitigate(raw: i32, defending: bool) -> u32 {
    let damage = u32::try_from(raw).unwrap_or(0).max(MINIMUM_DAMAGE);
    if defending {
        damage.div_ceil(2)
    } else {
        damage
    }
}
