//! Abilities a combatant can own: spells, skills, ultimates and passives.
//!
//! # Design
//!
//! - Active abilities share one shape ([`Ability`]): a cost, an effect and a
//!   default target group. The container they live in (spells, skills,
//!   ultimates) decides how they are invoked and which animation plays.
//! - Ultimates are single-use per rest: [`Ultimate::available`] clears on use.
//! - [`Passive`] abilities trigger on events without player selection.

use std::collections::BTreeMap;

use crate::action::TargetGroup;
use crate::combat::Chance;

// ============================================================================
// Costs
// ============================================================================

/// Resource pool an ability draws from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ResourceKind {
    Hp,
    Sp,
}

/// What using an ability costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl ResourceCost {
    pub const FREE: Self = Self::sp(0);

    pub const fn sp(amount: u32) -> Self {
        Self {
            kind: ResourceKind::Sp,
            amount,
        }
    }

    pub const fn hp(amount: u32) -> Self {
        Self {
            kind: ResourceKind::Hp,
            amount,
        }
    }

    #[inline]
    pub const fn is_free(&self) -> bool {
        self.amount == 0
    }
}

impl Default for ResourceCost {
    fn default() -> Self {
        Self::FREE
    }
}

// ============================================================================
// Active Abilities
// ============================================================================

/// The three containers of active abilities.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    Spell,
    Skill,
    Ultimate,
}

impl AbilityKind {
    /// Verb used in battle messages ("Mira casts Fire!").
    pub const fn verb(self) -> &'static str {
        match self {
            AbilityKind::Spell => "casts",
            AbilityKind::Skill => "uses",
            AbilityKind::Ultimate => "unleashes",
        }
    }

    /// Infinitive used in rejection messages ("Not enough SP to cast Fire!").
    pub const fn infinitive(self) -> &'static str {
        match self {
            AbilityKind::Spell => "cast",
            AbilityKind::Skill => "use",
            AbilityKind::Ultimate => "unleash",
        }
    }
}

/// What an ability does to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityEffect {
    /// Magic damage: `intelligence + power - resilience`.
    Damage { power: u32 },
    /// Healing: `power + intelligence`, capped by the target's max HP.
    Healing { power: u32 },
    /// Reports the target's stats without changing them.
    Analyze,
}

impl AbilityEffect {
    /// Target group used when an ability does not specify one.
    pub const fn default_targets(&self) -> TargetGroup {
        match self {
            AbilityEffect::Damage { .. } | AbilityEffect::Analyze => TargetGroup::Enemies,
            AbilityEffect::Healing { .. } => TargetGroup::Allies,
        }
    }
}

/// An active ability: a spell, skill or ultimate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub cost: ResourceCost,
    pub effect: AbilityEffect,
    pub targets: TargetGroup,
}

impl Ability {
    pub fn new(name: impl Into<String>, cost: ResourceCost, effect: AbilityEffect) -> Self {
        Self {
            name: name.into(),
            cost,
            targets: effect.default_targets(),
            effect,
        }
    }

    #[must_use]
    pub fn with_targets(mut self, targets: TargetGroup) -> Self {
        self.targets = targets;
        self
    }
}

/// An ultimate and whether it is still usable before the next rest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ultimate {
    pub ability: Ability,
    pub available: bool,
}

impl Ultimate {
    pub fn new(ability: Ability) -> Self {
        Self {
            ability,
            available: true,
        }
    }
}

// ============================================================================
// Passive Abilities
// ============================================================================

/// Event that can trigger a passive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PassiveTrigger {
    /// The owner survived a landed physical hit.
    OnHit,
}

/// What a passive does once triggered.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PassiveEffect {
    /// Strike back at the attacker with a normal physical attack.
    Counterattack,
}

/// An automatic, chance-based ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passive {
    pub name: String,
    pub trigger: PassiveTrigger,
    pub chance: Chance,
    pub effect: PassiveEffect,
}

impl Passive {
    pub fn counter(name: impl Into<String>, chance: Chance) -> Self {
        Self {
            name: name.into(),
            trigger: PassiveTrigger::OnHit,
            chance,
            effect: PassiveEffect::Counterattack,
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Abilities keyed by name. Ordered maps keep lookups and "first match"
/// scans deterministic.
pub type AbilityBook = BTreeMap<String, Ability>;
pub type UltimateBook = BTreeMap<String, Ultimate>;
pub type PassiveBook = BTreeMap<String, Passive>;

/// One learnable entry, as handed out by class definitions on level-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LearnedAbility {
    Spell(Ability),
    Skill(Ability),
    Ultimate(Ability),
    Passive(Passive),
}

impl LearnedAbility {
    pub fn name(&self) -> &str {
        match self {
            LearnedAbility::Spell(ability)
            | LearnedAbility::Skill(ability)
            | LearnedAbility::Ultimate(ability) => &ability.name,
            LearnedAbility::Passive(passive) => &passive.name,
        }
    }
}
