//! Character class definitions and the oracle interface.
//!
//! A [`ClassDefinition`] is the data-driven template for both player classes
//! and enemy kinds: level-1 resources and stats, the ability names unlocked
//! at each level, and the experience an enemy of this class is worth.
//!
//! Ability names are resolved through [`ClassOracle::ability`]. A name the
//! oracle does not know is skipped with a warning; loaders are expected to
//! reject such definitions before they ever reach a battle.

use crate::config::BattleConfig;
use crate::state::{CombatStats, Combatant, LearnedAbility};

/// An ability granted once a combatant reaches `level`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityUnlock {
    pub level: u32,
    pub ability: String,
}

impl AbilityUnlock {
    pub fn new(level: u32, ability: impl Into<String>) -> Self {
        Self {
            level,
            ability: ability.into(),
        }
    }
}

/// Template for building combatants at a given level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    /// Level-1 maximum HP.
    pub max_hp: u32,
    /// Level-1 maximum SP.
    pub max_sp: u32,
    /// Level-1 stats.
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocks: Vec<AbilityUnlock>,
    /// Experience per level granted when an enemy of this class is defeated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience_reward: u32,
}

impl ClassDefinition {
    /// Ability names unlocked exactly at `level`.
    pub fn unlocks_at(&self, level: u32) -> impl Iterator<Item = &str> {
        self.unlocks
            .iter()
            .filter(move |unlock| unlock.level == level)
            .map(|unlock| unlock.ability.as_str())
    }

    /// Ability names unlocked at or below `level`.
    pub fn unlocks_up_to(&self, level: u32) -> impl Iterator<Item = &str> {
        self.unlocks
            .iter()
            .filter(move |unlock| unlock.level <= level)
            .map(|unlock| unlock.ability.as_str())
    }

    /// Builds a player character of this class at `level`.
    ///
    /// Growth is applied once per level above 1 (see
    /// [`Combatant::level_up`]), then every ability unlocked so far is
    /// granted. Levels above [`BattleConfig::MAX_LEVEL`] are capped.
    pub fn instantiate_player<O>(&self, name: impl Into<String>, level: u32, oracle: &O) -> Combatant
    where
        O: ClassOracle + ?Sized,
    {
        let base = Combatant::player(name, self.id.clone(), 1, self.max_hp, self.max_sp, self.stats);
        self.grow(base, level, oracle)
    }

    /// Builds an enemy of this class at `level`.
    pub fn instantiate_enemy<O>(&self, name: impl Into<String>, level: u32, oracle: &O) -> Combatant
    where
        O: ClassOracle + ?Sized,
    {
        let reward = self
            .experience_reward
            .saturating_mul(level.clamp(1, BattleConfig::MAX_LEVEL));
        let base = Combatant::enemy(
            name,
            self.id.clone(),
            1,
            self.max_hp,
            self.max_sp,
            self.stats,
            reward,
        );
        self.grow(base, level, oracle)
    }

    fn grow<O>(&self, mut combatant: Combatant, level: u32, oracle: &O) -> Combatant
    where
        O: ClassOracle + ?Sized,
    {
        let level = level.min(BattleConfig::MAX_LEVEL);
        while combatant.level < level {
            combatant.level_up();
        }
        for name in self.unlocks_up_to(combatant.level) {
            grant(&mut combatant, name, oracle);
        }
        combatant
    }
}

/// Teaches `ability` to `combatant` if the oracle knows it.
///
/// Returns true if the ability was newly learned.
pub fn grant<O>(combatant: &mut Combatant, ability: &str, oracle: &O) -> bool
where
    O: ClassOracle + ?Sized,
{
    match oracle.ability(ability) {
        Some(entry) => combatant.learn(entry),
        None => {
            tracing::warn!(
                combatant = %combatant.name,
                ability,
                "skipping unknown ability"
            );
            false
        }
    }
}

/// Oracle providing class definitions and the abilities they reference.
pub trait ClassOracle: Send + Sync {
    fn class(&self, id: &str) -> Option<&ClassDefinition>;

    /// Resolves an ability name to a learnable entry.
    fn ability(&self, name: &str) -> Option<LearnedAbility>;
}
