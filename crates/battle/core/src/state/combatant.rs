//! Combatant state and its mutators.
//!
//! A [`Combatant`] is either a player character or an enemy. Both share the
//! same stats and ability containers; the [`CombatantKind`] carries what is
//! specific to each side (experience progress, experience reward).
//!
//! # Invariants
//!
//! - `hp.current <= hp.maximum` and `sp.current <= sp.maximum` (enforced by
//!   [`ResourceMeter`])
//! - A combatant with zero HP is defeated and never acts again this battle

use super::abilities::{
    Ability, AbilityBook, AbilityKind, LearnedAbility, Passive, PassiveBook, PassiveTrigger,
    ResourceCost, ResourceKind, Ultimate, UltimateBook,
};
use super::common::{ResourceMeter, Side};
use crate::config::BattleConfig;

/// Offensive and defensive attributes used by the combat formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub resilience: i32,
    pub accuracy: i32,
    pub speed: i32,
}

impl CombatStats {
    pub const fn new(
        attack: i32,
        defense: i32,
        intelligence: i32,
        resilience: i32,
        accuracy: i32,
        speed: i32,
    ) -> Self {
        Self {
            attack,
            defense,
            intelligence,
            resilience,
            accuracy,
            speed,
        }
    }
}

/// Experience progress of a player character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProgress {
    pub class_id: String,
    pub experience: u32,
}

/// Enemy-specific data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub class_id: String,
    /// Experience granted to each living active party member on defeat.
    pub experience_reward: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player(PlayerProgress),
    Enemy(EnemyProfile),
}

/// One participant in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub kind: CombatantKind,
    pub level: u32,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub stats: CombatStats,
    /// Raised by DEFEND; cleared by [`Combatant::end_turn`].
    pub defending: bool,

    pub spells: AbilityBook,
    pub skills: AbilityBook,
    pub ultimates: UltimateBook,
    pub passives: PassiveBook,
}

impl Combatant {
    /// Create a level-`level` player character with full resources.
    pub fn player(
        name: impl Into<String>,
        class_id: impl Into<String>,
        level: u32,
        max_hp: u32,
        max_sp: u32,
        stats: CombatStats,
    ) -> Self {
        Self::with_kind(
            name,
            CombatantKind::Player(PlayerProgress {
                class_id: class_id.into(),
                experience: 0,
            }),
            level,
            max_hp,
            max_sp,
            stats,
        )
    }

    /// Create an enemy with full resources.
    pub fn enemy(
        name: impl Into<String>,
        class_id: impl Into<String>,
        level: u32,
        max_hp: u32,
        max_sp: u32,
        stats: CombatStats,
        experience_reward: u32,
    ) -> Self {
        Self::with_kind(
            name,
            CombatantKind::Enemy(EnemyProfile {
                class_id: class_id.into(),
                experience_reward,
            }),
            level,
            max_hp,
            max_sp,
            stats,
        )
    }

    fn with_kind(
        name: impl Into<String>,
        kind: CombatantKind,
        level: u32,
        max_hp: u32,
        max_sp: u32,
        stats: CombatStats,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            level: level.max(1),
            hp: ResourceMeter::full(max_hp),
            sp: ResourceMeter::full(max_sp),
            stats,
            defending: false,
            spells: AbilityBook::new(),
            skills: AbilityBook::new(),
            ultimates: UltimateBook::new(),
            passives: PassiveBook::new(),
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    #[must_use]
    pub fn with_spell(mut self, spell: Ability) -> Self {
        self.learn(LearnedAbility::Spell(spell));
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Ability) -> Self {
        self.learn(LearnedAbility::Skill(skill));
        self
    }

    #[must_use]
    pub fn with_ultimate(mut self, ultimate: Ability) -> Self {
        self.learn(LearnedAbility::Ultimate(ultimate));
        self
    }

    #[must_use]
    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.learn(LearnedAbility::Passive(passive));
        self
    }

    /// Adds an ability to the matching container. Returns false if an ability
    /// with the same name was already known there (the old entry is kept).
    pub fn learn(&mut self, entry: LearnedAbility) -> bool {
        match entry {
            LearnedAbility::Spell(ability) => insert_new(&mut self.spells, ability.name.clone(), ability),
            LearnedAbility::Skill(ability) => insert_new(&mut self.skills, ability.name.clone(), ability),
            LearnedAbility::Ultimate(ability) => insert_new(
                &mut self.ultimates,
                ability.name.clone(),
                Ultimate::new(ability),
            ),
            LearnedAbility::Passive(passive) => {
                insert_new(&mut self.passives, passive.name.clone(), passive)
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn side(&self) -> Side {
        match self.kind {
            CombatantKind::Player(_) => Side::Party,
            CombatantKind::Enemy(_) => Side::Enemy,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player(_))
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    pub fn experience(&self) -> Option<u32> {
        match &self.kind {
            CombatantKind::Player(progress) => Some(progress.experience),
            CombatantKind::Enemy(_) => None,
        }
    }

    pub fn experience_reward(&self) -> u32 {
        match &self.kind {
            CombatantKind::Enemy(profile) => profile.experience_reward,
            CombatantKind::Player(_) => 0,
        }
    }

    pub fn class_id(&self) -> &str {
        match &self.kind {
            CombatantKind::Player(progress) => &progress.class_id,
            CombatantKind::Enemy(profile) => &profile.class_id,
        }
    }

    /// Looks up an active ability by container and name.
    pub fn ability(&self, kind: AbilityKind, name: &str) -> Option<&Ability> {
        match kind {
            AbilityKind::Spell => self.spells.get(name),
            AbilityKind::Skill => self.skills.get(name),
            AbilityKind::Ultimate => self.ultimates.get(name).map(|u| &u.ability),
        }
    }

    /// First passive (in name order) reacting to `trigger`.
    pub fn first_passive(&self, trigger: PassiveTrigger) -> Option<&Passive> {
        self.passives.values().find(|p| p.trigger == trigger)
    }

    /// Returns true if the cost could be paid right now.
    ///
    /// HP costs require the combatant to survive paying them.
    pub fn can_afford(&self, cost: ResourceCost) -> bool {
        match cost.kind {
            ResourceKind::Sp => self.sp.current >= cost.amount,
            ResourceKind::Hp => cost.amount == 0 || self.hp.current > cost.amount,
        }
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Subtracts HP, clamping at zero. Returns whether the combatant is now
    /// defeated.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp.deplete(amount);
        self.is_defeated()
    }

    /// Adds HP, clamping at the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.hp.restore(amount)
    }

    /// Adds SP, clamping at the maximum. Returns the amount actually restored.
    pub fn restore_sp(&mut self, amount: u32) -> u32 {
        self.sp.restore(amount)
    }

    /// Pays a resource cost.
    ///
    /// SP costs are all-or-nothing: an insufficient pool fails without
    /// mutation. HP costs are unconditional.
    pub fn use_resource(&mut self, cost: ResourceCost) -> bool {
        match cost.kind {
            ResourceKind::Sp => {
                if self.sp.current < cost.amount {
                    return false;
                }
                self.sp.deplete(cost.amount);
                true
            }
            ResourceKind::Hp => {
                self.hp.deplete(cost.amount);
                true
            }
        }
    }

    /// Marks an ultimate as spent. Returns false if it was unknown or already
    /// spent.
    pub fn spend_ultimate(&mut self, name: &str) -> bool {
        match self.ultimates.get_mut(name) {
            Some(ultimate) if ultimate.available => {
                ultimate.available = false;
                true
            }
            _ => false,
        }
    }

    pub fn defend(&mut self) {
        self.defending = true;
    }

    pub fn end_turn(&mut self) {
        self.defending = false;
    }

    /// Restores HP and SP and re-arms every ultimate. Used between battles.
    pub fn rest(&mut self) {
        self.hp.refill();
        self.sp.refill();
        self.defending = false;
        for ultimate in self.ultimates.values_mut() {
            ultimate.available = true;
        }
    }

    /// Adds experience; applies at most one level-up per call.
    ///
    /// The threshold is `level * 10`. When it is met (and the combatant is
    /// below [`BattleConfig::MAX_LEVEL`]) the threshold is consumed and
    /// [`Combatant::level_up`] runs. Enemies never gain experience.
    pub fn gain_experience(&mut self, amount: u32) -> bool {
        let level = self.level;
        let CombatantKind::Player(progress) = &mut self.kind else {
            return false;
        };

        progress.experience = progress.experience.saturating_add(amount);
        let threshold = level.saturating_mul(10);
        if progress.experience < threshold || level >= BattleConfig::MAX_LEVEL {
            return false;
        }

        progress.experience -= threshold;
        self.level_up();
        true
    }

    /// Applies one level of growth and fully restores HP and SP.
    ///
    /// - every level: +2 max HP, +1 max SP, +1 attack
    /// - every 2nd level: +1 defense, +1 intelligence
    /// - every 3rd level: +1 speed
    /// - every 4th level: +1 resilience, +1 accuracy
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.hp.grow(2);
        self.sp.grow(1);
        let stats = &mut self.stats;
        stats.attack = stats.attack.saturating_add(1);

        if self.level % 2 == 0 {
            stats.defense = stats.defense.saturating_add(1);
            stats.intelligence = stats.intelligence.saturating_add(1);
        }
        if self.level % 4 == 0 {
            stats.resilience = stats.resilience.saturating_add(1);
            stats.accuracy = stats.accuracy.saturating_add(1);
        }
        if self.level % 3 == 0 {
            stats.speed = stats.speed.saturating_add(1);
        }
    }
}

fn insert_new<V>(book: &mut std::collections::BTreeMap<String, V>, name: String, value: V) -> bool {
    if book.contains_key(&name) {
        return false;
    }
    book.insert(name, value);
    true
}
