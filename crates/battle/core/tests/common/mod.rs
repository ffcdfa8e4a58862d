#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use battle_core::{
    Ability, AbilityEffect, AbilityUnlock, BattleConfig, BattleEnv, BattleSession, Chance,
    ClassDefinition, ClassOracle, CombatStats, Combatant, ItemDefinition, ItemEffect, ItemId,
    ItemOracle, LearnedAbility, Party, Passive, PhaseDurations, ResourceCost, RngSource,
    SequenceRng,
};

/// Instant text and two-tick animations.
pub fn test_config() -> BattleConfig {
    BattleConfig::headless().with_durations(PhaseDurations::uniform(2))
}

pub fn aria() -> Combatant {
    Combatant::player("Aria", "knight", 1, 20, 5, CombatStats::new(10, 3, 2, 2, 5, 5))
}

pub fn mira() -> Combatant {
    Combatant::player("Mira", "mage", 1, 16, 10, CombatStats::new(4, 2, 8, 4, 5, 4)).with_spell(
        Ability::new("Fire", ResourceCost::sp(5), AbilityEffect::Damage { power: 5 }),
    )
}

pub fn slime(name: &str) -> Combatant {
    Combatant::enemy(name, "slime", 1, 5, 0, CombatStats::new(4, 3, 0, 6, 3, 3), 4)
}

pub fn ogre() -> Combatant {
    Combatant::enemy("Ogre", "ogre", 1, 30, 0, CombatStats::new(6, 3, 0, 6, 5, 3), 10)
        .with_passive(Passive::counter("Riposte", Chance::ALWAYS))
}

pub fn battle(party: Vec<Combatant>, enemies: Vec<Combatant>) -> BattleSession<SequenceRng> {
    BattleSession::new(
        Party::new(party).unwrap(),
        enemies,
        test_config(),
        SequenceRng::favorable(),
    )
    .unwrap()
}

/// Ticks until the current animation (and any counter it chains) has been
/// applied.
pub fn settle<R: RngSource>(session: &mut BattleSession<R>) {
    for _ in 0..1_000 {
        if session.is_over() || !session.is_action_processing() {
            return;
        }
        session.tick();
    }
    panic!("action never settled");
}

/// Ticks until a party member may act or the battle ends.
pub fn until_player_input<R: RngSource>(session: &mut BattleSession<R>) {
    for _ in 0..10_000 {
        if session.is_over() || session.awaiting_input() {
            return;
        }
        session.tick();
    }
    panic!("player never got the turn");
}

pub struct TestClasses {
    classes: HashMap<String, ClassDefinition>,
}

impl TestClasses {
    pub fn new() -> Self {
        let mage = ClassDefinition {
            id: "mage".into(),
            name: "Mage".into(),
            max_hp: 16,
            max_sp: 10,
            stats: CombatStats::new(4, 2, 8, 4, 5, 4),
            unlocks: vec![AbilityUnlock::new(1, "Fire"), AbilityUnlock::new(2, "Cure")],
            experience_reward: 0,
        };
        Self {
            classes: HashMap::from([(mage.id.clone(), mage)]),
        }
    }
}

impl ClassOracle for TestClasses {
    fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    fn ability(&self, name: &str) -> Option<LearnedAbility> {
        match name {
            "Fire" => Some(LearnedAbility::Spell(Ability::new(
                "Fire",
                ResourceCost::sp(5),
                AbilityEffect::Damage { power: 5 },
            ))),
            "Cure" => Some(LearnedAbility::Spell(Ability::new(
                "Cure",
                ResourceCost::sp(2),
                AbilityEffect::Healing { power: 4 },
            ))),
            _ => None,
        }
    }
}

pub struct TestItems {
    items: HashMap<ItemId, ItemDefinition>,
}

impl TestItems {
    pub fn new() -> Self {
        let potion = ItemDefinition::new("potion", "Potion", ItemEffect::RestoreHp(10));
        let lens = ItemDefinition::new("lens", "Scan Lens", ItemEffect::Scan);
        Self {
            items: HashMap::from([(potion.id.clone(), potion), (lens.id.clone(), lens)]),
        }
    }
}

impl ItemOracle for TestItems {
    fn definition(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }
}

pub fn full_env() -> BattleEnv {
    BattleEnv::empty()
        .with_classes(Arc::new(TestClasses::new()))
        .with_items(Arc::new(TestItems::new()))
}
