//! Full battles driven through `submit_action` and `tick`.

mod common;

use battle_core::{
    Ability, AbilityEffect, ActionError, ActionRequest, BattleAction, BattleSession, BattleStatus,
    CombatStats, Combatant, CombatantId, GatePhase, Inventory, Party, ResourceCost, SequenceRng,
    SubmitError, SubmitOutcome,
};
use common::*;

const FIRST_MEMBER: CombatantId = CombatantId::party(0);
const FIRST_ENEMY: CombatantId = CombatantId::enemy(0);

#[test]
fn faster_player_acts_first_and_wins_with_one_blow() {
    let mut session = battle(vec![aria()], vec![slime("Slime")]);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
    assert!(session.is_player_turn());

    let outcome = session.submit_action(BattleAction::Attack).unwrap();
    assert_eq!(outcome, SubmitOutcome::Started(GatePhase::Attacking));

    settle(&mut session);
    assert!(session.is_over());
    assert_eq!(session.status(), BattleStatus::Won);
    assert_eq!(session.message_log().latest(), Some("Victory!"));
    assert!(session.combatant(FIRST_ENEMY).unwrap().is_defeated());
}

#[test]
fn unaffordable_spell_is_rejected_without_consuming_the_turn() {
    let mut caster = mira();
    caster.sp.current = 2;
    let mut session = battle(vec![caster], vec![slime("Slime")]);

    let err = session
        .submit_action(BattleAction::Spell("Fire".into()))
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Rejected(ActionError::InsufficientResource { required: 5, available: 2, .. })
    ));
    assert_eq!(session.full_message(), "Not enough SP to cast Fire!");
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 2);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
    assert!(!session.is_action_processing());
    assert!(session.awaiting_input());
}

#[test]
fn passive_counter_resolves_before_the_turn_advances() {
    let mut session = battle(vec![aria()], vec![ogre()]);
    session.submit_action(BattleAction::Attack).unwrap();

    session.tick();
    session.tick();
    assert_eq!(session.gate_phase(), GatePhase::Countering);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 23);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 20);

    session.tick();
    session.tick();
    assert_eq!(session.gate_phase(), GatePhase::Idle);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 17);
    assert_eq!(session.current_actor(), Some(FIRST_ENEMY));
}

#[test]
fn counters_do_not_chain() {
    let aria = aria().with_passive(battle_core::Passive::counter(
        "Parry",
        battle_core::Chance::ALWAYS,
    ));
    let mut session = battle(vec![aria], vec![ogre()]);
    session.submit_action(BattleAction::Attack).unwrap();
    settle(&mut session);

    // One hit, one counter, then the ogre's turn.
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 23);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 17);
    assert_eq!(session.current_actor(), Some(FIRST_ENEMY));
}

#[test]
fn enemies_attack_automatically() {
    let mut session = battle(vec![aria()], vec![ogre()]);
    session.submit_action(BattleAction::Defend).unwrap();
    settle(&mut session);
    assert_eq!(session.current_actor(), Some(FIRST_ENEMY));

    session.tick();
    assert_eq!(session.gate_phase(), GatePhase::EnemyAttacking);

    until_player_input(&mut session);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
}

#[test]
fn guard_covers_hits_until_the_defender_acts_again() {
    let mut session = battle(vec![aria()], vec![ogre()]);
    assert_eq!(
        session.submit_action(BattleAction::Defend),
        Ok(SubmitOutcome::Started(GatePhase::Defending))
    );
    assert!(session.combatant(FIRST_MEMBER).unwrap().defending);

    settle(&mut session);
    assert!(session.combatant(FIRST_MEMBER).unwrap().defending);

    until_player_input(&mut session);
    let aria = session.combatant(FIRST_MEMBER).unwrap();
    // ceil((6 - 3) / 2)
    assert_eq!(aria.hp.current, 18);
    assert!(!aria.defending);
}

#[test]
fn cancelling_targeting_restores_message_without_refund() {
    let mut session = battle(vec![mira()], vec![slime("Slime A"), slime("Slime B")]);
    assert_eq!(session.full_message(), "Slime A, Slime B appeared!");

    assert_eq!(
        session.submit_action(BattleAction::Spell("Fire".into())),
        Ok(SubmitOutcome::AwaitingTarget)
    );
    assert!(session.is_action_processing());
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 5);
    assert_eq!(
        session.submit_action(BattleAction::Attack),
        Err(SubmitError::ActionInProgress)
    );

    session.cancel_targeting().unwrap();
    assert_eq!(session.full_message(), "Slime A, Slime B appeared!");
    assert!(!session.is_action_processing());
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 5);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));

    assert_eq!(
        session.submit_action(BattleAction::Attack),
        Ok(SubmitOutcome::AwaitingTarget)
    );
    assert_eq!(session.valid_targets().len(), 2);
    session.next_target().unwrap();
    assert_eq!(session.selected_target(), Some(CombatantId::enemy(1)));
    assert_eq!(session.confirm_target(), Ok(true));
    assert_eq!(session.gate_phase(), GatePhase::Attacking);

    settle(&mut session);
    assert_eq!(session.combatant(CombatantId::enemy(1)).unwrap().hp.current, 4);
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 5);
}

#[test]
fn single_flight_rejects_everything_while_animating() {
    let mut session = battle(vec![aria()], vec![ogre()]);
    session.submit_action(BattleAction::Attack).unwrap();

    for action in [
        BattleAction::Attack,
        BattleAction::Defend,
        BattleAction::Flee,
        BattleAction::Status,
        BattleAction::Spell("Fire".into()),
    ] {
        assert_eq!(
            session.submit_action(action),
            Err(SubmitError::ActionInProgress)
        );
    }
}

#[test]
fn status_reports_without_consuming_the_turn() {
    let mut session = battle(vec![aria()], vec![slime("Slime")]);
    assert_eq!(
        session.submit_action(BattleAction::Status),
        Ok(SubmitOutcome::Reported)
    );
    assert_eq!(session.full_message(), "Aria: HP 20/20  SP 5/5");
    assert!(session.awaiting_input());
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
    assert_eq!(session.gate_phase(), GatePhase::Idle);
}

#[test]
fn only_the_turn_holder_may_act() {
    let mut session = battle(vec![aria()], vec![slime("Slime")]);
    let err = session
        .submit_action(ActionRequest::new(BattleAction::Attack).by(FIRST_ENEMY))
        .unwrap_err();
    assert_eq!(
        err,
        SubmitError::NotCurrentActor {
            actor: FIRST_ENEMY,
            current: Some(FIRST_MEMBER),
        }
    );
}

#[test]
fn explicit_target_is_validated_before_paying() {
    let mut session = battle(vec![mira()], vec![slime("Slime A"), slime("Slime B")]);
    let err = session
        .submit_action(ActionRequest::new(BattleAction::Spell("Fire".into())).at(FIRST_MEMBER))
        .unwrap_err();
    assert_eq!(
        err,
        SubmitError::Rejected(ActionError::InvalidTarget(FIRST_MEMBER))
    );
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 10);

    let started = session
        .submit_action(ActionRequest::new(BattleAction::Spell("Fire".into())).at(FIRST_ENEMY))
        .unwrap();
    assert_eq!(started, SubmitOutcome::Started(GatePhase::Casting));
}

#[test]
fn fleeing_ends_the_battle() {
    let mut session = battle(vec![aria()], vec![ogre()]);
    assert_eq!(
        session.submit_action(BattleAction::Flee),
        Ok(SubmitOutcome::Started(GatePhase::Fleeing))
    );
    settle(&mut session);
    assert_eq!(session.status(), BattleStatus::Fled);
    assert_eq!(
        session.submit_action(BattleAction::Attack),
        Err(SubmitError::BattleOver)
    );
}

#[test]
fn losing_every_active_member_is_a_defeat() {
    let mut frail = Combatant::player("Pip", "squire", 1, 1, 0, CombatStats::new(1, 0, 0, 0, 1, 1));
    frail.hp.current = 1;
    let mut session = battle(vec![frail], vec![ogre()]);
    assert_eq!(session.current_actor(), Some(FIRST_ENEMY));
    assert!(!session.is_player_turn());

    until_player_input(&mut session);
    assert_eq!(session.status(), BattleStatus::Lost);
}

#[test]
fn items_are_consumed_at_initiation() {
    let mut hurt = aria();
    hurt.take_damage(12);
    let party = Party::new(vec![hurt])
        .unwrap()
        .with_inventory(Inventory::new().with_item("potion", 1));
    let mut session = BattleSession::new(party, vec![slime("Slime")], test_config(), SequenceRng::favorable())
        .unwrap()
        .with_env(full_env());

    assert_eq!(
        session.submit_action(BattleAction::UseItem("potion".into())),
        Ok(SubmitOutcome::AwaitingTarget)
    );
    assert_eq!(session.roster().party().inventory.count(&"potion".into()), 0);
    assert_eq!(session.confirm_target(), Ok(true));
    assert_eq!(session.gate_phase(), GatePhase::UsingItem);

    settle(&mut session);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 18);

    until_player_input(&mut session);
    assert_eq!(
        session.submit_action(BattleAction::UseItem("potion".into())),
        Err(SubmitError::Rejected(ActionError::ItemUnavailable("potion".into())))
    );
    assert_eq!(session.full_message(), "No potion left!");
}

#[test]
fn victory_awards_experience_and_unlocks_abilities() {
    let slime = Combatant::enemy("Slime", "slime", 1, 5, 0, CombatStats::new(4, 3, 0, 6, 3, 3), 10);
    let mut session = battle(vec![mira()], vec![slime]).with_env(full_env());

    session.submit_action(BattleAction::Spell("Fire".into())).unwrap();
    assert_eq!(session.confirm_target(), Ok(true));
    settle(&mut session);

    assert_eq!(session.status(), BattleStatus::Won);
    let log: Vec<_> = session.message_log().iter().collect();
    assert_eq!(log, vec!["Mira reached level 2!", "Mira learned Cure!", "Victory!"]);

    let report = session.finish();
    assert_eq!(report.status, BattleStatus::Won);
    let mira = report.party.member(0).unwrap();
    assert_eq!(mira.level, 2);
    assert_eq!(mira.experience(), Some(0));
    assert!(mira.spells.contains_key("Cure"));
}

#[test]
fn confirm_without_candidates_is_a_no_op() {
    let mut session = battle(vec![aria()], vec![slime("Slime")]);
    assert_eq!(session.confirm_target(), Ok(false));
    assert!(session.cancel_targeting().is_err());
}

#[test]
fn skills_pay_hp_up_front() {
    let aria = aria().with_skill(Ability::new(
        "Reckless Blow",
        ResourceCost::hp(4),
        AbilityEffect::Damage { power: 12 },
    ));
    let mut session = battle(vec![aria], vec![ogre()]);

    assert_eq!(
        session.submit_action(BattleAction::Skill("Reckless Blow".into())),
        Ok(SubmitOutcome::AwaitingTarget)
    );
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 16);
    assert_eq!(session.confirm_target(), Ok(true));
    assert_eq!(session.gate_phase(), GatePhase::UsingSkill);
    assert_eq!(session.full_message(), "Aria uses Reckless Blow!");

    settle(&mut session);
    // 2 INT + 12 power - 6 RES; magic never provokes the ogre's riposte.
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 22);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().hp.current, 16);
    assert_eq!(session.message_log().latest(), Some("Ogre takes 8 damage!"));
    assert_eq!(session.current_actor(), Some(FIRST_ENEMY));
}

#[test]
fn ultimate_is_spent_for_the_rest_of_the_battle() {
    let aria = aria().with_ultimate(Ability::new(
        "Overdrive",
        ResourceCost::sp(2),
        AbilityEffect::Damage { power: 6 },
    ));
    let mut session = battle(vec![aria], vec![ogre()]);

    session.submit_action(BattleAction::Ultimate("Overdrive".into())).unwrap();
    assert_eq!(session.confirm_target(), Ok(true));
    assert_eq!(session.gate_phase(), GatePhase::UsingUltimate);
    settle(&mut session);
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 28);

    until_player_input(&mut session);
    assert_eq!(session.current_actor(), Some(FIRST_MEMBER));
    assert_eq!(
        session.submit_action(BattleAction::Ultimate("Overdrive".into())),
        Err(SubmitError::Rejected(ActionError::UltimateSpent("Overdrive".into())))
    );
    assert_eq!(session.full_message(), "Overdrive has already been used!");
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 3);
    assert!(session.awaiting_input());
}

#[test]
fn analyze_reports_the_target_stats() {
    let mira = mira().with_spell(Ability::new("Insight", ResourceCost::sp(1), AbilityEffect::Analyze));
    let mut session = battle(vec![mira], vec![slime("Slime")]);

    session.submit_action(BattleAction::Spell("Insight".into())).unwrap();
    assert_eq!(session.confirm_target(), Ok(true));
    settle(&mut session);

    assert_eq!(
        session.message_log().latest(),
        Some("Slime Lv1 HP 5/5 SP 0/0 | ATK 4 DEF 3 INT 0 RES 6 ACC 3 SPD 3")
    );
    assert_eq!(session.combatant(FIRST_ENEMY).unwrap().hp.current, 5);
    assert_eq!(session.combatant(FIRST_MEMBER).unwrap().sp.current, 9);
}

#[test]
fn healing_stops_at_missing_hp() {
    let mut mira = mira().with_spell(Ability::new(
        "Cure",
        ResourceCost::sp(2),
        AbilityEffect::Healing { power: 4 },
    ));
    mira.take_damage(3);
    let mut session = battle(vec![mira], vec![slime("Slime")]);

    session.submit_action(BattleAction::Spell("Cure".into())).unwrap();
    assert_eq!(session.valid_targets(), vec![FIRST_MEMBER]);
    assert_eq!(session.confirm_target(), Ok(true));
    settle(&mut session);

    // 4 power + 8 INT would be 12, only 3 are missing.
    assert_eq!(session.message_log().latest(), Some("Mira recovers 3 HP!"));
    let mira = session.combatant(FIRST_MEMBER).unwrap();
    assert_eq!(mira.hp.current, 16);
    assert_eq!(mira.sp.current, 8);
}
