//! Universally quantified battle properties.

mod common;

use battle_core::{
    BattleAction, BattleSession, CombatStats, Combatant, CombatantId, Party, PcgRng,
    ResourceCost, Roster, SubmitError, TurnOrder, hit_chance, magic_damage, physical_damage,
};
use proptest::prelude::*;

fn stats() -> impl Strategy<Value = CombatStats> {
    (
        -50_i32..200,
        -50_i32..200,
        -50_i32..200,
        -50_i32..200,
        -50_i32..200,
        -50_i32..200,
    )
        .prop_map(|(attack, defense, intelligence, resilience, accuracy, speed)| {
            CombatStats::new(attack, defense, intelligence, resilience, accuracy, speed)
        })
}

fn fighter(stats: CombatStats, defending: bool) -> Combatant {
    let mut combatant = Combatant::player("p", "knight", 1, 50, 20, stats);
    combatant.defending = defending;
    combatant
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn damage_never_drops_below_one(
        attacker in stats(),
        defender in stats(),
        power in 0_u32..500,
        defending in any::<bool>()
    ) {
        let attacker = fighter(attacker, false);
        let defender = fighter(defender, defending);
        prop_assert!(physical_damage(&attacker, &defender) >= 1);
        prop_assert!(magic_damage(&attacker, &defender, power) >= 1);
    }

    #[test]
    fn hit_chance_stays_in_bounds(attacker in stats(), defender in stats()) {
        let attacker = fighter(attacker, false);
        let open = hit_chance(&attacker, &fighter(defender, false)).as_percent();
        prop_assert!((10..=99).contains(&open), "open chance {open}");

        let guarded = hit_chance(&attacker, &fighter(defender, true)).as_percent();
        prop_assert_eq!(guarded, open.saturating_sub(25));
    }

    #[test]
    fn hp_stays_clamped(hits in prop::collection::vec((any::<bool>(), 0_u32..80), 1..40)) {
        let mut combatant = fighter(CombatStats::default(), false);
        for (is_heal, amount) in hits {
            if is_heal {
                combatant.heal(amount);
            } else {
                combatant.take_damage(amount);
            }
            prop_assert!(combatant.hp.current <= combatant.hp.maximum);
        }
    }

    #[test]
    fn sp_payment_is_all_or_nothing(current in 0_u32..=20, cost in 0_u32..40) {
        let mut combatant = fighter(CombatStats::default(), false);
        combatant.sp.current = current;
        let paid = combatant.use_resource(ResourceCost::sp(cost));
        if paid {
            prop_assert_eq!(combatant.sp.current, current - cost);
        } else {
            prop_assert!(cost > current);
            prop_assert_eq!(combatant.sp.current, current);
        }
    }

    #[test]
    fn turn_cycles_visit_each_living_combatant_once(
        speeds in prop::collection::vec((0_i32..10, 1_u32..5), 2..8),
        fallen in prop::collection::vec(any::<bool>(), 8),
        seed in any::<u64>()
    ) {
        let (party_specs, enemy_specs) = speeds.split_at(speeds.len() / 2);
        let members = party_specs
            .iter()
            .map(|&(speed, level)| {
                Combatant::player("p", "knight", level, 10, 0, CombatStats::new(1, 1, 1, 1, 1, speed))
            })
            .chain(std::iter::once(Combatant::player("anchor", "knight", 1, 10, 0, CombatStats::default())))
            .collect();
        let enemies = enemy_specs
            .iter()
            .map(|&(speed, level)| {
                Combatant::enemy("e", "slime", level, 10, 0, CombatStats::new(1, 1, 1, 1, 1, speed), 1)
            })
            .collect();
        let mut roster = Roster::new(Party::new(members).unwrap(), enemies).unwrap();

        let mut rng = PcgRng::new(seed);
        let mut turns = TurnOrder::new();
        turns.regenerate(&roster, &mut rng).unwrap();

        let ids: Vec<CombatantId> = roster.participants().collect();
        for (id, down) in ids.iter().zip(&fallen) {
            if *down {
                roster.get_mut(*id).unwrap().take_damage(99);
            }
        }

        let living: Vec<CombatantId> = roster.participants().filter(|&id| roster.is_alive(id)).collect();
        prop_assume!(!living.is_empty());

        let mut seen = Vec::new();
        for _ in 0..living.len() {
            let next = turns.advance(&roster, &mut rng).unwrap();
            prop_assert!(roster.is_alive(next));
            seen.push(next);
        }
        seen.sort();
        let mut expected = living.clone();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn submissions_are_rejected_while_animating(seed in any::<u64>(), pick in 0_usize..5) {
        let mut session = BattleSession::new(
            Party::new(vec![common::aria()]).unwrap(),
            vec![common::ogre()],
            common::test_config(),
            PcgRng::new(seed),
        )
        .unwrap();
        session.submit_action(BattleAction::Defend).unwrap();

        let action = [
            BattleAction::Attack,
            BattleAction::Defend,
            BattleAction::Flee,
            BattleAction::Status,
            BattleAction::Skill("Bash".into()),
        ][pick]
            .clone();
        prop_assert_eq!(session.submit_action(action), Err(SubmitError::ActionInProgress));
    }
}
