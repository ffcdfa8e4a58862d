//! Action resolution.
//!
//! Resolution runs in two steps so the session can open a targeting session
//! in between:
//!
//! 1. [`initiate`] validates the request against the actor's abilities,
//!    resources and the inventory, then pays the cost (SP/HP, the ultimate's
//!    single use, one item). Nothing is mutated when validation fails.
//! 2. [`resolve`] rolls dice and computes the [`PendingOutcome`] for a chosen
//!    target. Only DEFEND touches state here: the guard goes up immediately.
//!
//! Outcomes are applied later by the session once the animation gate
//! releases them. [`passive_counter`] runs at that point, after the hit has
//! landed, to decide whether the target strikes back.

use super::error::ActionError;
use super::outcome::{DamageSource, OutcomeEffect, PendingOutcome};
use super::targeting::{TargetGroup, candidates};
use super::types::BattleAction;
use crate::combat::{hit_chance, magic_damage, physical_damage};
use crate::engine::GatePhase;
use crate::env::{BattleEnv, ItemDefinition, ItemEffect, ItemId};
use crate::rng::RngSource;
use crate::state::{
    AbilityEffect, AbilityKind, Combatant, CombatantId, PassiveEffect, PassiveTrigger,
    ResourceKind, Roster,
};

/// A computed action: the animation to play, the line announcing it, and
/// the outcome to apply when the animation ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub phase: GatePhase,
    pub announcement: String,
    pub outcome: PendingOutcome,
}

/// Target group an action is aimed at, or `None` for untargeted actions
/// (defend, flee, status).
pub fn target_group(
    roster: &Roster,
    env: &BattleEnv,
    actor: CombatantId,
    action: &BattleAction,
) -> Result<Option<TargetGroup>, ActionError> {
    let combatant = living_actor(roster, actor)?;
    let group = match action {
        BattleAction::Attack => Some(TargetGroup::Enemies),
        BattleAction::Defend | BattleAction::Flee | BattleAction::Status => None,
        BattleAction::Spell(name) | BattleAction::Skill(name) | BattleAction::Ultimate(name) => {
            let kind = ability_kind(action);
            let ability = combatant
                .ability(kind, name)
                .ok_or_else(|| ActionError::UnknownAbility {
                    kind,
                    name: name.clone(),
                })?;
            Some(ability.targets)
        }
        BattleAction::UseItem(id) => Some(item_definition(env, id)?.targets),
    };
    Ok(group)
}

/// Checks that `target` is a living member of `group` as seen by `actor`.
pub fn check_target(
    roster: &Roster,
    actor: CombatantId,
    group: TargetGroup,
    target: CombatantId,
) -> Result<(), ActionError> {
    if !roster.is_in_battle(target) {
        return Err(ActionError::UnknownCombatant(target));
    }
    if candidates(roster, actor, group).contains(&target) {
        Ok(())
    } else {
        Err(ActionError::InvalidTarget(target))
    }
}

/// Validates and pays the up-front cost of an action.
///
/// Costs are never refunded, even if the targeting session opened afterwards
/// is cancelled.
pub fn initiate(
    roster: &mut Roster,
    env: &BattleEnv,
    actor: CombatantId,
    action: &BattleAction,
) -> Result<(), ActionError> {
    living_actor(roster, actor)?;

    match action {
        BattleAction::Spell(name) | BattleAction::Skill(name) | BattleAction::Ultimate(name) => {
            let kind = ability_kind(action);
            let combatant = roster
                .get_mut(actor)
                .ok_or(ActionError::UnknownCombatant(actor))?;
            let cost = combatant
                .ability(kind, name)
                .ok_or_else(|| ActionError::UnknownAbility {
                    kind,
                    name: name.clone(),
                })?
                .cost;

            if kind == AbilityKind::Ultimate
                && !combatant.ultimates.get(name).is_some_and(|u| u.available)
            {
                return Err(ActionError::UltimateSpent(name.clone()));
            }
            if !combatant.can_afford(cost) {
                let available = match cost.kind {
                    ResourceKind::Sp => combatant.sp.current,
                    ResourceKind::Hp => combatant.hp.current,
                };
                return Err(ActionError::InsufficientResource {
                    kind,
                    resource: cost.kind,
                    ability: name.clone(),
                    required: cost.amount,
                    available,
                });
            }

            combatant.use_resource(cost);
            if kind == AbilityKind::Ultimate {
                combatant.spend_ultimate(name);
            }
            tracing::debug!(%actor, ?kind, ability = %name, amount = cost.amount, "paid ability cost");
        }
        BattleAction::UseItem(id) => {
            item_definition(env, id)?;
            if !roster.party_mut().inventory.take(id) {
                return Err(ActionError::ItemUnavailable(id.clone()));
            }
            tracing::debug!(%actor, item = %id, "consumed item");
        }
        BattleAction::Attack | BattleAction::Defend | BattleAction::Flee | BattleAction::Status => {}
    }
    Ok(())
}

/// Computes the outcome of an initiated action.
///
/// `target` is required for targeted actions and ignored otherwise.
pub fn resolve<R>(
    roster: &mut Roster,
    env: &BattleEnv,
    rng: &mut R,
    actor: CombatantId,
    action: &BattleAction,
    target: Option<CombatantId>,
) -> Result<Resolution, ActionError>
where
    R: RngSource + ?Sized,
{
    let resolution = match action {
        BattleAction::Attack => {
            let target = target.ok_or(ActionError::NoTarget)?;
            let (attacker, defender) = pair(roster, actor, target)?;
            let (effect, message) = strike(attacker, defender, rng);
            let phase = if actor.is_enemy() {
                GatePhase::EnemyAttacking
            } else {
                GatePhase::Attacking
            };
            Resolution {
                phase,
                announcement: format!("{} attacks {}!", attacker.name, defender.name),
                outcome: PendingOutcome::new(actor, Some(target), effect, message),
            }
        }
        BattleAction::Defend => {
            let combatant = roster
                .get_mut(actor)
                .ok_or(ActionError::UnknownCombatant(actor))?;
            combatant.defend();
            Resolution {
                phase: GatePhase::Defending,
                announcement: format!("{} takes a defensive stance!", combatant.name),
                outcome: PendingOutcome::new(
                    actor,
                    None,
                    OutcomeEffect::Report,
                    format!("{} is guarding.", combatant.name),
                ),
            }
        }
        BattleAction::Flee => {
            let combatant = living_actor(roster, actor)?;
            Resolution {
                phase: GatePhase::Fleeing,
                announcement: format!("{} tries to run away!", combatant.name),
                outcome: PendingOutcome::new(
                    actor,
                    None,
                    OutcomeEffect::Flee,
                    "Got away safely!",
                ),
            }
        }
        BattleAction::Spell(name) | BattleAction::Skill(name) | BattleAction::Ultimate(name) => {
            let kind = ability_kind(action);
            let target = target.ok_or(ActionError::NoTarget)?;
            let (caster, recipient) = pair(roster, actor, target)?;
            let ability = caster
                .ability(kind, name)
                .ok_or_else(|| ActionError::UnknownAbility {
                    kind,
                    name: name.clone(),
                })?;

            let (effect, message) = match ability.effect {
                AbilityEffect::Damage { power } => {
                    let amount = magic_damage(caster, recipient, power);
                    (
                        OutcomeEffect::Damage {
                            amount,
                            source: DamageSource::Magical,
                        },
                        format!("{} takes {amount} damage!", recipient.name),
                    )
                }
                AbilityEffect::Healing { power } => {
                    let raw = i64::from(power) + i64::from(caster.stats.intelligence);
                    let amount = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
                    heal_effect(recipient, amount)
                }
                AbilityEffect::Analyze => (OutcomeEffect::Report, stats_report(recipient)),
            };

            let phase = match kind {
                AbilityKind::Spell => GatePhase::Casting,
                AbilityKind::Skill => GatePhase::UsingSkill,
                AbilityKind::Ultimate => GatePhase::UsingUltimate,
            };
            Resolution {
                phase,
                announcement: format!("{} {} {}!", caster.name, kind.verb(), ability.name),
                outcome: PendingOutcome::new(actor, Some(target), effect, message),
            }
        }
        BattleAction::UseItem(id) => {
            let target = target.ok_or(ActionError::NoTarget)?;
            let item = item_definition(env, id)?;
            let (user, recipient) = pair(roster, actor, target)?;
            let (effect, message) = match item.effect {
                ItemEffect::RestoreHp(amount) => heal_effect(recipient, amount),
                ItemEffect::RestoreSp(amount) => {
                    let restored = amount.min(recipient.sp.maximum.saturating_sub(recipient.sp.current));
                    (
                        OutcomeEffect::RestoreSp { amount: restored },
                        format!("{} recovers {restored} SP!", recipient.name),
                    )
                }
                ItemEffect::Scan => (OutcomeEffect::Report, stats_report(recipient)),
            };
            Resolution {
                phase: GatePhase::UsingItem,
                announcement: format!("{} uses {}!", user.name, item.name),
                outcome: PendingOutcome::new(actor, Some(target), effect, message),
            }
        }
        BattleAction::Status => {
            let combatant = living_actor(roster, actor)?;
            Resolution {
                phase: GatePhase::Idle,
                announcement: status_report(combatant),
                outcome: PendingOutcome::new(actor, None, OutcomeEffect::Report, status_report(combatant)),
            }
        }
    };

    tracing::debug!(
        %actor,
        %action,
        target = ?resolution.outcome.target,
        effect = ?resolution.outcome.effect,
        "resolved action"
    );
    Ok(resolution)
}

/// Rolls the target's on-hit passive against an applied outcome.
///
/// Only a landed physical hit on a surviving target can trigger, and only
/// the first matching passive (in name order) is rolled. Outcomes produced
/// by a passive never trigger another one.
pub fn passive_counter<R>(
    roster: &Roster,
    rng: &mut R,
    outcome: &PendingOutcome,
) -> Option<Resolution>
where
    R: RngSource + ?Sized,
{
    if outcome.passive_triggered || !outcome.is_physical_hit() {
        return None;
    }
    let target = outcome.target?;
    let defender = roster.get(target).filter(|c| c.is_alive())?;
    let attacker = roster.get(outcome.actor).filter(|c| c.is_alive())?;
    let passive = defender.first_passive(PassiveTrigger::OnHit)?;

    match passive.effect {
        PassiveEffect::Counterattack => {
            if !rng.chance(passive.chance) {
                return None;
            }
            let (effect, message) = strike(defender, attacker, rng);
            tracing::debug!(%target, passive = %passive.name, "passive triggered");
            Some(Resolution {
                phase: GatePhase::Countering,
                announcement: format!(
                    "{}'s {} triggers! {} counterattacks!",
                    defender.name, passive.name, defender.name
                ),
                outcome: PendingOutcome {
                    actor: target,
                    target: Some(outcome.actor),
                    effect,
                    message,
                    passive_triggered: true,
                },
            })
        }
    }
}

/// One-line HP/SP summary used by STATUS.
pub fn status_report(combatant: &Combatant) -> String {
    format!(
        "{}: HP {}  SP {}",
        combatant.name, combatant.hp, combatant.sp
    )
}

/// Full stat readout used by analyze abilities and scan items.
pub fn stats_report(combatant: &Combatant) -> String {
    let s = &combatant.stats;
    format!(
        "{} Lv{} HP {} SP {} | ATK {} DEF {} INT {} RES {} ACC {} SPD {}",
        combatant.name,
        combatant.level,
        combatant.hp,
        combatant.sp,
        s.attack,
        s.defense,
        s.intelligence,
        s.resilience,
        s.accuracy,
        s.speed
    )
}

fn strike<R>(attacker: &Combatant, defender: &Combatant, rng: &mut R) -> (OutcomeEffect, String)
where
    R: RngSource + ?Sized,
{
    if rng.chance(hit_chance(attacker, defender)) {
        let amount = physical_damage(attacker, defender);
        (
            OutcomeEffect::Damage {
                amount,
                source: DamageSource::Physical,
            },
            format!("{} takes {amount} damage!", defender.name),
        )
    } else {
        (OutcomeEffect::Miss, format!("{}'s attack missed!", attacker.name))
    }
}

fn heal_effect(recipient: &Combatant, amount: u32) -> (OutcomeEffect, String) {
    let healed = amount.min(recipient.hp.maximum.saturating_sub(recipient.hp.current));
    (
        OutcomeEffect::Heal { amount: healed },
        format!("{} recovers {healed} HP!", recipient.name),
    )
}

fn ability_kind(action: &BattleAction) -> AbilityKind {
    action.ability().map_or(AbilityKind::Skill, |(kind, _)| kind)
}

fn living_actor(roster: &Roster, actor: CombatantId) -> Result<&Combatant, ActionError> {
    let combatant = roster
        .get(actor)
        .filter(|_| roster.is_in_battle(actor))
        .ok_or(ActionError::UnknownCombatant(actor))?;
    if combatant.is_defeated() {
        return Err(ActionError::ActorDefeated(actor));
    }
    Ok(combatant)
}

fn pair(
    roster: &Roster,
    actor: CombatantId,
    target: CombatantId,
) -> Result<(&Combatant, &Combatant), ActionError> {
    let source = living_actor(roster, actor)?;
    let target = roster
        .get(target)
        .ok_or(ActionError::UnknownCombatant(target))?;
    Ok((source, target))
}

fn item_definition<'a>(env: &'a BattleEnv, id: &ItemId) -> Result<&'a ItemDefinition, ActionError> {
    env.items()
        .ok()
        .and_then(|items| items.definition(id))
        .ok_or_else(|| ActionError::UnknownItem(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Chance;
    use crate::rng::SequenceRng;
    use crate::state::{Ability, CombatStats, Party, Passive, ResourceCost};

    fn fire() -> Ability {
        Ability::new("Fire", ResourceCost::sp(5), AbilityEffect::Damage { power: 5 })
    }

    fn roster() -> Roster {
        let mira = Combatant::player("Mira", "mage", 1, 20, 10, CombatStats::new(10, 3, 8, 2, 5, 5))
            .with_spell(fire())
            .with_spell(Ability::new(
                "Cure",
                ResourceCost::sp(2),
                AbilityEffect::Healing { power: 4 },
            ))
            .with_skill(Ability::new(
                "Reckless",
                ResourceCost::hp(5),
                AbilityEffect::Damage { power: 1 },
            ))
            .with_ultimate(Ability::new(
                "Nova",
                ResourceCost::FREE,
                AbilityEffect::Damage { power: 20 },
            ));
        let ogre = Combatant::enemy("Ogre", "ogre", 1, 30, 0, CombatStats::new(6, 3, 0, 6, 5, 3), 5)
            .with_passive(Passive::counter("Riposte", Chance::ALWAYS));
        Roster::new(Party::new(vec![mira]).unwrap(), vec![ogre]).unwrap()
    }

    const MIRA: CombatantId = CombatantId::party(0);
    const OGRE: CombatantId = CombatantId::enemy(0);

    #[test]
    fn insufficient_sp_rejects_without_mutation() {
        let mut roster = roster();
        roster.get_mut(MIRA).unwrap().sp.current = 2;
        let err = initiate(&mut roster, &BattleEnv::empty(), MIRA, &BattleAction::Spell("Fire".into()))
            .unwrap_err();
        assert_eq!(err.user_message(), "Not enough SP to cast Fire!");
        assert_eq!(roster.get(MIRA).unwrap().sp.current, 2);
    }

    #[test]
    fn initiate_pays_cost_and_spends_ultimate() {
        let mut roster = roster();
        let env = BattleEnv::empty();
        initiate(&mut roster, &env, MIRA, &BattleAction::Spell("Fire".into())).unwrap();
        assert_eq!(roster.get(MIRA).unwrap().sp.current, 5);

        initiate(&mut roster, &env, MIRA, &BattleAction::Ultimate("Nova".into())).unwrap();
        assert_eq!(
            initiate(&mut roster, &env, MIRA, &BattleAction::Ultimate("Nova".into())),
            Err(ActionError::UltimateSpent("Nova".into()))
        );
    }

    #[test]
    fn hp_cost_cannot_self_defeat() {
        let mut roster = roster();
        roster.get_mut(MIRA).unwrap().hp.current = 5;
        let err = initiate(&mut roster, &BattleEnv::empty(), MIRA, &BattleAction::Skill("Reckless".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::InsufficientResource {
                resource: ResourceKind::Hp,
                ..
            }
        ));
    }

    #[test]
    fn unknown_ability_and_item_are_rejected() {
        let roster = roster();
        let env = BattleEnv::empty();
        assert!(matches!(
            target_group(&roster, &env, MIRA, &BattleAction::Spell("Ice".into())),
            Err(ActionError::UnknownAbility { .. })
        ));
        assert_eq!(
            target_group(&roster, &env, MIRA, &BattleAction::UseItem("potion".into())),
            Err(ActionError::UnknownItem("potion".into()))
        );
    }

    #[test]
    fn attack_hits_on_low_roll() {
        let mut roster = roster();
        let mut rng = SequenceRng::favorable();
        let resolution = resolve(
            &mut roster,
            &BattleEnv::empty(),
            &mut rng,
            MIRA,
            &BattleAction::Attack,
            Some(OGRE),
        )
        .unwrap();
        assert_eq!(resolution.phase, GatePhase::Attacking);
        assert_eq!(resolution.outcome.delta(), 7);
        assert_eq!(resolution.outcome.message, "Ogre takes 7 damage!");
    }

    #[test]
    fn attack_misses_on_high_roll() {
        let mut roster = roster();
        let mut rng = SequenceRng::unfavorable();
        let resolution = resolve(
            &mut roster,
            &BattleEnv::empty(),
            &mut rng,
            MIRA,
            &BattleAction::Attack,
            Some(OGRE),
        )
        .unwrap();
        assert_eq!(resolution.outcome.effect, OutcomeEffect::Miss);
        assert_eq!(resolution.outcome.delta(), 0);
    }

    #[test]
    fn spell_damage_and_healing() {
        let mut roster = roster();
        let env = BattleEnv::empty();
        let mut rng = SequenceRng::favorable();
        let fire = resolve(&mut roster, &env, &mut rng, MIRA, &BattleAction::Spell("Fire".into()), Some(OGRE))
            .unwrap();
        assert_eq!(fire.phase, GatePhase::Casting);
        assert_eq!(fire.announcement, "Mira casts Fire!");
        // 8 + 5 - 6
        assert_eq!(fire.outcome.delta(), 7);

        roster.get_mut(MIRA).unwrap().take_damage(15);
        let cure = resolve(&mut roster, &env, &mut rng, MIRA, &BattleAction::Spell("Cure".into()), Some(MIRA))
            .unwrap();
        // 4 + 8 = 12, capped by the 15 missing HP
        assert_eq!(cure.outcome.effect, OutcomeEffect::Heal { amount: 12 });
    }

    #[test]
    fn healing_an_overfilled_meter_restores_nothing() {
        let mut roster = roster();
        roster.get_mut(MIRA).unwrap().hp.current = 25;
        let cure = resolve(
            &mut roster,
            &BattleEnv::empty(),
            &mut SequenceRng::favorable(),
            MIRA,
            &BattleAction::Spell("Cure".into()),
            Some(MIRA),
        )
        .unwrap();
        assert_eq!(cure.outcome.effect, OutcomeEffect::Heal { amount: 0 });
    }

    #[test]
    fn defend_raises_guard_immediately() {
        let mut roster = roster();
        let resolution = resolve(
            &mut roster,
            &BattleEnv::empty(),
            &mut SequenceRng::favorable(),
            MIRA,
            &BattleAction::Defend,
            None,
        )
        .unwrap();
        assert_eq!(resolution.phase, GatePhase::Defending);
        assert!(roster.get(MIRA).unwrap().defending);
    }

    #[test]
    fn counter_requires_surviving_physical_hit() {
        let roster = roster();
        let mut rng = SequenceRng::favorable();
        let hit = PendingOutcome::new(
            MIRA,
            Some(OGRE),
            OutcomeEffect::Damage {
                amount: 7,
                source: DamageSource::Physical,
            },
            "",
        );
        let counter = passive_counter(&roster, &mut rng, &hit).unwrap();
        assert_eq!(counter.phase, GatePhase::Countering);
        assert_eq!(counter.outcome.actor, OGRE);
        assert_eq!(counter.outcome.target, Some(MIRA));
        assert!(counter.outcome.passive_triggered);
        // Counters never chain.
        assert!(passive_counter(&roster, &mut rng, &counter.outcome).is_none());

        let spell = PendingOutcome::new(
            MIRA,
            Some(OGRE),
            OutcomeEffect::Damage {
                amount: 7,
                source: DamageSource::Magical,
            },
            "",
        );
        assert!(passive_counter(&roster, &mut rng, &spell).is_none());
    }

    #[test]
    fn check_target_rejects_wrong_side() {
        let roster = roster();
        assert_eq!(
            check_target(&roster, MIRA, TargetGroup::Enemies, MIRA),
            Err(ActionError::InvalidTarget(MIRA))
        );
        assert!(check_target(&roster, MIRA, TargetGroup::Enemies, OGRE).is_ok());
        assert_eq!(
            check_target(&roster, MIRA, TargetGroup::Enemies, CombatantId::enemy(9)),
            Err(ActionError::UnknownCombatant(CombatantId::enemy(9)))
        );
    }
}
