//! Headless battle simulation
//!
//! Builds a party and an encounter from content files, then drives a
//! [`BattleSession`] with `tick()` while a simple autopilot plays the party.
//! Battle randomness and autopilot choices both derive from one seed, so a
//! run can be replayed exactly with `--seed`.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use battle_content::{BattleContent, ContentFactory};
use battle_core::{
    AbilityEffect, BattleAction, BattleReport, BattleSession, BattleStatus, Combatant,
    CombatantId, EncounterOracle, Inventory, ItemId, Party, PcgRng, SubmitError, SubmitOutcome,
    build_enemies, build_player,
};

use crate::utils;

const NAMES: [&str; 4] = ["Aria", "Mira", "Bram", "Cass"];
const POTION: &str = "potion";

/// Run a headless, auto-played battle
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Encounter id from encounters.ron
    #[arg(short, long, default_value = "meadow")]
    encounter: String,

    /// Party members as CLASS:LEVEL, comma separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "warrior:2,mage:2"
    )]
    party: Vec<String>,

    /// Seed for battle rolls and autopilot choices (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Potions in the party inventory
    #[arg(long, default_value_t = 2)]
    potions: u32,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,

    /// Only print the final report
    #[arg(short, long)]
    quiet: bool,

    /// Content directory (defaults to the one shipped with battle-content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let data_dir = utils::data_dir(self.data_dir.clone());
        let content = ContentFactory::new(&data_dir)
            .load()
            .with_context(|| format!("Failed to load content from {}", data_dir.display()))?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let party = self.build_party(&content)?;
        let specs = content
            .encounter(&self.encounter)
            .ok_or_else(|| anyhow!("Unknown encounter '{}'", self.encounter))?;
        let enemies = build_enemies(&content, specs)?;
        let config = content.config().clone().with_text_speed(0);

        println!(
            "{} {} {}",
            style("Simulating").bold(),
            style(&self.encounter).cyan(),
            style(format!("(seed {seed})")).dim()
        );

        let mut session = BattleSession::new(party, enemies, config, PcgRng::new(seed))?
            .with_env(content.into_env());
        let mut pilot = Autopilot::new(seed);
        let mut seen = 0;
        let mut ticks = 0;

        while !session.is_over() && ticks < self.max_ticks {
            if session.awaiting_input() {
                pilot.play(&mut session)?;
            }
            session.tick();
            ticks += 1;

            if !self.quiet {
                for line in session.message_log().since(seen) {
                    println!("  {} {}", style(format!("[{ticks:>6}]")).dim(), line);
                }
            }
            seen = session.message_log().total();
        }

        if !session.is_over() {
            anyhow::bail!("Battle still running after {} ticks", self.max_ticks);
        }
        print_report(&session.finish(), ticks);
        Ok(())
    }

    fn build_party(&self, content: &BattleContent) -> Result<Party> {
        let mut members = Vec::with_capacity(self.party.len());
        for (index, entry) in self.party.iter().enumerate() {
            let (class_id, level) = parse_member(entry)?;
            let name = NAMES
                .get(index)
                .map_or_else(|| format!("Hero {}", index + 1), |n| (*n).to_owned());
            members.push(build_player(content, name, class_id, level)?);
        }

        let inventory = Inventory::new().with_item(POTION, self.potions);
        Ok(Party::new(members)?.with_inventory(inventory))
    }
}

fn parse_member(entry: &str) -> Result<(&str, u32)> {
    let (class_id, level) = entry.split_once(':').unwrap_or((entry, "1"));
    let level = level
        .trim()
        .parse()
        .with_context(|| format!("Invalid level in party member '{entry}'"))?;
    Ok((class_id.trim(), level))
}

/// Picks party actions: heal when hurt, otherwise a random affordable attack.
struct Autopilot {
    rng: StdRng,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn play(&mut self, session: &mut BattleSession) -> Result<()> {
        let Some(actor) = session.current_combatant() else {
            return Ok(());
        };
        let potions = session.roster().party().inventory.count(&ItemId::new(POTION));
        let (action, heals) = self.choose(actor, potions);

        let outcome = match session.submit_action(action) {
            Ok(outcome) => outcome,
            Err(SubmitError::Rejected(err)) => {
                tracing::debug!(error = %err, "autopilot falling back to attack");
                session.submit_action(BattleAction::Attack)?
            }
            Err(err) => return Err(err.into()),
        };

        if outcome == SubmitOutcome::AwaitingTarget {
            let want = if heals {
                weakest(session, &session.valid_targets())
            } else {
                session.valid_targets().choose(&mut self.rng).copied()
            };
            if let Some(want) = want {
                for _ in 0..session.valid_targets().len() {
                    if session.selected_target() == Some(want) {
                        break;
                    }
                    session.next_target()?;
                }
            }
            session.confirm_target()?;
        }
        Ok(())
    }

    /// Returns the action and whether it restores HP.
    fn choose(&mut self, actor: &Combatant, potions: u32) -> (BattleAction, bool) {
        let hurt = actor.hp.current * 100 < actor.hp.maximum * 40;
        if hurt {
            let cure = actor.spells.values().find(|spell| {
                matches!(spell.effect, AbilityEffect::Healing { .. }) && actor.can_afford(spell.cost)
            });
            if let Some(cure) = cure {
                return (BattleAction::Spell(cure.name.clone()), true);
            }
            if potions > 0 {
                return (BattleAction::UseItem(ItemId::new(POTION)), true);
            }
        }

        let mut options = vec![BattleAction::Attack];
        options.extend(
            actor
                .spells
                .values()
                .filter(|a| matches!(a.effect, AbilityEffect::Damage { .. }))
                .filter(|a| actor.can_afford(a.cost))
                .map(|a| BattleAction::Spell(a.name.clone())),
        );
        options.extend(
            actor
                .skills
                .values()
                .filter(|a| matches!(a.effect, AbilityEffect::Damage { .. }))
                .filter(|a| actor.can_afford(a.cost))
                .map(|a| BattleAction::Skill(a.name.clone())),
        );
        if self.rng.gen_bool(0.25) {
            options.extend(
                actor
                    .ultimates
                    .values()
                    .filter(|u| u.available)
                    .map(|u| BattleAction::Ultimate(u.ability.name.clone())),
            );
        }

        let action = options
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or(BattleAction::Attack);
        (action, false)
    }
}

fn weakest(session: &BattleSession, targets: &[CombatantId]) -> Option<CombatantId> {
    targets.iter().copied().min_by_key(|&id| {
        session
            .combatant(id)
            .map_or(u32::MAX, |c| c.hp.current * 100 / c.hp.maximum.max(1))
    })
}

fn print_report(report: &BattleReport, ticks: u64) {
    let verdict = match report.status {
        BattleStatus::Won => style("Victory").green().bold(),
        BattleStatus::Lost => style("Defeat").red().bold(),
        BattleStatus::Fled => style("Escaped").yellow().bold(),
        BattleStatus::Ongoing => style("Unfinished").dim(),
    };
    println!();
    println!(
        "{} {}",
        verdict,
        style(format!("after {ticks} ticks ({:.1}s)", ticks as f64 / 60.0)).dim()
    );

    for member in report.party.members() {
        println!(
            "  {:<6} Lv {:<2} HP {:>3}/{:<3} SP {:>3}/{:<3} EXP {}",
            style(&member.name).bold(),
            member.level,
            member.hp.current,
            member.hp.maximum,
            member.sp.current,
            member.sp.maximum,
            member.experience().unwrap_or_default()
        );
    }
    for enemy in &report.enemies {
        let state = if enemy.is_defeated() {
            style("defeated".to_owned()).dim()
        } else {
            style(format!("{}/{} HP", enemy.hp.current, enemy.hp.maximum)).red()
        };
        println!("  {:<12} {}", enemy.name, state);
    }
}
