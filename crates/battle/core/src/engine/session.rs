//! Battle orchestration.
//!
//! [`BattleSession`] owns every piece of one battle and is driven by two
//! entry points:
//!
//! - [`BattleSession::submit_action`] validates a player's request, pays its
//!   cost and either starts its animation or opens a targeting session.
//! - [`BattleSession::tick`] advances text and animation by one step. When an
//!   animation expires its outcome is applied in a fixed order:
//!
//!   1. HP/SP change
//!   2. on-hit passive (a counter replaces the rest of this list until it
//!      completes)
//!   3. defeat, experience and level-ups
//!   4. victory/defeat/flee check
//!   5. end of turn and turn advancement
//!
//! Enemy turns run automatically from `tick` once nothing else is in flight.

use crate::action::{
    self, ActionRequest, BattleAction, OutcomeEffect, PendingOutcome, Resolution, TargetGroup,
    candidates,
};
use crate::config::BattleConfig;
use crate::env::{self, BattleEnv};
use crate::message::{MessageLog, TypewriterText};
use crate::rng::{PcgRng, RngSource};
use crate::state::{Combatant, CombatantId, Party, Roster, Side};

use super::animation::{AnimationGate, GatePhase};
use super::errors::{SetupError, SubmitError, TargetingError};
use super::targeting::{TargetSelection, TargetingSession};
use super::turns::TurnOrder;

/// Where the battle stands.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleStatus {
    #[default]
    Ongoing,
    Won,
    Lost,
    Fled,
}

impl BattleStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, BattleStatus::Ongoing)
    }
}

/// What an accepted submission did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The action resolved and its animation started.
    Started(GatePhase),
    /// A targeting session opened; confirm or cancel it next.
    AwaitingTarget,
    /// A synchronous report was shown; the actor keeps the turn.
    Reported,
}

/// Final state handed back by [`BattleSession::finish`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub party: Party,
    pub enemies: Vec<Combatant>,
    pub status: BattleStatus,
}

/// An initiated action waiting for its target.
#[derive(Clone, Debug)]
struct PendingChoice {
    actor: CombatantId,
    action: BattleAction,
    previous_message: String,
}

/// The action whose outcome is currently being animated.
#[derive(Clone, Copy, Debug, Default)]
struct TurnContext {
    actor: Option<CombatantId>,
    defended: bool,
}

/// One battle between the party's active line-up and a group of enemies.
pub struct BattleSession<R: RngSource = PcgRng> {
    config: BattleConfig,
    env: BattleEnv,
    roster: Roster,
    turns: TurnOrder,
    targeting: TargetSelection,
    gate: AnimationGate,
    choice: Option<PendingChoice>,
    action_processing: bool,
    status: BattleStatus,
    log: MessageLog,
    display: TypewriterText,
    rng: R,
    turn: TurnContext,
}

impl<R: RngSource> BattleSession<R> {
    /// Starts a battle. The turn queue is built immediately and the first
    /// actor's turn begins.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the encounter is empty, contains a player
    /// character, or no active party member is standing.
    pub fn new(
        party: Party,
        enemies: Vec<Combatant>,
        config: BattleConfig,
        mut rng: R,
    ) -> Result<Self, SetupError> {
        let roster = Roster::new(party, enemies)?;
        if roster.is_side_defeated(Side::Party) {
            return Err(SetupError::NoLivingPartyMember);
        }
        if roster.is_side_defeated(Side::Enemy) {
            return Err(SetupError::EmptyEncounter);
        }

        let mut turns = TurnOrder::new();
        turns
            .regenerate(&roster, &mut rng)
            .map_err(|_| SetupError::NoLivingPartyMember)?;

        let mut session = Self {
            env: BattleEnv::empty(),
            gate: AnimationGate::new(config.durations),
            log: MessageLog::new(config.message_log_capacity),
            display: TypewriterText::new(config.text_speed),
            config,
            roster,
            turns,
            targeting: TargetSelection::new(),
            choice: None,
            action_processing: false,
            status: BattleStatus::Ongoing,
            rng,
            turn: TurnContext::default(),
        };

        let names: Vec<&str> = session.roster.enemies().iter().map(|e| e.name.as_str()).collect();
        let opening = format!("{} appeared!", names.join(", "));
        tracing::info!(
            party = session.roster.living(Side::Party).count(),
            enemies = names.len(),
            "battle started"
        );
        session.announce(opening);
        session.begin_turn();
        Ok(session)
    }

    #[must_use]
    pub fn with_env(mut self, env: BattleEnv) -> Self {
        self.env = env;
        self
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Submits an action for the current turn-holder.
    ///
    /// Rejected requests change nothing and keep the turn. Rejections caused
    /// by the action itself (unknown ability, not enough SP, ...) also show
    /// a message to the player.
    pub fn submit_action(
        &mut self,
        request: impl Into<ActionRequest>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let request = request.into();
        let result = self.try_submit(&request);
        match &result {
            Ok(outcome) => {
                tracing::debug!(action = %request.action, ?outcome, "action accepted");
            }
            Err(SubmitError::Rejected(err)) => {
                tracing::debug!(action = %request.action, error = %err, "action rejected");
                self.announce(err.user_message());
            }
            Err(err) => {
                tracing::debug!(action = %request.action, error = %err, "submission refused");
            }
        }
        result
    }

    fn try_submit(&mut self, request: &ActionRequest) -> Result<SubmitOutcome, SubmitError> {
        if self.status.is_over() {
            return Err(SubmitError::BattleOver);
        }
        if self.is_busy() {
            return Err(SubmitError::ActionInProgress);
        }

        let current = self.turns.current();
        let actor = request
            .actor
            .or(current)
            .ok_or(SubmitError::NoActiveTurn)?;
        if Some(actor) != current {
            return Err(SubmitError::NotCurrentActor { actor, current });
        }
        if actor.is_enemy() {
            return Err(SubmitError::EnemyTurn);
        }

        if request.action == BattleAction::Status {
            let report = self
                .roster
                .get(actor)
                .map(action::status_report)
                .ok_or(SubmitError::NoActiveTurn)?;
            self.announce(report);
            return Ok(SubmitOutcome::Reported);
        }

        let group = action::target_group(&self.roster, &self.env, actor, &request.action)?;
        if let (Some(group), Some(target)) = (group, request.target) {
            action::check_target(&self.roster, actor, group, target)?;
        }
        action::initiate(&mut self.roster, &self.env, actor, &request.action)?;

        let target = match group {
            None => None,
            Some(_) if request.target.is_some() => request.target,
            Some(TargetGroup::SelfOnly) => Some(actor),
            Some(group) => {
                let options = candidates(&self.roster, actor, group);
                match options.as_slice() {
                    [only] if request.action.is_attack() => Some(*only),
                    _ => {
                        self.open_targeting(actor, request.action.clone(), group);
                        return Ok(SubmitOutcome::AwaitingTarget);
                    }
                }
            }
        };

        let phase = self.launch(actor, &request.action, target)?;
        Ok(SubmitOutcome::Started(phase))
    }

    fn open_targeting(&mut self, actor: CombatantId, action: BattleAction, group: TargetGroup) {
        self.choice = Some(PendingChoice {
            actor,
            action,
            previous_message: self.display.text().to_owned(),
        });
        self.targeting.start(actor, group);
        self.action_processing = true;
        if self.targeting.valid_targets(&self.roster).is_empty() {
            self.display.show(action::ActionError::NoTarget.user_message());
        } else {
            self.display.show("Choose a target.");
        }
        tracing::debug!(%actor, %group, "targeting started");
    }

    /// Resolves the pending action against the highlighted target.
    ///
    /// Returns `Ok(false)` without doing anything when no session is open or
    /// the candidate list is empty.
    pub fn confirm_target(&mut self) -> Result<bool, SubmitError> {
        if self.status.is_over() {
            return Err(SubmitError::BattleOver);
        }
        let Some(target) = self.targeting.selected(&self.roster) else {
            return Ok(false);
        };
        self.targeting.stop();
        let Some(choice) = self.choice.take() else {
            self.action_processing = false;
            return Ok(false);
        };

        match self.launch(choice.actor, &choice.action, Some(target)) {
            Ok(_) => Ok(true),
            Err(err) => {
                self.action_processing = false;
                self.announce(err.user_message());
                Err(err.into())
            }
        }
    }

    /// Closes the targeting session and restores the message shown before
    /// it opened. Costs already paid are not refunded.
    pub fn cancel_targeting(&mut self) -> Result<(), TargetingError> {
        self.targeting.stop().ok_or(TargetingError::Inactive)?;
        if let Some(choice) = self.choice.take() {
            self.display.show(choice.previous_message);
            self.display.skip();
            tracing::debug!(actor = %choice.actor, action = %choice.action, "targeting cancelled");
        }
        self.action_processing = false;
        Ok(())
    }

    pub fn next_target(&mut self) -> Result<(), TargetingError> {
        self.targeting.next(&self.roster)
    }

    pub fn previous_target(&mut self) -> Result<(), TargetingError> {
        self.targeting.previous(&self.roster)
    }

    pub fn switch_target_group(&mut self) -> Result<TargetGroup, TargetingError> {
        self.targeting.switch_group()
    }

    /// Reveals the rest of the current message at once.
    pub fn skip_message(&mut self) {
        self.display.skip();
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advances the battle by one step.
    pub fn tick(&mut self) {
        self.display.tick();
        if self.status.is_over() {
            return;
        }

        self.heal_turn_queue();
        if self.status.is_over() {
            return;
        }

        if let Some((phase, outcome)) = self.gate.tick(self.display.is_complete()) {
            self.complete(phase, outcome);
            return;
        }

        if self.gate.is_idle()
            && !self.action_processing
            && self.display.is_complete()
            && self.turns.current().is_some_and(CombatantId::is_enemy)
        {
            self.enemy_turn();
        }
    }

    /// Repairs an empty queue or a defeated turn-holder. Only runs between
    /// actions.
    fn heal_turn_queue(&mut self) {
        if !self.gate.is_idle() || self.action_processing {
            return;
        }

        if self.turns.is_empty() {
            tracing::warn!("turn queue empty outside a finished battle; regenerating");
            if self.turns.regenerate(&self.roster, &mut self.rng).is_err() {
                self.force_end();
                return;
            }
            self.begin_turn();
        }

        if let Some(current) = self.turns.current() {
            if !self.roster.is_alive(current) {
                tracing::warn!(%current, "defeated combatant held the turn; skipping");
                if self.turns.advance(&self.roster, &mut self.rng).is_none() {
                    self.force_end();
                    return;
                }
                self.begin_turn();
            }
        }
    }

    fn enemy_turn(&mut self) {
        let Some(actor) = self.turns.current() else {
            return;
        };
        let targets: Vec<_> = self.roster.living(Side::Party).collect();
        if targets.is_empty() {
            self.force_end();
            return;
        }
        let target = targets[self.rng.range(targets.len())];

        if let Err(err) = self.launch(actor, &BattleAction::Attack, Some(target)) {
            tracing::warn!(%actor, error = %err, "enemy could not act; passing the turn");
            self.finish_turn();
        }
    }

    /// Resolves an initiated action and starts its animation.
    fn launch(
        &mut self,
        actor: CombatantId,
        action: &BattleAction,
        target: Option<CombatantId>,
    ) -> Result<GatePhase, action::ActionError> {
        let resolution =
            action::resolve(&mut self.roster, &self.env, &mut self.rng, actor, action, target)?;
        self.turn = TurnContext {
            actor: Some(actor),
            defended: *action == BattleAction::Defend,
        };
        Ok(self.play(resolution))
    }

    fn play(&mut self, resolution: Resolution) -> GatePhase {
        let Resolution {
            phase,
            announcement,
            outcome,
        } = resolution;
        self.announce(announcement);
        match self.gate.begin(phase, outcome) {
            Ok(()) => self.action_processing = true,
            Err(err) => tracing::warn!(error = %err, "animation refused; outcome dropped"),
        }
        phase
    }

    // ========================================================================
    // Outcome application
    // ========================================================================

    fn complete(&mut self, phase: GatePhase, outcome: PendingOutcome) {
        tracing::debug!(%phase, actor = %outcome.actor, effect = ?outcome.effect, "applying outcome");
        self.apply(&outcome);

        if phase != GatePhase::Countering {
            if let Some(counter) = action::passive_counter(&self.roster, &mut self.rng, &outcome) {
                self.play(counter);
                return;
            }
        }

        if let Some(target) = outcome.target {
            self.settle_defeat(target);
        }

        if let Some(status) = self.battle_result(&outcome) {
            self.end_battle(status);
            return;
        }

        self.finish_turn();
    }

    fn apply(&mut self, outcome: &PendingOutcome) {
        if let Some(target) = outcome.target.and_then(|id| self.roster.get_mut(id)) {
            match outcome.effect {
                OutcomeEffect::Damage { amount, .. } => {
                    target.take_damage(amount);
                }
                OutcomeEffect::Heal { amount } => {
                    target.heal(amount);
                }
                OutcomeEffect::RestoreSp { amount } => {
                    target.restore_sp(amount);
                }
                OutcomeEffect::Miss | OutcomeEffect::Report | OutcomeEffect::Flee => {}
            }
        }
        self.announce(outcome.message.clone());
    }

    fn settle_defeat(&mut self, id: CombatantId) {
        let Some(combatant) = self.roster.get(id) else {
            return;
        };
        if combatant.is_alive() || !self.turns.contains(id) {
            return;
        }

        let name = combatant.name.clone();
        let reward = combatant.experience_reward();
        tracing::info!(%id, %name, "combatant defeated");
        self.announce(format!("{name} is defeated!"));

        if id.is_enemy() && reward > 0 {
            self.award_experience(reward);
        }
        self.turns.remove(id);
    }

    fn award_experience(&mut self, reward: u32) {
        let members: Vec<_> = self.roster.living(Side::Party).collect();
        if members.is_empty() {
            return;
        }
        self.announce(format!("The party gains {reward} EXP!"));

        for id in members {
            let Some(member) = self.roster.get_mut(id) else {
                continue;
            };
            if !member.gain_experience(reward) {
                continue;
            }
            let name = member.name.clone();
            let level = member.level;
            let class_id = member.class_id().to_owned();
            tracing::info!(%id, %name, level, "level up");
            self.announce(format!("{name} reached level {level}!"));

            for ability in self.unlock_abilities(id, &class_id, level) {
                self.announce(format!("{name} learned {ability}!"));
            }
        }
    }

    /// Grants the abilities the member's class unlocks at `level`.
    fn unlock_abilities(&mut self, id: CombatantId, class_id: &str, level: u32) -> Vec<String> {
        let Ok(classes) = self.env.classes() else {
            return Vec::new();
        };
        let Some(class) = classes.class(class_id) else {
            tracing::warn!(%id, class_id, "unknown class; no abilities unlocked");
            return Vec::new();
        };
        let Some(member) = self.roster.get_mut(id) else {
            return Vec::new();
        };
        class
            .unlocks_at(level)
            .filter(|&ability| env::grant(member, ability, classes))
            .map(str::to_owned)
            .collect()
    }

    fn battle_result(&self, outcome: &PendingOutcome) -> Option<BattleStatus> {
        if outcome.effect == OutcomeEffect::Flee && outcome.actor.is_party() {
            Some(BattleStatus::Fled)
        } else if self.roster.is_side_defeated(Side::Enemy) {
            Some(BattleStatus::Won)
        } else if self.roster.is_side_defeated(Side::Party) {
            Some(BattleStatus::Lost)
        } else {
            None
        }
    }

    /// Ends the acting combatant's turn and hands it to the next one.
    fn finish_turn(&mut self) {
        let context = std::mem::take(&mut self.turn);
        if let Some(actor) = context.actor {
            // A guard raised this turn stays up until the defender acts again.
            if !context.defended {
                if let Some(combatant) = self.roster.get_mut(actor) {
                    combatant.end_turn();
                }
            }
        }

        match self.turns.advance(&self.roster, &mut self.rng) {
            Some(next) => tracing::debug!(%next, "turn advanced"),
            None => {
                self.force_end();
                return;
            }
        }
        self.begin_turn();
        self.action_processing = false;
    }

    /// Drops any guard the new turn-holder still has up.
    fn begin_turn(&mut self) {
        if let Some(current) = self.turns.current() {
            if let Some(combatant) = self.roster.get_mut(current) {
                combatant.end_turn();
            }
        }
    }

    /// Ends a battle that cannot continue. The side with survivors wins;
    /// anything ambiguous counts as a loss.
    fn force_end(&mut self) {
        let party_standing = !self.roster.is_side_defeated(Side::Party);
        let enemies_standing = !self.roster.is_side_defeated(Side::Enemy);
        let status = if party_standing && !enemies_standing {
            BattleStatus::Won
        } else {
            BattleStatus::Lost
        };
        tracing::warn!(%status, "turn queue exhausted; forcing battle end");
        self.end_battle(status);
    }

    fn end_battle(&mut self, status: BattleStatus) {
        self.status = status;
        self.action_processing = false;
        self.targeting.stop();
        self.choice = None;
        self.turn = TurnContext::default();

        match status {
            BattleStatus::Won => self.announce("Victory!"),
            BattleStatus::Lost => self.announce("The party has fallen..."),
            BattleStatus::Fled | BattleStatus::Ongoing => {}
        }
        tracing::info!(%status, "battle over");
    }

    fn announce(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.log.push(message.clone());
        self.display.show(message);
    }

    fn is_busy(&self) -> bool {
        !self.gate.is_idle() || self.action_processing || self.targeting.is_active()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn current_actor(&self) -> Option<CombatantId> {
        self.turns.current()
    }

    pub fn current_combatant(&self) -> Option<&Combatant> {
        self.current_actor().and_then(|id| self.roster.get(id))
    }

    pub fn is_player_turn(&self) -> bool {
        !self.status.is_over() && self.turns.is_player_turn()
    }

    /// Returns true if the player can submit an action right now.
    pub fn awaiting_input(&self) -> bool {
        self.is_player_turn() && !self.is_busy()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_action_processing(&self) -> bool {
        self.action_processing
    }

    pub fn gate_phase(&self) -> GatePhase {
        self.gate.phase()
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.log
    }

    /// The part of the current message revealed so far.
    pub fn displayed_message(&self) -> &str {
        self.display.visible()
    }

    pub fn full_message(&self) -> &str {
        self.display.text()
    }

    pub fn is_message_complete(&self) -> bool {
        self.display.is_complete()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn_queue(&self) -> &[CombatantId] {
        self.turns.entries()
    }

    pub fn targeting(&self) -> Option<&TargetingSession> {
        self.targeting.session()
    }

    pub fn valid_targets(&self) -> Vec<CombatantId> {
        self.targeting.valid_targets(&self.roster)
    }

    pub fn selected_target(&mut self) -> Option<CombatantId> {
        self.targeting.selected(&self.roster)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Consumes the session and returns the combatants for post-battle use.
    pub fn finish(self) -> BattleReport {
        let (party, enemies) = self.roster.into_parts();
        BattleReport {
            party,
            enemies,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseDurations;
    use crate::rng::SequenceRng;
    use crate::state::CombatStats;

    const ARIA: CombatantId = CombatantId::party(0);
    const BRAM: CombatantId = CombatantId::party(1);
    const SLIME: CombatantId = CombatantId::enemy(0);

    fn session() -> BattleSession<SequenceRng> {
        let party = Party::new(vec![
            Combatant::player("Aria", "knight", 1, 20, 5, CombatStats::new(10, 3, 2, 2, 5, 9)),
            Combatant::player("Bram", "monk", 1, 18, 5, CombatStats::new(8, 3, 2, 2, 5, 7)),
        ])
        .unwrap();
        let slime =
            Combatant::enemy("Slime", "slime", 1, 5, 0, CombatStats::new(4, 3, 0, 6, 3, 1), 4);
        let config = BattleConfig::headless().with_durations(PhaseDurations::uniform(2));
        BattleSession::new(party, vec![slime], config, SequenceRng::favorable()).unwrap()
    }

    #[test]
    fn empty_queue_is_rebuilt_between_actions() {
        let mut session = session();
        session.turns = TurnOrder::new();
        assert_eq!(session.current_actor(), None);

        session.tick();
        assert_eq!(session.turn_queue(), &[ARIA, BRAM, SLIME]);
        assert_eq!(session.current_actor(), Some(ARIA));
        assert!(session.awaiting_input());
    }

    #[test]
    fn defeated_turn_holder_is_skipped() {
        let mut session = session();
        assert_eq!(session.current_actor(), Some(ARIA));
        session.roster.get_mut(ARIA).unwrap().take_damage(999);

        session.tick();
        assert_eq!(session.current_actor(), Some(BRAM));
        assert_eq!(session.turn_queue(), &[BRAM, SLIME]);
        assert!(session.awaiting_input());
        assert_eq!(session.status(), BattleStatus::Ongoing);
    }

    #[test]
    fn nobody_standing_forces_a_loss() {
        let mut session = session();
        for id in [ARIA, BRAM, SLIME] {
            session.roster.get_mut(id).unwrap().take_damage(999);
        }

        session.tick();
        assert_eq!(session.status(), BattleStatus::Lost);
        assert_eq!(session.message_log().latest(), Some("The party has fallen..."));
        assert!(!session.is_action_processing());
    }

    #[test]
    fn empty_candidate_list_says_so() {
        let mut session = session();
        session.roster.get_mut(SLIME).unwrap().take_damage(999);

        session.open_targeting(ARIA, BattleAction::Attack, TargetGroup::Enemies);
        assert_eq!(session.full_message(), "No target available!");
        assert!(session.valid_targets().is_empty());
        assert_eq!(session.confirm_target(), Ok(false));

        session.cancel_targeting().unwrap();
        assert!(!session.is_action_processing());
        assert_eq!(session.full_message(), "Slime appeared!");
    }

    #[test]
    fn targeting_prompt_when_candidates_exist() {
        let mut session = session();
        session.open_targeting(ARIA, BattleAction::Attack, TargetGroup::All);
        assert_eq!(session.full_message(), "Choose a target.");
        assert_eq!(session.valid_targets(), vec![ARIA, BRAM, SLIME]);
    }
}
