//! Animation gate.
//!
//! Holds one [`PendingOutcome`] for the length of its animation phase. The
//! timer only runs while the current message is fully displayed, so text
//! pacing and animation pacing never overlap. When the timer expires the gate
//! returns to idle and hands the outcome back for application.

use crate::action::PendingOutcome;
use crate::config::PhaseDurations;

use super::errors::GateError;

/// Animation states. At most one non-idle phase runs at a time.
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
pub enum GatePhase {
    #[default]
    Idle,
    Attacking,
    Defending,
    Casting,
    UsingSkill,
    UsingUltimate,
    UsingItem,
    Fleeing,
    EnemyAttacking,
    Countering,
}

impl GatePhase {
    /// Length of this phase in ticks.
    pub const fn duration(self, durations: &PhaseDurations) -> u32 {
        match self {
            GatePhase::Idle => 0,
            GatePhase::Attacking
            | GatePhase::UsingSkill
            | GatePhase::UsingUltimate
            | GatePhase::EnemyAttacking => durations.strike,
            GatePhase::Defending => durations.defend,
            GatePhase::Casting => durations.cast,
            GatePhase::UsingItem => durations.item,
            GatePhase::Fleeing => durations.flee,
            GatePhase::Countering => durations.counter,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationGate {
    durations: PhaseDurations,
    phase: GatePhase,
    elapsed: u32,
    pending: Option<PendingOutcome>,
}

impl AnimationGate {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            phase: GatePhase::Idle,
            elapsed: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GatePhase::Idle
    }

    pub fn pending(&self) -> Option<&PendingOutcome> {
        self.pending.as_ref()
    }

    /// Ticks elapsed and total ticks of the running phase.
    pub fn progress(&self) -> (u32, u32) {
        (self.elapsed, self.phase.duration(&self.durations))
    }

    /// Starts a phase holding `outcome`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Busy` if a phase is already running, and
    /// `GateError::IdleRequested` for the idle phase.
    pub fn begin(&mut self, phase: GatePhase, outcome: PendingOutcome) -> Result<(), GateError> {
        if !self.is_idle() {
            return Err(GateError::Busy {
                active: self.phase,
                requested: phase,
            });
        }
        if phase == GatePhase::Idle {
            return Err(GateError::IdleRequested);
        }

        self.phase = phase;
        self.elapsed = 0;
        self.pending = Some(outcome);
        Ok(())
    }

    /// Advances the timer by one tick unless text is still typing.
    ///
    /// Returns the finished phase and its outcome when the timer expires.
    pub fn tick(&mut self, message_complete: bool) -> Option<(GatePhase, PendingOutcome)> {
        if self.is_idle() || !message_complete {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(1);
        if self.elapsed < self.phase.duration(&self.durations) {
            return None;
        }

        let finished = std::mem::take(&mut self.phase);
        self.elapsed = 0;
        self.pending.take().map(|outcome| (finished, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::OutcomeEffect;
    use crate::state::CombatantId;

    fn outcome() -> PendingOutcome {
        PendingOutcome::new(CombatantId::party(0), None, OutcomeEffect::Report, "done")
    }

    #[test]
    fn releases_after_duration() {
        let mut gate = AnimationGate::new(PhaseDurations::uniform(3));
        gate.begin(GatePhase::Attacking, outcome()).unwrap();
        assert!(gate.tick(true).is_none());
        assert!(gate.tick(true).is_none());
        let (phase, released) = gate.tick(true).unwrap();
        assert_eq!(phase, GatePhase::Attacking);
        assert_eq!(released.message, "done");
        assert!(gate.is_idle());
    }

    #[test]
    fn typing_text_pauses_the_timer() {
        let mut gate = AnimationGate::new(PhaseDurations::uniform(1));
        gate.begin(GatePhase::Casting, outcome()).unwrap();
        for _ in 0..10 {
            assert!(gate.tick(false).is_none());
        }
        assert_eq!(gate.progress(), (0, 1));
        assert!(gate.tick(true).is_some());
    }

    #[test]
    fn single_flight() {
        let mut gate = AnimationGate::new(PhaseDurations::default());
        gate.begin(GatePhase::Fleeing, outcome()).unwrap();
        assert_eq!(
            gate.begin(GatePhase::Attacking, outcome()),
            Err(GateError::Busy {
                active: GatePhase::Fleeing,
                requested: GatePhase::Attacking,
            })
        );
        assert_eq!(gate.pending().map(|o| o.message.as_str()), Some("done"));
    }

    #[test]
    fn durations_follow_phase() {
        let durations = PhaseDurations::default();
        assert_eq!(GatePhase::EnemyAttacking.duration(&durations), durations.strike);
        assert_eq!(GatePhase::UsingUltimate.duration(&durations), durations.strike);
        assert_eq!(GatePhase::Fleeing.duration(&durations), 90);
        assert_eq!(
            AnimationGate::new(durations).begin(GatePhase::Idle, outcome()),
            Err(GateError::IdleRequested)
        );
    }
}
