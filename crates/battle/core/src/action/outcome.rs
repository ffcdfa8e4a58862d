//! Outcomes computed by the resolver and held by the animation gate.

use crate::state::CombatantId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Attacks and counters. Only physical hits trigger on-hit passives.
    Physical,
    Magical,
}

/// The state change an outcome makes once applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeEffect {
    Damage { amount: u32, source: DamageSource },
    Miss,
    Heal { amount: u32 },
    RestoreSp { amount: u32 },
    /// Message only (defend, analyze, scan).
    Report,
    /// Ends the battle as fled.
    Flee,
}

/// A resolved action waiting for its animation to finish.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingOutcome {
    pub actor: CombatantId,
    pub target: Option<CombatantId>,
    pub effect: OutcomeEffect,
    /// Shown when the outcome is applied.
    pub message: String,
    /// Set on outcomes produced by a passive; these never trigger passives.
    pub passive_triggered: bool,
}

impl PendingOutcome {
    pub fn new(
        actor: CombatantId,
        target: Option<CombatantId>,
        effect: OutcomeEffect,
        message: impl Into<String>,
    ) -> Self {
        Self {
            actor,
            target,
            effect,
            message: message.into(),
            passive_triggered: false,
        }
    }

    /// HP change on the target: positive for damage, negative for healing,
    /// zero for everything else.
    pub fn delta(&self) -> i64 {
        match self.effect {
            OutcomeEffect::Damage { amount, .. } => i64::from(amount),
            OutcomeEffect::Heal { amount } => -i64::from(amount),
            _ => 0,
        }
    }

    /// Returns true if this outcome is a landed physical hit.
    pub fn is_physical_hit(&self) -> bool {
        matches!(
            self.effect,
            OutcomeEffect::Damage {
                source: DamageSource::Physical,
                ..
            }
        )
    }
}
