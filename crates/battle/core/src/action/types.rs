//! Action requests submitted to a battle.

use std::fmt;

use crate::env::ItemId;
use crate::state::{AbilityKind, CombatantId};

/// What a combatant does on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleAction {
    Attack,
    Defend,
    Flee,
    Spell(String),
    Skill(String),
    Ultimate(String),
    UseItem(ItemId),
    /// Report the actor's HP and SP. Never consumes the turn.
    Status,
}

impl BattleAction {
    /// The ability container and name for spell, skill and ultimate actions.
    pub fn ability(&self) -> Option<(AbilityKind, &str)> {
        match self {
            BattleAction::Spell(name) => Some((AbilityKind::Spell, name)),
            BattleAction::Skill(name) => Some((AbilityKind::Skill, name)),
            BattleAction::Ultimate(name) => Some((AbilityKind::Ultimate, name)),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, BattleAction::Attack)
    }
}

impl fmt::Display for BattleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleAction::Attack => f.write_str("attack"),
            BattleAction::Defend => f.write_str("defend"),
            BattleAction::Flee => f.write_str("flee"),
            BattleAction::Spell(name) => write!(f, "spell({name})"),
            BattleAction::Skill(name) => write!(f, "skill({name})"),
            BattleAction::Ultimate(name) => write!(f, "ultimate({name})"),
            BattleAction::UseItem(id) => write!(f, "item({id})"),
            BattleAction::Status => f.write_str("status"),
        }
    }
}

/// An action plus optional actor and target.
///
/// A missing actor means the current turn-holder. A missing target opens a
/// targeting session when the action needs one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: Option<CombatantId>,
    pub action: BattleAction,
    pub target: Option<CombatantId>,
}

impl ActionRequest {
    pub fn new(action: BattleAction) -> Self {
        Self {
            actor: None,
            action,
            target: None,
        }
    }

    #[must_use]
    pub fn by(mut self, actor: CombatantId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub fn at(mut self, target: CombatantId) -> Self {
        self.target = Some(target);
        self
    }
}

impl From<BattleAction> for ActionRequest {
    fn from(action: BattleAction) -> Self {
        Self::new(action)
    }
}
