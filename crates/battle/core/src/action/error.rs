//! Action validation errors.

use crate::env::ItemId;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{AbilityKind, CombatantId, ResourceKind};

/// Reasons an action cannot start. Raised before any state changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unknown {kind} '{name}'")]
    UnknownAbility { kind: AbilityKind, name: String },

    #[error("ultimate '{0}' has already been used")]
    UltimateSpent(String),

    #[error("not enough {resource} for {kind} '{ability}': need {required}, have {available}")]
    InsufficientResource {
        kind: AbilityKind,
        resource: ResourceKind,
        ability: String,
        required: u32,
        available: u32,
    },

    #[error("no '{0}' left in the inventory")]
    ItemUnavailable(ItemId),

    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error("{0} is not a valid target")]
    InvalidTarget(CombatantId),

    #[error("action requires a target")]
    NoTarget,

    #[error("{0} is defeated")]
    ActorDefeated(CombatantId),

    #[error("{0} is not in this battle")]
    UnknownCombatant(CombatantId),
}

impl ActionError {
    /// Message shown to the player when the action is rejected.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::UnknownAbility { name, .. } => format!("{name} is not known!"),
            ActionError::UltimateSpent(name) => format!("{name} has already been used!"),
            ActionError::InsufficientResource {
                kind,
                resource,
                ability,
                ..
            } => format!("Not enough {resource} to {} {ability}!", kind.infinitive()),
            ActionError::ItemUnavailable(id) => format!("No {id} left!"),
            ActionError::UnknownItem(id) => format!("{id} cannot be used here!"),
            ActionError::InvalidTarget(_) => "Invalid target!".to_owned(),
            ActionError::NoTarget => "No target available!".to_owned(),
            ActionError::ActorDefeated(_) => "Cannot act while defeated!".to_owned(),
            ActionError::UnknownCombatant(_) => "That combatant is not in this battle!".to_owned(),
        }
    }
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            UltimateSpent(_) | InsufficientResource { .. } | ItemUnavailable(_) | NoTarget => {
                ErrorSeverity::Recoverable
            }
            UnknownAbility { .. } | UnknownItem(_) | InvalidTarget(_) | ActorDefeated(_) => {
                ErrorSeverity::Validation
            }
            UnknownCombatant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnknownAbility { .. } => "ACTION_UNKNOWN_ABILITY",
            UltimateSpent(_) => "ACTION_ULTIMATE_SPENT",
            InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            ItemUnavailable(_) => "ACTION_ITEM_UNAVAILABLE",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            NoTarget => "ACTION_NO_TARGET",
            ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
            UnknownCombatant(_) => "ACTION_UNKNOWN_COMBATANT",
        }
    }
}
