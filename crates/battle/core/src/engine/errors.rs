//! Errors raised by the battle engine.

use crate::action::ActionError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

use super::animation::GatePhase;

/// Reasons a submitted action was rejected. Rejections never consume the
/// turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("the battle is over")]
    BattleOver,

    #[error("another action is in progress")]
    ActionInProgress,

    #[error("{actor} does not hold the current turn")]
    NotCurrentActor {
        actor: CombatantId,
        current: Option<CombatantId>,
    },

    #[error("enemies act on their own")]
    EnemyTurn,

    #[error("no combatant holds the turn")]
    NoActiveTurn,

    #[error(transparent)]
    Rejected(#[from] ActionError),
}

impl BattleError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SubmitError::BattleOver
            | SubmitError::ActionInProgress
            | SubmitError::NotCurrentActor { .. }
            | SubmitError::EnemyTurn => ErrorSeverity::Validation,
            SubmitError::NoActiveTurn => ErrorSeverity::Internal,
            SubmitError::Rejected(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SubmitError::BattleOver => "SUBMIT_BATTLE_OVER",
            SubmitError::ActionInProgress => "SUBMIT_ACTION_IN_PROGRESS",
            SubmitError::NotCurrentActor { .. } => "SUBMIT_NOT_CURRENT_ACTOR",
            SubmitError::EnemyTurn => "SUBMIT_ENEMY_TURN",
            SubmitError::NoActiveTurn => "SUBMIT_NO_ACTIVE_TURN",
            SubmitError::Rejected(inner) => inner.error_code(),
        }
    }
}

/// Targeting controls used without an open session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("no targeting session is active")]
    Inactive,
}

impl BattleError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "TARGETING_INACTIVE"
    }
}

/// The animation gate was asked to start a phase while another was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("cannot start {requested:?} while {active:?} is running")]
    Busy {
        active: GatePhase,
        requested: GatePhase,
    },

    #[error("the idle phase cannot be started")]
    IdleRequested,
}

impl BattleError for GateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            GateError::Busy { .. } => "GATE_BUSY",
            GateError::IdleRequested => "GATE_IDLE_REQUESTED",
        }
    }
}

/// Turn queue faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no living combatants to schedule")]
    NoLivingCombatants,
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "TURN_NO_LIVING_COMBATANTS"
    }
}

/// Invalid battle construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("the party has no members")]
    EmptyParty,

    #[error("the encounter has no enemies")]
    EmptyEncounter,

    #[error("'{0}' is not a player character")]
    NotAPlayer(String),

    #[error("'{0}' is not an enemy")]
    NotAnEnemy(String),

    #[error("{0} combatants exceed the roster limit")]
    TooManyMembers(usize),

    #[error("{requested} active members requested, at most {limit} allowed")]
    TooManyActive { requested: usize, limit: usize },

    #[error("party member {0} does not exist or is listed twice")]
    InvalidMember(u16),

    #[error("no active party member can fight")]
    NoLivingPartyMember,
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            EmptyParty => "SETUP_EMPTY_PARTY",
            EmptyEncounter => "SETUP_EMPTY_ENCOUNTER",
            NotAPlayer(_) => "SETUP_NOT_A_PLAYER",
            NotAnEnemy(_) => "SETUP_NOT_AN_ENEMY",
            TooManyMembers(_) => "SETUP_TOO_MANY_MEMBERS",
            TooManyActive { .. } => "SETUP_TOO_MANY_ACTIVE",
            InvalidMember(_) => "SETUP_INVALID_MEMBER",
            NoLivingPartyMember => "SETUP_NO_LIVING_PARTY_MEMBER",
        }
    }
}
