//! Turn scheduling, targeting, animation gating and the battle session.
//!
//! The [`BattleSession`] is the only writer of combatant state while a battle
//! runs. It serializes actions through the [`AnimationGate`]: a second
//! submission while one is in flight is rejected, never queued.

mod animation;
mod errors;
mod session;
mod targeting;
mod turns;

pub use animation::{AnimationGate, GatePhase};
pub use errors::{GateError, SetupError, SubmitError, TargetingError, TurnError};
pub use session::{BattleReport, BattleSession, BattleStatus, SubmitOutcome};
pub use targeting::{TargetSelection, TargetingSession};
pub use turns::TurnOrder;
