//! Action domain: requests, validation, resolution and outcomes.
//!
//! # Module Structure
//!
//! - `types`: what a combatant asks to do ([`BattleAction`], [`ActionRequest`])
//! - `targeting`: target groups and live candidate lists
//! - `resolver`: validation, cost payment and outcome computation
//! - `outcome`: the [`PendingOutcome`] held by the animation gate
//! - `error`: [`ActionError`]

pub mod error;
pub mod outcome;
pub mod resolver;
pub mod targeting;
pub mod types;

pub use error::ActionError;
pub use outcome::{DamageSource, OutcomeEffect, PendingOutcome};
pub use resolver::{
    Resolution, check_target, initiate, passive_counter, resolve, stats_report, status_report,
    target_group,
};
pub use targeting::{TargetGroup, candidates};
pub use types::{ActionRequest, BattleAction};
