//! Battle participants and their mutable state.
//!
//! - [`Combatant`]: one participant (player character or enemy)
//! - [`Party`]: the player's members, active line-up, leader and inventory
//! - [`Roster`]: everyone in one battle, addressed by [`CombatantId`]

pub mod abilities;
pub mod combatant;
pub mod common;
pub mod party;
pub mod roster;

pub use abilities::{
    Ability, AbilityBook, AbilityEffect, AbilityKind, LearnedAbility, Passive, PassiveBook,
    PassiveEffect, PassiveTrigger, ResourceCost, ResourceKind, Ultimate, UltimateBook,
};
pub use combatant::{CombatStats, Combatant, CombatantKind, EnemyProfile, PlayerProgress};
pub use common::{CombatantId, ResourceMeter, Side};
pub use party::{ActiveLineup, Inventory, Party};
pub use roster::Roster;
