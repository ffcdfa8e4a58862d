//! Deterministic, tick-driven turn-based battle engine.
//!
//! `battle-core` resolves a complete encounter between a party and a group
//! of enemies: turn ordering, action validation, targeting, damage and
//! healing, passive counters and victory/defeat detection. Presentation
//! (animation timing and the message log) is modelled as explicit state so
//! any driver can run a battle: a real-time loop, a test clock or a headless
//! simulation. All battle state mutation flows through
//! [`engine::BattleSession`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod message;
pub mod rng;
pub mod state;

pub use action::{
    ActionError, ActionRequest, BattleAction, DamageSource, OutcomeEffect, PendingOutcome,
    TargetGroup,
};
pub use combat::{Chance, hit_chance, magic_damage, physical_damage};
pub use config::{BattleConfig, PhaseDurations};
pub use engine::{
    AnimationGate, BattleReport, BattleSession, BattleStatus, GateError, GatePhase, SetupError,
    SubmitError, SubmitOutcome, TargetSelection, TargetingError, TargetingSession, TurnError,
    TurnOrder,
};
pub use env::{
    AbilityUnlock, BattleEnv, ClassDefinition, ClassOracle, EncounterOracle, EnemySpec,
    ItemDefinition, ItemEffect, ItemId, ItemOracle, OracleError, build_enemies, build_player,
};
pub use error::{BattleError, ErrorSeverity};
pub use message::{MessageLog, TypewriterText};
pub use rng::{PcgRng, RngSource, SequenceRng};
pub use state::{
    Ability, AbilityEffect, AbilityKind, CombatStats, Combatant, CombatantId, CombatantKind,
    Inventory, LearnedAbility, Party, Passive, PassiveEffect, PassiveTrigger, ResourceCost,
    ResourceKind, ResourceMeter, Roster, Side,
};
