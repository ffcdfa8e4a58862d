//! Data-driven battle content and loaders.
//!
//! This crate houses the static content a battle is built from and provides
//! loaders for RON/TOML data files:
//! - Ability catalogs (spells, skills, ultimates, passives)
//! - Character and enemy classes (data-driven via RON)
//! - Named encounter lists (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Loaded content is bundled into [`BattleContent`], which implements the
//! battle-core oracle traits and never appears in battle state.

pub mod content;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::{AbilityCatalog, BattleContent, ContentIssue};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ClassLoader, ConfigLoader, ContentFactory, EncounterLoader, ItemLoader,
};
