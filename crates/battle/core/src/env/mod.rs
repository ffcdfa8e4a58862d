//! Traits describing read-only content the battle consumes.
//!
//! Oracles expose class definitions, ability catalogs, item definitions and
//! encounter lists. The [`BattleEnv`] aggregate bundles them so the session
//! can reach everything it needs without coupling to concrete loaders.
mod classes;
mod encounters;
mod error;
mod items;

use std::fmt;
use std::sync::Arc;

pub use classes::{AbilityUnlock, ClassDefinition, ClassOracle, grant};
pub use encounters::{EncounterOracle, EnemySpec, build_enemies, build_player};
pub use error::OracleError;
pub use items::{ItemDefinition, ItemEffect, ItemId, ItemOracle};

/// Oracles available to a battle session. Both are optional: a battle
/// without classes never unlocks abilities on level-up, and one without items
/// rejects every item action.
#[derive(Clone, Default)]
pub struct BattleEnv {
    classes: Option<Arc<dyn ClassOracle>>,
    items: Option<Arc<dyn ItemOracle>>,
}

impl BattleEnv {
    pub fn new(classes: Option<Arc<dyn ClassOracle>>, items: Option<Arc<dyn ItemOracle>>) -> Self {
        Self { classes, items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_classes(mut self, classes: Arc<dyn ClassOracle>) -> Self {
        self.classes = Some(classes);
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.items = Some(items);
        self
    }

    /// Returns the ClassOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ClassesNotAvailable` if no class oracle was provided.
    pub fn classes(&self) -> Result<&dyn ClassOracle, OracleError> {
        self.classes.as_deref().ok_or(OracleError::ClassesNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&dyn ItemOracle, OracleError> {
        self.items.as_deref().ok_or(OracleError::ItemsNotAvailable)
    }
}

impl fmt::Debug for BattleEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleEnv")
            .field("classes", &self.classes.is_some())
            .field("items", &self.items.is_some())
            .finish()
    }
}
