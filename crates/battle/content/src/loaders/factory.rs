//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, ClassDefinition, EnemySpec, ItemDefinition};

use crate::content::{AbilityCatalog, BattleContent};
use crate::loaders::{
    AbilityLoader, ClassLoader, ConfigLoader, EncounterLoader, ItemLoader, LoadResult,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── classes.ron
/// ├── items.ron
/// └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load class definitions from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load named encounters from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<(String, Vec<EnemySpec>)>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Load every file and cross-check the result.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or malformed file, or lists every
    /// integrity issue found by [`BattleContent::validate`].
    pub fn load(&self) -> LoadResult<BattleContent> {
        let content = BattleContent::new()
            .with_config(self.load_config()?)
            .with_abilities(self.load_abilities()?)
            .with_classes(self.load_classes()?)
            .with_items(self.load_items()?)
            .with_encounters(self.load_encounters()?);

        let issues = content.validate();
        if !issues.is_empty() {
            let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
            anyhow::bail!(
                "Invalid content in {}:\n  {}",
                self.data_dir.display(),
                details.join("\n  ")
            );
        }

        tracing::debug!(
            data_dir = %self.data_dir.display(),
            classes = content.class_ids().len(),
            abilities = content.abilities().len(),
            items = content.item_count(),
            "loaded battle content"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
