//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::{ItemDefinition, ItemEffect, ItemId, TargetGroup};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// One item as written in RON. `targets` defaults to the effect's group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: ItemId,
    pub name: String,
    pub effect: ItemEffect,
    #[serde(default)]
    pub targets: Option<TargetGroup>,
}

impl From<ItemEntry> for ItemDefinition {
    fn from(entry: ItemEntry) -> Self {
        let mut definition = ItemDefinition::new(entry.id, entry.name, entry.effect);
        if let Some(targets) = entry.targets {
            definition.targets = targets;
        }
        definition
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemEntry>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of ItemDefinitions.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = parse_ron(path, "item catalog")?;

        let mut seen = HashSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id.clone()) {
                anyhow::bail!(
                    "Duplicate item '{}' in item catalog {}",
                    item.id,
                    path.display()
                );
            }
        }

        Ok(catalog.items.into_iter().map(ItemDefinition::from).collect())
    }
}
